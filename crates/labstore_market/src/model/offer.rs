//! Laboratory promotional offers.

use chrono::{DateTime, Utc};
use labstore_core::Record;
use serde::{Deserialize, Serialize};

/// A promotional offer published by a laboratory.
///
/// `lab_id` is an informal foreign key into the laboratory directory;
/// deleting the laboratory does not cascade here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    /// Stable unique identifier.
    pub id: String,
    /// Id of the publishing laboratory.
    pub lab_id: String,
    /// Offer headline.
    pub title: String,
    /// Patient-facing description.
    pub description: String,
    /// Offer price in MAD, before commission.
    pub price: f64,
    /// Illustration URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Whether the offer is currently visible to patients.
    pub active: bool,
    /// Whether publication is gated on admin approval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_admin_approval: Option<bool>,
    /// Approval state, once reviewed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    /// Publication time.
    pub created_at: DateTime<Utc>,
}

impl Offer {
    /// Returns whether patients may see the offer: active, and approved
    /// whenever approval is required.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        let approval_ok = match self.requires_admin_approval {
            Some(true) => self.approved == Some(true),
            _ => true,
        };
        self.active && approval_ok
    }
}

impl Record for Offer {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn offer(active: bool, requires: Option<bool>, approved: Option<bool>) -> Offer {
        Offer {
            id: "o1".into(),
            lab_id: "lab_1".into(),
            title: "Bilan lipidique -20%".into(),
            description: "Offre de printemps".into(),
            price: 180.0,
            image_url: None,
            active,
            requires_admin_approval: requires,
            approved,
            created_at: Utc.with_ymd_and_hms(2024, 4, 2, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn visibility_requires_active() {
        assert!(!offer(false, None, None).is_visible());
        assert!(offer(true, None, None).is_visible());
    }

    #[test]
    fn visibility_waits_for_approval() {
        assert!(!offer(true, Some(true), None).is_visible());
        assert!(!offer(true, Some(true), Some(false)).is_visible());
        assert!(offer(true, Some(true), Some(true)).is_visible());
        // No approval gate: approved flag is irrelevant
        assert!(offer(true, Some(false), None).is_visible());
    }
}
