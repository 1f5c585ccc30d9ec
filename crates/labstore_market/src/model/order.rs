//! Patient orders.

use crate::model::{Test, TestPack};
use chrono::{DateTime, Utc};
use labstore_core::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, awaiting scheduling.
    Pending,
    /// Sampling date and time chosen.
    Scheduled,
    /// Confirmed by the assigned laboratory.
    Confirmed,
    /// Samples taken, analysis running.
    InProgress,
    /// Results delivered.
    Completed,
    /// Cancelled by the patient or the laboratory.
    Cancelled,
}

impl OrderStatus {
    /// Returns whether the order can still change.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Scheduled => write!(f, "scheduled"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Where the samples are taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderLocation {
    /// A nurse comes to the patient's address.
    Home,
    /// The patient visits the laboratory.
    Laboratory,
}

/// A patient order for one or more analyses.
///
/// Tests and the optional pack are embedded copies taken at checkout, so a
/// later catalog price change does not rewrite history. The assigned
/// laboratory and nurse are referenced by display name, as the scheduling
/// screens recorded them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Stable unique identifier.
    pub id: String,
    /// Ordering patient's id.
    pub patient_id: String,
    /// Ordering patient's display name.
    pub patient_name: String,
    /// Tests in the order, copied from the catalog at checkout.
    pub tests: Vec<Test>,
    /// Pack in the order, if the patient chose one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pack: Option<TestPack>,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Sampling location.
    pub location: OrderLocation,
    /// Sampling address for home orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Chosen sampling date, e.g. `"2024-05-10"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    /// Chosen sampling time slot, e.g. `"09:30"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
    /// Display name of the laboratory handling the order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_laboratory: Option<String>,
    /// Display name of the nurse sent for home sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_nurse: Option<String>,
    /// Total price in MAD.
    pub price: f64,
    /// Whether payment has been taken.
    pub paid: bool,
    /// Placement time.
    pub created_at: DateTime<Utc>,
    /// Results document URL, once uploaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_url: Option<String>,
    /// Prescription document URL, if one was required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescription_url: Option<String>,
    /// Whether the laboratory confirmed the appointment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_by_lab: Option<bool>,
    /// When the laboratory confirmed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl Record for Order {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(OrderStatus::InProgress).unwrap(),
            "in_progress"
        );
        assert_eq!(serde_json::to_value(OrderLocation::Home).unwrap(), "home");
    }

    #[test]
    fn terminal_states() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::InProgress.is_terminal());
    }
}
