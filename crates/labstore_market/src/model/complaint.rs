//! Complaints and their resolution flow.

use crate::model::UserRole;
use chrono::{DateTime, Utc};
use labstore_core::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Complaint lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    /// Filed, not yet picked up.
    Open,
    /// Assigned to an agent.
    InProgress,
    /// Escalated to a manager.
    Escalated,
    /// Resolved, awaiting closure.
    Resolved,
    /// Closed.
    Closed,
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Escalated => write!(f, "escalated"),
            Self::Resolved => write!(f, "resolved"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Complaint triage priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintPriority {
    /// Cosmetic or informational.
    Low,
    /// Default.
    Medium,
    /// Blocking the reporter.
    High,
    /// Requires immediate attention.
    Urgent,
}

/// One message on a complaint thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintMessage {
    /// Stable unique identifier.
    pub id: String,
    /// Sender's account id.
    pub sender_id: String,
    /// Sender's display name.
    pub sender_name: String,
    /// Sender's role.
    pub sender_role: UserRole,
    /// Message body.
    pub message: String,
    /// Send time.
    pub timestamp: DateTime<Utc>,
    /// Whether the message is agent-only (hidden from the reporter).
    pub is_internal: bool,
}

/// An agent-only note attached to a complaint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalNote {
    /// Stable unique identifier.
    pub id: String,
    /// Author's account id.
    pub author_id: String,
    /// Author's display name.
    pub author_name: String,
    /// Note body.
    pub note: String,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
}

/// Kind of compensation granted to a complainant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompensationKind {
    /// Money back to the original payment method.
    Refund,
    /// Platform credit.
    Credit,
}

/// Approval state of a compensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompensationStatus {
    /// Proposed by an agent.
    Pending,
    /// Approved by a manager.
    Approved,
    /// Paid out or credited.
    Completed,
}

/// A compensation proposed on a complaint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compensation {
    /// Stable unique identifier.
    pub id: String,
    /// Amount in MAD.
    pub amount: f64,
    /// Refund or credit.
    #[serde(rename = "type")]
    pub kind: CompensationKind,
    /// Approval state.
    pub status: CompensationStatus,
    /// Approving manager's display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    /// Approval time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// Completion time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// A complaint filed by a patient or a laboratory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    /// Stable unique identifier.
    pub id: String,
    /// Reporter's account id.
    pub user_id: String,
    /// Reporter's display name.
    pub user_name: String,
    /// Reporter's role (patients and laboratories may file).
    pub user_role: UserRole,
    /// Related order, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Short subject line.
    pub subject: String,
    /// Full description.
    pub description: String,
    /// Lifecycle status.
    pub status: ComplaintStatus,
    /// Triage priority.
    pub priority: ComplaintPriority,
    /// Assigned agent's id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_agent_id: Option<String>,
    /// Assigned agent's display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_agent_name: Option<String>,
    /// Filing time.
    pub created_at: DateTime<Utc>,
    /// Last activity time.
    pub updated_at: DateTime<Utc>,
    /// Conversation thread.
    pub messages: Vec<ComplaintMessage>,
    /// Agent-only notes.
    pub internal_notes: Vec<InternalNote>,
    /// Compensation, once proposed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compensation: Option<Compensation>,
}

impl Record for Complaint {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compensation_kind_serializes_as_type() {
        let compensation = Compensation {
            id: "c1".into(),
            amount: 120.0,
            kind: CompensationKind::Refund,
            status: CompensationStatus::Pending,
            approved_by: None,
            approved_at: None,
            completed_at: None,
        };

        let value = serde_json::to_value(&compensation).unwrap();
        assert_eq!(value["type"], "refund");
        assert_eq!(value["status"], "pending");
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(ComplaintStatus::InProgress).unwrap(),
            "in_progress"
        );
        assert_eq!(
            serde_json::to_value(ComplaintPriority::Urgent).unwrap(),
            "urgent"
        );
    }
}
