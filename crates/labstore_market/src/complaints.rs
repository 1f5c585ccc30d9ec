//! The complaint desk.

use crate::error::MarketResult;
use crate::model::{
    Compensation, CompensationStatus, Complaint, ComplaintMessage, ComplaintStatus, InternalNote,
};
use chrono::Utc;
use labstore_core::{Collection, Store};
use tracing::debug;

/// Complaints, agent assignment, and compensation.
///
/// Owns the `"complaints"` collection, which starts empty. Every mutation
/// restamps the complaint's `updated_at`.
pub struct ComplaintDesk {
    complaints: Collection<Complaint>,
}

impl ComplaintDesk {
    /// Opens the complaint desk over the given store.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection key is invalid or already claimed.
    pub fn open(store: &Store) -> MarketResult<Self> {
        Ok(Self {
            complaints: store.collection("complaints", Vec::new())?,
        })
    }

    /// Returns all complaints in filing order.
    #[must_use]
    pub fn list(&self) -> Vec<Complaint> {
        self.complaints.list()
    }

    /// Returns the complaint with the given id.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<Complaint> {
        self.complaints.get(id)
    }

    /// Returns the complaints assigned to an agent.
    #[must_use]
    pub fn for_agent(&self, agent_id: &str) -> Vec<Complaint> {
        self.complaints
            .filter(|c| c.assigned_agent_id.as_deref() == Some(agent_id))
    }

    /// Returns the complaints filed by a user.
    #[must_use]
    pub fn for_reporter(&self, user_id: &str) -> Vec<Complaint> {
        self.complaints.filter(|c| c.user_id == user_id)
    }

    /// Returns how many complaints are still open or being worked.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.complaints
            .filter(|c| {
                matches!(
                    c.status,
                    ComplaintStatus::Open | ComplaintStatus::InProgress | ComplaintStatus::Escalated
                )
            })
            .len()
    }

    /// Files a complaint.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate id or failed write.
    pub fn file(&self, complaint: Complaint) -> MarketResult<()> {
        debug!(complaint = %complaint.id, reporter = %complaint.user_id, "complaint filed");
        Ok(self.complaints.insert(complaint)?)
    }

    fn touch(&self, id: &str, edit: impl FnOnce(&mut Complaint)) -> MarketResult<bool> {
        Ok(self.complaints.update_with(id, |complaint| {
            edit(complaint);
            complaint.updated_at = Utc::now();
        })?)
    }

    /// Assigns the complaint to an agent and moves it in progress.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn assign(&self, id: &str, agent_id: &str, agent_name: &str) -> MarketResult<bool> {
        self.touch(id, |complaint| {
            complaint.assigned_agent_id = Some(agent_id.to_string());
            complaint.assigned_agent_name = Some(agent_name.to_string());
            complaint.status = ComplaintStatus::InProgress;
        })
    }

    /// Appends a message to the complaint thread.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn add_message(&self, id: &str, message: ComplaintMessage) -> MarketResult<bool> {
        self.touch(id, |complaint| complaint.messages.push(message))
    }

    /// Attaches an agent-only note.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn add_note(&self, id: &str, note: InternalNote) -> MarketResult<bool> {
        self.touch(id, |complaint| complaint.internal_notes.push(note))
    }

    /// Escalates the complaint to a manager.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn escalate(&self, id: &str) -> MarketResult<bool> {
        self.touch(id, |complaint| complaint.status = ComplaintStatus::Escalated)
    }

    /// Marks the complaint resolved.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn resolve(&self, id: &str) -> MarketResult<bool> {
        self.touch(id, |complaint| complaint.status = ComplaintStatus::Resolved)
    }

    /// Closes the complaint.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn close(&self, id: &str) -> MarketResult<bool> {
        self.touch(id, |complaint| complaint.status = ComplaintStatus::Closed)
    }

    /// Attaches a proposed compensation to the complaint.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn propose_compensation(&self, id: &str, compensation: Compensation) -> MarketResult<bool> {
        self.touch(id, |complaint| complaint.compensation = Some(compensation))
    }

    /// Approves the complaint's proposed compensation.
    ///
    /// No-op if no compensation has been proposed.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn approve_compensation(&self, id: &str, approver: &str) -> MarketResult<bool> {
        self.touch(id, |complaint| {
            if let Some(compensation) = &mut complaint.compensation {
                compensation.status = CompensationStatus::Approved;
                compensation.approved_by = Some(approver.to_string());
                compensation.approved_at = Some(Utc::now());
            }
        })
    }
}
