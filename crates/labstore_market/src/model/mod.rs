//! Domain model types.
//!
//! Field names serialize in camelCase so an existing store written by earlier
//! versions of the marketplace hydrates as-is; stored values are trusted
//! without schema versioning or migration.

mod complaint;
mod faq;
mod offer;
mod order;
mod user;

pub use complaint::{
    Compensation, CompensationKind, CompensationStatus, Complaint, ComplaintMessage,
    ComplaintPriority, ComplaintStatus, InternalNote,
};
pub use faq::FaqEntry;
pub use offer::Offer;
pub use order::{Order, OrderLocation, OrderStatus};
pub use test::{Test, TestPack};
pub use user::{
    AdminAccount, AgentAccount, AgentType, Gender, Identity, LabAccount, Nurse, PatientAccount,
    User, UserRole,
};
