//! Accounts and roles.

use chrono::{DateTime, Utc};
use labstore_core::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four marketplace roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Books analyses and receives results.
    Patient,
    /// Performs analyses and publishes offers.
    Laboratory,
    /// Manages the catalog, users, and commissions.
    Admin,
    /// Handles complaints.
    Agent,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patient => write!(f, "patient"),
            Self::Laboratory => write!(f, "laboratory"),
            Self::Admin => write!(f, "admin"),
            Self::Agent => write!(f, "agent"),
        }
    }
}

/// Fields shared by every account, regardless of role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Stable unique identifier.
    pub id: String,
    /// Sign-in email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

/// Patient gender as recorded on the medical profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    M,
    /// Female.
    F,
    /// Other / undisclosed.
    Other,
}

/// A patient account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientAccount {
    /// Common account fields.
    #[serde(flatten)]
    pub identity: Identity,
    /// Birth date as entered, e.g. `"1990-04-12"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    /// Gender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Blood type, e.g. `"O+"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    /// Known allergies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    /// Free-form medical history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
}

/// A nurse on a laboratory's roster, available for home sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nurse {
    /// Stable unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact phone.
    pub phone: String,
    /// Professional license number.
    pub license: String,
    /// Weekday/time-slot availability labels.
    pub availability: Vec<String>,
}

/// A partner laboratory account.
///
/// Also the record type of the laboratory directory collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabAccount {
    /// Common account fields.
    #[serde(flatten)]
    pub identity: Identity,
    /// Public laboratory name.
    pub lab_name: String,
    /// Operating license number.
    pub license: String,
    /// Nurse roster.
    pub nurses: Vec<Nurse>,
    /// Platform commission rate applied to this laboratory, `0.0..=1.0`.
    pub commission: f64,
}

/// A platform administrator account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccount {
    /// Common account fields.
    #[serde(flatten)]
    pub identity: Identity,
    /// Granted permission labels.
    pub permissions: Vec<String>,
}

/// Support agent seniority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    /// Front-line support.
    Support,
    /// Manages other agents.
    Manager,
}

/// A support agent account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentAccount {
    /// Common account fields.
    #[serde(flatten)]
    pub identity: Identity,
    /// Department label.
    pub department: String,
    /// Seniority.
    pub agent_type: AgentType,
    /// Number of complaints currently assigned.
    pub assigned_complaints: u32,
    /// Agent ids managed by this agent (managers only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_agent_ids: Option<Vec<String>>,
}

/// Any marketplace account, tagged by role.
///
/// Serializes flat, with a `"role"` discriminator next to the account
/// fields - the shape the login and profile screens store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum User {
    /// A patient.
    Patient(PatientAccount),
    /// A partner laboratory.
    Laboratory(LabAccount),
    /// An administrator.
    Admin(AdminAccount),
    /// A support agent.
    Agent(AgentAccount),
}

impl User {
    /// Returns the common account fields.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        match self {
            Self::Patient(a) => &a.identity,
            Self::Laboratory(a) => &a.identity,
            Self::Admin(a) => &a.identity,
            Self::Agent(a) => &a.identity,
        }
    }

    /// Returns the sign-in email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.identity().email
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.identity().name
    }

    /// Returns the account's role.
    #[must_use]
    pub fn role(&self) -> UserRole {
        match self {
            Self::Patient(_) => UserRole::Patient,
            Self::Laboratory(_) => UserRole::Laboratory,
            Self::Admin(_) => UserRole::Admin,
            Self::Agent(_) => UserRole::Agent,
        }
    }

    /// Returns the laboratory account, if this user is one.
    #[must_use]
    pub fn as_laboratory(&self) -> Option<&LabAccount> {
        match self {
            Self::Laboratory(lab) => Some(lab),
            _ => None,
        }
    }
}

impl Record for User {
    fn id(&self) -> &str {
        &self.identity().id
    }
}

impl Record for LabAccount {
    fn id(&self) -> &str {
        &self.identity.id
    }
}
