//! Accounts and the signed-in session.

use crate::error::{MarketError, MarketResult};
use crate::model::{User, UserRole};
use crate::seed;
use labstore_core::{Collection, Session, Store};
use serde_json::Value;
use tracing::debug;

/// Marketplace accounts and the current session.
///
/// Owns the `"users"` collection and the `"user"` session singleton.
///
/// Sign-in is a demo flow: the email is matched case-insensitively against
/// stored accounts and the matching record becomes the session. There is no
/// password verification and no credential storage - this is a local-first
/// demo marketplace, not an authentication system.
pub struct Accounts {
    users: Collection<User>,
    session: Session<User>,
}

impl Accounts {
    /// Opens accounts over the given store, seeding the demo users on
    /// first load.
    ///
    /// # Errors
    ///
    /// Returns an error if either key is invalid or already claimed.
    pub fn open(store: &Store) -> MarketResult<Self> {
        Ok(Self {
            users: store.collection("users", seed::users())?,
            session: store.session("user")?,
        })
    }

    /// Returns all accounts in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.users.list()
    }

    /// Returns the account with the given id.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<User> {
        self.users.get(id)
    }

    /// Returns the account with the given email, case-insensitively.
    #[must_use]
    pub fn by_email(&self, email: &str) -> Option<User> {
        let needle = email.trim().to_lowercase();
        self.users
            .list()
            .into_iter()
            .find(|u| u.email().to_lowercase() == needle)
    }

    /// Returns all accounts with the given role.
    #[must_use]
    pub fn by_role(&self, role: UserRole) -> Vec<User> {
        self.users.filter(|u| u.role() == role)
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::EmailTaken`] if an account already uses the
    /// email, or a store error on duplicate id / failed write.
    pub fn register(&self, user: User) -> MarketResult<()> {
        if self.by_email(user.email()).is_some() {
            return Err(MarketError::EmailTaken {
                email: user.email().to_string(),
            });
        }
        Ok(self.users.insert(user)?)
    }

    /// Shallow-merges a field patch into an account.
    ///
    /// # Errors
    ///
    /// Returns an error on a malformed patch or failed write.
    pub fn update_profile(&self, id: &str, patch: Value) -> MarketResult<bool> {
        Ok(self.users.update(id, patch)?)
    }

    /// Removes an account.
    ///
    /// The session is not touched even if it references the removed
    /// account; it expires at the next sign-out.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn remove(&self, id: &str) -> MarketResult<bool> {
        Ok(self.users.remove(id)?)
    }

    /// Signs in by email and returns the matched account.
    ///
    /// Returns `None` without touching the session when no account
    /// matches.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the session fails.
    pub fn sign_in(&self, email: &str) -> MarketResult<Option<User>> {
        let Some(user) = self.by_email(email) else {
            return Ok(None);
        };

        self.session.sign_in(user.clone())?;
        debug!(user = %user.identity().id, role = %user.role(), "signed in");
        Ok(Some(user))
    }

    /// Signs the current user out.
    ///
    /// # Errors
    ///
    /// Returns an error if removing the durable session fails.
    pub fn sign_out(&self) -> MarketResult<()> {
        self.session.sign_out()?;
        debug!("signed out");
        Ok(())
    }

    /// Returns the signed-in account, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.session.current()
    }

    /// Returns whether someone is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Identity, PatientAccount};
    use chrono::Utc;

    fn accounts() -> Accounts {
        let store = Store::open_in_memory().unwrap();
        Accounts::open(&store).unwrap()
    }

    fn patient(id: &str, email: &str) -> User {
        User::Patient(PatientAccount {
            identity: Identity {
                id: id.into(),
                email: email.into(),
                name: "Nouveau Patient".into(),
                phone: None,
                address: None,
                created_at: Utc::now(),
            },
            date_of_birth: None,
            gender: None,
            blood_type: None,
            allergies: None,
            medical_history: None,
        })
    }

    #[test]
    fn sign_in_matches_email_case_insensitively() {
        let accounts = accounts();

        let user = accounts.sign_in("AMINA@Example.COM").unwrap().unwrap();
        assert_eq!(user.identity().id, "patient_amina");
        assert!(accounts.is_authenticated());
        assert_eq!(
            accounts.current_user().unwrap().identity().id,
            "patient_amina"
        );
    }

    #[test]
    fn sign_in_unknown_email_leaves_session_empty() {
        let accounts = accounts();

        assert!(accounts.sign_in("nobody@example.com").unwrap().is_none());
        assert!(!accounts.is_authenticated());
    }

    #[test]
    fn laboratory_accounts_can_sign_in() {
        let accounts = accounts();

        let user = accounts.sign_in("contact@biocentral.ma").unwrap().unwrap();
        assert_eq!(user.role(), UserRole::Laboratory);
    }

    #[test]
    fn sign_out_clears_session() {
        let accounts = accounts();
        accounts.sign_in("amina@example.com").unwrap();

        accounts.sign_out().unwrap();
        assert!(!accounts.is_authenticated());
        assert!(accounts.current_user().is_none());
    }

    #[test]
    fn register_rejects_taken_email() {
        let accounts = accounts();

        let result = accounts.register(patient("patient_new", "amina@example.com"));
        assert!(matches!(result, Err(MarketError::EmailTaken { .. })));

        accounts
            .register(patient("patient_new", "new@example.com"))
            .unwrap();
        assert!(accounts.by_id("patient_new").is_some());
    }

    #[test]
    fn by_role_partitions_accounts() {
        let accounts = accounts();

        let labs = accounts.by_role(UserRole::Laboratory);
        assert_eq!(labs.len(), 2);
        assert!(labs.iter().all(|u| u.role() == UserRole::Laboratory));
        assert_eq!(accounts.by_role(UserRole::Admin).len(), 1);
    }
}
