//! The partner laboratory directory.

use crate::error::MarketResult;
use crate::model::{LabAccount, Nurse};
use crate::seed;
use labstore_core::{Collection, CoreError, Store};
use serde_json::Value;

/// Partner laboratories and their nurse rosters.
///
/// Owns the `"laboratories"` collection. Laboratories edit their own profile
/// and staff; admins adjust commission rates.
pub struct LabDirectory {
    laboratories: Collection<LabAccount>,
}

impl LabDirectory {
    /// Opens the directory over the given store, seeding on first load.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection key is invalid or already claimed.
    pub fn open(store: &Store) -> MarketResult<Self> {
        Ok(Self {
            laboratories: store.collection("laboratories", seed::laboratories())?,
        })
    }

    /// Returns all laboratories in directory order.
    #[must_use]
    pub fn list(&self) -> Vec<LabAccount> {
        self.laboratories.list()
    }

    /// Returns the laboratory with the given id.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<LabAccount> {
        self.laboratories.get(id)
    }

    /// Returns whether a laboratory with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.laboratories.contains(id)
    }

    /// Registers a laboratory.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate id or failed write.
    pub fn add(&self, laboratory: LabAccount) -> MarketResult<()> {
        Ok(self.laboratories.insert(laboratory)?)
    }

    /// Shallow-merges a field patch into a laboratory profile.
    ///
    /// # Errors
    ///
    /// Returns an error on a malformed patch or failed write.
    pub fn update(&self, id: &str, patch: Value) -> MarketResult<bool> {
        Ok(self.laboratories.update(id, patch)?)
    }

    /// Removes a laboratory from the directory.
    ///
    /// Offers and orders referencing it are left alone - references are
    /// informal and never cascade.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn remove(&self, id: &str) -> MarketResult<bool> {
        Ok(self.laboratories.remove(id)?)
    }

    /// Sets the platform commission rate for a laboratory.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is outside `0.0..=1.0` or the write
    /// fails.
    pub fn set_commission(&self, id: &str, rate: f64) -> MarketResult<bool> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(CoreError::invalid_patch(format!(
                "commission rate {rate} outside 0.0..=1.0"
            ))
            .into());
        }
        Ok(self.laboratories.update_with(id, |lab| lab.commission = rate)?)
    }

    /// Adds a nurse to a laboratory's roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster already has a nurse with that id, or
    /// the write fails.
    pub fn add_nurse(&self, lab_id: &str, nurse: Nurse) -> MarketResult<bool> {
        let duplicate = self
            .laboratories
            .get(lab_id)
            .is_some_and(|lab| lab.nurses.iter().any(|n| n.id == nurse.id));
        if duplicate {
            return Err(CoreError::duplicate_id("laboratories/nurses", &nurse.id).into());
        }
        Ok(self
            .laboratories
            .update_with(lab_id, |lab| lab.nurses.push(nurse))?)
    }

    /// Removes a nurse from a laboratory's roster.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn remove_nurse(&self, lab_id: &str, nurse_id: &str) -> MarketResult<bool> {
        Ok(self
            .laboratories
            .update_with(lab_id, |lab| lab.nurses.retain(|n| n.id != nurse_id))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarketError;

    fn directory() -> LabDirectory {
        let store = Store::open_in_memory().unwrap();
        LabDirectory::open(&store).unwrap()
    }

    fn nurse(id: &str) -> Nurse {
        Nurse {
            id: id.into(),
            name: "Leila Saidi".into(),
            phone: "+212 6 00 00 00 00".into(),
            license: "INF-9999".into(),
            availability: vec!["Lun-Ven 9h-17h".into()],
        }
    }

    #[test]
    fn seeds_two_laboratories() {
        let directory = directory();
        assert_eq!(directory.list().len(), 2);
        assert!(directory.contains("lab_biocentral"));
    }

    #[test]
    fn commission_rate_is_bounded() {
        let directory = directory();

        assert!(directory.set_commission("lab_atlas", 0.2).unwrap());
        assert_eq!(directory.by_id("lab_atlas").unwrap().commission, 0.2);

        let result = directory.set_commission("lab_atlas", 1.5);
        assert!(matches!(result, Err(MarketError::Core(_))));
    }

    #[test]
    fn nurse_roster_add_remove() {
        let directory = directory();

        assert!(directory.add_nurse("lab_atlas", nurse("nurse_leila")).unwrap());
        let lab = directory.by_id("lab_atlas").unwrap();
        assert_eq!(lab.nurses.len(), 2);

        assert!(directory.remove_nurse("lab_atlas", "nurse_leila").unwrap());
        assert_eq!(directory.by_id("lab_atlas").unwrap().nurses.len(), 1);
    }

    #[test]
    fn duplicate_nurse_id_is_rejected() {
        let directory = directory();

        let result = directory.add_nurse("lab_atlas", nurse("nurse_khadija"));
        assert!(result.is_err());
        assert_eq!(directory.by_id("lab_atlas").unwrap().nurses.len(), 1);
    }

    #[test]
    fn missing_laboratory_is_a_noop() {
        let directory = directory();
        assert!(!directory.remove("lab_nowhere").unwrap());
        assert!(!directory.add_nurse("lab_nowhere", nurse("n1")).unwrap());
    }
}
