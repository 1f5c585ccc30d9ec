//! The analysis catalog service.

use crate::error::MarketResult;
use crate::model::{Test, TestPack};
use crate::seed;
use labstore_core::{Collection, Store};
use serde_json::Value;

/// Tests and packs offered on the marketplace.
///
/// Owns the `"tests"` and `"packs"` collections. Admins manage the catalog;
/// patients browse it. Pack membership references tests by id and is
/// resolved here, not enforced by the store.
pub struct Catalog {
    tests: Collection<Test>,
    packs: Collection<TestPack>,
}

impl Catalog {
    /// Opens the catalog over the given store, seeding on first load.
    ///
    /// # Errors
    ///
    /// Returns an error if either collection key is invalid or already
    /// claimed.
    pub fn open(store: &Store) -> MarketResult<Self> {
        Ok(Self {
            tests: store.collection("tests", seed::tests())?,
            packs: store.collection("packs", seed::packs())?,
        })
    }

    /// Returns all tests in catalog order.
    #[must_use]
    pub fn tests(&self) -> Vec<Test> {
        self.tests.list()
    }

    /// Returns all packs in catalog order.
    #[must_use]
    pub fn packs(&self) -> Vec<TestPack> {
        self.packs.list()
    }

    /// Returns the test with the given id.
    #[must_use]
    pub fn test_by_id(&self, id: &str) -> Option<Test> {
        self.tests.get(id)
    }

    /// Returns the pack with the given id.
    #[must_use]
    pub fn pack_by_id(&self, id: &str) -> Option<TestPack> {
        self.packs.get(id)
    }

    /// Returns the tests in the given category, in catalog order.
    #[must_use]
    pub fn tests_in_category(&self, category: &str) -> Vec<Test> {
        self.tests.filter(|t| t.category == category)
    }

    /// Adds a test to the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate id or failed write.
    pub fn add_test(&self, test: Test) -> MarketResult<()> {
        Ok(self.tests.insert(test)?)
    }

    /// Shallow-merges a field patch into a test.
    ///
    /// # Errors
    ///
    /// Returns an error on a malformed patch or failed write.
    pub fn update_test(&self, id: &str, patch: Value) -> MarketResult<bool> {
        Ok(self.tests.update(id, patch)?)
    }

    /// Removes a test from the catalog.
    ///
    /// Packs referencing it are not rewritten; membership is resolved at
    /// read time and dangling ids simply drop out.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn remove_test(&self, id: &str) -> MarketResult<bool> {
        Ok(self.tests.remove(id)?)
    }

    /// Adds a pack to the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate id or failed write.
    pub fn add_pack(&self, pack: TestPack) -> MarketResult<()> {
        Ok(self.packs.insert(pack)?)
    }

    /// Shallow-merges a field patch into a pack.
    ///
    /// # Errors
    ///
    /// Returns an error on a malformed patch or failed write.
    pub fn update_pack(&self, id: &str, patch: Value) -> MarketResult<bool> {
        Ok(self.packs.update(id, patch)?)
    }

    /// Removes a pack from the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn remove_pack(&self, id: &str) -> MarketResult<bool> {
        Ok(self.packs.remove(id)?)
    }

    /// Resolves a pack's member tests, skipping dangling references.
    #[must_use]
    pub fn tests_in_pack(&self, pack_id: &str) -> Vec<Test> {
        let Some(pack) = self.packs.get(pack_id) else {
            return Vec::new();
        };
        pack.tests
            .iter()
            .filter_map(|id| self.tests.get(id))
            .collect()
    }

    /// Sum of a pack's resolved member prices, before the pack discount.
    ///
    /// The pack's own `price` field is what patients pay; this is the
    /// comparison figure the catalog screens show next to it.
    #[must_use]
    pub fn pack_member_total(&self, pack_id: &str) -> f64 {
        self.tests_in_pack(pack_id).iter().map(|t| t.price).sum()
    }
}
