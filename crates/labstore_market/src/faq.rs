//! The help-center FAQ service.

use crate::error::MarketResult;
use crate::model::FaqEntry;
use crate::seed;
use chrono::Utc;
use labstore_core::{fresh_id, Collection, Store};

/// A partial edit to a FAQ entry.
///
/// `None` fields are left unchanged; the entry's `updated_at` is restamped
/// on every applied patch.
#[derive(Debug, Clone, Default)]
pub struct FaqPatch {
    /// New question text.
    pub question: Option<String>,
    /// New answer text.
    pub answer: Option<String>,
    /// New tag set.
    pub tags: Option<Vec<String>>,
}

/// The help-center FAQ.
///
/// Owns the `"faq"` collection. New entries go to the *front* - the help
/// screen shows newest first - so this service composes its own ordering on
/// top of the append-only collection insert.
pub struct FaqBook {
    entries: Collection<FaqEntry>,
}

impl FaqBook {
    /// Opens the FAQ over the given store, seeding on first load.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection key is invalid or already claimed.
    pub fn open(store: &Store) -> MarketResult<Self> {
        Ok(Self {
            entries: store.collection("faq", seed::faq())?,
        })
    }

    /// Returns all entries, newest first.
    #[must_use]
    pub fn list(&self) -> Vec<FaqEntry> {
        self.entries.list()
    }

    /// Returns the entry with the given id.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<FaqEntry> {
        self.entries.get(id)
    }

    /// Adds an entry at the front and returns its generated id.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn add(
        &self,
        question: impl Into<String>,
        answer: impl Into<String>,
        tags: Vec<String>,
    ) -> MarketResult<String> {
        let entry = FaqEntry {
            id: fresh_id("faq"),
            question: question.into(),
            answer: answer.into(),
            tags,
            updated_at: Utc::now(),
        };
        let id = entry.id.clone();

        let mut next = vec![entry];
        next.extend(self.entries.list());
        self.entries.replace_all(next)?;

        Ok(id)
    }

    /// Applies a partial edit, restamping `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn revise(&self, id: &str, patch: FaqPatch) -> MarketResult<bool> {
        Ok(self.entries.update_with(id, |entry| {
            if let Some(question) = patch.question {
                entry.question = question;
            }
            if let Some(answer) = patch.answer {
                entry.answer = answer;
            }
            if let Some(tags) = patch.tags {
                entry.tags = tags;
            }
            entry.updated_at = Utc::now();
        })?)
    }

    /// Removes an entry.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn remove(&self, id: &str) -> MarketResult<bool> {
        Ok(self.entries.remove(id)?)
    }

    /// Replaces the whole FAQ (bulk import).
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate ids or failed write.
    pub fn replace_all(&self, entries: Vec<FaqEntry>) -> MarketResult<()> {
        Ok(self.entries.replace_all(entries)?)
    }

    /// Searches entries by term over question, answer, and tags.
    ///
    /// An empty term returns everything.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<FaqEntry> {
        self.entries.filter(|entry| entry.matches(term))
    }

    /// Exports the FAQ as pretty-printed JSON (bulk export).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&self) -> MarketResult<String> {
        Ok(serde_json::to_string_pretty(&self.entries.list())
            .map_err(labstore_core::CoreError::from)?)
    }
}
