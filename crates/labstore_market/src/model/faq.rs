//! Help-center FAQ entries.

use chrono::{DateTime, Utc};
use labstore_core::Record;
use serde::{Deserialize, Serialize};

/// One question/answer pair in the help center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqEntry {
    /// Stable unique identifier.
    pub id: String,
    /// The question, as shown to users.
    pub question: String,
    /// The answer.
    pub answer: String,
    /// Search tags.
    pub tags: Vec<String>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
}

impl FaqEntry {
    /// Returns whether the entry matches a search term.
    ///
    /// Case-insensitive over question, answer, and tags. An empty or
    /// whitespace-only term matches everything.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        self.question.to_lowercase().contains(&term)
            || self.answer.to_lowercase().contains(&term)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&term))
    }
}

impl Record for FaqEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry() -> FaqEntry {
        FaqEntry {
            id: "faq_1".into(),
            question: "Comment réserver un prélèvement à domicile ?".into(),
            answer: "Depuis le catalogue, ajoutez vos analyses au panier.".into(),
            tags: vec!["commande".into(), "prélèvement".into()],
            updated_at: Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn matches_question_case_insensitive() {
        assert!(entry().matches("RÉSERVER"));
        assert!(entry().matches("panier"));
    }

    #[test]
    fn matches_tags() {
        assert!(entry().matches("commande"));
        assert!(!entry().matches("paiement"));
    }

    #[test]
    fn blank_term_matches_everything() {
        assert!(entry().matches(""));
        assert!(entry().matches("   "));
    }
}
