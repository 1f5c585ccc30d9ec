//! The commission-based offer board.

use crate::error::MarketResult;
use crate::model::Offer;
use labstore_core::{Collection, Store};
use serde_json::Value;

/// How an offer's price splits between the platform and the laboratory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommissionSplit {
    /// Platform commission in MAD.
    pub commission: f64,
    /// Net amount paid out to the laboratory in MAD.
    pub net: f64,
}

/// Splits a price at the laboratory's commission rate.
///
/// ```rust
/// use labstore_market::commission_split;
///
/// let split = commission_split(200.0, 0.15);
/// assert_eq!(split.commission, 30.0);
/// assert_eq!(split.net, 170.0);
/// ```
#[must_use]
pub fn commission_split(price: f64, rate: f64) -> CommissionSplit {
    let commission = price * rate;
    CommissionSplit {
        commission,
        net: price - commission,
    }
}

/// Promotional offers published by laboratories.
///
/// Owns the `"offers"` collection, which starts empty - offers only exist
/// once laboratories publish them. `lab_id` is an informal reference into
/// the directory; [`crate::Marketplace::publish_offer`] validates it at the
/// call site.
pub struct OfferBoard {
    offers: Collection<Offer>,
}

impl OfferBoard {
    /// Opens the offer board over the given store.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection key is invalid or already claimed.
    pub fn open(store: &Store) -> MarketResult<Self> {
        Ok(Self {
            offers: store.collection("offers", Vec::new())?,
        })
    }

    /// Returns all offers in publication order.
    #[must_use]
    pub fn list(&self) -> Vec<Offer> {
        self.offers.list()
    }

    /// Returns the offer with the given id.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<Offer> {
        self.offers.get(id)
    }

    /// Returns a laboratory's offers, in publication order.
    #[must_use]
    pub fn by_lab(&self, lab_id: &str) -> Vec<Offer> {
        self.offers.filter(|o| o.lab_id == lab_id)
    }

    /// Returns the offers patients can currently see.
    #[must_use]
    pub fn visible(&self) -> Vec<Offer> {
        self.offers.filter(Offer::is_visible)
    }

    /// Publishes an offer.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate id or failed write.
    pub fn publish(&self, offer: Offer) -> MarketResult<()> {
        Ok(self.offers.insert(offer)?)
    }

    /// Shallow-merges a field patch into an offer.
    ///
    /// # Errors
    ///
    /// Returns an error on a malformed patch or failed write.
    pub fn update(&self, id: &str, patch: Value) -> MarketResult<bool> {
        Ok(self.offers.update(id, patch)?)
    }

    /// Withdraws an offer.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn withdraw(&self, id: &str) -> MarketResult<bool> {
        Ok(self.offers.remove(id)?)
    }

    /// Records an admin approval decision on an offer.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn review(&self, id: &str, approved: bool) -> MarketResult<bool> {
        Ok(self
            .offers
            .update_with(id, |offer| offer.approved = Some(approved))?)
    }

    /// Deactivates an offer without deleting it.
    ///
    /// # Errors
    ///
    /// Returns an error on failed write.
    pub fn deactivate(&self, id: &str) -> MarketResult<bool> {
        Ok(self.offers.update_with(id, |offer| offer.active = false)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn offer(id: &str, lab_id: &str, price: f64) -> Offer {
        Offer {
            id: id.into(),
            lab_id: lab_id.into(),
            title: "Offre".into(),
            description: "".into(),
            price,
            image_url: None,
            active: true,
            requires_admin_approval: None,
            approved: None,
            created_at: Utc.with_ymd_and_hms(2024, 4, 2, 8, 0, 0).unwrap(),
        }
    }

    fn board() -> OfferBoard {
        let store = Store::open_in_memory().unwrap();
        OfferBoard::open(&store).unwrap()
    }

    #[test]
    fn starts_empty() {
        assert!(board().list().is_empty());
    }

    #[test]
    fn by_lab_filters_exactly() {
        let board = board();
        for i in 0..3 {
            board.publish(offer(&format!("o1{i}"), "lab1", 100.0)).unwrap();
        }
        for i in 0..2 {
            board.publish(offer(&format!("o2{i}"), "lab2", 100.0)).unwrap();
        }

        let lab1 = board.by_lab("lab1");
        assert_eq!(lab1.len(), 3);
        assert!(lab1.iter().all(|o| o.lab_id == "lab1"));
        assert_eq!(board.by_lab("lab2").len(), 2);
    }

    #[test]
    fn review_gates_visibility() {
        let board = board();
        let mut gated = offer("o1", "lab1", 100.0);
        gated.requires_admin_approval = Some(true);
        board.publish(gated).unwrap();

        assert!(board.visible().is_empty());
        board.review("o1", true).unwrap();
        assert_eq!(board.visible().len(), 1);
    }

    #[test]
    fn deactivate_hides_but_keeps_offer() {
        let board = board();
        board.publish(offer("o1", "lab1", 100.0)).unwrap();

        board.deactivate("o1").unwrap();
        assert!(board.visible().is_empty());
        assert!(board.by_id("o1").is_some());
    }

    #[test]
    fn split_applies_rate() {
        let split = commission_split(180.0, 0.10);
        assert!((split.commission - 18.0).abs() < f64::EPSILON);
        assert!((split.net - 162.0).abs() < f64::EPSILON);
    }

    #[test]
    fn split_at_zero_rate_is_all_net() {
        let split = commission_split(99.0, 0.0);
        assert_eq!(split.commission, 0.0);
        assert_eq!(split.net, 99.0);
    }
}
