//! The marketplace facade.

use crate::accounts::Accounts;
use crate::catalog::Catalog;
use crate::complaints::ComplaintDesk;
use crate::error::{MarketError, MarketResult};
use crate::faq::FaqBook;
use crate::laboratories::LabDirectory;
use crate::model::Offer;
use crate::offers::OfferBoard;
use crate::orders::OrderDesk;
use labstore_core::{Config, Store};
use std::path::Path;

/// All marketplace services over one store.
///
/// Opening a marketplace claims every domain collection key once, hydrates
/// each collection (seeding on first run), and keeps the store alive for
/// the lifetime of the value. Operations that span collections live here;
/// everything single-collection is on the owning service.
pub struct Marketplace {
    store: Store,
    accounts: Accounts,
    catalog: Catalog,
    laboratories: LabDirectory,
    offers: OfferBoard,
    orders: OrderDesk,
    complaints: ComplaintDesk,
    faq: FaqBook,
}

impl Marketplace {
    fn wire(store: Store) -> MarketResult<Self> {
        Ok(Self {
            accounts: Accounts::open(&store)?,
            catalog: Catalog::open(&store)?,
            laboratories: LabDirectory::open(&store)?,
            offers: OfferBoard::open(&store)?,
            orders: OrderDesk::open(&store)?,
            complaints: ComplaintDesk::open(&store)?,
            faq: FaqBook::open(&store)?,
            store,
        })
    }

    /// Opens a directory-backed marketplace.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened or locked.
    pub fn open(path: &Path) -> MarketResult<Self> {
        Self::wire(Store::open(path)?)
    }

    /// Opens a directory-backed marketplace with custom store configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened or locked.
    pub fn open_with_config(path: &Path, config: Config) -> MarketResult<Self> {
        Self::wire(Store::open_with_config(path, config)?)
    }

    /// Opens an ephemeral in-memory marketplace.
    ///
    /// # Errors
    ///
    /// Returns an error if wiring a service fails.
    pub fn open_in_memory() -> MarketResult<Self> {
        Self::wire(Store::open_in_memory()?)
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Accounts and the signed-in session.
    #[must_use]
    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    /// The analysis catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The partner laboratory directory.
    #[must_use]
    pub fn laboratories(&self) -> &LabDirectory {
        &self.laboratories
    }

    /// The offer board.
    #[must_use]
    pub fn offers(&self) -> &OfferBoard {
        &self.offers
    }

    /// The order desk.
    #[must_use]
    pub fn orders(&self) -> &OrderDesk {
        &self.orders
    }

    /// The complaint desk.
    #[must_use]
    pub fn complaints(&self) -> &ComplaintDesk {
        &self.complaints
    }

    /// The help-center FAQ.
    #[must_use]
    pub fn faq(&self) -> &FaqBook {
        &self.faq
    }

    /// Publishes an offer after checking its laboratory exists.
    ///
    /// This is the cross-collection variant of [`OfferBoard::publish`]:
    /// the board itself never validates `lab_id`, so composing layers that
    /// want the check go through here.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::UnknownLaboratory`] if `lab_id` does not
    /// resolve, or a store error on duplicate id / failed write.
    pub fn publish_offer(&self, offer: Offer) -> MarketResult<()> {
        if !self.laboratories.contains(&offer.lab_id) {
            return Err(MarketError::UnknownLaboratory {
                lab_id: offer.lab_id,
            });
        }
        self.offers.publish(offer)
    }

    /// Closes the underlying store.
    ///
    /// # Errors
    ///
    /// Returns an error if the final sync fails.
    pub fn close(&self) -> MarketResult<()> {
        Ok(self.store.close()?)
    }
}
