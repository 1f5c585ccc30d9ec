//! # LabStore Market
//!
//! Marketplace domain layer for LabStore.
//!
//! This crate models a multi-role marketplace for booking medical analyses -
//! patients, laboratories, administrators, and support agents - on top of the
//! persisted collections in `labstore_core`. Each domain service owns one
//! collection (or two, for the catalog) and exposes the operations its role
//! screens need:
//!
//! - [`Accounts`] - users and the signed-in session
//! - [`Catalog`] - the analysis catalog: individual tests and test packs
//! - [`LabDirectory`] - partner laboratories and their nurse rosters
//! - [`OfferBoard`] - commission-based promotional offers
//! - [`OrderDesk`] - orders from placement through results delivery
//! - [`ComplaintDesk`] - complaints, agent assignment, compensation
//! - [`FaqBook`] - the help-center FAQ
//!
//! [`Marketplace`] wires all of the above over one [`labstore_core::Store`].
//!
//! Cross-collection references (an offer's `labId`, an order's assigned
//! laboratory) are informal foreign keys. The generic store does not enforce
//! them; the composing operations here validate what they need at the call
//! site (e.g. [`Marketplace::publish_offer`]) and deletions never cascade.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod accounts;
mod catalog;
mod complaints;
mod error;
mod faq;
mod laboratories;
mod marketplace;
pub mod model;
mod offers;
mod orders;
pub mod seed;

pub use accounts::Accounts;
pub use catalog::Catalog;
pub use complaints::ComplaintDesk;
pub use error::{MarketError, MarketResult};
pub use faq::{FaqBook, FaqPatch};
pub use laboratories::LabDirectory;
pub use marketplace::Marketplace;
pub use offers::{commission_split, CommissionSplit, OfferBoard};
pub use orders::OrderDesk;
