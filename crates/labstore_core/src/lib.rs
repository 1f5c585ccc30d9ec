//! # LabStore Core
//!
//! Persisted collection store for LabStore.
//!
//! This crate provides:
//! - [`Store`] - the facade owning a key-value backend and the open collections
//! - [`Collection`] - a named, ordered collection of records mirrored in memory
//!   and written back wholesale on every mutation
//! - [`Session`] - a singleton record under one key (the authenticated user)
//! - Hydration with seed-on-first-load and corrupt-value recovery
//!
//! ## The collection contract
//!
//! A collection is one JSON array stored under one key. Reads are served from
//! the in-memory mirror; every mutation rewrites the whole array and only then
//! swaps the mirror, so memory and durable storage agree after every successful
//! operation and a failed write loses nothing but the attempted mutation.
//!
//! Mutations are serialized per collection: each one re-reads the latest
//! accepted state under the collection's write lock before transforming it, so
//! interleaved writers cannot overwrite each other's changes.
//!
//! ## Example
//!
//! ```rust
//! use labstore_core::{Record, Store};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Analysis {
//!     id: String,
//!     name: String,
//!     price: f64,
//! }
//!
//! impl Record for Analysis {
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//! }
//!
//! let store = Store::open_in_memory().unwrap();
//! let analyses = store.collection::<Analysis>("tests", Vec::new()).unwrap();
//!
//! analyses
//!     .insert(Analysis {
//!         id: "t1".into(),
//!         name: "Complete blood count".into(),
//!         price: 120.0,
//!     })
//!     .unwrap();
//!
//! assert_eq!(analyses.get("t1").unwrap().name, "Complete blood count");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod config;
mod dir;
mod error;
mod record;
mod session;
mod state;
mod store;

pub use collection::Collection;
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use record::{fresh_id, Record};
pub use session::Session;
pub use state::{HydrationOutcome, LoadState};
pub use store::Store;
