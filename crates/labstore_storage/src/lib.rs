//! # LabStore Storage
//!
//! Key-value backend trait and implementations for LabStore.
//!
//! This crate provides the lowest-level persistence abstraction for LabStore.
//! Backends are **opaque value stores** keyed by collection name - they do not
//! interpret the bytes they hold.
//!
//! ## Design Principles
//!
//! - One key per collection, whole-value overwrite on every write
//! - No partial writes: a crash mid-write leaves the prior value intact
//! - Must be `Send + Sync` for shared access
//! - LabStore owns all value interpretation (JSON arrays of records)
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral stores
//! - [`DirBackend`] - One file per key inside a directory
//!
//! ## Example
//!
//! ```rust
//! use labstore_storage::{KvBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! backend.put("tests", b"[]").unwrap();
//! assert_eq!(backend.get("tests").unwrap().as_deref(), Some(&b"[]"[..]));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod dir;
mod error;
mod memory;

pub use backend::{validate_key, KvBackend, MAX_KEY_LEN};
pub use dir::DirBackend;
pub use error::{StorageError, StorageResult};
pub use memory::InMemoryBackend;
