//! # LabStore Testkit
//!
//! Shared test tooling for LabStore:
//!
//! - [`fixtures`] - temporary stores and marketplaces with automatic cleanup
//! - [`fault`] - a fault-injecting backend for exercising write-failure and
//!   corrupt-hydration paths
//! - [`generators`] - deterministic domain record builders

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fault;
pub mod fixtures;
pub mod generators;

pub use fault::{FaultBackend, FaultSwitch};
pub use fixtures::{with_dir_store, with_mem_store, TestMarketplace, TestStore};
