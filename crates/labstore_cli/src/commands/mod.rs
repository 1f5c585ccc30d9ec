//! Command implementations.

pub mod dump;
pub mod inspect;
pub mod seed;
pub mod verify;
