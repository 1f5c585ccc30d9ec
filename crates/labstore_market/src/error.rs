//! Error types for the marketplace domain layer.

use labstore_core::CoreError;
use thiserror::Error;

/// Result type for marketplace operations.
pub type MarketResult<T> = Result<T, MarketError>;

/// Errors that can occur in marketplace operations.
#[derive(Debug, Error)]
pub enum MarketError {
    /// Underlying store error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The referenced laboratory does not exist.
    #[error("unknown laboratory: {lab_id}")]
    UnknownLaboratory {
        /// The laboratory id that did not resolve.
        lab_id: String,
    },

    /// An account with this email already exists.
    #[error("email already registered: {email}")]
    EmailTaken {
        /// The conflicting email.
        email: String,
    },

    /// The order is in a state that forbids the requested transition.
    #[error("order {order_id} cannot be {action} while {status}")]
    InvalidOrderState {
        /// The order id.
        order_id: String,
        /// The attempted action.
        action: String,
        /// The order's current status.
        status: String,
    },
}
