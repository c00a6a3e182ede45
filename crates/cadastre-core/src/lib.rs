//! Core domain types for the cadastre property ledger.
//!
//! This crate defines the vocabulary shared by the ledger store, the owner
//! index, and the registry service:
//! - identifier newtypes ([`AccountId`], [`PropertyId`]) and the canonical
//!   [`PropertyRecord`],
//! - the [`RegistryError`] taxonomy surfaced by every fallible operation,
//! - the [`RegistryEvent`] audit events emitted on successful mutations,
//! - the [`TimeSource`] seam supplying record-creation timestamps.
//!
//! Everything here is transport-agnostic: the RPC/HTTP surface, persistence,
//! and identity management live outside this workspace.

pub mod events;
pub mod time;
pub mod types;

pub use events::RegistryEvent;
pub use time::{FixedTimeSource, SystemTimeSource, TimeSource};
pub use types::{AccountId, Amount, PropertyId, PropertyRecord, Timestamp};

use thiserror::Error;

/// Errors surfaced by registry operations.
///
/// Every variant is detected synchronously, before any state mutation; a
/// returned error guarantees the ledger, the owner index, and account
/// balances are exactly as they were before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Caller lacks the role the operation requires.
    #[error("caller {caller} is not authorized: {required}")]
    Unauthorized {
        /// Identity that attempted the operation.
        caller: AccountId,
        /// Role the operation requires.
        required: &'static str,
    },

    /// Referenced property id was never issued.
    #[error("property {0} not found")]
    NotFound(PropertyId),

    /// Malformed input: nil identity, non-positive area/price, empty location.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Transfer attempted on a property that is not listed for sale.
    #[error("property {0} is not listed for sale")]
    NotForSale(PropertyId),

    /// Payment offered is below the listed price.
    #[error("insufficient payment: offered {offered}, listed price {price}")]
    InsufficientPayment {
        /// Amount the caller offered.
        offered: Amount,
        /// Listed price of the property.
        price: Amount,
    },

    /// Caller already owns the property it is trying to buy.
    #[error("property {0} is already owned by the caller")]
    SelfTransfer(PropertyId),

    /// Fund settlement was rejected by the settlement backend.
    #[error("fund settlement failed: {0}")]
    Settlement(String),
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, RegistryError>;
