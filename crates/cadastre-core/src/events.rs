//! Audit events emitted by the registry service.
//!
//! The registry appends exactly one event per successful mutating call to an
//! ordered, in-memory log, and zero events on failure. A transport layer can
//! drain the log for external delivery; event infrastructure itself is out of
//! scope here.

use crate::types::{AccountId, Amount, PropertyId};
use serde::{Deserialize, Serialize};

/// One entry in the registry's append-only audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A new property was registered by the registrar.
    PropertyRegistered {
        /// Newly issued id.
        id: PropertyId,
        /// Initial owner.
        owner: AccountId,
        /// Location text as registered.
        location: String,
        /// Area in square feet.
        area: u64,
        /// Initial price.
        price: Amount,
    },

    /// Ownership changed hands through a paid transfer.
    PropertyTransferred {
        /// Transferred property.
        id: PropertyId,
        /// Previous owner (credited the listed price).
        from: AccountId,
        /// New owner.
        to: AccountId,
        /// Listed price the transfer settled at.
        price: Amount,
    },

    /// Listing status was changed by the owner.
    ///
    /// `price` carries the price *argument* of the call, even when delisting
    /// left the stored price untouched. Kept this way for compatibility with
    /// existing consumers; do not read it as the stored price when
    /// `for_sale` is false.
    PropertyStatusChanged {
        /// Affected property.
        id: PropertyId,
        /// New listing state.
        for_sale: bool,
        /// Requested price argument of the call.
        price: Amount,
    },

    /// The registrar role was handed to a new identity.
    RegistrarChanged {
        /// Outgoing registrar.
        previous: AccountId,
        /// Incoming registrar.
        new: AccountId,
    },
}
