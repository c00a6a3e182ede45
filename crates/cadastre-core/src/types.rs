//! Identifier newtypes and the canonical property record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Monetary amount in the smallest currency unit.
///
/// Payments and listed prices share this unit.
pub type Amount = u64;

/// Seconds since the Unix epoch, supplied by a [`crate::TimeSource`] at
/// record-creation time.
pub type Timestamp = u64;

/// Opaque account identity.
///
/// Comparable and hashable so it can key owner-index maps. The all-zero
/// value is the nil sentinel that validation rejects wherever a real
/// identity is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Create from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create from 32 bytes (for testing).
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes.copy_from_slice(&bytes[..16]);
        Self(Uuid::from_bytes(uuid_bytes))
    }

    /// The nil identity, rejected by all validation paths.
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Whether this is the nil identity.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AccountId(Uuid::parse_str(s)?))
    }
}

impl From<Uuid> for AccountId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Sequentially issued property identifier.
///
/// Ids form a dense, gap-free sequence starting at 1 and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(u64);

impl PropertyId {
    /// Wrap a raw id value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw id value.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical record of one registered property.
///
/// Existence is map membership in the ledger store; there is no deletion, so
/// a record, once created, is never removed. `id`, `location`, `area`, and
/// `registered_at` are immutable after creation. `owner` changes only via
/// transfer; `for_sale` and `price` via status updates and transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Unique sequential identifier.
    pub id: PropertyId,
    /// Human-readable location; non-empty, immutable.
    pub location: String,
    /// Area in square feet; positive, immutable.
    pub area: u64,
    /// Listed price in the smallest currency unit. Only meaningful as an
    /// asking price while `for_sale` is true; delisting leaves it unchanged.
    pub price: Amount,
    /// Current owner.
    pub owner: AccountId,
    /// Whether the property is currently listed for sale.
    pub for_sale: bool,
    /// Creation timestamp, set once.
    pub registered_at: Timestamp,
}
