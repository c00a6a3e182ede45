//! Registry service for the cadastre property ledger.
//!
//! This crate is the only mutation entry point over the two leaf stores in
//! `cadastre-ledger`. It enforces authorization ("is this the registrar",
//! "is this the owner") and the payment precondition on transfer, applies
//! every ledger + index update as a single atomic unit, and keeps an
//! ordered, append-only audit log of [`RegistryEvent`]s.
//!
//! # Example
//!
//! ```
//! use cadastre_core::AccountId;
//! use cadastre_registry::{Registry, SharedBank};
//!
//! let registrar = AccountId::from_bytes([1u8; 32]);
//! let alice = AccountId::from_bytes([2u8; 32]);
//! let bank = SharedBank::new();
//!
//! let registry = Registry::new(registrar, bank.clone()).unwrap();
//! let id = registry
//!     .register("10 Oak Ave", 1000, 500, alice, registrar)
//!     .unwrap();
//! assert_eq!(registry.properties_by_owner(alice), vec![id]);
//! ```

pub mod service;
pub mod settlement;

pub use service::Registry;
pub use settlement::{InMemoryBank, Settlement, SettlementError, SharedBank};

pub use cadastre_core::{
    AccountId, Amount, PropertyId, PropertyRecord, RegistryError, RegistryEvent, Result,
};
