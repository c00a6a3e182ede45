//! Leaf components of the cadastre registry.
//!
//! Two stores live here, composed by `cadastre-registry`:
//! - [`LedgerStore`]: canonical asset records and sequential id issuance,
//! - [`OwnerIndex`]: reverse lookup from owner identity to held property ids.
//!
//! Neither store synchronizes on its own; the registry service wraps both in
//! a single lock so every mutating call commits to both or to neither.

pub mod index;
pub mod store;

pub use index::OwnerIndex;
pub use store::LedgerStore;
