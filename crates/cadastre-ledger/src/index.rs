//! Reverse lookup from owner identity to held property ids.

use cadastre_core::{AccountId, PropertyId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Owner → owned property ids.
///
/// Performs no validation of its own; the registry service guarantees each
/// id is held under exactly one owner at a time. Per-owner lists are
/// unordered: removal swaps the target with the last element and truncates,
/// so callers must read membership only, never position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnerIndex {
    holdings: BTreeMap<AccountId, Vec<PropertyId>>,
}

impl OwnerIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `owner` now holds `id`, creating the list if absent.
    pub fn add(&mut self, owner: AccountId, id: PropertyId) {
        self.holdings.entry(owner).or_default().push(id);
    }

    /// Remove `id` from `owner`'s list via swap-remove.
    ///
    /// An absent id indicates an invariant breach upstream; it is logged and
    /// otherwise a no-op. An emptied list is dropped from the map (an empty
    /// list and an absent one are equivalent).
    pub fn remove(&mut self, owner: AccountId, id: PropertyId) {
        let Some(list) = self.holdings.get_mut(&owner) else {
            warn!(%owner, %id, "owner index removal: owner has no holdings");
            return;
        };
        match list.iter().position(|&held| held == id) {
            Some(pos) => {
                list.swap_remove(pos);
                if list.is_empty() {
                    self.holdings.remove(&owner);
                }
            }
            None => {
                warn!(%owner, %id, "owner index removal: id not held by owner");
            }
        }
    }

    /// Ids currently held by `owner`, in storage order (no ordering
    /// guarantee across mutations).
    pub fn properties_of(&self, owner: AccountId) -> &[PropertyId] {
        self.holdings.get(&owner).map_or(&[], Vec::as_slice)
    }

    /// Whether `owner` currently holds `id`.
    pub fn holds(&self, owner: AccountId, id: PropertyId) -> bool {
        self.properties_of(owner).contains(&id)
    }

    /// Iterate over all (owner, holdings) entries.
    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, &Vec<PropertyId>)> {
        self.holdings.iter()
    }
}
