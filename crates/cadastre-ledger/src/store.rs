//! Canonical asset records and id issuance.

use cadastre_core::{
    AccountId, Amount, PropertyId, PropertyRecord, RegistryError, Result, Timestamp,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Canonical store of property records.
///
/// Owns the id counter: ids are issued densely starting at 1 and never
/// reused. Field-level validation happens here; authorization and payment
/// preconditions are the registry service's job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerStore {
    records: BTreeMap<PropertyId, PropertyRecord>,
    issued: u64,
}

impl LedgerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate inputs and create a new record, returning its id.
    ///
    /// Fails with `InvalidArgument` on a nil owner, empty location, or
    /// non-positive area; the id counter is not advanced on failure. The new
    /// record starts unlisted (`for_sale = false`).
    pub fn create(
        &mut self,
        location: &str,
        area: u64,
        price: Amount,
        owner: AccountId,
        registered_at: Timestamp,
    ) -> Result<PropertyId> {
        if owner.is_nil() {
            return Err(RegistryError::InvalidArgument(
                "owner must be a non-nil identity".into(),
            ));
        }
        if location.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "location must be non-empty".into(),
            ));
        }
        if area == 0 {
            return Err(RegistryError::InvalidArgument("area must be positive".into()));
        }

        self.issued += 1;
        let id = PropertyId::new(self.issued);
        self.records.insert(
            id,
            PropertyRecord {
                id,
                location: location.to_owned(),
                area,
                price,
                owner,
                for_sale: false,
                registered_at,
            },
        );
        debug!(%id, %owner, area, price, "created property record");
        Ok(id)
    }

    /// Look up a record by id.
    pub fn get(&self, id: PropertyId) -> Result<&PropertyRecord> {
        self.records.get(&id).ok_or(RegistryError::NotFound(id))
    }

    /// Overwrite the owner of an existing record.
    pub fn set_owner(&mut self, id: PropertyId, new_owner: AccountId) -> Result<()> {
        let record = self.records.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        record.owner = new_owner;
        debug!(%id, owner = %new_owner, "updated property owner");
        Ok(())
    }

    /// Update the listing state of an existing record.
    ///
    /// Listing requires a positive price and stores it; delisting flips the
    /// flag and leaves the stored price unchanged.
    pub fn set_sale_status(&mut self, id: PropertyId, for_sale: bool, price: Amount) -> Result<()> {
        let record = self.records.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        if for_sale {
            if price == 0 {
                return Err(RegistryError::InvalidArgument(
                    "listing price must be positive".into(),
                ));
            }
            record.price = price;
        }
        record.for_sale = for_sale;
        debug!(%id, for_sale, stored_price = record.price, "updated sale status");
        Ok(())
    }

    /// Number of ids issued so far.
    pub fn total_issued(&self) -> u64 {
        self.issued
    }

    /// Iterate over all records in id order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyRecord> {
        self.records.values()
    }
}
