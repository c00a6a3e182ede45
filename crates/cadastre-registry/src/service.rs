//! The registry service: the single mutation entry point.
//!
//! Composes the ledger store and the owner index, enforces authorization and
//! payment preconditions, and applies every cross-store update as one atomic
//! unit under a write lock. Each successful mutation appends exactly one
//! event to the ordered audit log; failures append nothing and change
//! nothing.

use crate::settlement::Settlement;
use cadastre_core::{
    AccountId, Amount, PropertyId, PropertyRecord, RegistryError, RegistryEvent, Result,
    SystemTimeSource, TimeSource,
};
use cadastre_ledger::{LedgerStore, OwnerIndex};
use parking_lot::RwLock;
use tracing::info;

/// State guarded by the registry's lock.
///
/// Holding the ledger, the index, and the settlement backend behind one lock
/// is what makes each mutating call externally atomic: no interleaving can
/// observe a record updated but not its index entry, or an ownership change
/// without its settlement.
struct RegistryState {
    ledger: LedgerStore,
    index: OwnerIndex,
    registrar: AccountId,
    settlement: Box<dyn Settlement>,
    events: Vec<RegistryEvent>,
}

impl RegistryState {
    fn emit(&mut self, event: RegistryEvent) {
        info!(?event, "registry event");
        self.events.push(event);
    }
}

/// Authoritative property registry.
///
/// Mutations run serialized under a write lock for their full span
/// (validate → mutate ledger → mutate index → settle → emit); reads take the
/// read lock and observe a consistent snapshot across the record store, the
/// owner index, and the event log.
pub struct Registry {
    state: RwLock<RegistryState>,
    clock: Box<dyn TimeSource>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").finish_non_exhaustive()
    }
}

impl Registry {
    /// Create a registry with the system wall clock.
    ///
    /// `registrar` is the identity allowed to register properties and to
    /// reassign the role; a nil registrar is rejected.
    pub fn new(registrar: AccountId, settlement: impl Settlement + 'static) -> Result<Self> {
        Self::with_time_source(registrar, settlement, SystemTimeSource)
    }

    /// Create a registry with an injected time source.
    pub fn with_time_source(
        registrar: AccountId,
        settlement: impl Settlement + 'static,
        time_source: impl TimeSource + 'static,
    ) -> Result<Self> {
        if registrar.is_nil() {
            return Err(RegistryError::InvalidArgument(
                "registrar must be a non-nil identity".into(),
            ));
        }
        Ok(Self {
            state: RwLock::new(RegistryState {
                ledger: LedgerStore::new(),
                index: OwnerIndex::new(),
                registrar,
                settlement: Box::new(settlement),
                events: Vec::new(),
            }),
            clock: Box::new(time_source),
        })
    }

    /// Register a new property under `owner`. Registrar only.
    ///
    /// Field validation (non-nil owner, positive area, non-empty location)
    /// is delegated to the ledger store; on success the new id is indexed
    /// under `owner` and `PropertyRegistered` is emitted.
    pub fn register(
        &self,
        location: &str,
        area: u64,
        price: Amount,
        owner: AccountId,
        caller: AccountId,
    ) -> Result<PropertyId> {
        let mut state = self.state.write();
        if caller != state.registrar {
            return Err(RegistryError::Unauthorized {
                caller,
                required: "registrar",
            });
        }
        let registered_at = self.clock.now();
        let id = state.ledger.create(location, area, price, owner, registered_at)?;
        state.index.add(owner, id);
        state.emit(RegistryEvent::PropertyRegistered {
            id,
            owner,
            location: location.to_owned(),
            area,
            price,
        });
        Ok(id)
    }

    /// Transfer property `id` to `new_owner`, paid for by `caller`.
    ///
    /// Precondition chain, in order: the property exists, `new_owner` is a
    /// non-nil identity, the property is listed for sale, `payment` covers
    /// the listed price, and the caller is not already the owner. Settlement
    /// (seller credited exactly the listed price, excess refunded to the
    /// caller) is attempted before the ledger and index commit, so a
    /// settlement failure aborts with no state change. A successful transfer
    /// always leaves the property delisted; the stored price is untouched.
    pub fn transfer(
        &self,
        id: PropertyId,
        new_owner: AccountId,
        payment: Amount,
        caller: AccountId,
    ) -> Result<()> {
        let mut state = self.state.write();
        let (previous_owner, price) = {
            let record = state.ledger.get(id)?;
            if new_owner.is_nil() {
                return Err(RegistryError::InvalidArgument(
                    "new owner must be a non-nil identity".into(),
                ));
            }
            if !record.for_sale {
                return Err(RegistryError::NotForSale(id));
            }
            if payment < record.price {
                return Err(RegistryError::InsufficientPayment {
                    offered: payment,
                    price: record.price,
                });
            }
            if caller == record.owner {
                return Err(RegistryError::SelfTransfer(id));
            }
            (record.owner, record.price)
        };

        state
            .settlement
            .settle(caller, previous_owner, price, payment)
            .map_err(|err| RegistryError::Settlement(err.to_string()))?;

        // Funds are settled and the id is known to exist; nothing below can
        // fail, so the two-store update commits as a unit.
        state.index.remove(previous_owner, id);
        state.index.add(new_owner, id);
        state.ledger.set_owner(id, new_owner)?;
        state.ledger.set_sale_status(id, false, 0)?;
        state.emit(RegistryEvent::PropertyTransferred {
            id,
            from: previous_owner,
            to: new_owner,
            price,
        });
        Ok(())
    }

    /// Change the listing status of property `id`. Owner only.
    ///
    /// Listing requires a positive `new_price` and stores it; delisting
    /// leaves the stored price unchanged. The emitted
    /// `PropertyStatusChanged` event carries the `new_price` argument
    /// verbatim either way (see the event's documentation).
    pub fn set_status(
        &self,
        id: PropertyId,
        for_sale: bool,
        new_price: Amount,
        caller: AccountId,
    ) -> Result<()> {
        let mut state = self.state.write();
        let record = state.ledger.get(id)?;
        if caller != record.owner {
            return Err(RegistryError::Unauthorized {
                caller,
                required: "property owner",
            });
        }
        state.ledger.set_sale_status(id, for_sale, new_price)?;
        state.emit(RegistryEvent::PropertyStatusChanged {
            id,
            for_sale,
            price: new_price,
        });
        Ok(())
    }

    /// Hand the registrar role to `new_registrar`. Registrar only.
    pub fn change_registrar(&self, new_registrar: AccountId, caller: AccountId) -> Result<()> {
        let mut state = self.state.write();
        if caller != state.registrar {
            return Err(RegistryError::Unauthorized {
                caller,
                required: "registrar",
            });
        }
        if new_registrar.is_nil() {
            return Err(RegistryError::InvalidArgument(
                "registrar must be a non-nil identity".into(),
            ));
        }
        let previous = state.registrar;
        state.registrar = new_registrar;
        state.emit(RegistryEvent::RegistrarChanged {
            previous,
            new: new_registrar,
        });
        Ok(())
    }

    /// Snapshot of the record for property `id`.
    pub fn get_property(&self, id: PropertyId) -> Result<PropertyRecord> {
        self.state.read().ledger.get(id).cloned()
    }

    /// Ids currently held by `owner`, in index storage order.
    pub fn properties_by_owner(&self, owner: AccountId) -> Vec<PropertyId> {
        self.state.read().index.properties_of(owner).to_vec()
    }

    /// Number of properties registered so far.
    pub fn total_properties(&self) -> u64 {
        self.state.read().ledger.total_issued()
    }

    /// Current registrar identity.
    pub fn registrar(&self) -> AccountId {
        self.state.read().registrar
    }

    /// Ordered snapshot of the audit event log.
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.state.read().events.clone()
    }

    /// Number of events emitted so far.
    pub fn event_count(&self) -> usize {
        self.state.read().events.len()
    }
}
