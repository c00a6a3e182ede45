//! Fund settlement seam.
//!
//! Settlement mechanics beyond "credit this account, debit that one" are an
//! external concern; the registry only needs a backend that can move the
//! listed price to the seller and refund any excess to the buyer, all or
//! nothing. [`InMemoryBank`] is the reference implementation; [`SharedBank`]
//! wraps it in a cloneable handle so tests and callers can inspect balances
//! after handing the backend to the registry.

use cadastre_core::{AccountId, Amount};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors a settlement backend may report.
///
/// Any error leaves all balances untouched; the registry maps it to
/// `RegistryError::Settlement` and aborts the transfer before mutating the
/// ledger or the index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    /// The paying account cannot cover the payment.
    #[error("account {account} has insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds {
        /// Account that was to be debited.
        account: AccountId,
        /// Amount the settlement required.
        needed: Amount,
        /// Balance actually available.
        available: Amount,
    },

    /// The backend refused the settlement for another reason.
    #[error("settlement rejected: {0}")]
    Rejected(String),
}

/// Moves funds for a property transfer.
///
/// Contract: debit `payment` from the buyer, credit the seller exactly
/// `price`, and refund `payment - price` to the buyer — atomically. An `Err`
/// must leave every balance as it was.
pub trait Settlement: Send + Sync {
    /// Settle one transfer.
    fn settle(
        &mut self,
        buyer: AccountId,
        seller: AccountId,
        price: Amount,
        payment: Amount,
    ) -> Result<(), SettlementError>;
}

/// Simple balance ledger used as the reference settlement backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBank {
    balances: BTreeMap<AccountId, Amount>,
}

impl InMemoryBank {
    /// Create a bank with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `account`, creating it at zero if absent.
    pub fn deposit(&mut self, account: AccountId, amount: Amount) {
        *self.balances.entry(account).or_insert(0) += amount;
    }

    /// Current balance of `account` (zero if absent).
    pub fn balance_of(&self, account: AccountId) -> Amount {
        self.balances.get(&account).copied().unwrap_or(0)
    }
}

impl Settlement for InMemoryBank {
    fn settle(
        &mut self,
        buyer: AccountId,
        seller: AccountId,
        price: Amount,
        payment: Amount,
    ) -> Result<(), SettlementError> {
        let refund = payment
            .checked_sub(price)
            .ok_or_else(|| SettlementError::Rejected("payment below price".into()))?;
        let available = self.balance_of(buyer);
        if available < payment {
            return Err(SettlementError::InsufficientFunds {
                account: buyer,
                needed: payment,
                available,
            });
        }

        // Validation done; the three moves below cannot fail.
        self.balances.insert(buyer, available - payment);
        self.deposit(seller, price);
        if refund > 0 {
            self.deposit(buyer, refund);
        }
        debug!(%buyer, %seller, price, payment, refund, "settled transfer");
        Ok(())
    }
}

/// Cloneable handle to a shared [`InMemoryBank`].
///
/// The registry takes ownership of its settlement backend; this handle lets
/// the constructing side keep deposit/balance access to the same bank.
#[derive(Debug, Clone, Default)]
pub struct SharedBank {
    inner: Arc<Mutex<InMemoryBank>>,
}

impl SharedBank {
    /// Create a shared bank with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `account`.
    pub fn deposit(&self, account: AccountId, amount: Amount) {
        self.inner.lock().deposit(account, amount);
    }

    /// Current balance of `account`.
    pub fn balance_of(&self, account: AccountId) -> Amount {
        self.inner.lock().balance_of(account)
    }
}

impl Settlement for SharedBank {
    fn settle(
        &mut self,
        buyer: AccountId,
        seller: AccountId,
        price: Amount,
        payment: Amount,
    ) -> Result<(), SettlementError> {
        self.inner.lock().settle(buyer, seller, price, payment)
    }
}
