//! Listing and transfer behavior, including the end-to-end sale scenario.

use assert_matches::assert_matches;
use cadastre_core::FixedTimeSource;
use cadastre_registry::{
    AccountId, Amount, PropertyId, Registry, RegistryError, RegistryEvent, Settlement,
    SettlementError, SharedBank,
};

fn account(seed: u8) -> AccountId {
    AccountId::from_bytes([seed; 32])
}

struct Fixture {
    registry: Registry,
    bank: SharedBank,
    registrar: AccountId,
}

fn fixture() -> Fixture {
    let registrar = account(1);
    let bank = SharedBank::new();
    let registry =
        Registry::with_time_source(registrar, bank.clone(), FixedTimeSource(1_700_000_000))
            .expect("valid registrar");
    Fixture {
        registry,
        bank,
        registrar,
    }
}

/// The full sale scenario: register, list, buy, and observe the reset state.
#[test]
fn sale_lifecycle() {
    let Fixture {
        registry,
        bank,
        registrar,
    } = fixture();
    let (alice, bob) = (account(2), account(3));
    bank.deposit(bob, 1000);

    let id = registry
        .register("10 Oak Ave", 1000, 500, alice, registrar)
        .expect("registration succeeds");
    assert_eq!(id, PropertyId::new(1));
    assert!(!registry.get_property(id).unwrap().for_sale);

    registry
        .set_status(id, true, 800, alice)
        .expect("owner may list");
    let listed = registry.get_property(id).unwrap();
    assert!(listed.for_sale);
    assert_eq!(listed.price, 800);

    registry
        .transfer(id, bob, 800, bob)
        .expect("listed property sells at its price");

    let sold = registry.get_property(id).unwrap();
    assert_eq!(sold.owner, bob);
    assert!(!sold.for_sale);
    assert_eq!(bank.balance_of(alice), 800);
    assert_eq!(bank.balance_of(bob), 200);
    assert!(registry.properties_by_owner(alice).is_empty());
    assert_eq!(registry.properties_by_owner(bob), vec![id]);

    // Transfer resets the listing, so a follow-up purchase attempt fails
    // and ownership stays with the buyer.
    assert_matches!(
        registry.transfer(id, account(4), 799, account(4)),
        Err(RegistryError::NotForSale(_))
    );
    assert_eq!(registry.get_property(id).unwrap().owner, bob);
}

#[test]
fn excess_payment_is_refunded() {
    let Fixture {
        registry,
        bank,
        registrar,
    } = fixture();
    let (alice, bob) = (account(2), account(3));
    bank.deposit(bob, 1000);

    let id = registry
        .register("10 Oak Ave", 1000, 500, alice, registrar)
        .unwrap();
    registry.set_status(id, true, 800, alice).unwrap();
    registry.transfer(id, bob, 950, bob).expect("overpayment is accepted");

    // Seller gets exactly the listed price; the excess comes back.
    assert_eq!(bank.balance_of(alice), 800);
    assert_eq!(bank.balance_of(bob), 200);
}

#[test]
fn transfer_precondition_chain() {
    let Fixture {
        registry,
        bank,
        registrar,
    } = fixture();
    let (alice, bob) = (account(2), account(3));
    bank.deposit(bob, 10_000);

    assert_matches!(
        registry.transfer(PropertyId::new(1), bob, 800, bob),
        Err(RegistryError::NotFound(_))
    );

    let id = registry
        .register("10 Oak Ave", 1000, 500, alice, registrar)
        .unwrap();

    assert_matches!(
        registry.transfer(id, AccountId::nil(), 800, bob),
        Err(RegistryError::InvalidArgument(_))
    );
    assert_matches!(
        registry.transfer(id, bob, 800, bob),
        Err(RegistryError::NotForSale(_))
    );

    registry.set_status(id, true, 800, alice).unwrap();
    assert_matches!(
        registry.transfer(id, bob, 799, bob),
        Err(RegistryError::InsufficientPayment {
            offered: 799,
            price: 800,
        })
    );
    assert_matches!(
        registry.transfer(id, alice, 800, alice),
        Err(RegistryError::SelfTransfer(_))
    );

    // Every rejected attempt left ownership, the index, and funds untouched.
    assert_eq!(registry.get_property(id).unwrap().owner, alice);
    assert_eq!(registry.properties_by_owner(alice), vec![id]);
    assert!(registry.properties_by_owner(bob).is_empty());
    assert_eq!(bank.balance_of(bob), 10_000);
    assert_eq!(bank.balance_of(alice), 0);
}

#[test]
fn transfer_emits_one_event_and_failures_emit_none() {
    let Fixture {
        registry,
        bank,
        registrar,
    } = fixture();
    let (alice, bob) = (account(2), account(3));
    bank.deposit(bob, 1000);

    let id = registry
        .register("10 Oak Ave", 1000, 500, alice, registrar)
        .unwrap();
    registry.set_status(id, true, 800, alice).unwrap();
    let before = registry.event_count();

    let _ = registry.transfer(id, bob, 1, bob);
    assert_eq!(registry.event_count(), before);

    registry.transfer(id, bob, 800, bob).unwrap();
    let events = registry.events();
    assert_eq!(events.len(), before + 1);
    assert_eq!(
        events[before],
        RegistryEvent::PropertyTransferred {
            id,
            from: alice,
            to: bob,
            price: 800,
        }
    );
}

#[test]
fn unfunded_buyer_cannot_complete_a_transfer() {
    let Fixture {
        registry,
        bank,
        registrar,
    } = fixture();
    let (alice, bob) = (account(2), account(3));

    let id = registry
        .register("10 Oak Ave", 1000, 500, alice, registrar)
        .unwrap();
    registry.set_status(id, true, 800, alice).unwrap();

    assert_matches!(
        registry.transfer(id, bob, 800, bob),
        Err(RegistryError::Settlement(_))
    );
    // All-or-nothing: ownership and the index did not move.
    assert_eq!(registry.get_property(id).unwrap().owner, alice);
    assert!(registry.get_property(id).unwrap().for_sale);
    assert_eq!(registry.properties_by_owner(alice), vec![id]);
    assert!(registry.properties_by_owner(bob).is_empty());
    assert_eq!(bank.balance_of(alice), 0);
}

/// Settlement backend that refuses everything, for exercising rollback.
struct RejectingSettlement;

impl Settlement for RejectingSettlement {
    fn settle(
        &mut self,
        _buyer: AccountId,
        _seller: AccountId,
        _price: Amount,
        _payment: Amount,
    ) -> Result<(), SettlementError> {
        Err(SettlementError::Rejected("backend offline".into()))
    }
}

#[test]
fn settlement_rejection_leaves_all_state_unchanged() {
    let registrar = account(1);
    let registry =
        Registry::with_time_source(registrar, RejectingSettlement, FixedTimeSource(1_700_000_000))
            .expect("valid registrar");
    let (alice, bob) = (account(2), account(3));

    let id = registry
        .register("10 Oak Ave", 1000, 500, alice, registrar)
        .unwrap();
    registry.set_status(id, true, 800, alice).unwrap();
    let events_before = registry.events();

    let err = registry
        .transfer(id, bob, 800, bob)
        .expect_err("settlement backend rejects");
    assert_matches!(err, RegistryError::Settlement(reason) if reason.contains("backend offline"));

    let record = registry.get_property(id).unwrap();
    assert_eq!(record.owner, alice);
    assert!(record.for_sale);
    assert_eq!(registry.properties_by_owner(alice), vec![id]);
    assert!(registry.properties_by_owner(bob).is_empty());
    assert_eq!(registry.events(), events_before);
}

#[test]
fn only_the_owner_may_change_listing_status() {
    let Fixture {
        registry,
        registrar,
        ..
    } = fixture();
    let (alice, mallory) = (account(2), account(6));

    let id = registry
        .register("10 Oak Ave", 1000, 500, alice, registrar)
        .unwrap();
    assert_matches!(
        registry.set_status(id, true, 800, mallory),
        Err(RegistryError::Unauthorized { required: "property owner", .. })
    );
    assert_matches!(
        registry.set_status(PropertyId::new(9), true, 800, alice),
        Err(RegistryError::NotFound(_))
    );
    assert!(!registry.get_property(id).unwrap().for_sale);
}

#[test]
fn listing_at_zero_fails_and_delisting_keeps_the_price() {
    let Fixture {
        registry,
        registrar,
        ..
    } = fixture();
    let alice = account(2);

    let id = registry
        .register("10 Oak Ave", 1000, 500, alice, registrar)
        .unwrap();
    assert_matches!(
        registry.set_status(id, true, 0, alice),
        Err(RegistryError::InvalidArgument(_))
    );
    assert_eq!(registry.event_count(), 1); // only the registration event

    registry.set_status(id, true, 800, alice).unwrap();
    registry.set_status(id, false, 12345, alice).unwrap();
    let record = registry.get_property(id).unwrap();
    assert!(!record.for_sale);
    assert_eq!(record.price, 800);

    // The status event reports the requested price argument verbatim, even
    // though delisting did not touch the stored price.
    assert_eq!(
        registry.events().last(),
        Some(&RegistryEvent::PropertyStatusChanged {
            id,
            for_sale: false,
            price: 12345,
        })
    );
}
