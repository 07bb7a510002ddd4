//! Batched execution tests: one atomic unit, original caller identity for
//! every sub-operation, all-or-nothing rollback.

#![cfg(test)]

extern crate std;

use crate::test_helpers::*;
use crate::{ControllerCall, RegisterArgs, RenewArgs};
use naming_errors::ContractError;
use soroban_sdk::{testutils::Address as _, vec, Address, Env, String};

#[test]
fn test_multicall_register_and_records_in_one_unit() {
    let env = Env::default();
    let f = setup(&env);

    let label = String::from_str(&env, "alice");
    let owner = Address::generate(&env);
    let target = Address::generate(&env);
    let lh = f.controller.get_label_hash(&label);
    let node = f.controller.get_node(&lh);

    let pay = payload(&env, &f, 100, 1, T0 + 3_600);
    let sig = register_voucher(&env, &f, &label, &owner, MIN_DURATION, &pay);

    // The batch caller pays, registers, and is the declared manager, so the
    // record writes that follow are authorized within the same unit.
    let calls = vec![
        &env,
        ControllerCall::Register(RegisterArgs {
            label: label.clone(),
            name_owner: owner.clone(),
            domain_manager: f.payer.clone(),
            duration: MIN_DURATION,
            payload: pay.clone(),
            signature: sig,
        }),
        ControllerCall::SetAddr(node.clone(), target.clone()),
        ControllerCall::SetName(label.clone()),
    ];
    f.controller.multicall(&f.payer, &calls);

    assert_eq!(f.registry.owner_of(&lh), owner);
    assert_eq!(f.resolver.addr(&node), Some(target));
    assert_eq!(
        f.resolver.name(&f.controller.get_reverse_node(&f.payer)),
        Some(label)
    );
    assert_eq!(f.token.balance(&f.payer), DEFAULT_MINT - 100);
    assert_eq!(f.token.balance(&f.treasury), 100);
}

#[test]
fn test_multicall_rolls_back_as_a_unit() {
    let env = Env::default();
    let f = setup(&env);

    let label = String::from_str(&env, "alice");
    let owner = Address::generate(&env);
    let outsider = Address::generate(&env);
    let target = Address::generate(&env);
    let lh = f.controller.get_label_hash(&label);
    let node = f.controller.get_node(&lh);

    let pay = payload(&env, &f, 100, 1, T0 + 3_600);
    let sig = register_voucher(&env, &f, &label, &owner, MIN_DURATION, &pay);

    // The declared manager is someone else, so the SetAddr step is
    // unauthorized for the batch caller and must sink the whole batch.
    let calls = vec![
        &env,
        ControllerCall::Register(RegisterArgs {
            label: label.clone(),
            name_owner: owner.clone(),
            domain_manager: outsider.clone(),
            duration: MIN_DURATION,
            payload: pay.clone(),
            signature: sig,
        }),
        ControllerCall::SetAddr(node.clone(), target),
    ];
    assert_eq!(
        f.controller.try_multicall(&f.payer, &calls),
        Err(Ok(ContractError::Unauthorized))
    );

    // No sub-operation's effect survived: no registration, no payment, no
    // spent key, no manager entry, no record.
    assert!(f.registry.available(&lh));
    assert_eq!(f.token.balance(&f.payer), DEFAULT_MINT);
    assert_eq!(f.token.balance(&f.treasury), 0);
    assert!(!f.controller.is_key_used(&pay.key));
    assert_eq!(f.controller.domain_manager(&node), None);
    assert_eq!(f.resolver.addr(&node), None);
}

#[test]
fn test_multicall_rejects_empty_batch() {
    let env = Env::default();
    let f = setup(&env);

    assert_eq!(
        f.controller.try_multicall(&f.payer, &vec![&env]),
        Err(Ok(ContractError::EmptyBatch))
    );
}

#[test]
fn test_multicall_renew_and_manager_handoff() {
    let env = Env::default();
    let f = setup(&env);

    // Register with the payer as both owner and manager so the same caller
    // can drive the follow-up batch.
    let label = String::from_str(&env, "alice");
    let pay = payload(&env, &f, 100, 1, T0 + 3_600);
    let sig = register_voucher(&env, &f, &label, &f.payer, MIN_DURATION, &pay);
    let expiry = f.controller.register(
        &f.payer,
        &label,
        &f.payer,
        &f.payer,
        &MIN_DURATION,
        &pay,
        &sig,
    );

    let lh = f.controller.get_label_hash(&label);
    let node = f.controller.get_node(&lh);
    let successor = Address::generate(&env);

    let renew_pay = payload(&env, &f, 50, 2, T0 + 3_600);
    let renew_sig = renew_voucher(&env, &f, &label, 10_000, &renew_pay);

    let calls = vec![
        &env,
        ControllerCall::Renew(RenewArgs {
            label: label.clone(),
            duration: 10_000,
            payload: renew_pay,
            signature: renew_sig,
        }),
        ControllerCall::UpdateDomainManager(lh.clone(), successor.clone()),
    ];
    f.controller.multicall(&f.payer, &calls);

    assert_eq!(f.registry.expiry_of(&lh), expiry + 10_000);
    assert_eq!(f.controller.domain_manager(&node), Some(successor));
    assert_eq!(f.token.balance(&f.treasury), 150);
}

#[test]
fn test_multicall_stops_at_first_failure() {
    let env = Env::default();
    let f = setup(&env);

    let label = String::from_str(&env, "alice");
    let lh = f.controller.get_label_hash(&label);

    // First step fails (nothing registered to renew); the second step would
    // succeed on its own but must never run.
    let renew_pay = payload(&env, &f, 50, 1, T0 + 3_600);
    let renew_sig = renew_voucher(&env, &f, &label, 10_000, &renew_pay);
    let calls = vec![
        &env,
        ControllerCall::Renew(RenewArgs {
            label,
            duration: 10_000,
            payload: renew_pay,
            signature: renew_sig,
        }),
        ControllerCall::SetName(String::from_str(&env, "alice")),
    ];

    assert_eq!(
        f.controller.try_multicall(&f.payer, &calls),
        Err(Ok(ContractError::ExpiredId))
    );
    assert!(f.registry.available(&lh));
    assert_eq!(
        f.resolver.name(&f.controller.get_reverse_node(&f.payer)),
        None
    );
}
