//! Administrative configuration tests: setters, no-op rejection, oracle
//! rotation, and fund recovery.

#![cfg(test)]

extern crate std;

use crate::test_helpers::*;
use naming_errors::ContractError;
use soroban_sdk::testutils::{Address as _, Events};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env, FromVal, String, Symbol};

#[test]
fn test_initial_configuration() {
    let env = Env::default();
    let f = setup(&env);

    assert_eq!(f.controller.registry(), f.registry.address);
    assert_eq!(f.controller.resolver(), f.resolver.address);
    assert_eq!(f.controller.oracle(), oracle_public_key(&env, &f.oracle_sk));
    assert_eq!(f.controller.treasury(), f.treasury);
    assert_eq!(f.controller.admin(), f.admin);
    assert_eq!(f.controller.min_registration_duration(), MIN_DURATION);
}

#[test]
fn test_initialize_twice_fails() {
    let env = Env::default();
    let f = setup(&env);

    assert_eq!(
        f.controller.try_initialize(
            &f.admin,
            &f.registry.address,
            &f.resolver.address,
            &oracle_public_key(&env, &f.oracle_sk),
            &f.treasury,
            &2,
        ),
        Err(Ok(ContractError::AlreadyInitialized))
    );
}

#[test]
fn test_setters_reject_non_admin() {
    let env = Env::default();
    let f = setup(&env);
    let stranger = Address::generate(&env);
    let target = Address::generate(&env);

    assert_eq!(
        f.controller.try_set_resolver(&stranger, &target),
        Err(Ok(ContractError::NotAdmin))
    );
    assert_eq!(
        f.controller
            .try_set_oracle(&stranger, &oracle_public_key(&env, &oracle_signing_key(9))),
        Err(Ok(ContractError::NotAdmin))
    );
    assert_eq!(
        f.controller.try_set_treasury(&stranger, &target),
        Err(Ok(ContractError::NotAdmin))
    );
    assert_eq!(
        f.controller
            .try_recover_funds(&stranger, &f.token.address, &target, &0),
        Err(Ok(ContractError::NotAdmin))
    );
}

#[test]
fn test_setters_reject_noop_updates() {
    let env = Env::default();
    let f = setup(&env);

    assert_eq!(
        f.controller.try_set_resolver(&f.admin, &f.resolver.address),
        Err(Ok(ContractError::UnchangedData))
    );
    assert_eq!(
        f.controller
            .try_set_oracle(&f.admin, &oracle_public_key(&env, &f.oracle_sk)),
        Err(Ok(ContractError::UnchangedData))
    );
    assert_eq!(
        f.controller.try_set_treasury(&f.admin, &f.treasury),
        Err(Ok(ContractError::UnchangedData))
    );
}

#[test]
fn test_setters_update_and_emit() {
    let env = Env::default();
    let f = setup(&env);

    let new_resolver = Address::generate(&env);
    let new_treasury = Address::generate(&env);

    f.controller.set_resolver(&f.admin, &new_resolver);
    f.controller.set_treasury(&f.admin, &new_treasury);

    assert_eq!(f.controller.resolver(), new_resolver);
    assert_eq!(f.controller.treasury(), new_treasury);

    let events = env.events().all();
    let set_treasury = events
        .iter()
        .filter(|ev| ev.0 == f.controller.address)
        .find(|ev| {
            Symbol::from_val(&env, &ev.1.get(0).unwrap()) == Symbol::new(&env, "set_treasury")
        })
        .unwrap();
    assert_eq!(Address::from_val(&env, &set_treasury.2), new_treasury);
}

#[test]
fn test_oracle_rotation_invalidates_old_vouchers() {
    let env = Env::default();
    let f = setup(&env);

    let replacement = oracle_signing_key(9);
    f.controller
        .set_oracle(&f.admin, &oracle_public_key(&env, &replacement));

    let label = String::from_str(&env, "alice");
    let owner = Address::generate(&env);
    let manager = Address::generate(&env);
    let pay = payload(&env, &f, 100, 1, T0 + 3_600);

    // Signed by the retired oracle key.
    let stale = register_voucher(&env, &f, &label, &owner, MIN_DURATION, &pay);
    assert_eq!(
        f.controller
            .try_register(&f.payer, &label, &owner, &manager, &MIN_DURATION, &pay, &stale),
        Err(Ok(ContractError::InvalidOracle))
    );

    // Signed by the new one.
    let digest = f
        .controller
        .register_digest(&label, &owner, &MIN_DURATION, &pay);
    let fresh = sign_digest(&env, &replacement, &digest);
    f.controller
        .register(&f.payer, &label, &owner, &manager, &MIN_DURATION, &pay, &fresh);
}

#[test]
fn test_treasury_rotation_redirects_fees() {
    let env = Env::default();
    let f = setup(&env);

    let new_treasury = Address::generate(&env);
    f.controller.set_treasury(&f.admin, &new_treasury);

    let label = String::from_str(&env, "alice");
    let owner = Address::generate(&env);
    let manager = Address::generate(&env);
    let pay = payload(&env, &f, 100, 1, T0 + 3_600);
    let sig = register_voucher(&env, &f, &label, &owner, MIN_DURATION, &pay);
    f.controller
        .register(&f.payer, &label, &owner, &manager, &MIN_DURATION, &pay, &sig);

    assert_eq!(f.token.balance(&new_treasury), 100);
    assert_eq!(f.token.balance(&f.treasury), 0);
}

#[test]
fn test_recover_funds_sweeps_to_recipient() {
    let env = Env::default();
    let f = setup(&env);

    // Tokens stranded on the controller itself.
    StellarAssetClient::new(&env, &f.token.address).mint(&f.controller.address, &777);

    let recipient = Address::generate(&env);
    f.controller
        .recover_funds(&f.admin, &f.token.address, &recipient, &777);

    assert_eq!(f.token.balance(&recipient), 777);
    assert_eq!(f.token.balance(&f.controller.address), 0);
}
