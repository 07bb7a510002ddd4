#![no_std]

//! # Name Resolver Contract
//!
//! Stores the records a name resolves to: forward address records keyed by
//! name node, and reverse name records keyed by an address's reverse node.
//! Writes are accepted only from the configured controller, which performs
//! all authorization (manager checks for forward records, reverse-node
//! derivation for reverse records) before forwarding.

use naming_errors::ContractError;
use soroban_sdk::{contract, contractimpl, contracttype, Address, BytesN, Env, String, Symbol};

/// Storage keys for the resolver contract.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Contract administrator.
    Admin,
    /// The only address allowed to write records.
    Controller,
    /// Forward record: node -> Address. Stored in `persistent()`.
    Addr(BytesN<32>),
    /// Reverse record: reverse node -> name string. Stored in `persistent()`.
    Name(BytesN<32>),
}

fn require_admin(e: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    let admin: Address = e
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ContractError::NotInitialized)?;
    if admin != *caller {
        return Err(ContractError::NotAdmin);
    }
    Ok(())
}

fn require_controller(e: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    let controller: Option<Address> = e.storage().instance().get(&DataKey::Controller);
    match controller {
        Some(ref c) if c == caller => Ok(()),
        _ => Err(ContractError::InvalidCaller),
    }
}

#[contract]
pub struct NameResolver;

#[contractimpl]
impl NameResolver {
    /// One-time initialization.
    pub fn initialize(e: Env, admin: Address) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();
        e.storage().instance().set(&DataKey::Admin, &admin);
        e.events()
            .publish((Symbol::new(&e, "resolver_initialized"),), admin);
        Ok(())
    }

    /// Point the resolver at a (new) controller. Admin only; the new value
    /// must differ from the current one.
    pub fn set_controller(
        e: Env,
        caller: Address,
        controller: Address,
    ) -> Result<(), ContractError> {
        require_admin(&e, &caller)?;

        let current: Option<Address> = e.storage().instance().get(&DataKey::Controller);
        if current.as_ref() == Some(&controller) {
            return Err(ContractError::UnchangedData);
        }

        e.storage().instance().set(&DataKey::Controller, &controller);
        e.events()
            .publish((Symbol::new(&e, "set_controller"),), controller);
        Ok(())
    }

    /// Write the forward address record for `node`. Controller only.
    pub fn set_addr(
        e: Env,
        caller: Address,
        node: BytesN<32>,
        addr: Address,
    ) -> Result<(), ContractError> {
        require_controller(&e, &caller)?;
        e.storage()
            .persistent()
            .set(&DataKey::Addr(node.clone()), &addr);
        e.events()
            .publish((Symbol::new(&e, "addr_changed"), node), addr);
        Ok(())
    }

    /// Write the reverse name record for `node`. Controller only.
    pub fn set_name(
        e: Env,
        caller: Address,
        node: BytesN<32>,
        name: String,
    ) -> Result<(), ContractError> {
        require_controller(&e, &caller)?;
        e.storage()
            .persistent()
            .set(&DataKey::Name(node.clone()), &name);
        e.events()
            .publish((Symbol::new(&e, "name_changed"), node), name);
        Ok(())
    }

    /// The address `node` resolves to, if a record exists.
    pub fn addr(e: Env, node: BytesN<32>) -> Option<Address> {
        e.storage().persistent().get(&DataKey::Addr(node))
    }

    /// The name stored at a reverse `node`, if a record exists.
    pub fn name(e: Env, node: BytesN<32>) -> Option<String> {
        e.storage().persistent().get(&DataKey::Name(node))
    }

    /// The configured controller, if one has been set.
    pub fn controller(e: Env) -> Option<Address> {
        e.storage().instance().get(&DataKey::Controller)
    }

    /// The admin address.
    pub fn admin(e: Env) -> Result<Address, ContractError> {
        e.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(ContractError::NotInitialized)
    }
}
