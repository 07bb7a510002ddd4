#![no_std]

//! # Registrar Controller Contract
//!
//! Front door of the name service: validates labels, authenticates
//! oracle-signed price vouchers, enforces single-use voucher keys, collects
//! payment, and drives the name registry. Also owns the per-name delegated
//! manager map and forwards record writes to the resolver.
//!
//! ## Features
//! - Voucher-authenticated registration and renewal with replay protection
//! - Per-name domain managers, delegated independently of registry ownership
//! - Manager-gated forward records; ungated self-service reverse records
//! - Atomic batched execution preserving the original caller identity
//! - Admin-managed resolver/oracle/treasury configuration
//!
//! ## Storage Layout
//!
//! | Key                   | Tier          | Lifecycle       |
//! |-----------------------|---------------|-----------------|
//! | config (`Admin`, ...) | `instance()`  | Entire contract |
//! | `DataKey::UsedKey(k)` | `persistent()`| Per voucher     |
//! | `DataKey::Manager(n)` | `persistent()`| Per name node   |

mod interfaces;
mod namehash;
mod types;
mod voucher;

pub use types::{ControllerCall, PricePayload, RegisterArgs, RenewArgs, VoucherSignature};

use interfaces::{RegistryClient, ResolverClient};
use naming_errors::ContractError;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Symbol, Vec};
use types::DataKey;

/// Seconds in one day; the registration floor is configured in whole days.
const ONE_DAY: u64 = 86_400;

// ─── Helpers ───────────────────────────────────────────────────────────────

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

fn config_address(e: &Env, key: &DataKey) -> Result<Address, ContractError> {
    e.storage()
        .instance()
        .get(key)
        .ok_or(ContractError::NotInitialized)
}

fn oracle_key(e: &Env) -> Result<BytesN<65>, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Oracle)
        .ok_or(ContractError::NotInitialized)
}

fn min_duration(e: &Env) -> Result<u64, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::MinDuration)
        .ok_or(ContractError::NotInitialized)
}

fn manager_of(e: &Env, node: &BytesN<32>) -> Option<Address> {
    e.storage().persistent().get(&DataKey::Manager(node.clone()))
}

fn set_manager(e: &Env, node: &BytesN<32>, manager: &Address) {
    e.storage()
        .persistent()
        .set(&DataKey::Manager(node.clone()), manager);
    e.events().publish(
        (Symbol::new(e, "manager_updated"), node.clone()),
        manager.clone(),
    );
}

/// Consumes the voucher key and moves the fee to the treasury. Shared by
/// registration and renewal; the key set is one pool across both.
fn spend_voucher(e: &Env, payer: &Address, payload: &PricePayload) -> Result<(), ContractError> {
    e.storage()
        .persistent()
        .set(&DataKey::UsedKey(payload.key.clone()), &true);

    let treasury = config_address(e, &DataKey::Treasury)?;
    TokenClient::new(e, &payload.token).transfer_from(
        &e.current_contract_address(),
        payer,
        &treasury,
        &payload.price,
    );
    Ok(())
}

// ─── Internal operations ───────────────────────────────────────────────────
//
// The public entry points authenticate the caller once and delegate here;
// `multicall` dispatches to the same functions so every sub-operation runs
// under the outer caller's identity.

#[allow(clippy::too_many_arguments)]
fn do_register(
    e: &Env,
    payer: &Address,
    label: &String,
    name_owner: &Address,
    domain_manager: &Address,
    duration: u64,
    payload: &PricePayload,
    signature: &VoucherSignature,
) -> Result<u64, ContractError> {
    if label.len() < namehash::MIN_LABEL_LEN {
        return Err(ContractError::InvalidName);
    }
    let lh = namehash::label_hash(e, label).ok_or(ContractError::InvalidName)?;

    if duration < min_duration(e)? {
        return Err(ContractError::TooShortDuration);
    }
    if payload.deadline < e.ledger().timestamp() {
        return Err(ContractError::ExpiredDeadline);
    }
    if e.storage()
        .persistent()
        .has(&DataKey::UsedKey(payload.key.clone()))
    {
        return Err(ContractError::UsedKey);
    }
    voucher::verify_register(
        e,
        &lh,
        name_owner,
        duration,
        payload,
        signature,
        &oracle_key(e)?,
    )?;

    spend_voucher(e, payer, payload)?;

    let registry = config_address(e, &DataKey::Registry)?;
    let expiry = RegistryClient::new(e, &registry).register(
        &e.current_contract_address(),
        &lh,
        name_owner,
        &duration,
    );

    let node = namehash::node(e, &lh);
    set_manager(e, &node, domain_manager);

    e.events().publish(
        (Symbol::new(e, "registered"), lh),
        (
            label.clone(),
            name_owner.clone(),
            payload.token.clone(),
            payload.price,
            expiry,
        ),
    );
    Ok(expiry)
}

fn do_renew(
    e: &Env,
    payer: &Address,
    label: &String,
    duration: u64,
    payload: &PricePayload,
    signature: &VoucherSignature,
) -> Result<u64, ContractError> {
    let lh = namehash::label_hash(e, label).ok_or(ContractError::InvalidName)?;

    if payload.deadline < e.ledger().timestamp() {
        return Err(ContractError::ExpiredDeadline);
    }
    if e.storage()
        .persistent()
        .has(&DataKey::UsedKey(payload.key.clone()))
    {
        return Err(ContractError::UsedKey);
    }
    voucher::verify_renew(e, &lh, duration, payload, signature, &oracle_key(e)?)?;

    spend_voucher(e, payer, payload)?;

    let registry = config_address(e, &DataKey::Registry)?;
    let expiry = RegistryClient::new(e, &registry).renew(
        &e.current_contract_address(),
        &lh,
        &duration,
    );

    e.events().publish(
        (Symbol::new(e, "renewed"), lh),
        (label.clone(), payload.token.clone(), payload.price, expiry),
    );
    Ok(expiry)
}

fn do_update_manager(
    e: &Env,
    caller: &Address,
    id: &BytesN<32>,
    new_manager: &Address,
) -> Result<(), ContractError> {
    let node = namehash::node(e, id);
    let is_manager = manager_of(e, &node).as_ref() == Some(caller);

    // Ownership reads fail outside the strictly-active window, so an
    // expired registrant cannot claim the owner path here.
    let registry = config_address(e, &DataKey::Registry)?;
    let is_owner = matches!(
        RegistryClient::new(e, &registry).try_owner_of(id),
        Ok(Ok(ref owner)) if owner == caller
    );

    if !is_owner && !is_manager {
        return Err(ContractError::Unauthorized);
    }
    set_manager(e, &node, new_manager);
    Ok(())
}

fn do_set_addr(
    e: &Env,
    caller: &Address,
    node: &BytesN<32>,
    addr: &Address,
) -> Result<(), ContractError> {
    if manager_of(e, node).as_ref() != Some(caller) {
        return Err(ContractError::Unauthorized);
    }
    let resolver = config_address(e, &DataKey::Resolver)?;
    ResolverClient::new(e, &resolver).set_addr(&e.current_contract_address(), node, addr);
    Ok(())
}

fn do_set_name(e: &Env, caller: &Address, name: &String) -> Result<(), ContractError> {
    // Not gated by the manager map: anyone may point their own reverse node
    // at any label, even one they do not control. Consumers must check that
    // the forward record of that label resolves back to the same address.
    let node = namehash::reverse_node(e, caller);
    let resolver = config_address(e, &DataKey::Resolver)?;
    ResolverClient::new(e, &resolver).set_name(&e.current_contract_address(), &node, name);
    Ok(())
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct RegistrarController;

#[contractimpl]
impl RegistrarController {
    /// One-time initialization. The minimum registration duration is
    /// `min_duration_days` whole days.
    pub fn initialize(
        e: Env,
        admin: Address,
        registry: Address,
        resolver: Address,
        oracle: BytesN<65>,
        treasury: Address,
        min_duration_days: u64,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        let min = min_duration_days
            .checked_mul(ONE_DAY)
            .ok_or(ContractError::Overflow)?;

        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::Registry, &registry);
        e.storage().instance().set(&DataKey::Resolver, &resolver);
        e.storage().instance().set(&DataKey::Oracle, &oracle);
        e.storage().instance().set(&DataKey::Treasury, &treasury);
        e.storage().instance().set(&DataKey::MinDuration, &min);

        e.events()
            .publish((Symbol::new(&e, "controller_initialized"),), admin);
        Ok(())
    }

    // ── Registration protocol ──────────────────────────────────────────────

    /// Register `label` for `name_owner`, paying the voucher's price from
    /// `payer` and delegating record management to `domain_manager`.
    ///
    /// Preconditions, each a distinct failure: label syntax (`InvalidName`),
    /// duration floor (`TooShortDuration`), voucher deadline
    /// (`ExpiredDeadline`), unused voucher key (`UsedKey`), oracle signature
    /// (`InvalidOracle`). The registry rejects names that are not available
    /// (`UnexpiredId`). A failed call leaves no state behind.
    ///
    /// Returns the new expiry timestamp.
    #[allow(clippy::too_many_arguments)]
    pub fn register(
        e: Env,
        payer: Address,
        label: String,
        name_owner: Address,
        domain_manager: Address,
        duration: u64,
        payload: PricePayload,
        signature: VoucherSignature,
    ) -> Result<u64, ContractError> {
        payer.require_auth();
        do_register(
            &e,
            &payer,
            &label,
            &name_owner,
            &domain_manager,
            duration,
            &payload,
            &signature,
        )
    }

    /// Extend the registration of `label`, paying the voucher's price from
    /// `payer`. Renewal never changes ownership, so the signed voucher
    /// omits the owner; a registration voucher cannot stand in for a
    /// renewal voucher or vice versa. The registry rejects available names
    /// (`ExpiredId`).
    ///
    /// Returns the new expiry timestamp.
    pub fn renew(
        e: Env,
        payer: Address,
        label: String,
        duration: u64,
        payload: PricePayload,
        signature: VoucherSignature,
    ) -> Result<u64, ContractError> {
        payer.require_auth();
        do_renew(&e, &payer, &label, duration, &payload, &signature)
    }

    // ── Domain managers and records ────────────────────────────────────────

    /// Hand the manager role for the name `id` to `new_manager`. The caller
    /// must be the current registry owner of `id` or its current manager.
    pub fn update_domain_manager(
        e: Env,
        caller: Address,
        id: BytesN<32>,
        new_manager: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        do_update_manager(&e, &caller, &id, &new_manager)
    }

    /// Whether `caller` is the delegated manager of `node`. The resolver
    /// boundary consults this before accepting forward-record writes.
    pub fn is_authorized_manager(e: Env, node: BytesN<32>, caller: Address) -> bool {
        manager_of(&e, &node) == Some(caller)
    }

    /// The delegated manager of `node`, if any.
    pub fn domain_manager(e: Env, node: BytesN<32>) -> Option<Address> {
        manager_of(&e, &node)
    }

    /// Write the forward address record of `node`. Manager only.
    pub fn set_addr(
        e: Env,
        caller: Address,
        node: BytesN<32>,
        addr: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        do_set_addr(&e, &caller, &node, &addr)
    }

    /// Point the caller's own reverse record at `name`.
    pub fn set_name(e: Env, caller: Address, name: String) -> Result<(), ContractError> {
        caller.require_auth();
        do_set_name(&e, &caller, &name)
    }

    // ── Batched execution ──────────────────────────────────────────────────

    /// Execute an ordered list of controller operations as one atomic unit.
    /// Every sub-operation observes `caller` as its identity; if any
    /// sub-operation fails, the whole batch is rolled back.
    pub fn multicall(
        e: Env,
        caller: Address,
        calls: Vec<ControllerCall>,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        if calls.is_empty() {
            return Err(ContractError::EmptyBatch);
        }
        for call in calls.iter() {
            match call {
                ControllerCall::Register(args) => {
                    do_register(
                        &e,
                        &caller,
                        &args.label,
                        &args.name_owner,
                        &args.domain_manager,
                        args.duration,
                        &args.payload,
                        &args.signature,
                    )?;
                }
                ControllerCall::Renew(args) => {
                    do_renew(
                        &e,
                        &caller,
                        &args.label,
                        args.duration,
                        &args.payload,
                        &args.signature,
                    )?;
                }
                ControllerCall::SetAddr(node, addr) => {
                    do_set_addr(&e, &caller, &node, &addr)?;
                }
                ControllerCall::SetName(name) => {
                    do_set_name(&e, &caller, &name)?;
                }
                ControllerCall::UpdateDomainManager(id, manager) => {
                    do_update_manager(&e, &caller, &id, &manager)?;
                }
            }
        }
        Ok(())
    }

    // ── Name processing views ──────────────────────────────────────────────

    /// Whether `label` is acceptable for registration.
    pub fn valid(label: String) -> bool {
        label.len() >= namehash::MIN_LABEL_LEN && label.len() <= namehash::MAX_LABEL_LEN
    }

    /// keccak256 of the raw label bytes, which is also the name's registry id.
    pub fn get_label_hash(e: Env, label: String) -> Result<BytesN<32>, ContractError> {
        namehash::label_hash(&e, &label).ok_or(ContractError::InvalidName)
    }

    /// Fully-qualified node of a label hash under the base domain.
    pub fn get_node(e: Env, label_hash: BytesN<32>) -> BytesN<32> {
        namehash::node(&e, &label_hash)
    }

    /// Reverse node of `who` under `addr.reverse`.
    pub fn get_reverse_node(e: Env, who: Address) -> BytesN<32> {
        namehash::reverse_node(&e, &who)
    }

    /// Node of the base domain itself.
    pub fn base_node(e: Env) -> BytesN<32> {
        namehash::base_node(&e)
    }

    /// Node of `addr.reverse`.
    pub fn addr_reverse_node(e: Env) -> BytesN<32> {
        namehash::addr_reverse_node(&e)
    }

    // ── Voucher digest views (for off-chain quote tooling) ─────────────────

    /// Digest the oracle must sign to authorize this registration.
    pub fn register_digest(
        e: Env,
        label: String,
        name_owner: Address,
        duration: u64,
        payload: PricePayload,
    ) -> Result<BytesN<32>, ContractError> {
        let lh = namehash::label_hash(&e, &label).ok_or(ContractError::InvalidName)?;
        Ok(voucher::register_digest(&e, &lh, &name_owner, duration, &payload))
    }

    /// Digest the oracle must sign to authorize this renewal.
    pub fn renew_digest(
        e: Env,
        label: String,
        duration: u64,
        payload: PricePayload,
    ) -> Result<BytesN<32>, ContractError> {
        let lh = namehash::label_hash(&e, &label).ok_or(ContractError::InvalidName)?;
        Ok(voucher::renew_digest(&e, &lh, duration, &payload))
    }

    /// Whether a voucher key has already been consumed.
    pub fn is_key_used(e: Env, key: BytesN<32>) -> bool {
        e.storage().persistent().has(&DataKey::UsedKey(key))
    }

    // ── Administration ─────────────────────────────────────────────────────

    /// Swap the resolver. Admin only; the new value must differ.
    pub fn set_resolver(e: Env, caller: Address, resolver: Address) -> Result<(), ContractError> {
        require_admin(&e, &caller)?;
        let current = config_address(&e, &DataKey::Resolver)?;
        if current == resolver {
            return Err(ContractError::UnchangedData);
        }
        e.storage().instance().set(&DataKey::Resolver, &resolver);
        e.events()
            .publish((Symbol::new(&e, "set_resolver"),), resolver);
        Ok(())
    }

    /// Swap the oracle key vouchers must recover to. Admin only; the new
    /// value must differ.
    pub fn set_oracle(e: Env, caller: Address, oracle: BytesN<65>) -> Result<(), ContractError> {
        require_admin(&e, &caller)?;
        let current = oracle_key(&e)?;
        if current == oracle {
            return Err(ContractError::UnchangedData);
        }
        e.storage().instance().set(&DataKey::Oracle, &oracle);
        e.events().publish((Symbol::new(&e, "set_oracle"),), oracle);
        Ok(())
    }

    /// Swap the treasury. Admin only; the new value must differ.
    pub fn set_treasury(e: Env, caller: Address, treasury: Address) -> Result<(), ContractError> {
        require_admin(&e, &caller)?;
        let current = config_address(&e, &DataKey::Treasury)?;
        if current == treasury {
            return Err(ContractError::UnchangedData);
        }
        e.storage().instance().set(&DataKey::Treasury, &treasury);
        e.events()
            .publish((Symbol::new(&e, "set_treasury"),), treasury);
        Ok(())
    }

    /// Sweep tokens held by the controller to `to`. Admin only.
    pub fn recover_funds(
        e: Env,
        caller: Address,
        token: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        require_admin(&e, &caller)?;
        TokenClient::new(&e, &token).transfer(&e.current_contract_address(), &to, &amount);
        e.events()
            .publish((Symbol::new(&e, "funds_recovered"), token), (to, amount));
        Ok(())
    }

    // ── Configuration views ────────────────────────────────────────────────

    /// The registry this controller drives.
    pub fn registry(e: Env) -> Result<Address, ContractError> {
        config_address(&e, &DataKey::Registry)
    }

    /// The resolver record writes are forwarded to.
    pub fn resolver(e: Env) -> Result<Address, ContractError> {
        config_address(&e, &DataKey::Resolver)
    }

    /// The oracle public key vouchers must recover to.
    pub fn oracle(e: Env) -> Result<BytesN<65>, ContractError> {
        oracle_key(&e)
    }

    /// The fee recipient.
    pub fn treasury(e: Env) -> Result<Address, ContractError> {
        config_address(&e, &DataKey::Treasury)
    }

    /// The minimum registration duration in seconds.
    pub fn min_registration_duration(e: Env) -> Result<u64, ContractError> {
        min_duration(&e)
    }

    /// The admin address.
    pub fn admin(e: Env) -> Result<Address, ContractError> {
        config_address(&e, &DataKey::Admin)
    }
}


#[cfg(test)]
mod test_admin;


#[cfg(test)]
mod test_multicall;
