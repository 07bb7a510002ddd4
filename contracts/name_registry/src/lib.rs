#![no_std]

//! # Name Registry Contract
//!
//! Holds the id -> owner and id -> expiry mappings for registered names and
//! enforces the ownership lifecycle: a name is Active until its expiry,
//! protected from re-registration during a grace period after expiry, and
//! available again once the grace period has fully elapsed.
//!
//! ## Features
//! - Register and renew names, restricted to a single configured controller
//! - Lazy expiry: state derives from the stored expiry and the ledger clock
//! - Burn-then-mint re-registration of fully expired names
//! - Emit events for every ownership change
//!
//! ## Storage Layout
//!
//! | Key                  | Tier          | Lifecycle       |
//! |----------------------|---------------|-----------------|
//! | `DataKey::Admin`     | `instance()`  | Entire contract |
//! | `DataKey::Controller`| `instance()`  | Entire contract |
//! | `DataKey::GracePeriod`| `instance()` | Entire contract |
//! | `DataKey::Owner(id)` | `persistent()`| Per name        |
//! | `DataKey::Expiry(id)`| `persistent()`| Per name        |

use naming_errors::ContractError;
use soroban_sdk::{contract, contractimpl, contracttype, Address, BytesN, Env, Symbol};

/// Seconds in one day; the grace period is configured in whole days.
const ONE_DAY: u64 = 86_400;

/// Storage keys for the registry contract.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Contract administrator.
    Admin,
    /// The only address allowed to drive register/renew.
    Controller,
    /// Grace period in seconds, fixed at initialization.
    GracePeriod,
    /// Current holder of a name: id -> Address. Stored in `persistent()`.
    Owner(BytesN<32>),
    /// Absolute expiry timestamp of a name: id -> u64. Stored in `persistent()`.
    Expiry(BytesN<32>),
}

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

fn require_controller(e: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    let controller: Option<Address> = e.storage().instance().get(&DataKey::Controller);
    match controller {
        Some(ref c) if c == caller => Ok(()),
        _ => Err(ContractError::InvalidCaller),
    }
}

fn stored_expiry(e: &Env, id: &BytesN<32>) -> u64 {
    e.storage()
        .persistent()
        .get(&DataKey::Expiry(id.clone()))
        .unwrap_or(0)
}

/// A name is available once its expiry plus the grace period lies strictly
/// in the past. Absent records have expiry 0 and are always available.
fn is_available(e: &Env, id: &BytesN<32>) -> bool {
    let expiry = stored_expiry(e, id);
    let grace: u64 = e
        .storage()
        .instance()
        .get(&DataKey::GracePeriod)
        .unwrap_or(0);
    e.ledger().timestamp() > expiry.saturating_add(grace)
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct NameRegistry;

#[contractimpl]
impl NameRegistry {
    /// One-time initialization. The grace period is `grace_multiplier` whole
    /// days and cannot be changed afterwards.
    pub fn initialize(
        e: Env,
        admin: Address,
        grace_multiplier: u64,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        let grace = grace_multiplier
            .checked_mul(ONE_DAY)
            .ok_or(ContractError::Overflow)?;

        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::GracePeriod, &grace);

        e.events()
            .publish((Symbol::new(&e, "registry_initialized"),), (admin, grace));
        Ok(())
    }

    /// Point the registry at a (new) controller. Admin only; the new value
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

    /// Mint `id` to `owner` for `duration` seconds. Controller only.
    ///
    /// Fails with `UnexpiredId` unless the name is available. Re-registering
    /// a fully expired name first revokes the previous holder (a `burn`
    /// event) and then installs the new one (a `mint` event): two distinct
    /// ownership notifications, in that order.
    ///
    /// Returns the new expiry timestamp.
    pub fn register(
        e: Env,
        caller: Address,
        id: BytesN<32>,
        owner: Address,
        duration: u64,
    ) -> Result<u64, ContractError> {
        require_controller(&e, &caller)?;

        if !is_available(&e, &id) {
            return Err(ContractError::UnexpiredId);
        }

        let now = e.ledger().timestamp();
        let expiry = now.checked_add(duration).ok_or(ContractError::Overflow)?;

        let owner_key = DataKey::Owner(id.clone());
        if let Some(previous) = e.storage().persistent().get::<_, Address>(&owner_key) {
            e.storage().persistent().remove(&owner_key);
            e.events()
                .publish((Symbol::new(&e, "burn"), id.clone()), previous);
        }

        e.storage().persistent().set(&owner_key, &owner);
        e.storage()
            .persistent()
            .set(&DataKey::Expiry(id.clone()), &expiry);

        e.events()
            .publish((Symbol::new(&e, "mint"), id), (owner, expiry));
        Ok(expiry)
    }

    /// Extend the expiry of `id` by `duration` seconds. Controller only.
    ///
    /// Fails with `ExpiredId` if the name is available (never registered, or
    /// expired past its grace period). Renewal always compounds onto the
    /// stored expiry, never onto the current time, so back-to-back renewals
    /// are additive regardless of when they land.
    ///
    /// Returns the new expiry timestamp.
    pub fn renew(
        e: Env,
        caller: Address,
        id: BytesN<32>,
        duration: u64,
    ) -> Result<u64, ContractError> {
        require_controller(&e, &caller)?;

        if is_available(&e, &id) {
            return Err(ContractError::ExpiredId);
        }

        let expiry = stored_expiry(&e, &id)
            .checked_add(duration)
            .ok_or(ContractError::Overflow)?;
        e.storage()
            .persistent()
            .set(&DataKey::Expiry(id.clone()), &expiry);

        e.events().publish((Symbol::new(&e, "renewed"), id), expiry);
        Ok(expiry)
    }

    /// Current owner of `id`. Fails with `InvalidId` unless the name is
    /// strictly active: during the grace period the name is simultaneously
    /// not available and not owned for read purposes, which protects the
    /// previous registrant's renewal priority without treating stale
    /// ownership as valid.
    pub fn owner_of(e: Env, id: BytesN<32>) -> Result<Address, ContractError> {
        let owner: Address = e
            .storage()
            .persistent()
            .get(&DataKey::Owner(id.clone()))
            .ok_or(ContractError::InvalidId)?;
        if e.ledger().timestamp() > stored_expiry(&e, &id) {
            return Err(ContractError::InvalidId);
        }
        Ok(owner)
    }

    /// Whether `id` can be registered right now. Never fails.
    pub fn available(e: Env, id: BytesN<32>) -> bool {
        is_available(&e, &id)
    }

    /// Stored expiry timestamp of `id`; 0 when the name was never registered.
    pub fn expiry_of(e: Env, id: BytesN<32>) -> u64 {
        stored_expiry(&e, &id)
    }

    /// The grace period in seconds.
    pub fn grace_period(e: Env) -> Result<u64, ContractError> {
        e.storage()
            .instance()
            .get(&DataKey::GracePeriod)
            .ok_or(ContractError::NotInitialized)
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
