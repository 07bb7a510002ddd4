//! Interface boundaries of the contracts the controller drives.

use naming_errors::ContractError;
use soroban_sdk::{contractclient, Address, BytesN, Env, String};

/// Registry operations the controller orchestrates.
#[contractclient(name = "RegistryClient")]
pub trait RegistryInterface {
    fn register(
        e: Env,
        caller: Address,
        id: BytesN<32>,
        owner: Address,
        duration: u64,
    ) -> Result<u64, ContractError>;

    fn renew(e: Env, caller: Address, id: BytesN<32>, duration: u64) -> Result<u64, ContractError>;

    fn owner_of(e: Env, id: BytesN<32>) -> Result<Address, ContractError>;

    fn available(e: Env, id: BytesN<32>) -> bool;
}

/// Resolver operations record writes are forwarded to.
#[contractclient(name = "ResolverClient")]
pub trait ResolverInterface {
    fn set_addr(
        e: Env,
        caller: Address,
        node: BytesN<32>,
        addr: Address,
    ) -> Result<(), ContractError>;

    fn set_name(
        e: Env,
        caller: Address,
        node: BytesN<32>,
        name: String,
    ) -> Result<(), ContractError>;
}
