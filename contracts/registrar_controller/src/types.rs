use soroban_sdk::{contracttype, Address, BytesN, String};

// ─── Voucher types ─────────────────────────────────────────────────────────

/// Oracle-quoted payment terms for one registration or renewal.
#[contracttype]
#[derive(Clone, Debug)]
pub struct PricePayload {
    /// Payment token the fee is denominated in.
    pub token: Address,
    /// Fee amount transferred from the payer to the treasury.
    pub price: i128,
    /// Single-use key; consumed forever when the voucher is spent.
    pub key: BytesN<32>,
    /// Latest ledger timestamp at which the voucher is accepted.
    pub deadline: u64,
}

/// Compact recoverable secp256k1 signature: `r` plus `vs`, where the top
/// bit of `vs` carries the recovery id and the remaining bits are the `s`
/// scalar.
#[contracttype]
#[derive(Clone, Debug)]
pub struct VoucherSignature {
    pub r: BytesN<32>,
    pub vs: BytesN<32>,
}

// ─── Batched execution ─────────────────────────────────────────────────────

/// Arguments of a batched registration.
#[contracttype]
#[derive(Clone, Debug)]
pub struct RegisterArgs {
    pub label: String,
    pub name_owner: Address,
    pub domain_manager: Address,
    pub duration: u64,
    pub payload: PricePayload,
    pub signature: VoucherSignature,
}

/// Arguments of a batched renewal.
#[contracttype]
#[derive(Clone, Debug)]
pub struct RenewArgs {
    pub label: String,
    pub duration: u64,
    pub payload: PricePayload,
    pub signature: VoucherSignature,
}

/// One sub-operation of a `multicall` batch.
///
/// Every variant executes under the identity of the outer caller, and the
/// batch is all-or-nothing: a failing sub-operation aborts the whole
/// invocation with no surviving effects.
#[contracttype]
#[derive(Clone, Debug)]
pub enum ControllerCall {
    Register(RegisterArgs),
    Renew(RenewArgs),
    SetAddr(BytesN<32>, Address),
    SetName(String),
    UpdateDomainManager(BytesN<32>, Address),
}

// ─── Storage keys ──────────────────────────────────────────────────────────

/// Storage keys for the controller contract.
///
/// Config values live in `instance()`; the used-key set and the manager map
/// are unbounded and live in `persistent()`.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Contract administrator.
    Admin,
    /// Name registry driven by this controller.
    Registry,
    /// Resolver that record writes are forwarded to.
    Resolver,
    /// Uncompressed secp256k1 public key vouchers must recover to.
    Oracle,
    /// Recipient of registration and renewal fees.
    Treasury,
    /// Minimum registration duration in seconds.
    MinDuration,
    /// Consumed voucher keys, shared by register and renew.
    UsedKey(BytesN<32>),
    /// Delegated domain manager per name node.
    Manager(BytesN<32>),
}
