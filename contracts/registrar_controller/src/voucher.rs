//! Price voucher digests and oracle signature recovery.
//!
//! A voucher binds its quoted terms to one specific action. The signed
//! digest folds in the label hash, the new owner (registrations only), the
//! duration, the payment terms, the single-use key, the deadline, the
//! network id, and the controller's own address. Network id and controller
//! address keep a voucher from being replayed on another network or against
//! another deployment; the owner field keeps the registration and renewal
//! voucher shapes from standing in for each other.

use naming_errors::ContractError;
use soroban_sdk::crypto::Hash;
use soroban_sdk::xdr::ToXdr;
use soroban_sdk::{Address, Bytes, BytesN, Env};

use crate::types::{PricePayload, VoucherSignature};

fn append_payment_terms(e: &Env, buf: &mut Bytes, payload: &PricePayload) {
    buf.append(&payload.token.clone().to_xdr(e));
    buf.extend_from_array(&payload.price.to_be_bytes());
    buf.extend_from_array(&payload.key.to_array());
    buf.extend_from_array(&payload.deadline.to_be_bytes());
}

fn append_domain(e: &Env, buf: &mut Bytes) {
    buf.extend_from_array(&e.ledger().network_id().to_array());
    buf.append(&e.current_contract_address().to_xdr(e));
}

fn register_preimage(
    e: &Env,
    label_hash: &BytesN<32>,
    name_owner: &Address,
    duration: u64,
    payload: &PricePayload,
) -> Bytes {
    let mut buf = Bytes::from_array(e, &label_hash.to_array());
    buf.append(&name_owner.clone().to_xdr(e));
    buf.extend_from_array(&duration.to_be_bytes());
    append_payment_terms(e, &mut buf, payload);
    append_domain(e, &mut buf);
    buf
}

fn renew_preimage(
    e: &Env,
    label_hash: &BytesN<32>,
    duration: u64,
    payload: &PricePayload,
) -> Bytes {
    let mut buf = Bytes::from_array(e, &label_hash.to_array());
    buf.extend_from_array(&duration.to_be_bytes());
    append_payment_terms(e, &mut buf, payload);
    append_domain(e, &mut buf);
    buf
}

/// Digest an oracle signs to authorize a registration.
pub fn register_digest(
    e: &Env,
    label_hash: &BytesN<32>,
    name_owner: &Address,
    duration: u64,
    payload: &PricePayload,
) -> BytesN<32> {
    e.crypto()
        .keccak256(&register_preimage(e, label_hash, name_owner, duration, payload))
        .to_bytes()
}

/// Digest an oracle signs to authorize a renewal.
pub fn renew_digest(
    e: &Env,
    label_hash: &BytesN<32>,
    duration: u64,
    payload: &PricePayload,
) -> BytesN<32> {
    e.crypto()
        .keccak256(&renew_preimage(e, label_hash, duration, payload))
        .to_bytes()
}

/// Recovers the signer of `digest` and requires it to match the configured
/// oracle key. A well-formed signature from any other signer is rejected as
/// `InvalidOracle`.
fn recover_and_check(
    e: &Env,
    digest: &Hash<32>,
    sig: &VoucherSignature,
    oracle: &BytesN<65>,
) -> Result<(), ContractError> {
    let vs = sig.vs.to_array();
    let recovery_id = (vs[0] >> 7) as u32;

    let mut rs = [0u8; 64];
    rs[..32].copy_from_slice(&sig.r.to_array());
    rs[32..].copy_from_slice(&vs);
    rs[32] &= 0x7f;

    let recovered = e
        .crypto()
        .secp256k1_recover(digest, &BytesN::from_array(e, &rs), recovery_id);
    if recovered != *oracle {
        return Err(ContractError::InvalidOracle);
    }
    Ok(())
}

/// Verifies a registration voucher against the oracle key.
pub fn verify_register(
    e: &Env,
    label_hash: &BytesN<32>,
    name_owner: &Address,
    duration: u64,
    payload: &PricePayload,
    sig: &VoucherSignature,
    oracle: &BytesN<65>,
) -> Result<(), ContractError> {
    let digest = e
        .crypto()
        .keccak256(&register_preimage(e, label_hash, name_owner, duration, payload));
    recover_and_check(e, &digest, sig, oracle)
}

/// Verifies a renewal voucher against the oracle key.
pub fn verify_renew(
    e: &Env,
    label_hash: &BytesN<32>,
    duration: u64,
    payload: &PricePayload,
    sig: &VoucherSignature,
    oracle: &BytesN<65>,
) -> Result<(), ContractError> {
    let digest = e
        .crypto()
        .keccak256(&renew_preimage(e, label_hash, duration, payload));
    recover_and_check(e, &digest, sig, oracle)
}
