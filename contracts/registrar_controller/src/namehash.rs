//! Label and node derivation (ENS-style namehash over keccak256).
//!
//! A name's id is the keccak256 of its raw label bytes; its fully-qualified
//! node chains that hash under the base domain's node. Reverse records hang
//! under `addr.reverse`, with the address's canonical XDR byte form hashed
//! as the label.

use soroban_sdk::xdr::ToXdr;
use soroban_sdk::{Address, Bytes, BytesN, Env, String};

/// Registered names live directly under this domain.
pub const BASE_DOMAIN: &str = "gaia";

/// Longest accepted label, in bytes.
pub const MAX_LABEL_LEN: u32 = 64;
/// Shortest accepted label, in bytes.
pub const MIN_LABEL_LEN: u32 = 3;

/// Copies `label` out of guest memory. `None` when it exceeds
/// [`MAX_LABEL_LEN`].
fn label_bytes(e: &Env, label: &String) -> Option<Bytes> {
    let len = label.len();
    if len > MAX_LABEL_LEN {
        return None;
    }
    let mut buf = [0u8; MAX_LABEL_LEN as usize];
    label.copy_into_slice(&mut buf[..len as usize]);
    Some(Bytes::from_slice(e, &buf[..len as usize]))
}

/// keccak256 of the raw label bytes; `None` for over-long labels.
pub fn label_hash(e: &Env, label: &String) -> Option<BytesN<32>> {
    let bytes = label_bytes(e, label)?;
    Some(e.crypto().keccak256(&bytes).to_bytes())
}

/// Child node: keccak256(parent || label_hash).
pub fn subnode(e: &Env, parent: &BytesN<32>, lh: &BytesN<32>) -> BytesN<32> {
    let mut joined = Bytes::from_array(e, &parent.to_array());
    joined.extend_from_array(&lh.to_array());
    e.crypto().keccak256(&joined).to_bytes()
}

fn hash_str(e: &Env, s: &str) -> BytesN<32> {
    e.crypto()
        .keccak256(&Bytes::from_slice(e, s.as_bytes()))
        .to_bytes()
}

fn root(e: &Env) -> BytesN<32> {
    BytesN::from_array(e, &[0u8; 32])
}

/// Node of the base domain under the root.
pub fn base_node(e: &Env) -> BytesN<32> {
    let r = root(e);
    subnode(e, &r, &hash_str(e, BASE_DOMAIN))
}

/// Fully-qualified node of a label hash under the base domain.
pub fn node(e: &Env, lh: &BytesN<32>) -> BytesN<32> {
    subnode(e, &base_node(e), lh)
}

/// Node of `addr.reverse` under the root.
pub fn addr_reverse_node(e: &Env) -> BytesN<32> {
    let r = root(e);
    let reverse = subnode(e, &r, &hash_str(e, "reverse"));
    subnode(e, &reverse, &hash_str(e, "addr"))
}

/// Reverse node of an address: its XDR byte form hashed as a label under
/// `addr.reverse`.
pub fn reverse_node(e: &Env, who: &Address) -> BytesN<32> {
    let encoded = who.clone().to_xdr(e);
    let lh = e.crypto().keccak256(&encoded).to_bytes();
    subnode(e, &addr_reverse_node(e), &lh)
}
