//! Interface to the platform FHE executor.
//!
//! Ciphertexts never live in a consumer contract. A contract only holds
//! [`Handle`]s: 32-byte identifiers minted by the executor for every
//! ciphertext it produces. Each homomorphic operation returns a **fresh**
//! handle, so any grant issued on an older handle does not carry over to the
//! result.
//!
//! ## Allowances
//!
//! The executor tracks two kinds of allowance per `(handle, account)`:
//!
//! | Kind       | Created by                          | Lifetime                | Decryptable |
//! |------------|-------------------------------------|-------------------------|-------------|
//! | Transient  | producing a handle for a caller     | current ledger sequence | no          |
//! | Persistent | `allow(caller, handle, account)`    | forever (no revocation) | yes         |
//!
//! A contract that wants to reuse a handle in a later transaction therefore
//! has to persist its own allowance right after receiving it.

use soroban_sdk::{contractclient, contracttype, Address, BytesN, Env, Vec};

/// Opaque reference to a ciphertext held by the executor.
pub type Handle = BytesN<32>;

/// Plaintext type carried by a ciphertext.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum CiphertextKind {
    Bool = 0,
    Uint16 = 1,
}

/// Output of the off-chain encryption client: one handle per encrypted value
/// plus a proof binding all of them to a `(user, contract)` pair.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncryptedInput {
    pub handles: Vec<Handle>,
    pub proof: BytesN<32>,
}

/// Operations a consumer contract may invoke on the executor.
///
/// `caller` is always the invoking contract; the executor checks that it is
/// allowed on every operand and grants it a transient allowance on the
/// result.
#[contractclient(name = "FheExecutorClient")]
pub trait FheExecutorInterface {
    /// Verifies an external input against its proof and hands the handle to
    /// `caller`.
    fn from_external(
        env: Env,
        caller: Address,
        user: Address,
        handle: Handle,
        proof: BytesN<32>,
    ) -> Handle;

    /// Encrypts a public 16-bit constant.
    fn trivial_encrypt(env: Env, caller: Address, value: u32) -> Handle;

    /// `lhs + rhs`, wrapping in the 16-bit domain.
    fn add(env: Env, caller: Address, lhs: Handle, rhs: Handle) -> Handle;

    /// Encrypted boolean `lhs > scalar`.
    fn gt_scalar(env: Env, caller: Address, lhs: Handle, scalar: u32) -> Handle;

    /// Oblivious conditional: `cond ? if_true : if_false`.
    fn select(env: Env, caller: Address, cond: Handle, if_true: Handle, if_false: Handle)
        -> Handle;

    /// Records a persistent allowance for `account` on `handle`.
    fn allow(env: Env, caller: Address, handle: Handle, account: Address);

    /// Whether `account` holds a persistent allowance on `handle`.
    fn is_allowed(env: Env, handle: Handle, account: Address) -> bool;
}
