//! Backend module over the pure-Rust crypto ecosystem.
//!
//! Implements a useful subset of the module contract on top of `sha2`,
//! `sha3`, `blake2`, `hmac`, `aes-gcm`, `p256` and `num-bigint`:
//!
//! | Family | Coverage |
//! |---|---|
//! | `Digest` | SHA-2, SHA-3, BLAKE2 |
//! | `HMAC` | SHA-2 family |
//! | `SymmetricEncrypt`/`Decrypt` | AES-128/256-GCM, detached 16-byte tag |
//! | `BignumCalc` | full calculator, modulus-capable |
//! | `ECC_PrivateToPublic`, `ECC_ValidatePubkey` | secp256r1 |
//! | `ECDSA_Sign`/`Verify` | secp256r1 + SHA-256, RFC 6979 nonces |
//!
//! Everything else declines with `None`, which the executor treats exactly
//! like a gated call.
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to
//! ensure all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]

mod aead;
mod bn;
mod ecc;
mod hash;

use std::sync::Arc;

use executor::Module;
use primitives::ids::modules;
use primitives::{component, ops, Bignum, ModuleId};

/// The RustCrypto-backed module.
pub struct RustCryptoModule;

impl RustCryptoModule {
  /// Create the module.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }

  /// Shared handle suitable for a module registry.
  #[must_use]
  pub fn handle() -> Arc<dyn Module> {
    Arc::new(Self::new())
  }
}

impl Default for RustCryptoModule {
  fn default() -> Self {
    Self::new()
  }
}

impl Module for RustCryptoModule {
  fn id(&self) -> ModuleId {
    modules::RUSTCRYPTO
  }

  fn name(&self) -> &str {
    "RustCrypto"
  }

  fn supports_modular_bignum_calc(&self) -> bool {
    true
  }

  fn digest(&self, op: &ops::Digest) -> Option<component::Digest> {
    hash::digest(op.digest_type, op.cleartext.as_slice())
  }

  fn hmac(&self, op: &ops::Hmac) -> Option<component::Mac> {
    hash::hmac(op.digest_type, op.cipher.key.as_slice(), op.cleartext.as_slice())
  }

  fn symmetric_encrypt(&self, op: &ops::SymmetricEncrypt) -> Option<component::Ciphertext> {
    aead::encrypt(op)
  }

  fn symmetric_decrypt(&self, op: &ops::SymmetricDecrypt) -> Option<component::Cleartext> {
    aead::decrypt(op)
  }

  fn bignum_calc(&self, op: &ops::BignumCalc) -> Option<Bignum> {
    bn::calc(op)
  }

  fn ecc_private_to_public(&self, op: &ops::EccPrivateToPublic) -> Option<component::EccPublicKey> {
    ecc::private_to_public(op)
  }

  fn ecc_validate_pubkey(&self, op: &ops::EccValidatePubkey) -> Option<bool> {
    ecc::validate_pubkey(op)
  }

  fn ecdsa_sign(&self, op: &ops::EcdsaSign) -> Option<component::EcdsaSignature> {
    ecc::sign(op)
  }

  fn ecdsa_verify(&self, op: &ops::EcdsaVerify) -> Option<bool> {
    ecc::verify(op)
  }
}
