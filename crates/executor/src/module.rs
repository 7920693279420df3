//! The backend module contract and registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use datasource::{Datasource, OutOfData};
use primitives::{component, ops, Buffer, ModuleId};

use crate::options::Options;

/// An external cryptographic backend.
///
/// Modules expose one method per operation family, all defaulting to "not
/// implemented" (`None`). A returned `None` is indistinguishable from a
/// gated call at the comparison layer, so partial backends participate
/// without special-casing.
///
/// Handles are long-lived and shared between executors; implementations
/// must be safe to call sequentially from any one owner at a time.
#[allow(unused_variables)]
pub trait Module: Send + Sync {
  /// Stable module id.
  fn id(&self) -> ModuleId;

  /// Human-readable module name used in diagnostics.
  fn name(&self) -> &str;

  /// Whether `BignumCalc` operations carrying a modulus are supported.
  fn supports_modular_bignum_calc(&self) -> bool {
    false
  }

  fn digest(&self, op: &ops::Digest) -> Option<component::Digest> {
    None
  }
  fn hmac(&self, op: &ops::Hmac) -> Option<component::Mac> {
    None
  }
  fn cmac(&self, op: &ops::Cmac) -> Option<component::Mac> {
    None
  }
  fn symmetric_encrypt(&self, op: &ops::SymmetricEncrypt) -> Option<component::Ciphertext> {
    None
  }
  fn symmetric_decrypt(&self, op: &ops::SymmetricDecrypt) -> Option<component::Cleartext> {
    None
  }
  fn kdf_scrypt(&self, op: &ops::KdfScrypt) -> Option<component::Key> {
    None
  }
  fn kdf_hkdf(&self, op: &ops::KdfHkdf) -> Option<component::Key> {
    None
  }
  fn kdf_tls1_prf(&self, op: &ops::KdfTls1Prf) -> Option<component::Key> {
    None
  }
  fn kdf_pbkdf(&self, op: &ops::KdfPbkdf) -> Option<component::Key> {
    None
  }
  fn kdf_pbkdf1(&self, op: &ops::KdfPbkdf1) -> Option<component::Key> {
    None
  }
  fn kdf_pbkdf2(&self, op: &ops::KdfPbkdf2) -> Option<component::Key> {
    None
  }
  fn kdf_argon2(&self, op: &ops::KdfArgon2) -> Option<component::Key> {
    None
  }
  fn kdf_ssh(&self, op: &ops::KdfSsh) -> Option<component::Key> {
    None
  }
  fn kdf_x963(&self, op: &ops::KdfX963) -> Option<component::Key> {
    None
  }
  fn kdf_bcrypt(&self, op: &ops::KdfBcrypt) -> Option<component::Key> {
    None
  }
  fn kdf_sp800_108(&self, op: &ops::KdfSp800_108) -> Option<component::Key> {
    None
  }
  fn ecc_private_to_public(&self, op: &ops::EccPrivateToPublic) -> Option<component::EccPublicKey> {
    None
  }
  fn ecc_validate_pubkey(&self, op: &ops::EccValidatePubkey) -> Option<bool> {
    None
  }
  fn ecc_generate_keypair(&self, op: &ops::EccGenerateKeyPair) -> Option<component::EccKeyPair> {
    None
  }
  fn ecdsa_sign(&self, op: &ops::EcdsaSign) -> Option<component::EcdsaSignature> {
    None
  }
  fn ecdsa_verify(&self, op: &ops::EcdsaVerify) -> Option<bool> {
    None
  }
  fn ecdh_derive(&self, op: &ops::EcdhDerive) -> Option<component::Secret> {
    None
  }
  fn ecies_encrypt(&self, op: &ops::EciesEncrypt) -> Option<component::Ciphertext> {
    None
  }
  fn ecies_decrypt(&self, op: &ops::EciesDecrypt) -> Option<component::Cleartext> {
    None
  }
  fn dh_generate_keypair(&self, op: &ops::DhGenerateKeyPair) -> Option<component::DhKeyPair> {
    None
  }
  fn dh_derive(&self, op: &ops::DhDerive) -> Option<primitives::Bignum> {
    None
  }
  fn bignum_calc(&self, op: &ops::BignumCalc) -> Option<primitives::Bignum> {
    None
  }
  fn bls_private_to_public(&self, op: &ops::BlsPrivateToPublic) -> Option<component::BlsPublicKey> {
    None
  }
  fn bls_sign(&self, op: &ops::BlsSign) -> Option<component::BlsSignature> {
    None
  }
  fn bls_verify(&self, op: &ops::BlsVerify) -> Option<bool> {
    None
  }
  fn bls_pairing(&self, op: &ops::BlsPairing) -> Option<bool> {
    None
  }
  fn bls_hash_to_g1(&self, op: &ops::BlsHashToG1) -> Option<component::G1> {
    None
  }
  fn bls_hash_to_g2(&self, op: &ops::BlsHashToG2) -> Option<component::G2> {
    None
  }
  fn bls_is_g1_on_curve(&self, op: &ops::BlsIsG1OnCurve) -> Option<bool> {
    None
  }
  fn bls_is_g2_on_curve(&self, op: &ops::BlsIsG2OnCurve) -> Option<bool> {
    None
  }
  fn bls_generate_keypair(&self, op: &ops::BlsGenerateKeyPair) -> Option<component::BlsKeyPair> {
    None
  }
  fn bls_decompress_g1(&self, op: &ops::BlsDecompressG1) -> Option<component::G1> {
    None
  }
  fn bls_compress_g1(&self, op: &ops::BlsCompressG1) -> Option<primitives::Bignum> {
    None
  }
  fn bls_decompress_g2(&self, op: &ops::BlsDecompressG2) -> Option<component::G2> {
    None
  }
  fn bls_compress_g2(&self, op: &ops::BlsCompressG2) -> Option<component::G1> {
    None
  }
  fn misc(&self, op: &ops::Misc) -> Option<Buffer> {
    None
  }
  fn sr25519_verify(&self, op: &ops::Sr25519Verify) -> Option<bool> {
    None
  }
}

/// Module registry, ordered by id so fan-out enumeration is deterministic.
pub type ModuleSet = BTreeMap<ModuleId, Arc<dyn Module>>;

/// Build a registry from module handles.
#[must_use]
pub fn module_set(modules: impl IntoIterator<Item = Arc<dyn Module>>) -> ModuleSet {
  modules.into_iter().map(|module| (module.id(), module)).collect()
}

/// Draw a module id from the datasource and resolve it.
///
/// The forced module, when configured, replaces the drawn id before the
/// disabled check. Unknown and disabled ids resolve to `None`; datasource
/// exhaustion is the caller's signal to stop drawing entirely.
pub(crate) fn draw_module(
  ds: &mut Datasource<'_>,
  modules: &ModuleSet,
  options: &Options,
) -> Result<Option<Arc<dyn Module>>, OutOfData> {
  let mut module_id = ModuleId::new(ds.get_u64()?);
  if let Some(forced) = options.force_module {
    module_id = forced;
  }
  if options.disable_modules.have_explicit(module_id) {
    return Ok(None);
  }
  Ok(modules.get(&module_id).cloned())
}
