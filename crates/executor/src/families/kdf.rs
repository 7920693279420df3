//! Key-derivation family policies.
//!
//! These are the quiet families: gate on the digest filter where a digest
//! governs the derivation, dispatch, and verify the derived key honors the
//! requested size. No pool feedback.

use primitives::{component, ops, Operation};

use crate::checks;
use crate::family::Family;
use crate::module::Module;
use crate::options::Options;
use crate::report::Discrepancy;

macro_rules! kdf_family {
  ($name:ident, $op:ident, $method:ident, digest: $digest:ident) => {
    pub struct $name;

    impl Family for $name {
      type Op = ops::$op;
      type Res = component::Key;

      fn call_module(&self, options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
        if !options.digests.have(op.$digest.get()) {
          return None;
        }
        module.$method(op)
      }

      fn check(&self, module: &dyn Module, op: &Self::Op, result: &Self::Res) -> Result<(), Discrepancy> {
        checks::derived_key_size(module, ops::$op::FAMILY, &op.algorithm_name(), op.key_size, result)
      }
    }
  };
  ($name:ident, $op:ident, $method:ident) => {
    pub struct $name;

    impl Family for $name {
      type Op = ops::$op;
      type Res = component::Key;

      fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
        module.$method(op)
      }

      fn check(&self, module: &dyn Module, op: &Self::Op, result: &Self::Res) -> Result<(), Discrepancy> {
        checks::derived_key_size(module, ops::$op::FAMILY, &op.algorithm_name(), op.key_size, result)
      }
    }
  };
}

kdf_family!(KdfScryptFamily, KdfScrypt, kdf_scrypt);
kdf_family!(KdfHkdfFamily, KdfHkdf, kdf_hkdf, digest: digest_type);
kdf_family!(KdfTls1PrfFamily, KdfTls1Prf, kdf_tls1_prf, digest: digest_type);
kdf_family!(KdfPbkdfFamily, KdfPbkdf, kdf_pbkdf, digest: digest_type);
kdf_family!(KdfPbkdf1Family, KdfPbkdf1, kdf_pbkdf1, digest: digest_type);
kdf_family!(KdfPbkdf2Family, KdfPbkdf2, kdf_pbkdf2, digest: digest_type);
kdf_family!(KdfArgon2Family, KdfArgon2, kdf_argon2);
kdf_family!(KdfSshFamily, KdfSsh, kdf_ssh, digest: digest_type);
kdf_family!(KdfX963Family, KdfX963, kdf_x963, digest: digest_type);
kdf_family!(KdfBcryptFamily, KdfBcrypt, kdf_bcrypt, digest: digest_type);

/// SP 800-108 gates on the digest filter only for digest-based mechanisms.
pub struct KdfSp800_108Family;

impl Family for KdfSp800_108Family {
  type Op = ops::KdfSp800_108;
  type Res = component::Key;

  fn call_module(&self, options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if op.mech.mode && !options.digests.have(op.mech.mech_type.get()) {
      return None;
    }
    module.kdf_sp800_108(op)
  }

  fn check(&self, module: &dyn Module, op: &Self::Op, result: &Self::Res) -> Result<(), Discrepancy> {
    checks::derived_key_size(
      module,
      ops::KdfSp800_108::FAMILY,
      &op.algorithm_name(),
      op.key_size,
      result,
    )
  }
}
