//! Digest and MAC family policies.

use primitives::ids::ciphers;
use primitives::{component, ops};

use crate::checks;
use crate::family::Family;
use crate::module::Module;
use crate::options::Options;
use crate::report::Discrepancy;

/// Policy for the `Digest` family.
pub struct DigestFamily;

impl Family for DigestFamily {
  type Op = ops::Digest;
  type Res = component::Digest;

  fn call_module(&self, options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if !options.digests.have(op.digest_type.get()) {
      return None;
    }
    module.digest(op)
  }

  fn check(&self, module: &dyn Module, op: &Self::Op, result: &Self::Res) -> Result<(), Discrepancy> {
    checks::digest_size(module, op.digest_type, &op.digest_type.name_or_id(), result)
  }
}

/// Policy for the `HMAC` family.
pub struct HmacFamily;

impl Family for HmacFamily {
  type Op = ops::Hmac;
  type Res = component::Mac;

  fn call_module(&self, options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if !options.digests.have(op.digest_type.get()) {
      return None;
    }
    module.hmac(op)
  }

  fn dont_compare(&self, op: &Self::Op) -> bool {
    // Randomized IV: every run wraps differently.
    op.cipher.cipher_type == ciphers::DES_EDE3_WRAP
  }

  fn check(&self, module: &dyn Module, op: &Self::Op, result: &Self::Res) -> Result<(), Discrepancy> {
    checks::mac_not_empty(module, "HMAC", &op.digest_type.name_or_id(), result)
  }
}

/// Policy for the `CMAC` family.
pub struct CmacFamily;

impl Family for CmacFamily {
  type Op = ops::Cmac;
  type Res = component::Mac;

  fn call_module(&self, options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if !options.ciphers.have(op.cipher.cipher_type.get()) {
      return None;
    }
    module.cmac(op)
  }

  fn dont_compare(&self, op: &Self::Op) -> bool {
    op.cipher.cipher_type == ciphers::DES_EDE3_WRAP
  }

  fn check(&self, module: &dyn Module, op: &Self::Op, result: &Self::Res) -> Result<(), Discrepancy> {
    checks::mac_not_empty(module, "CMAC", &op.cipher.cipher_type.name_or_id(), result)
  }
}
