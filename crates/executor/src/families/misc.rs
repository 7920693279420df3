//! Policies for the odd-duck families.

use primitives::{ops, Buffer};

use crate::family::Family;
use crate::module::Module;
use crate::options::Options;

/// Policy for `Misc`: backend-defined operations, no gating.
pub struct MiscFamily;

impl Family for MiscFamily {
  type Op = ops::Misc;
  type Res = Buffer;

  fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    module.misc(op)
  }
}

/// Policy for `SR25519_Verify`.
pub struct Sr25519VerifyFamily;

impl Family for Sr25519VerifyFamily {
  type Op = ops::Sr25519Verify;
  type Res = bool;

  fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    module.sr25519_verify(op)
  }
}
