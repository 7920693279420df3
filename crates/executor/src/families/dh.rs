//! Diffie-Hellman family policies.

use primitives::{component, config, ops};

use crate::family::{Family, ResultSet, Task};
use crate::module::Module;
use crate::options::Options;
use crate::report::Discrepancy;

/// Policy for `DH_GenerateKeyPair`.
///
/// Like ECC key generation, results are nondeterministic and never
/// compared. Discovered keys feed the DH pools behind a 1-in-4 gate to
/// bound pool churn across a long campaign.
pub struct DhGenerateKeyPairFamily;

impl Family for DhGenerateKeyPairFamily {
  type Op = ops::DhGenerateKeyPair;
  type Res = component::DhKeyPair;

  fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if op.prime.len() > config::MAX_BIGNUM_SIZE {
      return None;
    }
    if op.base.len() > config::MAX_BIGNUM_SIZE {
      return None;
    }
    module.dh_generate_keypair(op)
  }

  fn postprocess(
    &self,
    _options: &Options,
    _module: &dyn Module,
    _op: &Self::Op,
    result: &Option<Self::Res>,
  ) -> Result<(), Discrepancy> {
    if let Some(keypair) = result {
      if pools::prng::next_u32() % 4 == 0 {
        pools::DH_PRIVATE_KEY.insert(keypair.private_key.trimmed());
        pools::DH_PUBLIC_KEY.insert(keypair.public_key.trimmed());
      }
    }
    Ok(())
  }

  fn dont_compare(&self, _op: &Self::Op) -> bool {
    true
  }

  fn compare(&self, _tasks: &[Task<Self::Op>], _results: &ResultSet<Self::Res>, _data: &[u8]) -> Result<(), Discrepancy> {
    Ok(())
  }
}

/// Policy for `DH_Derive`.
pub struct DhDeriveFamily;

impl Family for DhDeriveFamily {
  type Op = ops::DhDerive;
  type Res = primitives::Bignum;

  fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if op.prime.len() > config::MAX_BIGNUM_SIZE {
      return None;
    }
    if op.base.len() > config::MAX_BIGNUM_SIZE {
      return None;
    }
    if op.public_key.len() > config::MAX_BIGNUM_SIZE {
      return None;
    }
    if op.private_key.len() > config::MAX_BIGNUM_SIZE {
      return None;
    }
    module.dh_derive(op)
  }
}
