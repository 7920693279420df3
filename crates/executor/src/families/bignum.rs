//! Bignum-calculator policy, including the fixed-modulus variants.

use primitives::ids::calc_ops;
use primitives::{config, ops, Bignum};

use crate::family::{probe_result, Family};
use crate::module::Module;
use crate::options::Options;
use crate::report::Discrepancy;

/// BLS12-381 subgroup order, decimal.
const BLS12_381_R: &str = "52435875175126190479447740508185965837690552500527637822603658699938581184513";

/// BLS12-381 base field prime, decimal.
const BLS12_381_P: &str =
  "4002409555221667393417789825735904156556882819939007885332058136124031650490837864442687629129015664037894272559787";

/// 2^256, decimal.
const TWO_EXP_256: &str = "115792089237316195423570985008687907853269984665640564039457584007913129639936";

/// Policy for `BignumCalc`.
///
/// The plain policy leaves `modulo` untouched. A modular variant carries a
/// fixed modulus and stamps it onto every operation it dispatches,
/// overriding whatever the operation held.
pub struct BignumCalcFamily {
  modulo: Option<Bignum>,
}

impl BignumCalcFamily {
  /// Plain calculator: no modulus.
  #[must_use]
  pub const fn new() -> Self {
    Self { modulo: None }
  }

  /// Calculator pinned to an arbitrary modulus.
  #[must_use]
  pub const fn with_modulo(modulo: Bignum) -> Self {
    Self { modulo: Some(modulo) }
  }

  /// Calculator over the BLS12-381 subgroup order.
  #[must_use]
  pub fn mod_bls12_381_r() -> Self {
    Self::with_modulo(Bignum::from(BLS12_381_R))
  }

  /// Calculator over the BLS12-381 base field prime.
  #[must_use]
  pub fn mod_bls12_381_p() -> Self {
    Self::with_modulo(Bignum::from(BLS12_381_P))
  }

  /// Calculator modulo 2^256.
  #[must_use]
  pub fn mod_2_exp_256() -> Self {
    Self::with_modulo(Bignum::from(TWO_EXP_256))
  }

  /// The pinned modulus, if any.
  #[inline]
  #[must_use]
  pub fn modulo(&self) -> Option<&Bignum> {
    self.modulo.as_ref()
  }

  /// Per-operation operand caps beyond the blanket bignum size cap.
  ///
  /// These keep single calls bounded: a bit position or exponent a few
  /// digits long is already enough to exhaust memory or minutes.
  fn within_per_op_caps(op: &ops::BignumCalc) -> bool {
    if op.calc_op == calc_ops::SET_BIT && op.bn1.len() > 4 {
      return false;
    }
    if op.calc_op == calc_ops::EXP && (op.bn0.len() > 5 || op.bn1.len() > 2) {
      return false;
    }
    if op.calc_op == calc_ops::MOD_LSHIFT && op.bn1.len() > 4 {
      return false;
    }
    if op.calc_op == calc_ops::EXP2 && op.bn0.len() > 4 {
      return false;
    }
    true
  }
}

impl Default for BignumCalcFamily {
  fn default() -> Self {
    Self::new()
  }
}

impl Family for BignumCalcFamily {
  type Op = ops::BignumCalc;
  type Res = Bignum;

  fn call_module(&self, options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if !options.calc_ops.have(op.calc_op.get()) {
      return None;
    }

    // Prevent timeouts.
    if op.bn0.len() > config::MAX_BIGNUM_SIZE {
      return None;
    }
    if op.bn1.len() > config::MAX_BIGNUM_SIZE {
      return None;
    }
    if op.bn2.len() > config::MAX_BIGNUM_SIZE {
      return None;
    }
    if op.bn3.len() > config::MAX_BIGNUM_SIZE {
      return None;
    }

    if op.modulo.is_some() && !module.supports_modular_bignum_calc() {
      return None;
    }

    if !Self::within_per_op_caps(op) {
      return None;
    }

    module.bignum_calc(op)
  }

  fn postprocess(
    &self,
    _options: &Options,
    _module: &dyn Module,
    _op: &Self::Op,
    result: &Option<Self::Res>,
  ) -> Result<(), Discrepancy> {
    probe_result(result);
    if let Some(bignum) = result {
      pools::insert_bignum(bignum.trimmed());
    }
    Ok(())
  }

  fn dont_compare(&self, op: &Self::Op) -> bool {
    op.calc_op == calc_ops::RAND
  }

  fn op_postprocess(
    &self,
    _parent: &mut datasource::Datasource<'_>,
    _modules: &crate::module::ModuleSet,
    _options: &Options,
    mut op: Self::Op,
  ) -> Self::Op {
    if let Some(modulo) = &self.modulo {
      op.modulo = Some(modulo.clone());
    }
    op
  }
}
