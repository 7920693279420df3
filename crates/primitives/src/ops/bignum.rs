//! Bignum calculator operations.

use datasource::{Datasource, OutOfData};
use serde::Serialize;

use crate::op::impl_operation;
use crate::{config, Bignum, CalcOp, Modifier};

/// One bignum calculation over up to four operands.
///
/// The optional `modulo` is never drawn from the datasource: the plain
/// executor leaves it unset, and the modular executor variants stamp their
/// fixed modulus onto every operation they dispatch.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BignumCalc {
  pub modifier: Modifier,
  pub calc_op: CalcOp,
  pub bn0: Bignum,
  pub bn1: Bignum,
  pub bn2: Bignum,
  pub bn3: Bignum,
  pub modulo: Option<Bignum>,
}

impl BignumCalc {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      calc_op: CalcOp::new(ds.get_u64()?),
      bn0: Bignum::from_datasource(ds)?,
      bn1: Bignum::from_datasource(ds)?,
      bn2: Bignum::from_datasource(ds)?,
      bn3: Bignum::from_datasource(ds)?,
      modulo: None,
    })
  }
}

impl_operation!(
  BignumCalc,
  family: "BignumCalc",
  max_ops: config::BIGNUM_CALC_MAX_OPERATIONS,
  algorithm: |op| op.calc_op.name_or_id()
);

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ids::calc_ops;
  use crate::Operation;

  #[test]
  fn draw_never_sets_modulo() {
    let mut data = calc_ops::ADD.get().to_le_bytes().to_vec();
    for digit in [1u8, 2, 3, 4] {
      data.extend_from_slice(&[0x01, 0x00, digit]);
    }
    let op = BignumCalc::from_datasource(&mut Datasource::new(&data), Modifier::empty()).unwrap();
    assert_eq!(op.calc_op, calc_ops::ADD);
    assert_eq!(op.modulo, None);
    assert_eq!(op.algorithm_name(), "Add(A,B)");
  }

  #[test]
  fn task_cap_is_tight() {
    assert_eq!(BignumCalc::MAX_OPERATIONS, config::BIGNUM_CALC_MAX_OPERATIONS);
  }
}
