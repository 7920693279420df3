//! Bignum calculator over `num-bigint`.
//!
//! Operands arrive as decimal strings and leave the same way; a missing or
//! unparseable operand, a nonsensical modulus, or an unsupported calc op
//! all decline with `None` rather than guessing.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use primitives::ids::calc_ops;
use primitives::{ops, Bignum, CalcOp};

/// Evaluate one calculation, applying the operation's modulus to the result
/// when present.
pub fn calc(op: &ops::BignumCalc) -> Option<Bignum> {
  let bn0 = op.bn0.to_bigint()?;
  let bn1 = op.bn1.to_bigint()?;
  let bn2 = op.bn2.to_bigint()?;

  let modulo = match &op.modulo {
    Some(modulo) => {
      let modulo = modulo.to_bigint()?;
      if !modulo.is_positive() {
        return None;
      }
      Some(modulo)
    }
    None => None,
  };

  let result = eval(op.calc_op, &bn0, &bn1, &bn2)?;
  let result = match &modulo {
    Some(modulo) => result.mod_floor(modulo),
    None => result,
  };
  Some(Bignum::from(result))
}

fn bool_to_bn(value: bool) -> BigInt {
  BigInt::from(u8::from(value))
}

fn positive(modulus: &BigInt) -> Option<&BigInt> {
  modulus.is_positive().then_some(modulus)
}

fn bit_index(position: &BigInt) -> Option<u64> {
  if position.is_negative() {
    return None;
  }
  position.to_u64()
}

fn eval(calc_op: CalcOp, bn0: &BigInt, bn1: &BigInt, bn2: &BigInt) -> Option<BigInt> {
  match calc_op {
    calc_ops::ADD => Some(bn0 + bn1),
    calc_ops::SUB => Some(bn0 - bn1),
    calc_ops::MUL => Some(bn0 * bn1),
    calc_ops::DIV => {
      if bn1.is_zero() {
        return None;
      }
      Some(bn0 / bn1)
    }
    calc_ops::MOD => {
      let modulus = positive(bn1)?;
      Some(bn0.mod_floor(modulus))
    }
    calc_ops::EXP_MOD => {
      let modulus = positive(bn2)?;
      if bn1.is_negative() {
        return None;
      }
      Some(bn0.mod_floor(modulus).modpow(bn1, modulus))
    }
    calc_ops::SQR => Some(bn0 * bn0),
    calc_ops::GCD => Some(bn0.gcd(bn1)),
    calc_ops::INV_MOD => {
      let modulus = positive(bn1)?;
      mod_inverse(bn0, modulus)
    }
    calc_ops::CMP => Some(BigInt::from(match bn0.cmp(bn1) {
      std::cmp::Ordering::Less => -1,
      std::cmp::Ordering::Equal => 0,
      std::cmp::Ordering::Greater => 1,
    })),
    calc_ops::CMP_ABS => Some(BigInt::from(match bn0.abs().cmp(&bn1.abs()) {
      std::cmp::Ordering::Less => -1,
      std::cmp::Ordering::Equal => 0,
      std::cmp::Ordering::Greater => 1,
    })),
    calc_ops::ABS => Some(bn0.abs()),
    calc_ops::NEG => Some(-bn0),
    calc_ops::RSHIFT => {
      let shift = bit_index(bn1)?;
      let shift = usize::try_from(shift).ok()?;
      Some(bn0 >> shift)
    }
    calc_ops::LSHIFT1 => Some(bn0 << 1usize),
    calc_ops::IS_NEG => Some(bool_to_bn(bn0.is_negative())),
    calc_ops::IS_EQ => Some(bool_to_bn(bn0 == bn1)),
    calc_ops::IS_ZERO => Some(bool_to_bn(bn0.is_zero())),
    calc_ops::IS_ONE => Some(bool_to_bn(bn0.is_one())),
    calc_ops::IS_ODD => Some(bool_to_bn(bn0.is_odd())),
    calc_ops::IS_EVEN => Some(bool_to_bn(bn0.is_even())),
    calc_ops::MUL_MOD => {
      let modulus = positive(bn2)?;
      Some((bn0 * bn1).mod_floor(modulus))
    }
    calc_ops::ADD_MOD => {
      let modulus = positive(bn2)?;
      Some((bn0 + bn1).mod_floor(modulus))
    }
    calc_ops::SUB_MOD => {
      let modulus = positive(bn2)?;
      Some((bn0 - bn1).mod_floor(modulus))
    }
    calc_ops::SQR_MOD => {
      let modulus = positive(bn1)?;
      Some((bn0 * bn0).mod_floor(modulus))
    }
    calc_ops::BIT => {
      if bn0.is_negative() {
        return None;
      }
      let position = bit_index(bn1)?;
      let position = usize::try_from(position).ok()?;
      Some(bool_to_bn(((bn0 >> position) & BigInt::one()).is_one()))
    }
    calc_ops::SET_BIT => {
      if bn0.is_negative() {
        return None;
      }
      let position = bit_index(bn1)?;
      let position = usize::try_from(position).ok()?;
      Some(bn0 | (BigInt::one() << position))
    }
    calc_ops::CLEAR_BIT => {
      if bn0.is_negative() {
        return None;
      }
      let position = bit_index(bn1)?;
      let position = usize::try_from(position).ok()?;
      let mask = BigInt::one() << position;
      if ((bn0 >> position) & BigInt::one()).is_one() {
        Some(bn0 - mask)
      } else {
        Some(bn0.clone())
      }
    }
    calc_ops::EXP => {
      if bn1.is_negative() {
        return None;
      }
      let exponent = bn1.to_u32()?;
      Some(bn0.pow(exponent))
    }
    calc_ops::EXP2 => {
      if bn0.is_negative() {
        return None;
      }
      let exponent = bn0.to_u32()?;
      let exponent = usize::try_from(exponent).ok()?;
      Some(BigInt::one() << exponent)
    }
    calc_ops::MOD_LSHIFT => {
      let modulus = positive(bn2)?;
      let shift = bit_index(bn1)?;
      let shift = usize::try_from(shift).ok()?;
      Some((bn0 << shift).mod_floor(modulus))
    }
    calc_ops::NUM_BITS => Some(BigInt::from(bn0.bits())),
    calc_ops::MIN => Some(bn0.min(bn1).clone()),
    calc_ops::MAX => Some(bn0.max(bn1).clone()),
    // Rand() is inherently nondeterministic; this backend declines.
    _ => None,
  }
}

fn mod_inverse(value: &BigInt, modulus: &BigInt) -> Option<BigInt> {
  let value = value.mod_floor(modulus);
  let extended = value.extended_gcd(modulus);
  if !extended.gcd.is_one() {
    return None;
  }
  Some(extended.x.mod_floor(modulus))
}

#[cfg(test)]
mod tests {
  use super::*;
  use primitives::Modifier;

  fn op(calc_op: CalcOp, operands: [&str; 4], modulo: Option<&str>) -> ops::BignumCalc {
    ops::BignumCalc {
      modifier: Modifier::empty(),
      calc_op,
      bn0: Bignum::from(operands[0]),
      bn1: Bignum::from(operands[1]),
      bn2: Bignum::from(operands[2]),
      bn3: Bignum::from(operands[3]),
      modulo: modulo.map(Bignum::from),
    }
  }

  fn eval_str(calc_op: CalcOp, operands: [&str; 4]) -> Option<String> {
    calc(&op(calc_op, operands, None)).map(|bn| bn.trimmed())
  }

  #[test]
  fn arithmetic() {
    assert_eq!(eval_str(calc_ops::ADD, ["2", "3", "0", "0"]), Some("5".to_owned()));
    assert_eq!(eval_str(calc_ops::SUB, ["2", "3", "0", "0"]), Some("-1".to_owned()));
    assert_eq!(eval_str(calc_ops::MUL, ["12", "12", "0", "0"]), Some("144".to_owned()));
    assert_eq!(eval_str(calc_ops::DIV, ["17", "5", "0", "0"]), Some("3".to_owned()));
    assert_eq!(eval_str(calc_ops::DIV, ["17", "0", "0", "0"]), None);
    assert_eq!(eval_str(calc_ops::SQR, ["9", "0", "0", "0"]), Some("81".to_owned()));
  }

  #[test]
  fn modular_arithmetic() {
    assert_eq!(eval_str(calc_ops::MOD, ["17", "5", "0", "0"]), Some("2".to_owned()));
    assert_eq!(
      eval_str(calc_ops::EXP_MOD, ["4", "13", "497", "0"]),
      Some("445".to_owned())
    );
    assert_eq!(
      eval_str(calc_ops::MUL_MOD, ["7", "8", "13", "0"]),
      Some("4".to_owned())
    );
    assert_eq!(eval_str(calc_ops::INV_MOD, ["3", "11", "0", "0"]), Some("4".to_owned()));
    assert_eq!(eval_str(calc_ops::INV_MOD, ["4", "8", "0", "0"]), None);
  }

  #[test]
  fn predicates_and_comparisons() {
    assert_eq!(eval_str(calc_ops::CMP, ["5", "9", "0", "0"]), Some("-1".to_owned()));
    assert_eq!(eval_str(calc_ops::CMP_ABS, ["-9", "5", "0", "0"]), Some("1".to_owned()));
    assert_eq!(eval_str(calc_ops::IS_NEG, ["-9", "0", "0", "0"]), Some("1".to_owned()));
    assert_eq!(eval_str(calc_ops::IS_ODD, ["7", "0", "0", "0"]), Some("1".to_owned()));
    assert_eq!(eval_str(calc_ops::IS_EVEN, ["7", "0", "0", "0"]), Some("0".to_owned()));
    assert_eq!(eval_str(calc_ops::MIN, ["7", "3", "0", "0"]), Some("3".to_owned()));
  }

  #[test]
  fn bit_operations() {
    assert_eq!(eval_str(calc_ops::BIT, ["5", "0", "0", "0"]), Some("1".to_owned()));
    assert_eq!(eval_str(calc_ops::BIT, ["5", "1", "0", "0"]), Some("0".to_owned()));
    assert_eq!(eval_str(calc_ops::SET_BIT, ["8", "1", "0", "0"]), Some("10".to_owned()));
    assert_eq!(eval_str(calc_ops::CLEAR_BIT, ["10", "1", "0", "0"]), Some("8".to_owned()));
    assert_eq!(eval_str(calc_ops::EXP2, ["10", "0", "0", "0"]), Some("1024".to_owned()));
    assert_eq!(eval_str(calc_ops::NUM_BITS, ["255", "0", "0", "0"]), Some("8".to_owned()));
    assert_eq!(eval_str(calc_ops::RSHIFT, ["1024", "3", "0", "0"]), Some("128".to_owned()));
    assert_eq!(eval_str(calc_ops::LSHIFT1, ["3", "0", "0", "0"]), Some("6".to_owned()));
  }

  #[test]
  fn operation_modulus_reduces_the_result() {
    let reduced = calc(&op(calc_ops::ADD, ["5", "9", "0", "0"], Some("7"))).unwrap();
    assert_eq!(reduced.trimmed(), "0");

    let negative_folds_in = calc(&op(calc_ops::SUB, ["2", "3", "0", "0"], Some("7"))).unwrap();
    assert_eq!(negative_folds_in.trimmed(), "6");
  }

  #[test]
  fn zero_modulus_declines() {
    assert_eq!(calc(&op(calc_ops::ADD, ["1", "1", "0", "0"], Some("0"))), None);
  }

  #[test]
  fn rand_declines() {
    assert_eq!(eval_str(calc_ops::RAND, ["0", "0", "0", "0"]), None);
  }
}
