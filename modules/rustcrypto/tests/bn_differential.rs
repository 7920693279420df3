//! Differential checks of the bignum calculator against native integer
//! arithmetic on small operands.

use executor::Module as _;
use module_rustcrypto::RustCryptoModule;
use primitives::ids::calc_ops;
use primitives::{ops, Bignum, CalcOp, Modifier};
use proptest::prelude::*;

fn calc(calc_op: CalcOp, bn0: i64, bn1: i64, bn2: i64) -> Option<String> {
  let op = ops::BignumCalc {
    modifier: Modifier::empty(),
    calc_op,
    bn0: Bignum::new(bn0.to_string()),
    bn1: Bignum::new(bn1.to_string()),
    bn2: Bignum::new(bn2.to_string()),
    bn3: Bignum::new("0"),
    modulo: None,
  };
  RustCryptoModule::new().bignum_calc(&op).map(|bn| bn.trimmed())
}

proptest! {
  #[test]
  fn add_matches_native(a in any::<i64>(), b in any::<i64>()) {
    let expected = i128::from(a) + i128::from(b);
    prop_assert_eq!(calc(calc_ops::ADD, a, b, 0), Some(expected.to_string()));
  }

  #[test]
  fn sub_matches_native(a in any::<i64>(), b in any::<i64>()) {
    let expected = i128::from(a) - i128::from(b);
    prop_assert_eq!(calc(calc_ops::SUB, a, b, 0), Some(expected.to_string()));
  }

  #[test]
  fn mul_matches_native(a in any::<i64>(), b in any::<i64>()) {
    let expected = i128::from(a) * i128::from(b);
    prop_assert_eq!(calc(calc_ops::MUL, a, b, 0), Some(expected.to_string()));
  }

  #[test]
  fn div_matches_native(a in any::<i64>(), b in any::<i64>()) {
    prop_assume!(b != 0);
    let expected = i128::from(a) / i128::from(b);
    prop_assert_eq!(calc(calc_ops::DIV, a, b, 0), Some(expected.to_string()));
  }

  #[test]
  fn mul_mod_matches_native(a in 0i64..1_000_000, b in 0i64..1_000_000, m in 1i64..1_000_000) {
    let expected = (i128::from(a) * i128::from(b)).rem_euclid(i128::from(m));
    prop_assert_eq!(calc(calc_ops::MUL_MOD, a, b, m), Some(expected.to_string()));
  }

  #[test]
  fn gcd_is_commutative(a in any::<i64>(), b in any::<i64>()) {
    prop_assert_eq!(calc(calc_ops::GCD, a, b, 0), calc(calc_ops::GCD, b, a, 0));
  }

  #[test]
  fn inv_mod_inverts(a in 1i64..10_000, m in 2i64..10_000) {
    if let Some(inverse) = calc(calc_ops::INV_MOD, a, m, 0) {
      let inverse: i128 = inverse.parse().unwrap();
      prop_assert_eq!((i128::from(a) * inverse).rem_euclid(i128::from(m)), 1);
    }
  }
}
