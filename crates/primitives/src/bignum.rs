//! Arbitrary-precision integers as decimal strings.
//!
//! Backends exchange bignums as decimal strings; two backends that agree on
//! a value may still render it differently (`"007"` vs `"7"`, `"-0"` vs
//! `"0"`). [`Bignum`] therefore keeps the raw string — size gates apply to
//! what was actually drawn — while equality, hashing, display and JSON all
//! go through the canonical form.

use core::fmt;
use core::hash::{Hash, Hasher};

use datasource::{Datasource, OutOfData};
use num_bigint::BigInt;
use serde::{Serialize, Serializer};

/// A bignum held as a decimal string.
#[derive(Clone, Debug, Default)]
pub struct Bignum(String);

impl Bignum {
  /// Wrap a decimal string.
  #[inline]
  #[must_use]
  pub fn new(value: impl Into<String>) -> Self {
    Self(value.into())
  }

  /// The bignum zero.
  #[inline]
  #[must_use]
  pub fn zero() -> Self {
    Self("0".to_owned())
  }

  /// Draw a decimal string from a datasource.
  ///
  /// Each drawn byte maps to one decimal digit so the string is always
  /// well-formed; the draw consumes at least one byte.
  pub fn from_datasource(ds: &mut Datasource<'_>) -> Result<Self, OutOfData> {
    let bytes = ds.get_data(1)?;
    let digits: String = bytes.iter().map(|b| char::from(b'0' + b % 10)).collect();
    Ok(Self(digits))
  }

  /// Length of the raw string, in characters.
  ///
  /// Size gates deliberately measure the raw form: an attacker-sized input
  /// stays attacker-sized no matter how many leading zeros it carries.
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Whether the raw string is empty.
  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// The raw string as drawn or produced.
  #[inline]
  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Canonical decimal form: sign, then digits without leading zeros.
  ///
  /// The empty string and `-0` both canonicalize to `"0"`.
  #[must_use]
  pub fn trimmed(&self) -> String {
    let (negative, digits) = match self.0.strip_prefix('-') {
      Some(rest) => (true, rest),
      None => (false, self.0.as_str()),
    };
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
      return "0".to_owned();
    }
    if negative {
      format!("-{digits}")
    } else {
      digits.to_owned()
    }
  }

  /// Whether the canonical value is zero.
  #[inline]
  #[must_use]
  pub fn is_zero(&self) -> bool {
    self.trimmed() == "0"
  }

  /// Parse into a [`BigInt`], if the raw string is well-formed decimal.
  #[must_use]
  pub fn to_bigint(&self) -> Option<BigInt> {
    self.trimmed().parse().ok()
  }
}

impl From<BigInt> for Bignum {
  #[inline]
  fn from(value: BigInt) -> Self {
    Self(value.to_string())
  }
}

impl From<&str> for Bignum {
  #[inline]
  fn from(value: &str) -> Self {
    Self(value.to_owned())
  }
}

impl PartialEq for Bignum {
  fn eq(&self, other: &Self) -> bool {
    self.trimmed() == other.trimmed()
  }
}

impl Eq for Bignum {}

impl Hash for Bignum {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.trimmed().hash(state);
  }
}

impl fmt::Display for Bignum {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.trimmed())
  }
}

impl Serialize for Bignum {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.trimmed())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn trimming() {
    assert_eq!(Bignum::from("007").trimmed(), "7");
    assert_eq!(Bignum::from("000").trimmed(), "0");
    assert_eq!(Bignum::from("").trimmed(), "0");
    assert_eq!(Bignum::from("-007").trimmed(), "-7");
    assert_eq!(Bignum::from("-0").trimmed(), "0");
    assert_eq!(Bignum::from("12345").trimmed(), "12345");
  }

  #[test]
  fn equality_is_canonical() {
    assert_eq!(Bignum::from("007"), Bignum::from("7"));
    assert_eq!(Bignum::from("-0"), Bignum::from("0"));
    assert_ne!(Bignum::from("7"), Bignum::from("-7"));
  }

  #[test]
  fn raw_length_is_preserved() {
    let bn = Bignum::from("000123");
    assert_eq!(bn.len(), 6);
    assert_eq!(bn.trimmed(), "123");
  }

  #[test]
  fn datasource_draw_is_well_formed() {
    let data = [0x04, 0x00, 0, 9, 10, 255];
    let mut ds = Datasource::new(&data);
    let bn = Bignum::from_datasource(&mut ds).unwrap();
    // 0 -> '0', 9 -> '9', 10 -> '0', 255 -> '5'
    assert_eq!(bn.as_str(), "0905");
    assert!(bn.to_bigint().is_some());
  }

  #[test]
  fn bigint_round_trip() {
    let bn = Bignum::from("340282366920938463463374607431768211456");
    let parsed = bn.to_bigint().unwrap();
    assert_eq!(Bignum::from(parsed), bn);
  }

  #[test]
  fn serialize_canonical() {
    assert_eq!(serde_json::to_string(&Bignum::from("0042")).unwrap(), "\"42\"");
  }
}
