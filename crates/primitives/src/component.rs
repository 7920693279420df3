//! Result value types returned by backend modules.
//!
//! Every operation family has a fixed result type. Results carry *semantic*
//! equality — bignums compare as canonical decimals, buffers byte-wise —
//! and expose a flat byte region where one exists so the executor can probe
//! it for uninitialized memory before anything else looks at it.

use core::fmt;

use datasource::{Datasource, OutOfData};
use serde::Serialize;

use crate::{Bignum, Buffer};

/// Behavior common to all result values.
pub trait OpResult: Serialize {
  /// The contiguous byte region backing this result, if it has one.
  ///
  /// Regions returned here are probed by the sanitizer hook on every
  /// present result, before comparison or pool insertion.
  fn flat_region(&self) -> Option<&[u8]> {
    None
  }

  /// JSON form for the dump sink.
  fn to_json(&self) -> serde_json::Value {
    serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
  }

  /// Human-readable form for diagnostics.
  fn describe(&self) -> String {
    serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
  }
}

/// A digest result.
pub type Digest = Buffer;
/// A MAC result.
pub type Mac = Buffer;
/// A derived key.
pub type Key = Buffer;
/// A shared secret.
pub type Secret = Buffer;
/// A recovered cleartext.
pub type Cleartext = Buffer;

impl OpResult for Buffer {
  fn flat_region(&self) -> Option<&[u8]> {
    Some(self.as_slice())
  }
}

impl OpResult for bool {}

impl OpResult for Bignum {
  fn flat_region(&self) -> Option<&[u8]> {
    Some(self.as_str().as_bytes())
  }
}

/// Ciphertext with an optional authentication tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Ciphertext {
  pub ciphertext: Buffer,
  pub tag: Option<Buffer>,
}

impl Ciphertext {
  /// Ciphertext without a tag.
  #[inline]
  #[must_use]
  pub const fn untagged(ciphertext: Buffer) -> Self {
    Self { ciphertext, tag: None }
  }
}

impl OpResult for Ciphertext {
  fn flat_region(&self) -> Option<&[u8]> {
    Some(self.ciphertext.as_slice())
  }
}

impl fmt::Display for Ciphertext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ciphertext: {}", self.ciphertext.to_hex())?;
    match &self.tag {
      Some(tag) => write!(f, ", tag: {}", tag.to_hex()),
      None => write!(f, ", tag: nullopt"),
    }
  }
}

/// An affine elliptic-curve point in decimal coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EccPoint {
  pub x: Bignum,
  pub y: Bignum,
}

impl EccPoint {
  #[inline]
  #[must_use]
  pub const fn new(x: Bignum, y: Bignum) -> Self {
    Self { x, y }
  }

  pub fn from_datasource(ds: &mut Datasource<'_>) -> Result<Self, OutOfData> {
    Ok(Self {
      x: Bignum::from_datasource(ds)?,
      y: Bignum::from_datasource(ds)?,
    })
  }
}

impl OpResult for EccPoint {}

/// An ECC public key is a curve point.
pub type EccPublicKey = EccPoint;

/// An ECC private/public key pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EccKeyPair {
  pub private_key: Bignum,
  pub public_key: EccPoint,
}

impl OpResult for EccKeyPair {}

/// An ECDSA signature together with the signer's public key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EcdsaSignature {
  pub public_key: EccPoint,
  pub r: Bignum,
  pub s: Bignum,
}

impl EcdsaSignature {
  pub fn from_datasource(ds: &mut Datasource<'_>) -> Result<Self, OutOfData> {
    Ok(Self {
      public_key: EccPoint::from_datasource(ds)?,
      r: Bignum::from_datasource(ds)?,
      s: Bignum::from_datasource(ds)?,
    })
  }
}

impl OpResult for EcdsaSignature {}

/// A Diffie-Hellman key pair: (private exponent, public value).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DhKeyPair {
  pub private_key: Bignum,
  pub public_key: Bignum,
}

impl OpResult for DhKeyPair {}

/// A point on a BLS G1 group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct G1 {
  pub x: Bignum,
  pub y: Bignum,
}

impl G1 {
  #[inline]
  #[must_use]
  pub const fn new(x: Bignum, y: Bignum) -> Self {
    Self { x, y }
  }

  pub fn from_datasource(ds: &mut Datasource<'_>) -> Result<Self, OutOfData> {
    Ok(Self {
      x: Bignum::from_datasource(ds)?,
      y: Bignum::from_datasource(ds)?,
    })
  }
}

impl OpResult for G1 {}

/// A point on a BLS G2 group (two Fp2 coordinates).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct G2 {
  pub v: Bignum,
  pub w: Bignum,
  pub x: Bignum,
  pub y: Bignum,
}

impl G2 {
  #[inline]
  #[must_use]
  pub const fn new(v: Bignum, w: Bignum, x: Bignum, y: Bignum) -> Self {
    Self { v, w, x, y }
  }

  pub fn from_datasource(ds: &mut Datasource<'_>) -> Result<Self, OutOfData> {
    Ok(Self {
      v: Bignum::from_datasource(ds)?,
      w: Bignum::from_datasource(ds)?,
      x: Bignum::from_datasource(ds)?,
      y: Bignum::from_datasource(ds)?,
    })
  }
}

impl OpResult for G2 {}

/// A BLS public key lives in G1.
pub type BlsPublicKey = G1;

/// A BLS signature together with the signer's public key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlsSignature {
  pub public_key: G1,
  pub signature: G2,
}

impl OpResult for BlsSignature {}

/// A BLS private/public key pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlsKeyPair {
  pub private_key: Bignum,
  pub public_key: G1,
}

impl OpResult for BlsKeyPair {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn buffer_region_is_probed_bytes() {
    let digest: Digest = Buffer::from(&[1u8, 2, 3][..]);
    assert_eq!(digest.flat_region(), Some(&[1u8, 2, 3][..]));
  }

  #[test]
  fn bool_has_no_region() {
    assert_eq!(true.flat_region(), None);
  }

  #[test]
  fn ciphertext_region_excludes_tag() {
    let ct = Ciphertext {
      ciphertext: Buffer::from(&[9u8][..]),
      tag: Some(Buffer::from(&[7u8][..])),
    };
    assert_eq!(ct.flat_region(), Some(&[9u8][..]));
  }

  #[test]
  fn point_equality_is_canonical() {
    let a = EccPoint::new(Bignum::from("07"), Bignum::from("0"));
    let b = EccPoint::new(Bignum::from("7"), Bignum::from("-0"));
    assert_eq!(a, b);
  }

  #[test]
  fn signature_equality_is_rs_tuple() {
    let key = EccPoint::new(Bignum::from("1"), Bignum::from("2"));
    let a = EcdsaSignature {
      public_key: key.clone(),
      r: Bignum::from("010"),
      s: Bignum::from("20"),
    };
    let b = EcdsaSignature {
      public_key: key,
      r: Bignum::from("10"),
      s: Bignum::from("020"),
    };
    assert_eq!(a, b);
  }

  #[test]
  fn json_forms() {
    let bn = Bignum::from("0042");
    assert_eq!(bn.to_json(), serde_json::json!("42"));
    let ct = Ciphertext::untagged(Buffer::from(&[0xABu8][..]));
    assert_eq!(ct.to_json(), serde_json::json!({"ciphertext": "ab", "tag": null}));
  }
}
