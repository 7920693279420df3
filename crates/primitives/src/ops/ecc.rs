//! Elliptic-curve operations: key handling, ECDSA, ECDH, ECIES.

use datasource::{Datasource, OutOfData};
use serde::Serialize;

use crate::component::{EccPoint, EcdsaSignature};
use crate::op::impl_operation;
use crate::{Bignum, Buffer, CipherType, CurveType, DigestType, Modifier};

/// Derive the public key for a private scalar.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EccPrivateToPublic {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub private_key: Bignum,
}

impl EccPrivateToPublic {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      private_key: Bignum::from_datasource(ds)?,
    })
  }
}

impl_operation!(
  EccPrivateToPublic,
  family: "ECC_PrivateToPublic",
  algorithm: |op| op.curve_type.name_or_id()
);

/// Check whether a point is a valid public key on the curve.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EccValidatePubkey {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub public_key: EccPoint,
}

impl EccValidatePubkey {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      public_key: EccPoint::from_datasource(ds)?,
    })
  }
}

impl_operation!(
  EccValidatePubkey,
  family: "ECC_ValidatePubkey",
  algorithm: |op| op.curve_type.name_or_id()
);

/// Generate a fresh key pair on the curve.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EccGenerateKeyPair {
  pub modifier: Modifier,
  pub curve_type: CurveType,
}

impl EccGenerateKeyPair {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
    })
  }
}

impl_operation!(
  EccGenerateKeyPair,
  family: "ECC_GenerateKeyPair",
  algorithm: |op| op.curve_type.name_or_id()
);

/// Where an ECDSA signing nonce comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NonceSource {
  /// Fresh randomness per signature; results are not comparable.
  Random,
  /// Nonce supplied by the operation.
  Specified,
  /// Deterministic RFC 6979 derivation.
  Rfc6979,
}

/// Sign a cleartext with ECDSA.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EcdsaSign {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub private_key: Bignum,
  pub cleartext: Buffer,
  pub nonce_source: NonceSource,
  /// Present when `nonce_source` is [`NonceSource::Specified`].
  pub nonce: Option<Bignum>,
  pub digest_type: DigestType,
}

impl EcdsaSign {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    let curve_type = CurveType::new(ds.get_u64()?);
    let private_key = Bignum::from_datasource(ds)?;
    let cleartext = Buffer::from_datasource(ds, 0)?;
    let nonce_source = match ds.get_u8()? % 3 {
      0 => NonceSource::Random,
      1 => NonceSource::Specified,
      _ => NonceSource::Rfc6979,
    };
    let nonce = if nonce_source == NonceSource::Specified {
      Some(Bignum::from_datasource(ds)?)
    } else {
      None
    };
    Ok(Self {
      modifier,
      curve_type,
      private_key,
      cleartext,
      nonce_source,
      nonce,
      digest_type: DigestType::new(ds.get_u64()?),
    })
  }

  /// Whether signatures from this operation use fresh randomness.
  #[inline]
  #[must_use]
  pub fn uses_random_nonce(&self) -> bool {
    self.nonce_source == NonceSource::Random
  }
}

impl_operation!(EcdsaSign, family: "ECDSA_Sign", algorithm: |op| op.curve_type.name_or_id());

/// Verify an ECDSA signature.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EcdsaVerify {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub cleartext: Buffer,
  pub signature: EcdsaSignature,
  pub digest_type: DigestType,
}

impl EcdsaVerify {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      cleartext: Buffer::from_datasource(ds, 0)?,
      signature: EcdsaSignature::from_datasource(ds)?,
      digest_type: DigestType::new(ds.get_u64()?),
    })
  }
}

impl_operation!(EcdsaVerify, family: "ECDSA_Verify", algorithm: |op| op.curve_type.name_or_id());

/// Derive a shared secret from two public points on the same curve.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EcdhDerive {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub public_key1: EccPoint,
  pub public_key2: EccPoint,
}

impl EcdhDerive {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      public_key1: EccPoint::from_datasource(ds)?,
      public_key2: EccPoint::from_datasource(ds)?,
    })
  }

  /// Build a derivation over two freshly generated public keys.
  #[must_use]
  pub const fn synthesized(
    modifier: Modifier,
    curve_type: CurveType,
    public_key1: EccPoint,
    public_key2: EccPoint,
  ) -> Self {
    Self {
      modifier,
      curve_type,
      public_key1,
      public_key2,
    }
  }
}

impl_operation!(EcdhDerive, family: "ECDH_Derive", algorithm: |op| op.curve_type.name_or_id());

/// ECIES encryption.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EciesEncrypt {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub cipher_type: CipherType,
  pub cleartext: Buffer,
  pub private_key: Bignum,
  pub public_key: EccPoint,
}

impl EciesEncrypt {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      cipher_type: CipherType::new(ds.get_u64()?),
      cleartext: Buffer::from_datasource(ds, 0)?,
      private_key: Bignum::from_datasource(ds)?,
      public_key: EccPoint::from_datasource(ds)?,
    })
  }
}

impl_operation!(EciesEncrypt, family: "ECIES_Encrypt", algorithm: |op| op.curve_type.name_or_id());

/// ECIES decryption.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EciesDecrypt {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub cipher_type: CipherType,
  pub ciphertext: Buffer,
  pub private_key: Bignum,
  pub public_key: EccPoint,
}

impl EciesDecrypt {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      cipher_type: CipherType::new(ds.get_u64()?),
      ciphertext: Buffer::from_datasource(ds, 0)?,
      private_key: Bignum::from_datasource(ds)?,
      public_key: EccPoint::from_datasource(ds)?,
    })
  }
}

impl_operation!(EciesDecrypt, family: "ECIES_Decrypt", algorithm: |op| op.curve_type.name_or_id());

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ids::curves;
  use crate::Operation;

  #[test]
  fn sign_draws_nonce_only_when_specified() {
    let mut data = curves::SECP256K1.get().to_le_bytes().to_vec();
    data.extend_from_slice(&[0x01, 0x00, 3]); // private key "3"
    data.extend_from_slice(&[0x02, 0x00, b'h', b'i']); // cleartext
    data.push(1); // nonce source: specified
    data.extend_from_slice(&[0x01, 0x00, 7]); // nonce "7"
    data.extend_from_slice(&crate::ids::digests::SHA256.get().to_le_bytes());
    let op = EcdsaSign::from_datasource(&mut Datasource::new(&data), Modifier::empty()).unwrap();
    assert_eq!(op.nonce_source, NonceSource::Specified);
    assert!(op.nonce.is_some());
    assert!(!op.uses_random_nonce());
  }

  #[test]
  fn random_nonce_detection() {
    let mut data = curves::ED25519.get().to_le_bytes().to_vec();
    data.extend_from_slice(&[0x01, 0x00, 3]);
    data.extend_from_slice(&[0x00, 0x00]);
    data.push(0); // nonce source: random
    data.extend_from_slice(&crate::ids::digests::SHA256.get().to_le_bytes());
    let op = EcdsaSign::from_datasource(&mut Datasource::new(&data), Modifier::empty()).unwrap();
    assert!(op.uses_random_nonce());
    assert!(op.nonce.is_none());
  }

  #[test]
  fn ecdh_synthesized_keeps_the_modifier() {
    let point = EccPoint::new(Bignum::from("1"), Bignum::from("2"));
    let op = EcdhDerive::synthesized(
      Modifier::new(vec![0xAB]),
      curves::X25519,
      point.clone(),
      point,
    );
    assert_eq!(op.modifier().as_slice(), &[0xAB]);
    assert_eq!(op.algorithm_name(), "x25519");
  }
}
