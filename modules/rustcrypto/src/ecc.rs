//! ECDSA and ECC key handling over the `p256` crate.
//!
//! Only secp256r1 with SHA-256 is offered, and signing is restricted to the
//! deterministic RFC 6979 nonce path; anything else declines. Declining is
//! the honest answer for a backend: the executor already treats "can't" and
//! "won't" identically.

use num_bigint::BigUint;
use num_traits::Zero;
use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::{EncodedPoint, SecretKey};
use primitives::component::{EccPoint, EcdsaSignature};
use primitives::ids::{curves, digests};
use primitives::{ops, Bignum};

/// secp256r1 group order, decimal.
const P256_ORDER: &str = "115792089210356248762697446949407573529996955224135760342422259061068512044369";

fn biguint_from(bn: &Bignum) -> Option<BigUint> {
  let trimmed = bn.trimmed();
  if trimmed.starts_with('-') {
    return None;
  }
  trimmed.parse().ok()
}

fn to_field_bytes(value: &BigUint) -> Option<[u8; 32]> {
  let bytes = value.to_bytes_be();
  if bytes.len() > 32 {
    return None;
  }
  let mut out = [0u8; 32];
  out.get_mut(32 - bytes.len()..)?.copy_from_slice(&bytes);
  Some(out)
}

fn decimal(bytes: &[u8]) -> Bignum {
  Bignum::new(BigUint::from_bytes_be(bytes).to_string())
}

fn secret_key_from(private_key: &Bignum) -> Option<SecretKey> {
  let order: BigUint = P256_ORDER.parse().ok()?;
  let scalar = biguint_from(private_key)? % &order;
  if scalar.is_zero() {
    return None;
  }
  SecretKey::from_slice(&to_field_bytes(&scalar)?).ok()
}

fn point_of(key: &VerifyingKey) -> Option<EccPoint> {
  let encoded = key.to_encoded_point(false);
  Some(EccPoint::new(
    decimal(encoded.x()?.as_slice()),
    decimal(encoded.y()?.as_slice()),
  ))
}

/// Public key for a private scalar; the scalar is reduced modulo the group
/// order first.
pub fn private_to_public(op: &ops::EccPrivateToPublic) -> Option<EccPoint> {
  if op.curve_type != curves::SECP256R1 {
    return None;
  }
  let secret = secret_key_from(&op.private_key)?;
  point_of(&VerifyingKey::from(&SigningKey::from(&secret)))
}

/// Whether the coordinates name a valid point on secp256r1.
pub fn validate_pubkey(op: &ops::EccValidatePubkey) -> Option<bool> {
  if op.curve_type != curves::SECP256R1 {
    return None;
  }
  Some(parse_pubkey(&op.public_key).is_some())
}

fn parse_pubkey(public_key: &EccPoint) -> Option<VerifyingKey> {
  let x = to_field_bytes(&biguint_from(&public_key.x)?)?;
  let y = to_field_bytes(&biguint_from(&public_key.y)?)?;
  let point = EncodedPoint::from_affine_coordinates(&x.into(), &y.into(), false);
  VerifyingKey::from_encoded_point(&point).ok()
}

/// Deterministic ECDSA over secp256r1/SHA-256.
pub fn sign(op: &ops::EcdsaSign) -> Option<EcdsaSignature> {
  if op.curve_type != curves::SECP256R1 {
    return None;
  }
  if op.digest_type != digests::SHA256 {
    return None;
  }
  if op.nonce_source != ops::NonceSource::Rfc6979 {
    return None;
  }

  let signing_key = SigningKey::from(&secret_key_from(&op.private_key)?);
  let signature: Signature = signing_key.sign(op.cleartext.as_slice());
  let (r, s) = signature.split_bytes();

  Some(EcdsaSignature {
    public_key: point_of(signing_key.verifying_key())?,
    r: decimal(&r),
    s: decimal(&s),
  })
}

/// ECDSA verification over secp256r1/SHA-256.
///
/// Malformed keys and signatures verify as `false` rather than declining:
/// rejecting garbage is part of a verifier's job.
pub fn verify(op: &ops::EcdsaVerify) -> Option<bool> {
  if op.curve_type != curves::SECP256R1 {
    return None;
  }
  if op.digest_type != digests::SHA256 {
    return None;
  }
  Some(verify_inner(op).unwrap_or(false))
}

fn verify_inner(op: &ops::EcdsaVerify) -> Option<bool> {
  let key = parse_pubkey(&op.signature.public_key)?;
  let r = to_field_bytes(&biguint_from(&op.signature.r)?)?;
  let s = to_field_bytes(&biguint_from(&op.signature.s)?)?;
  let signature = Signature::from_scalars(r, s).ok()?;
  Some(key.verify(op.cleartext.as_slice(), &signature).is_ok())
}
