//! Per-operation invariant checks.
//!
//! These run on every (operation, result) pair unless disabled. They are
//! pure: no backend calls, no pool writes. A failed check is a correctness
//! violation of the producing module and reports through the same
//! discrepancy path as a cross-module difference.

use primitives::{component, ids::digests, Buffer, DigestType};

use crate::module::Module;
use crate::report::Discrepancy;

/// Known output sizes, in bytes, for fixed-length digests.
const DIGEST_SIZES: &[(DigestType, usize)] = &[
  (digests::MD5, 16),
  (digests::RIPEMD160, 20),
  (digests::SHA1, 20),
  (digests::SHA224, 28),
  (digests::SHA256, 32),
  (digests::SHA384, 48),
  (digests::SHA512, 64),
  (digests::SHA3_224, 28),
  (digests::SHA3_256, 32),
  (digests::SHA3_384, 48),
  (digests::SHA3_512, 64),
  (digests::BLAKE2B512, 64),
  (digests::BLAKE2S256, 32),
];

/// Expected output size for a known digest.
#[must_use]
pub fn expected_digest_size(digest: DigestType) -> Option<usize> {
  DIGEST_SIZES.iter().find(|(d, _)| *d == digest).map(|(_, size)| *size)
}

/// A digest result must have the algorithm's fixed output size.
pub fn digest_size(
  module: &dyn Module,
  digest_type: DigestType,
  algorithm: &str,
  result: &component::Digest,
) -> Result<(), Discrepancy> {
  let Some(expected) = expected_digest_size(digest_type) else {
    return Ok(());
  };
  if result.len() == expected {
    return Ok(());
  }
  Err(check_failure(
    module,
    "Digest",
    algorithm,
    "invalid digest size",
    format!(
      "Digest size check failed\n\nExpected {} bytes, module returned {} bytes: {}\n\n",
      expected,
      result.len(),
      result.to_hex(),
    ),
  ))
}

/// A derived key must have exactly the requested size.
pub fn derived_key_size(
  module: &dyn Module,
  family: &'static str,
  algorithm: &str,
  requested: usize,
  result: &component::Key,
) -> Result<(), Discrepancy> {
  if result.len() == requested {
    return Ok(());
  }
  Err(check_failure(
    module,
    family,
    algorithm,
    "invalid derived key size",
    format!(
      "Derived key size check failed\n\nRequested {} bytes, module returned {} bytes: {}\n\n",
      requested,
      result.len(),
      result.to_hex(),
    ),
  ))
}

/// An ECDSA signature must have nonzero components.
pub fn ecdsa_signature_not_degenerate(
  module: &dyn Module,
  algorithm: &str,
  result: &component::EcdsaSignature,
) -> Result<(), Discrepancy> {
  if !result.r.is_zero() && !result.s.is_zero() {
    return Ok(());
  }
  Err(check_failure(
    module,
    "ECDSA_Sign",
    algorithm,
    "degenerate ECDSA signature",
    format!(
      "ECDSA signature check failed\n\nSignature component is zero: r={}, s={}\n\n",
      result.r, result.s,
    ),
  ))
}

/// A MAC must not be empty.
pub fn mac_not_empty(
  module: &dyn Module,
  family: &'static str,
  algorithm: &str,
  result: &Buffer,
) -> Result<(), Discrepancy> {
  if !result.is_empty() {
    return Ok(());
  }
  Err(check_failure(
    module,
    family,
    algorithm,
    "empty MAC",
    "MAC check failed\n\nModule returned an empty MAC\n\n".to_owned(),
  ))
}

fn check_failure(
  module: &dyn Module,
  family: &'static str,
  algorithm: &str,
  reason: &str,
  detail: String,
) -> Discrepancy {
  Discrepancy::new([module.name().to_owned()], family, algorithm, reason, detail)
}

#[cfg(test)]
mod tests {
  use super::*;
  use primitives::{Bignum, ModuleId};

  struct Named;
  impl Module for Named {
    fn id(&self) -> ModuleId {
      ModuleId::new(1)
    }
    fn name(&self) -> &str {
      "Named"
    }
  }

  #[test]
  fn digest_size_table() {
    assert_eq!(expected_digest_size(digests::SHA256), Some(32));
    assert_eq!(expected_digest_size(DigestType::new(0x1234)), None);
  }

  #[test]
  fn digest_size_mismatch_is_reported() {
    let short = Buffer::from(&[0u8; 31][..]);
    let err = digest_size(&Named, digests::SHA256, "SHA256", &short).unwrap_err();
    assert_eq!(err.reason(), "invalid digest size");
    assert_eq!(
      err.assertion_line(),
      "Assertion failure: Named-Digest-SHA256-invalid digest size"
    );
  }

  #[test]
  fn unknown_digest_is_not_checked() {
    let anything = Buffer::from(&[0u8; 5][..]);
    assert!(digest_size(&Named, DigestType::new(7), "?", &anything).is_ok());
  }

  #[test]
  fn key_size_check() {
    let key = Buffer::from(&[0u8; 16][..]);
    assert!(derived_key_size(&Named, "KDF_HKDF", "SHA256", 16, &key).is_ok());
    assert!(derived_key_size(&Named, "KDF_HKDF", "SHA256", 32, &key).is_err());
  }

  #[test]
  fn degenerate_signature_is_reported() {
    let signature = component::EcdsaSignature {
      public_key: component::EccPoint::new(Bignum::from("1"), Bignum::from("2")),
      r: Bignum::from("0"),
      s: Bignum::from("5"),
    };
    assert!(ecdsa_signature_not_degenerate(&Named, "secp256k1", &signature).is_err());
  }
}
