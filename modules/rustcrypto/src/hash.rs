//! Digest and HMAC dispatch over the RustCrypto hash crates.

use blake2::{Blake2b512, Blake2s256};
use hmac::{Hmac, Mac};
use primitives::ids::digests;
use primitives::{Buffer, DigestType};
use sha2::{Digest as _, Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

fn run<D: sha2::Digest>(data: &[u8]) -> Buffer {
  Buffer::from(D::digest(data).to_vec())
}

/// Hash `data` with the requested algorithm.
///
/// Unsupported algorithms yield `None`; the executor treats that the same
/// as a gated call.
pub fn digest(digest_type: DigestType, data: &[u8]) -> Option<Buffer> {
  match digest_type {
    digests::SHA224 => Some(run::<Sha224>(data)),
    digests::SHA256 => Some(run::<Sha256>(data)),
    digests::SHA384 => Some(run::<Sha384>(data)),
    digests::SHA512 => Some(run::<Sha512>(data)),
    digests::SHA3_224 => Some(run::<Sha3_224>(data)),
    digests::SHA3_256 => Some(run::<Sha3_256>(data)),
    digests::SHA3_384 => Some(run::<Sha3_384>(data)),
    digests::SHA3_512 => Some(run::<Sha3_512>(data)),
    digests::BLAKE2B512 => Some(run::<Blake2b512>(data)),
    digests::BLAKE2S256 => Some(run::<Blake2s256>(data)),
    _ => None,
  }
}

macro_rules! hmac_with {
  ($digest:ty, $key:expr, $data:expr) => {{
    let mut mac = <Hmac<$digest>>::new_from_slice($key).ok()?;
    mac.update($data);
    Some(Buffer::from(mac.finalize().into_bytes().to_vec()))
  }};
}

/// HMAC over `data` with the requested hash. Any key length is accepted.
pub fn hmac(digest_type: DigestType, key: &[u8], data: &[u8]) -> Option<Buffer> {
  match digest_type {
    digests::SHA224 => hmac_with!(Sha224, key, data),
    digests::SHA256 => hmac_with!(Sha256, key, data),
    digests::SHA384 => hmac_with!(Sha384, key, data),
    digests::SHA512 => hmac_with!(Sha512, key, data),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sha256_abc() {
    let out = digest(digests::SHA256, b"abc").unwrap();
    assert_eq!(
      out.to_hex(),
      "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
  }

  #[test]
  fn sha256_empty() {
    let out = digest(digests::SHA256, b"").unwrap();
    assert_eq!(
      out.to_hex(),
      "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
  }

  #[test]
  fn sha3_256_abc() {
    let out = digest(digests::SHA3_256, b"abc").unwrap();
    assert_eq!(
      out.to_hex(),
      "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
    );
  }

  #[test]
  fn blake2b512_abc() {
    let out = digest(digests::BLAKE2B512, b"abc").unwrap();
    assert_eq!(
      out.to_hex(),
      "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d17d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923"
    );
  }

  #[test]
  fn unsupported_digest_declines() {
    assert!(digest(digests::MD5, b"abc").is_none());
    assert!(digest(DigestType::new(0x1111), b"abc").is_none());
  }

  #[test]
  fn hmac_sha256_rfc4231_case1() {
    let key = [0x0bu8; 20];
    let out = hmac(digests::SHA256, &key, b"Hi There").unwrap();
    assert_eq!(
      out.to_hex(),
      "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7"
    );
  }

  #[test]
  fn hmac_accepts_any_key_length() {
    assert!(hmac(digests::SHA512, b"", b"msg").is_some());
    assert!(hmac(digests::SHA512, &[0u8; 200], b"msg").is_some());
  }
}
