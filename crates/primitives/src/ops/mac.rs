//! MAC operations and the symmetric-cipher input component.

use datasource::{Datasource, OutOfData};
use serde::Serialize;

use crate::op::impl_operation;
use crate::{Buffer, CipherType, DigestType, Modifier};

/// Cipher selection plus keying material, as drawn for MAC and
/// encrypt/decrypt operations.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SymmetricCipher {
  pub iv: Buffer,
  pub key: Buffer,
  pub cipher_type: CipherType,
}

impl SymmetricCipher {
  pub fn from_datasource(ds: &mut Datasource<'_>) -> Result<Self, OutOfData> {
    Ok(Self {
      iv: Buffer::from_datasource(ds, 0)?,
      key: Buffer::from_datasource(ds, 0)?,
      cipher_type: CipherType::new(ds.get_u64()?),
    })
  }
}

/// Keyed-hash MAC over a cleartext.
///
/// Carries a full cipher component besides the digest: some backends route
/// HMAC through a cipher-flavored API, and the comparison policy needs the
/// cipher id (randomized-IV wrap modes are exempt from comparison).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Hmac {
  pub modifier: Modifier,
  pub digest_type: DigestType,
  pub cipher: SymmetricCipher,
  pub cleartext: Buffer,
}

impl Hmac {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      digest_type: DigestType::new(ds.get_u64()?),
      cipher: SymmetricCipher::from_datasource(ds)?,
      cleartext: Buffer::from_datasource(ds, 0)?,
    })
  }
}

impl_operation!(Hmac, family: "HMAC", algorithm: |op| op.digest_type.name_or_id());

/// Cipher-based MAC over a cleartext.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cmac {
  pub modifier: Modifier,
  pub cipher: SymmetricCipher,
  pub cleartext: Buffer,
}

impl Cmac {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      cipher: SymmetricCipher::from_datasource(ds)?,
      cleartext: Buffer::from_datasource(ds, 0)?,
    })
  }
}

impl_operation!(Cmac, family: "CMAC", algorithm: |op| op.cipher.cipher_type.name_or_id());

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ids::{ciphers, digests};
  use crate::Operation;

  #[test]
  fn hmac_algorithm_is_the_digest() {
    let mut data = digests::SHA512.get().to_le_bytes().to_vec();
    data.extend_from_slice(&[0x00, 0x00]); // iv
    data.extend_from_slice(&[0x02, 0x00, 0xAA, 0xBB]); // key
    data.extend_from_slice(&ciphers::AES_128_CBC.get().to_le_bytes());
    data.extend_from_slice(&[0x01, 0x00, b'x']); // cleartext
    let op = Hmac::from_datasource(&mut Datasource::new(&data), Modifier::empty()).unwrap();
    assert_eq!(op.algorithm_name(), "SHA512");
    assert_eq!(op.cipher.key.as_slice(), &[0xAA, 0xBB]);
    assert_eq!(op.cleartext.as_slice(), b"x");
  }

  #[test]
  fn cmac_algorithm_is_the_cipher() {
    let mut data = Vec::new();
    data.extend_from_slice(&[0x00, 0x00]); // iv
    data.extend_from_slice(&[0x00, 0x00]); // key
    data.extend_from_slice(&ciphers::DES_EDE3_WRAP.get().to_le_bytes());
    data.extend_from_slice(&[0x00, 0x00]); // cleartext
    let op = Cmac::from_datasource(&mut Datasource::new(&data), Modifier::empty()).unwrap();
    assert_eq!(op.algorithm_name(), "DES_EDE3_WRAP");
  }
}
