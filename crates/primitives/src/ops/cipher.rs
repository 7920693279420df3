//! Symmetric encryption and decryption operations.

use datasource::{Datasource, OutOfData};
use serde::Serialize;

use crate::component::Ciphertext;
use crate::op::impl_operation;
use crate::ops::mac::SymmetricCipher;
use crate::{Buffer, Modifier};

/// Encrypt a cleartext under a chosen cipher.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SymmetricEncrypt {
  pub modifier: Modifier,
  pub cipher: SymmetricCipher,
  pub cleartext: Buffer,
  pub aad: Option<Buffer>,
  /// Requested authentication-tag size. `None` means "no explicit tag":
  /// AEAD backends may fold the tag into the ciphertext or omit it.
  pub tag_size: Option<usize>,
  /// Size of the output buffer the backend must write into.
  pub ciphertext_size: usize,
}

impl SymmetricEncrypt {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    let cipher = SymmetricCipher::from_datasource(ds)?;
    let cleartext = Buffer::from_datasource(ds, 0)?;
    let aad = if ds.get_bool()? {
      Some(Buffer::from_datasource(ds, 0)?)
    } else {
      None
    };
    let tag_size = if ds.get_bool()? {
      Some(ds.get_u8()? as usize)
    } else {
      None
    };
    let ciphertext_size = cleartext.len() + ds.get_u8()? as usize;
    Ok(Self {
      modifier,
      cipher,
      cleartext,
      aad,
      tag_size,
      ciphertext_size,
    })
  }
}

impl_operation!(
  SymmetricEncrypt,
  family: "SymmetricEncrypt",
  algorithm: |op| op.cipher.cipher_type.name_or_id()
);

/// Decrypt a ciphertext under a chosen cipher.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SymmetricDecrypt {
  pub modifier: Modifier,
  pub cipher: SymmetricCipher,
  pub ciphertext: Buffer,
  pub tag: Option<Buffer>,
  pub aad: Option<Buffer>,
  /// Size of the output buffer the backend must write into.
  pub cleartext_size: usize,
}

impl SymmetricDecrypt {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    let cipher = SymmetricCipher::from_datasource(ds)?;
    let ciphertext = Buffer::from_datasource(ds, 0)?;
    let tag = if ds.get_bool()? {
      Some(Buffer::from_datasource(ds, 0)?)
    } else {
      None
    };
    let aad = if ds.get_bool()? {
      Some(Buffer::from_datasource(ds, 0)?)
    } else {
      None
    };
    let cleartext_size = ciphertext.len() + ds.get_u8()? as usize;
    Ok(Self {
      modifier,
      cipher,
      ciphertext,
      tag,
      aad,
      cleartext_size,
    })
  }

  /// Build the inverse operation of an encryption and its produced
  /// ciphertext, for the round-trip self-check.
  #[must_use]
  pub fn inverse_of(
    encrypt: &SymmetricEncrypt,
    produced: &Ciphertext,
    cleartext_size: usize,
    aad: Option<Buffer>,
    modifier: Modifier,
  ) -> Self {
    Self {
      modifier,
      cipher: encrypt.cipher.clone(),
      ciphertext: produced.ciphertext.clone(),
      tag: produced.tag.clone(),
      aad,
      cleartext_size,
    }
  }
}

impl_operation!(
  SymmetricDecrypt,
  family: "SymmetricDecrypt",
  algorithm: |op| op.cipher.cipher_type.name_or_id()
);
