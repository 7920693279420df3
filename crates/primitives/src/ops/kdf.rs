//! Key derivation operations.
//!
//! Derived-key sizes are capped at draw time so a hostile length prefix
//! cannot turn a derivation into an allocation stress test.

use datasource::{Datasource, OutOfData};
use serde::Serialize;

use crate::op::impl_operation;
use crate::{config, Buffer, DigestType, Modifier};

/// Cap applied to drawn key sizes.
const MAX_KEY_SIZE: usize = 1024;

fn draw_key_size(ds: &mut Datasource<'_>) -> Result<usize, OutOfData> {
  Ok(ds.get_u16()? as usize % (MAX_KEY_SIZE + 1))
}

/// scrypt key derivation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KdfScrypt {
  pub modifier: Modifier,
  pub password: Buffer,
  pub salt: Buffer,
  pub n: u64,
  pub r: u32,
  pub p: u32,
  pub key_size: usize,
}

impl KdfScrypt {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      password: Buffer::from_datasource(ds, 0)?,
      salt: Buffer::from_datasource(ds, 0)?,
      n: ds.get_u64()?,
      r: ds.get_u32()?,
      p: ds.get_u32()?,
      key_size: draw_key_size(ds)?,
    })
  }
}

impl_operation!(
  KdfScrypt,
  family: "KDF_SCRYPT",
  max_ops: config::SLOW_KDF_MAX_OPERATIONS,
  algorithm: |_op| "scrypt".to_owned()
);

/// HKDF extract-and-expand.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KdfHkdf {
  pub modifier: Modifier,
  pub digest_type: DigestType,
  pub password: Buffer,
  pub salt: Buffer,
  pub info: Buffer,
  pub key_size: usize,
}

impl KdfHkdf {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      digest_type: DigestType::new(ds.get_u64()?),
      password: Buffer::from_datasource(ds, 0)?,
      salt: Buffer::from_datasource(ds, 0)?,
      info: Buffer::from_datasource(ds, 0)?,
      key_size: draw_key_size(ds)?,
    })
  }
}

impl_operation!(KdfHkdf, family: "KDF_HKDF", algorithm: |op| op.digest_type.name_or_id());

/// TLS 1.x pseudo-random function.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KdfTls1Prf {
  pub modifier: Modifier,
  pub digest_type: DigestType,
  pub secret: Buffer,
  pub seed: Buffer,
  pub key_size: usize,
}

impl KdfTls1Prf {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      digest_type: DigestType::new(ds.get_u64()?),
      secret: Buffer::from_datasource(ds, 0)?,
      seed: Buffer::from_datasource(ds, 0)?,
      key_size: draw_key_size(ds)?,
    })
  }
}

impl_operation!(KdfTls1Prf, family: "KDF_TLS1_PRF", algorithm: |op| op.digest_type.name_or_id());

/// Generic one-step PBKDF.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KdfPbkdf {
  pub modifier: Modifier,
  pub digest_type: DigestType,
  pub password: Buffer,
  pub salt: Buffer,
  pub iterations: u32,
  pub key_size: usize,
}

impl KdfPbkdf {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      digest_type: DigestType::new(ds.get_u64()?),
      password: Buffer::from_datasource(ds, 0)?,
      salt: Buffer::from_datasource(ds, 0)?,
      iterations: ds.get_u32()?,
      key_size: draw_key_size(ds)?,
    })
  }
}

impl_operation!(KdfPbkdf, family: "KDF_PBKDF", algorithm: |op| op.digest_type.name_or_id());

/// PBKDF1.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KdfPbkdf1 {
  pub modifier: Modifier,
  pub digest_type: DigestType,
  pub password: Buffer,
  pub salt: Buffer,
  pub iterations: u32,
  pub key_size: usize,
}

impl KdfPbkdf1 {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      digest_type: DigestType::new(ds.get_u64()?),
      password: Buffer::from_datasource(ds, 0)?,
      salt: Buffer::from_datasource(ds, 0)?,
      iterations: ds.get_u32()?,
      key_size: draw_key_size(ds)?,
    })
  }
}

impl_operation!(KdfPbkdf1, family: "KDF_PBKDF1", algorithm: |op| op.digest_type.name_or_id());

/// PBKDF2.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KdfPbkdf2 {
  pub modifier: Modifier,
  pub digest_type: DigestType,
  pub password: Buffer,
  pub salt: Buffer,
  pub iterations: u32,
  pub key_size: usize,
}

impl KdfPbkdf2 {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      digest_type: DigestType::new(ds.get_u64()?),
      password: Buffer::from_datasource(ds, 0)?,
      salt: Buffer::from_datasource(ds, 0)?,
      iterations: ds.get_u32()?,
      key_size: draw_key_size(ds)?,
    })
  }
}

impl_operation!(KdfPbkdf2, family: "KDF_PBKDF2", algorithm: |op| op.digest_type.name_or_id());

/// Argon2 (d, i, or id, per `variant`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KdfArgon2 {
  pub modifier: Modifier,
  pub password: Buffer,
  pub salt: Buffer,
  pub variant: u8,
  pub threads: u8,
  pub memory_kib: u32,
  pub iterations: u32,
  pub key_size: usize,
}

impl KdfArgon2 {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      password: Buffer::from_datasource(ds, 0)?,
      salt: Buffer::from_datasource(ds, 0)?,
      variant: ds.get_u8()?,
      threads: ds.get_u8()?,
      memory_kib: ds.get_u32()?,
      iterations: ds.get_u32()?,
      key_size: draw_key_size(ds)?,
    })
  }
}

impl_operation!(
  KdfArgon2,
  family: "KDF_ARGON2",
  max_ops: config::SLOW_KDF_MAX_OPERATIONS,
  algorithm: |_op| "argon2".to_owned()
);

/// SSH key derivation (RFC 4253 §7.2).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KdfSsh {
  pub modifier: Modifier,
  pub digest_type: DigestType,
  pub key: Buffer,
  pub xcghash: Buffer,
  pub session_id: Buffer,
  /// Single-letter key type, `A` through `F`.
  pub key_type: u8,
  pub key_size: usize,
}

impl KdfSsh {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      digest_type: DigestType::new(ds.get_u64()?),
      key: Buffer::from_datasource(ds, 0)?,
      xcghash: Buffer::from_datasource(ds, 0)?,
      session_id: Buffer::from_datasource(ds, 0)?,
      key_type: b'A' + ds.get_u8()? % 6,
      key_size: draw_key_size(ds)?,
    })
  }
}

impl_operation!(KdfSsh, family: "KDF_SSH", algorithm: |op| op.digest_type.name_or_id());

/// ANSI X9.63 key derivation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KdfX963 {
  pub modifier: Modifier,
  pub digest_type: DigestType,
  pub secret: Buffer,
  pub info: Buffer,
  pub key_size: usize,
}

impl KdfX963 {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      digest_type: DigestType::new(ds.get_u64()?),
      secret: Buffer::from_datasource(ds, 0)?,
      info: Buffer::from_datasource(ds, 0)?,
      key_size: draw_key_size(ds)?,
    })
  }
}

impl_operation!(KdfX963, family: "KDF_X963", algorithm: |op| op.digest_type.name_or_id());

/// bcrypt password hashing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KdfBcrypt {
  pub modifier: Modifier,
  pub digest_type: DigestType,
  pub secret: Buffer,
  pub salt: Buffer,
  pub iterations: u32,
  pub key_size: usize,
}

impl KdfBcrypt {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      digest_type: DigestType::new(ds.get_u64()?),
      secret: Buffer::from_datasource(ds, 0)?,
      salt: Buffer::from_datasource(ds, 0)?,
      iterations: ds.get_u32()?,
      key_size: draw_key_size(ds)?,
    })
  }
}

impl_operation!(
  KdfBcrypt,
  family: "KDF_BCRYPT",
  max_ops: config::SLOW_KDF_MAX_OPERATIONS,
  algorithm: |_op| "bcrypt".to_owned()
);

/// Mechanism selector for SP 800-108: either digest-based (HMAC) or
/// cipher-based (CMAC).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KdfMech {
  /// `true` when the mechanism is digest-based.
  pub mode: bool,
  pub mech_type: DigestType,
}

/// NIST SP 800-108 KDF in counter, feedback, or pipeline mode.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KdfSp800_108 {
  pub modifier: Modifier,
  pub mech: KdfMech,
  pub secret: Buffer,
  pub salt: Buffer,
  pub label: Buffer,
  pub mode: u8,
  pub key_size: usize,
}

impl KdfSp800_108 {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      mech: KdfMech {
        mode: ds.get_bool()?,
        mech_type: DigestType::new(ds.get_u64()?),
      },
      secret: Buffer::from_datasource(ds, 0)?,
      salt: Buffer::from_datasource(ds, 0)?,
      label: Buffer::from_datasource(ds, 0)?,
      mode: ds.get_u8()? % 3,
      key_size: draw_key_size(ds)?,
    })
  }
}

impl_operation!(
  KdfSp800_108,
  family: "KDF_SP_800_108",
  algorithm: |op| op.mech.mech_type.name_or_id()
);

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ids::digests;
  use crate::Operation;

  #[test]
  fn key_size_is_capped() {
    // u16 length 0xFFFF would be absurd; the draw folds it under the cap.
    let mut data = digests::SHA256.get().to_le_bytes().to_vec();
    data.extend_from_slice(&[0x00, 0x00]); // password
    data.extend_from_slice(&[0x00, 0x00]); // salt
    data.extend_from_slice(&[0x00, 0x00]); // info
    data.extend_from_slice(&[0xFF, 0xFF]); // key size draw
    let op = KdfHkdf::from_datasource(&mut Datasource::new(&data), Modifier::empty()).unwrap();
    assert!(op.key_size <= MAX_KEY_SIZE);
  }

  #[test]
  fn slow_kdfs_have_tight_task_caps() {
    assert_eq!(KdfScrypt::MAX_OPERATIONS, config::SLOW_KDF_MAX_OPERATIONS);
    assert_eq!(KdfArgon2::MAX_OPERATIONS, config::SLOW_KDF_MAX_OPERATIONS);
    assert_eq!(KdfBcrypt::MAX_OPERATIONS, config::SLOW_KDF_MAX_OPERATIONS);
    assert_eq!(KdfHkdf::MAX_OPERATIONS, config::DEFAULT_MAX_OPERATIONS);
  }

  #[test]
  fn ssh_key_type_range() {
    let mut data = digests::SHA1.get().to_le_bytes().to_vec();
    data.extend_from_slice(&[0x00, 0x00]); // key
    data.extend_from_slice(&[0x00, 0x00]); // xcghash
    data.extend_from_slice(&[0x00, 0x00]); // session id
    data.push(7); // key type draw
    data.extend_from_slice(&[0x10, 0x00]); // key size
    let op = KdfSsh::from_datasource(&mut Datasource::new(&data), Modifier::empty()).unwrap();
    assert!((b'A'..=b'F').contains(&op.key_type));
  }
}
