//! Digest operations.

use datasource::{Datasource, OutOfData};
use serde::Serialize;

use crate::op::impl_operation;
use crate::{Buffer, DigestType, Modifier};

/// Hash a cleartext with a chosen digest algorithm.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Digest {
  pub modifier: Modifier,
  pub digest_type: DigestType,
  pub cleartext: Buffer,
}

impl Digest {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      digest_type: DigestType::new(ds.get_u64()?),
      cleartext: Buffer::from_datasource(ds, 0)?,
    })
  }
}

impl_operation!(Digest, family: "Digest", algorithm: |op| op.digest_type.name_or_id());
