//! Miscellaneous and Schnorr/Ristretto operations.

use datasource::{Datasource, OutOfData};
use serde::Serialize;

use crate::op::impl_operation;
use crate::{Buffer, MiscOp, Modifier};

/// A backend-defined odd-duck operation, identified only by its id.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Misc {
  pub modifier: Modifier,
  pub operation: MiscOp,
}

impl Misc {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      operation: MiscOp::new(ds.get_u64()?),
    })
  }
}

impl_operation!(Misc, family: "Misc", algorithm: |op| op.operation.name_or_id());

/// Verify an sr25519 (Schnorr over Ristretto25519) signature.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sr25519Verify {
  pub modifier: Modifier,
  pub public_key: Buffer,
  pub cleartext: Buffer,
  pub signature: Buffer,
}

impl Sr25519Verify {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      public_key: Buffer::from_datasource(ds, 0)?,
      cleartext: Buffer::from_datasource(ds, 0)?,
      signature: Buffer::from_datasource(ds, 0)?,
    })
  }
}

impl_operation!(
  Sr25519Verify,
  family: "SR25519_Verify",
  algorithm: |_op| "sr25519".to_owned()
);
