//! Finite-field Diffie-Hellman operations.

use datasource::{Datasource, OutOfData};
use serde::Serialize;

use crate::op::impl_operation;
use crate::{Bignum, Modifier};

/// Generate a DH key pair for a (prime, base) group.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DhGenerateKeyPair {
  pub modifier: Modifier,
  pub prime: Bignum,
  pub base: Bignum,
}

impl DhGenerateKeyPair {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      prime: Bignum::from_datasource(ds)?,
      base: Bignum::from_datasource(ds)?,
    })
  }
}

impl_operation!(
  DhGenerateKeyPair,
  family: "DH_GenerateKeyPair",
  algorithm: |_op| "dh".to_owned()
);

/// Derive a DH shared value from a peer public key and an own private key.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DhDerive {
  pub modifier: Modifier,
  pub prime: Bignum,
  pub base: Bignum,
  pub public_key: Bignum,
  pub private_key: Bignum,
}

impl DhDerive {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      prime: Bignum::from_datasource(ds)?,
      base: Bignum::from_datasource(ds)?,
      public_key: Bignum::from_datasource(ds)?,
      private_key: Bignum::from_datasource(ds)?,
    })
  }
}

impl_operation!(DhDerive, family: "DH_Derive", algorithm: |_op| "dh".to_owned());
