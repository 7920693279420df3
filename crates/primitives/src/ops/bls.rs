//! BLS12-381 operations.

use datasource::{Datasource, OutOfData};
use serde::Serialize;

use crate::component::{G1, G2};
use crate::op::impl_operation;
use crate::{Bignum, Buffer, CurveType, Modifier};

/// Derive the G1 public key for a private scalar.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlsPrivateToPublic {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub private_key: Bignum,
}

impl BlsPrivateToPublic {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      private_key: Bignum::from_datasource(ds)?,
    })
  }
}

impl_operation!(
  BlsPrivateToPublic,
  family: "BLS_PrivateToPublic",
  algorithm: |op| op.curve_type.name_or_id()
);

/// Sign either a message (hash-to-curve) or a prepared G2 point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlsSign {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub private_key: Bignum,
  /// `true`: sign `point` directly; `false`: hash `cleartext` to the curve.
  pub hash_or_point: bool,
  pub point: G2,
  pub cleartext: Buffer,
  /// Domain separation tag.
  pub dest: Buffer,
  /// Message augmentation.
  pub aug: Buffer,
}

impl BlsSign {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      private_key: Bignum::from_datasource(ds)?,
      hash_or_point: ds.get_bool()?,
      point: G2::from_datasource(ds)?,
      cleartext: Buffer::from_datasource(ds, 0)?,
      dest: Buffer::from_datasource(ds, 0)?,
      aug: Buffer::from_datasource(ds, 0)?,
    })
  }
}

impl_operation!(BlsSign, family: "BLS_Sign", algorithm: |op| op.curve_type.name_or_id());

/// Verify a BLS signature.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlsVerify {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub hash_or_point: bool,
  pub public_key: G1,
  pub signature: G2,
  pub cleartext: Buffer,
  pub dest: Buffer,
}

impl BlsVerify {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      hash_or_point: ds.get_bool()?,
      public_key: G1::from_datasource(ds)?,
      signature: G2::from_datasource(ds)?,
      cleartext: Buffer::from_datasource(ds, 0)?,
      dest: Buffer::from_datasource(ds, 0)?,
    })
  }
}

impl_operation!(BlsVerify, family: "BLS_Verify", algorithm: |op| op.curve_type.name_or_id());

/// Evaluate a pairing check over a (G1, G2) pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlsPairing {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub g1: G1,
  pub g2: G2,
}

impl BlsPairing {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      g1: G1::from_datasource(ds)?,
      g2: G2::from_datasource(ds)?,
    })
  }
}

impl_operation!(BlsPairing, family: "BLS_Pairing", algorithm: |op| op.curve_type.name_or_id());

/// Hash a message to a G1 point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlsHashToG1 {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub cleartext: Buffer,
  pub dest: Buffer,
  pub aug: Buffer,
}

impl BlsHashToG1 {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      cleartext: Buffer::from_datasource(ds, 0)?,
      dest: Buffer::from_datasource(ds, 0)?,
      aug: Buffer::from_datasource(ds, 0)?,
    })
  }
}

impl_operation!(BlsHashToG1, family: "BLS_HashToG1", algorithm: |op| op.curve_type.name_or_id());

/// Hash a message to a G2 point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlsHashToG2 {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub cleartext: Buffer,
  pub dest: Buffer,
  pub aug: Buffer,
}

impl BlsHashToG2 {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      cleartext: Buffer::from_datasource(ds, 0)?,
      dest: Buffer::from_datasource(ds, 0)?,
      aug: Buffer::from_datasource(ds, 0)?,
    })
  }
}

impl_operation!(BlsHashToG2, family: "BLS_HashToG2", algorithm: |op| op.curve_type.name_or_id());

/// Membership test for a G1 point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlsIsG1OnCurve {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub g1: G1,
}

impl BlsIsG1OnCurve {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      g1: G1::from_datasource(ds)?,
    })
  }
}

impl_operation!(
  BlsIsG1OnCurve,
  family: "BLS_IsG1OnCurve",
  algorithm: |op| op.curve_type.name_or_id()
);

/// Membership test for a G2 point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlsIsG2OnCurve {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub g2: G2,
}

impl BlsIsG2OnCurve {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      g2: G2::from_datasource(ds)?,
    })
  }
}

impl_operation!(
  BlsIsG2OnCurve,
  family: "BLS_IsG2OnCurve",
  algorithm: |op| op.curve_type.name_or_id()
);

/// Generate a BLS key pair from input key material.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlsGenerateKeyPair {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub ikm: Buffer,
  pub info: Buffer,
}

impl BlsGenerateKeyPair {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      ikm: Buffer::from_datasource(ds, 0)?,
      info: Buffer::from_datasource(ds, 0)?,
    })
  }
}

impl_operation!(
  BlsGenerateKeyPair,
  family: "BLS_GenerateKeyPair",
  algorithm: |op| op.curve_type.name_or_id()
);

/// Decompress a compressed G1 point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlsDecompressG1 {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub compressed: Bignum,
}

impl BlsDecompressG1 {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      compressed: Bignum::from_datasource(ds)?,
    })
  }
}

impl_operation!(
  BlsDecompressG1,
  family: "BLS_Decompress_G1",
  algorithm: |op| op.curve_type.name_or_id()
);

/// Compress a G1 point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlsCompressG1 {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub uncompressed: G1,
}

impl BlsCompressG1 {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      uncompressed: G1::from_datasource(ds)?,
    })
  }
}

impl_operation!(
  BlsCompressG1,
  family: "BLS_Compress_G1",
  algorithm: |op| op.curve_type.name_or_id()
);

/// Decompress a compressed G2 point (two field elements).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlsDecompressG2 {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub compressed: G1,
}

impl BlsDecompressG2 {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      compressed: G1::from_datasource(ds)?,
    })
  }
}

impl_operation!(
  BlsDecompressG2,
  family: "BLS_Decompress_G2",
  algorithm: |op| op.curve_type.name_or_id()
);

/// Compress a G2 point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlsCompressG2 {
  pub modifier: Modifier,
  pub curve_type: CurveType,
  pub uncompressed: G2,
}

impl BlsCompressG2 {
  fn draw(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData> {
    Ok(Self {
      modifier,
      curve_type: CurveType::new(ds.get_u64()?),
      uncompressed: G2::from_datasource(ds)?,
    })
  }
}

impl_operation!(
  BlsCompressG2,
  family: "BLS_Compress_G2",
  algorithm: |op| op.curve_type.name_or_id()
);
