//! BLS family policies.

use pools::{CurveBlsG1, CurveBlsG2, CurveBlsSignature};
use primitives::component::{G1, G2};
use primitives::{component, config, ops, Bignum, CurveType};

use crate::family::Family;
use crate::module::Module;
use crate::options::Options;
use crate::report::Discrepancy;

fn privkey_in_range(private_key: &Bignum) -> bool {
  let size = private_key.trimmed().len();
  size >= 1 && size <= config::MAX_PRIVKEY_SIZE
}

fn pool_g1(curve: CurveType, point: &G1) {
  let x = point.x.trimmed();
  let y = point.y.trimmed();
  pools::CURVE_BLS_G1.insert(CurveBlsG1 {
    curve,
    x: x.clone(),
    y: y.clone(),
  });
  pools::insert_bignum(x);
  pools::insert_bignum(y);
}

fn pool_g2(curve: CurveType, point: &G2) {
  let v = point.v.trimmed();
  let w = point.w.trimmed();
  let x = point.x.trimmed();
  let y = point.y.trimmed();
  pools::CURVE_BLS_G2.insert(CurveBlsG2 {
    curve,
    v: v.clone(),
    w: w.clone(),
    x: x.clone(),
    y: y.clone(),
  });
  pools::insert_bignum(v);
  pools::insert_bignum(w);
  pools::insert_bignum(x);
  pools::insert_bignum(y);
}

/// Policy for `BLS_PrivateToPublic`.
pub struct BlsPrivateToPublicFamily;

impl Family for BlsPrivateToPublicFamily {
  type Op = ops::BlsPrivateToPublic;
  type Res = component::BlsPublicKey;

  fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if !privkey_in_range(&op.private_key) {
      return None;
    }
    module.bls_private_to_public(op)
  }
}

/// Policy for `BLS_Sign`.
pub struct BlsSignFamily;

impl Family for BlsSignFamily {
  type Op = ops::BlsSign;
  type Res = component::BlsSignature;

  fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if !privkey_in_range(&op.private_key) {
      return None;
    }
    module.bls_sign(op)
  }

  fn postprocess(
    &self,
    _options: &Options,
    _module: &dyn Module,
    op: &Self::Op,
    result: &Option<Self::Res>,
  ) -> Result<(), Discrepancy> {
    let Some(signature) = result else {
      return Ok(());
    };

    let curve = op.curve_type;

    // Point and cleartext fields are only meaningful for point signing.
    let point_v = if op.hash_or_point { op.point.v.trimmed() } else { String::new() };
    let point_w = if op.hash_or_point { op.point.w.trimmed() } else { String::new() };
    let point_x = if op.hash_or_point { op.point.x.trimmed() } else { String::new() };
    let point_y = if op.hash_or_point { op.point.y.trimmed() } else { String::new() };
    let cleartext_hex = if op.hash_or_point { op.cleartext.to_hex() } else { String::new() };

    pool_g1(curve, &signature.public_key);
    pool_g2(curve, &signature.signature);

    pools::CURVE_BLS_SIGNATURE.insert(CurveBlsSignature {
      curve,
      hash_or_point: op.hash_or_point,
      point_v,
      point_w,
      point_x,
      point_y,
      cleartext_hex,
      dest_hex: op.dest.to_hex(),
      aug_hex: op.aug.to_hex(),
      public_x: signature.public_key.x.trimmed(),
      public_y: signature.public_key.y.trimmed(),
      sig_v: signature.signature.v.trimmed(),
      sig_w: signature.signature.w.trimmed(),
      sig_x: signature.signature.x.trimmed(),
      sig_y: signature.signature.y.trimmed(),
    });

    Ok(())
  }
}

/// Policy for `BLS_Verify`.
pub struct BlsVerifyFamily;

impl Family for BlsVerifyFamily {
  type Op = ops::BlsVerify;
  type Res = bool;

  fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    // No size caps: verifiers face untrusted keys and signatures in
    // production, so oversized inputs stay in scope.
    module.bls_verify(op)
  }
}

/// Policy for `BLS_Pairing`.
pub struct BlsPairingFamily;

impl Family for BlsPairingFamily {
  type Op = ops::BlsPairing;
  type Res = bool;

  fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    module.bls_pairing(op)
  }
}

/// Policy for `BLS_HashToG1`.
pub struct BlsHashToG1Family;

impl Family for BlsHashToG1Family {
  type Op = ops::BlsHashToG1;
  type Res = component::G1;

  fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    module.bls_hash_to_g1(op)
  }

  fn postprocess(
    &self,
    _options: &Options,
    _module: &dyn Module,
    op: &Self::Op,
    result: &Option<Self::Res>,
  ) -> Result<(), Discrepancy> {
    if let Some(point) = result {
      pool_g1(op.curve_type, point);
    }
    Ok(())
  }
}

/// Policy for `BLS_HashToG2`.
pub struct BlsHashToG2Family;

impl Family for BlsHashToG2Family {
  type Op = ops::BlsHashToG2;
  type Res = component::G2;

  fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    module.bls_hash_to_g2(op)
  }

  fn postprocess(
    &self,
    _options: &Options,
    _module: &dyn Module,
    op: &Self::Op,
    result: &Option<Self::Res>,
  ) -> Result<(), Discrepancy> {
    if let Some(point) = result {
      pool_g2(op.curve_type, point);
    }
    Ok(())
  }
}

/// Policy for `BLS_IsG1OnCurve`.
pub struct BlsIsG1OnCurveFamily;

impl Family for BlsIsG1OnCurveFamily {
  type Op = ops::BlsIsG1OnCurve;
  type Res = bool;

  fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if op.g1.x.len() > config::MAX_BIGNUM_SIZE {
      return None;
    }
    if op.g1.y.len() > config::MAX_BIGNUM_SIZE {
      return None;
    }
    module.bls_is_g1_on_curve(op)
  }
}

/// Policy for `BLS_IsG2OnCurve`.
pub struct BlsIsG2OnCurveFamily;

impl Family for BlsIsG2OnCurveFamily {
  type Op = ops::BlsIsG2OnCurve;
  type Res = bool;

  fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if op.g2.v.len() > config::MAX_BIGNUM_SIZE {
      return None;
    }
    if op.g2.w.len() > config::MAX_BIGNUM_SIZE {
      return None;
    }
    if op.g2.x.len() > config::MAX_BIGNUM_SIZE {
      return None;
    }
    if op.g2.y.len() > config::MAX_BIGNUM_SIZE {
      return None;
    }
    module.bls_is_g2_on_curve(op)
  }
}

/// Policy for `BLS_GenerateKeyPair`.
pub struct BlsGenerateKeyPairFamily;

impl Family for BlsGenerateKeyPairFamily {
  type Op = ops::BlsGenerateKeyPair;
  type Res = component::BlsKeyPair;

  fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    module.bls_generate_keypair(op)
  }

  fn postprocess(
    &self,
    _options: &Options,
    _module: &dyn Module,
    op: &Self::Op,
    result: &Option<Self::Res>,
  ) -> Result<(), Discrepancy> {
    if let Some(keypair) = result {
      pool_g1(op.curve_type, &keypair.public_key);
      pools::insert_bignum(keypair.private_key.trimmed());
    }
    Ok(())
  }
}

/// Policy for `BLS_Decompress_G1`.
pub struct BlsDecompressG1Family;

impl Family for BlsDecompressG1Family {
  type Op = ops::BlsDecompressG1;
  type Res = component::G1;

  fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    module.bls_decompress_g1(op)
  }

  fn postprocess(
    &self,
    _options: &Options,
    _module: &dyn Module,
    op: &Self::Op,
    result: &Option<Self::Res>,
  ) -> Result<(), Discrepancy> {
    if let Some(point) = result {
      pool_g1(op.curve_type, point);
    }
    Ok(())
  }
}

/// Policy for `BLS_Compress_G1`.
pub struct BlsCompressG1Family;

impl Family for BlsCompressG1Family {
  type Op = ops::BlsCompressG1;
  type Res = Bignum;

  fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    module.bls_compress_g1(op)
  }

  fn postprocess(
    &self,
    _options: &Options,
    _module: &dyn Module,
    _op: &Self::Op,
    result: &Option<Self::Res>,
  ) -> Result<(), Discrepancy> {
    crate::family::probe_result(result);
    if let Some(compressed) = result {
      pools::insert_bignum(compressed.trimmed());
    }
    Ok(())
  }
}

/// Policy for `BLS_Decompress_G2`.
pub struct BlsDecompressG2Family;

impl Family for BlsDecompressG2Family {
  type Op = ops::BlsDecompressG2;
  type Res = component::G2;

  fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    module.bls_decompress_g2(op)
  }

  fn postprocess(
    &self,
    _options: &Options,
    _module: &dyn Module,
    op: &Self::Op,
    result: &Option<Self::Res>,
  ) -> Result<(), Discrepancy> {
    if let Some(point) = result {
      pool_g2(op.curve_type, point);
    }
    Ok(())
  }
}

/// Policy for `BLS_Compress_G2`.
pub struct BlsCompressG2Family;

impl Family for BlsCompressG2Family {
  type Op = ops::BlsCompressG2;
  type Res = component::G1;

  fn call_module(&self, _options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    module.bls_compress_g2(op)
  }

  fn postprocess(
    &self,
    _options: &Options,
    _module: &dyn Module,
    op: &Self::Op,
    result: &Option<Self::Res>,
  ) -> Result<(), Discrepancy> {
    if let Some(point) = result {
      pool_g1(op.curve_type, point);
    }
    Ok(())
  }
}
