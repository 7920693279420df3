//! Elliptic-curve family policies.

use datasource::Datasource;
use pools::{CurveEcdsaSignature, CurveKeypair, CurvePrivkey};
use primitives::ids::curves;
use primitives::{component, config, ops, Modifier, Operation};

use crate::checks;
use crate::family::{Family, ResultSet, Task};
use crate::module::{draw_module, Module, ModuleSet};
use crate::options::Options;
use crate::report::Discrepancy;

/// Private scalars must be non-empty and bounded.
fn privkey_in_range(private_key: &primitives::Bignum) -> bool {
  let size = private_key.trimmed().len();
  size >= 1 && size <= config::MAX_PRIVKEY_SIZE
}

/// Policy for `ECC_PrivateToPublic`.
pub struct EccPrivateToPublicFamily;

impl Family for EccPrivateToPublicFamily {
  type Op = ops::EccPrivateToPublic;
  type Res = component::EccPublicKey;

  fn call_module(&self, options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if !options.curves.have(op.curve_type.get()) {
      return None;
    }
    if !privkey_in_range(&op.private_key) {
      return None;
    }
    module.ecc_private_to_public(op)
  }

  fn postprocess(
    &self,
    _options: &Options,
    _module: &dyn Module,
    op: &Self::Op,
    result: &Option<Self::Res>,
  ) -> Result<(), Discrepancy> {
    if let Some(public_key) = result {
      let private_key = op.private_key.trimmed();
      let public_x = public_key.x.trimmed();
      let public_y = public_key.y.trimmed();

      pools::CURVE_PRIVKEY.insert(CurvePrivkey {
        curve: op.curve_type,
        private_key: private_key.clone(),
      });
      pools::CURVE_KEYPAIR.insert(CurveKeypair {
        curve: op.curve_type,
        private_key,
        public_x: public_x.clone(),
        public_y: public_y.clone(),
      });

      pools::insert_bignum(public_x);
      pools::insert_bignum(public_y);
    }
    Ok(())
  }
}

/// Policy for `ECC_ValidatePubkey`.
pub struct EccValidatePubkeyFamily;

impl Family for EccValidatePubkeyFamily {
  type Op = ops::EccValidatePubkey;
  type Res = bool;

  fn call_module(&self, options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if !options.curves.have(op.curve_type.get()) {
      return None;
    }
    module.ecc_validate_pubkey(op)
  }
}

/// Policy for `ECC_GenerateKeyPair`.
///
/// Key generation is inherently nondeterministic, so cross-module
/// comparison is a no-op for this family.
pub struct EccGenerateKeyPairFamily;

impl Family for EccGenerateKeyPairFamily {
  type Op = ops::EccGenerateKeyPair;
  type Res = component::EccKeyPair;

  fn call_module(&self, options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if !options.curves.have(op.curve_type.get()) {
      return None;
    }
    module.ecc_generate_keypair(op)
  }

  fn postprocess(
    &self,
    _options: &Options,
    _module: &dyn Module,
    op: &Self::Op,
    result: &Option<Self::Res>,
  ) -> Result<(), Discrepancy> {
    if let Some(keypair) = result {
      let private_key = keypair.private_key.trimmed();
      pools::CURVE_PRIVKEY.insert(CurvePrivkey {
        curve: op.curve_type,
        private_key: private_key.clone(),
      });
      pools::CURVE_KEYPAIR.insert(CurveKeypair {
        curve: op.curve_type,
        private_key,
        public_x: keypair.public_key.x.trimmed(),
        public_y: keypair.public_key.y.trimmed(),
      });
    }
    Ok(())
  }

  fn dont_compare(&self, _op: &Self::Op) -> bool {
    true
  }

  fn compare(&self, _tasks: &[Task<Self::Op>], _results: &ResultSet<Self::Res>, _data: &[u8]) -> Result<(), Discrepancy> {
    Ok(())
  }
}

/// Policy for `ECDSA_Sign`.
pub struct EcdsaSignFamily;

impl Family for EcdsaSignFamily {
  type Op = ops::EcdsaSign;
  type Res = component::EcdsaSignature;

  fn call_module(&self, options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if !options.curves.have(op.curve_type.get()) {
      return None;
    }
    if !options.digests.have(op.digest_type.get()) {
      return None;
    }
    if !privkey_in_range(&op.private_key) {
      return None;
    }
    module.ecdsa_sign(op)
  }

  fn postprocess(
    &self,
    _options: &Options,
    _module: &dyn Module,
    op: &Self::Op,
    result: &Option<Self::Res>,
  ) -> Result<(), Discrepancy> {
    if let Some(signature) = result {
      let public_x = signature.public_key.x.trimmed();
      let public_y = signature.public_key.y.trimmed();
      let sig_r = signature.r.trimmed();
      let sig_s = signature.s.trimmed();

      pools::CURVE_ECDSA_SIGNATURE.insert(CurveEcdsaSignature {
        curve: op.curve_type,
        cleartext_hex: op.cleartext.to_hex(),
        public_x: public_x.clone(),
        public_y: public_y.clone(),
        sig_r: sig_r.clone(),
        sig_s: sig_s.clone(),
      });

      pools::insert_bignum(public_x);
      pools::insert_bignum(public_y);
      pools::insert_bignum(sig_r);
      pools::insert_bignum(sig_s);
    }
    Ok(())
  }

  fn dont_compare(&self, op: &Self::Op) -> bool {
    // A random nonce yields a different valid signature each time, except
    // on the deterministic Edwards schemes.
    op.curve_type != curves::ED25519 && op.curve_type != curves::ED448 && op.uses_random_nonce()
  }

  fn check(&self, module: &dyn Module, op: &Self::Op, result: &Self::Res) -> Result<(), Discrepancy> {
    checks::ecdsa_signature_not_degenerate(module, &op.algorithm_name(), result)
  }
}

/// Policy for `ECDSA_Verify`.
pub struct EcdsaVerifyFamily;

impl Family for EcdsaVerifyFamily {
  type Op = ops::EcdsaVerify;
  type Res = bool;

  fn call_module(&self, options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if !options.curves.have(op.curve_type.get()) {
      return None;
    }
    if !options.digests.have(op.digest_type.get()) {
      return None;
    }

    // Deliberately no size constraint on the public key or signature:
    // verifiers process untrusted inputs in production and must withstand
    // oversized values, so oversized values are kept in scope here.
    module.ecdsa_verify(op)
  }
}

/// Policy for `ECDH_Derive`.
pub struct EcdhDeriveFamily;

impl EcdhDeriveFamily {
  /// Try to replace the drawn derivation with one over two public keys
  /// generated through a module's own `ECC_PrivateToPublic`.
  fn synthesize(
    parent: &mut Datasource<'_>,
    modules: &ModuleSet,
    options: &Options,
    original: &ops::EcdhDerive,
  ) -> Option<ops::EcdhDerive> {
    if !parent.get_bool().ok()? {
      return None;
    }

    let module = draw_module(parent, modules, options).ok()??;

    let modifier1 = Modifier::from_datasource(parent).ok()?;
    let op1 = ops::EccPrivateToPublic::from_datasource(parent, modifier1).ok()?;
    let modifier2 = Modifier::from_datasource(parent).ok()?;
    let op2 = ops::EccPrivateToPublic::from_datasource(parent, modifier2).ok()?;

    if op1.curve_type != op2.curve_type {
      return None;
    }

    let public_key1 = module.ecc_private_to_public(&op1)?;
    let public_key2 = module.ecc_private_to_public(&op2)?;

    Some(ops::EcdhDerive::synthesized(
      original.modifier.clone(),
      op1.curve_type,
      public_key1,
      public_key2,
    ))
  }
}

impl Family for EcdhDeriveFamily {
  type Op = ops::EcdhDerive;
  type Res = component::Secret;

  fn call_module(&self, options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if !options.curves.have(op.curve_type.get()) {
      return None;
    }
    module.ecdh_derive(op)
  }

  fn op_postprocess(
    &self,
    parent: &mut Datasource<'_>,
    modules: &ModuleSet,
    options: &Options,
    op: Self::Op,
  ) -> Self::Op {
    match Self::synthesize(parent, modules, options, &op) {
      Some(synthesized) => synthesized,
      None => op,
    }
  }
}

/// Policy for `ECIES_Encrypt`.
pub struct EciesEncryptFamily;

impl Family for EciesEncryptFamily {
  type Op = ops::EciesEncrypt;
  type Res = component::Ciphertext;

  fn call_module(&self, options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if !options.curves.have(op.curve_type.get()) {
      return None;
    }
    module.ecies_encrypt(op)
  }
}

/// Policy for `ECIES_Decrypt`.
pub struct EciesDecryptFamily;

impl Family for EciesDecryptFamily {
  type Op = ops::EciesDecrypt;
  type Res = component::Cleartext;

  fn call_module(&self, options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if !options.curves.have(op.curve_type.get()) {
      return None;
    }
    module.ecies_decrypt(op)
  }
}
