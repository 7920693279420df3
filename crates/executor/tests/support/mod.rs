//! Scripted backend modules for driving the run loop in tests.
#![allow(dead_code)] // each test binary uses a different subset

use std::sync::Arc;

use executor::{module_set, Module, ModuleSet};
use parking_lot::Mutex;
use primitives::component::{Ciphertext, Cleartext, EccKeyPair, EccPoint, EcdsaSignature};
use primitives::{component, ops, Bignum, Buffer, ModuleId};

/// A backend whose answers are fixed up front and whose invocations are
/// recorded, so tests can assert both on results and on call order.
pub struct ScriptedModule {
  id: ModuleId,
  name: String,
  pub supports_modular: bool,
  pub digest_result: Option<Buffer>,
  pub encrypt_result: Option<Ciphertext>,
  pub decrypt_result: Option<Cleartext>,
  pub bignum_result: Option<Bignum>,
  pub keypair_result: Option<EccKeyPair>,
  pub public_key_result: Option<EccPoint>,
  pub signature_result: Option<EcdsaSignature>,
  pub dh_keypair_result: Option<component::DhKeyPair>,
  pub log: Mutex<Vec<String>>,
}

impl ScriptedModule {
  pub fn new(id: ModuleId, name: &str) -> Self {
    Self {
      id,
      name: name.to_owned(),
      supports_modular: false,
      digest_result: None,
      encrypt_result: None,
      decrypt_result: None,
      bignum_result: None,
      keypair_result: None,
      public_key_result: None,
      signature_result: None,
      dh_keypair_result: None,
      log: Mutex::new(Vec::new()),
    }
  }

  pub fn calls(&self) -> Vec<String> {
    self.log.lock().clone()
  }

  pub fn call_count(&self) -> usize {
    self.log.lock().len()
  }

  fn record(&self, entry: String) {
    self.log.lock().push(entry);
  }
}

impl Module for ScriptedModule {
  fn id(&self) -> ModuleId {
    self.id
  }

  fn name(&self) -> &str {
    &self.name
  }

  fn supports_modular_bignum_calc(&self) -> bool {
    self.supports_modular
  }

  fn digest(&self, op: &ops::Digest) -> Option<component::Digest> {
    self.record(format!("digest modifier={}", hex::encode(op.modifier.as_slice())));
    self.digest_result.clone()
  }

  fn symmetric_encrypt(&self, op: &ops::SymmetricEncrypt) -> Option<Ciphertext> {
    self.record(format!("encrypt cipher={}", op.cipher.cipher_type));
    self.encrypt_result.clone()
  }

  fn symmetric_decrypt(&self, op: &ops::SymmetricDecrypt) -> Option<Cleartext> {
    self.record(format!("decrypt cipher={}", op.cipher.cipher_type));
    self.decrypt_result.clone()
  }

  fn bignum_calc(&self, op: &ops::BignumCalc) -> Option<Bignum> {
    let modulo = op
      .modulo
      .as_ref()
      .map_or_else(|| "none".to_owned(), |modulo| modulo.trimmed());
    self.record(format!("bignum_calc op={} modulo={}", op.calc_op, modulo));
    self.bignum_result.clone()
  }

  fn ecc_generate_keypair(&self, op: &ops::EccGenerateKeyPair) -> Option<EccKeyPair> {
    self.record(format!("ecc_generate_keypair curve={}", op.curve_type));
    self.keypair_result.clone()
  }

  fn ecc_private_to_public(&self, op: &ops::EccPrivateToPublic) -> Option<EccPoint> {
    self.record(format!("ecc_private_to_public curve={}", op.curve_type));
    self.public_key_result.clone()
  }

  fn ecdsa_sign(&self, op: &ops::EcdsaSign) -> Option<EcdsaSignature> {
    self.record(format!("ecdsa_sign curve={}", op.curve_type));
    self.signature_result.clone()
  }

  fn dh_generate_keypair(&self, op: &ops::DhGenerateKeyPair) -> Option<component::DhKeyPair> {
    self.record(format!("dh_generate_keypair prime={}", op.prime));
    self.dh_keypair_result.clone()
  }
}

/// Build a registry from scripted modules, keeping handles for assertions.
pub fn registry(modules: Vec<Arc<ScriptedModule>>) -> ModuleSet {
  module_set(modules.into_iter().map(|module| module as Arc<dyn Module>))
}

/// Parent-stream builder matching the run loop's consumption order:
/// per iteration a modifier, a module id, and a continue bit.
#[derive(Default)]
pub struct ParentStream {
  bytes: Vec<u8>,
}

impl ParentStream {
  pub fn new() -> Self {
    Self::default()
  }

  /// One task draw: modifier bytes, module id, continue flag.
  pub fn schedule(mut self, modifier: &[u8], module: ModuleId, more: bool) -> Self {
    self.push_data(modifier);
    self.bytes.extend_from_slice(&module.get().to_le_bytes());
    self.bytes.push(u8::from(more));
    self
  }

  /// Append a length-prefixed byte string.
  pub fn push_data(&mut self, data: &[u8]) {
    let len = u16::try_from(data.len()).unwrap();
    self.bytes.extend_from_slice(&len.to_le_bytes());
    self.bytes.extend_from_slice(data);
  }

  /// Append raw bytes.
  pub fn push_raw(&mut self, data: &[u8]) {
    self.bytes.extend_from_slice(data);
  }

  pub fn build(self) -> Vec<u8> {
    self.bytes
  }
}

/// Raw buffer encoding a `Digest` operation.
pub fn digest_op_buffer(digest: primitives::DigestType, cleartext: &[u8]) -> Vec<u8> {
  let mut data = digest.get().to_le_bytes().to_vec();
  let len = u16::try_from(cleartext.len()).unwrap();
  data.extend_from_slice(&len.to_le_bytes());
  data.extend_from_slice(cleartext);
  data
}

/// Raw buffer encoding a `BignumCalc` operation with digit-string operands.
pub fn bignum_calc_buffer(calc_op: primitives::CalcOp, operands: [&str; 4]) -> Vec<u8> {
  let mut data = calc_op.get().to_le_bytes().to_vec();
  for operand in operands {
    let len = u16::try_from(operand.len()).unwrap();
    data.extend_from_slice(&len.to_le_bytes());
    // Draws map each byte to `byte % 10`, so encode digits directly.
    data.extend(operand.bytes().map(|b| b - b'0'));
  }
  data
}
