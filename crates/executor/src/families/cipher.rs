//! Symmetric encrypt/decrypt policies, including the round-trip self-check.

use primitives::ids::{ciphers, modules, CipherType};
use primitives::{component, ops, Modifier, Operation};

use crate::family::Family;
use crate::module::Module;
use crate::options::Options;
use crate::report::Discrepancy;
use crate::sanitizer;

/// Ciphers OpenSSL encrypts but cannot decrypt through the same API.
const OPENSSL_NO_DECRYPT: &[CipherType] = &[ciphers::AES_128_OCB, ciphers::AES_256_OCB];

/// AEAD ciphers OpenSSL cannot decrypt without an explicit tag.
const OPENSSL_TAGGED_ONLY: &[CipherType] = &[
  ciphers::AES_128_GCM,
  ciphers::AES_192_GCM,
  ciphers::AES_256_GCM,
  ciphers::AES_128_CCM,
  ciphers::AES_192_CCM,
  ciphers::AES_256_CCM,
  ciphers::ARIA_128_CCM,
  ciphers::ARIA_192_CCM,
  ciphers::ARIA_256_CCM,
  ciphers::ARIA_128_GCM,
  ciphers::ARIA_192_GCM,
  ciphers::ARIA_256_GCM,
];

/// Headroom added to the original cleartext size for the decrypt output
/// buffer, to catch backends that write past the true length.
const DECRYPT_HEADROOM: usize = 32;

/// Policy for the `SymmetricEncrypt` family.
pub struct SymmetricEncryptFamily;

impl SymmetricEncryptFamily {
  /// Whether the producing module can be asked to decrypt its own output.
  fn should_try_decrypt(module: &dyn Module, op: &ops::SymmetricEncrypt) -> bool {
    if module.id() != modules::OPENSSL {
      return true;
    }
    if OPENSSL_NO_DECRYPT.contains(&op.cipher.cipher_type) {
      return false;
    }
    if OPENSSL_TAGGED_ONLY.contains(&op.cipher.cipher_type) && op.tag_size.is_none() {
      // OpenSSL fails to decrypt its own CCM and GCM ciphertexts if a tag
      // is not included.
      return false;
    }
    true
  }

  /// Decrypt the produced ciphertext through the same module and require
  /// the original cleartext back.
  fn self_decrypt(
    module: &dyn Module,
    op: &ops::SymmetricEncrypt,
    produced: &component::Ciphertext,
  ) -> Result<(), Discrepancy> {
    let decrypt_op = ops::SymmetricDecrypt::inverse_of(
      op,
      produced,
      op.cleartext.len() + DECRYPT_HEADROOM,
      op.aad.clone(),
      Modifier::empty(),
    );

    let recovered = module.symmetric_decrypt(&decrypt_op);

    let tag_hex = produced
      .tag
      .as_ref()
      .map_or_else(|| "nullopt".to_owned(), |tag| hex::encode(tag.as_slice()));

    match recovered {
      None => {
        let detail = format!(
          "Cannot decrypt ciphertext\n\nOperation:\n{}\nCiphertext: {}\nTag: {}\n",
          op.describe(),
          produced.ciphertext.to_hex(),
          tag_hex,
        );
        Err(Self::decrypt_failure(module, op, detail))
      }
      Some(cleartext) if cleartext != op.cleartext => {
        let detail = format!(
          "Cannot decrypt ciphertext (but decryption ostensibly succeeded)\n\nOperation:\n{}\nCiphertext: {}\nTag: {}\nPurported cleartext: {}\n",
          op.describe(),
          produced.ciphertext.to_hex(),
          tag_hex,
          cleartext.to_hex(),
        );
        Err(Self::decrypt_failure(module, op, detail))
      }
      Some(_) => Ok(()),
    }
  }

  fn decrypt_failure(module: &dyn Module, op: &ops::SymmetricEncrypt, detail: String) -> Discrepancy {
    Discrepancy::new(
      [module.name().to_owned()],
      ops::SymmetricEncrypt::FAMILY,
      op.algorithm_name(),
      "cannot decrypt ciphertext",
      detail,
    )
  }
}

impl Family for SymmetricEncryptFamily {
  type Op = ops::SymmetricEncrypt;
  type Res = component::Ciphertext;

  fn call_module(&self, options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if !options.ciphers.have(op.cipher.cipher_type.get()) {
      return None;
    }
    module.symmetric_encrypt(op)
  }

  fn postprocess(
    &self,
    options: &Options,
    module: &dyn Module,
    op: &Self::Op,
    result: &Option<Self::Res>,
  ) -> Result<(), Discrepancy> {
    let Some(produced) = result else {
      return Ok(());
    };

    sanitizer::probe_defined(produced.ciphertext.as_slice());
    if let Some(tag) = &produced.tag {
      sanitizer::probe_defined(tag.as_slice());
    }

    if options.no_decrypt {
      return Ok(());
    }
    if op.cleartext.is_empty() || produced.ciphertext.is_empty() {
      return Ok(());
    }
    if !Self::should_try_decrypt(module, op) {
      return Ok(());
    }

    Self::self_decrypt(module, op, produced)
  }

  fn dont_compare(&self, op: &Self::Op) -> bool {
    op.cipher.cipher_type == ciphers::DES_EDE3_WRAP
  }
}

/// Policy for the `SymmetricDecrypt` family.
pub struct SymmetricDecryptFamily;

impl Family for SymmetricDecryptFamily {
  type Op = ops::SymmetricDecrypt;
  type Res = component::Cleartext;

  fn call_module(&self, options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res> {
    if !options.ciphers.have(op.cipher.cipher_type.get()) {
      return None;
    }
    module.symmetric_decrypt(op)
  }

  fn dont_compare(&self, op: &Self::Op) -> bool {
    op.cipher.cipher_type == ciphers::DES_EDE3_WRAP
  }
}
