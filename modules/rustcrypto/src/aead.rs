//! AES-GCM encryption and decryption.

use aes_gcm::aead::AeadInPlace;
use aes_gcm::{Aes128Gcm, Aes256Gcm, KeyInit, Nonce, Tag};
use primitives::component::{Ciphertext, Cleartext};
use primitives::ids::ciphers;
use primitives::{ops, Buffer, CipherType};

/// GCM nonce length supported here.
const NONCE_LEN: usize = 12;
/// GCM tag length produced and required.
const TAG_LEN: usize = 16;

fn key_len_for(cipher_type: CipherType) -> Option<usize> {
  match cipher_type {
    ciphers::AES_128_GCM => Some(16),
    ciphers::AES_256_GCM => Some(32),
    _ => None,
  }
}

fn encrypt_detached(cipher_type: CipherType, key: &[u8], iv: &[u8], aad: &[u8], cleartext: &[u8]) -> Option<(Vec<u8>, Vec<u8>)> {
  let nonce = Nonce::from_slice(iv);
  let mut buffer = cleartext.to_vec();
  let tag = match cipher_type {
    ciphers::AES_128_GCM => Aes128Gcm::new_from_slice(key)
      .ok()?
      .encrypt_in_place_detached(nonce, aad, &mut buffer)
      .ok()?,
    ciphers::AES_256_GCM => Aes256Gcm::new_from_slice(key)
      .ok()?
      .encrypt_in_place_detached(nonce, aad, &mut buffer)
      .ok()?,
    _ => return None,
  };
  Some((buffer, tag.to_vec()))
}

fn decrypt_detached(cipher_type: CipherType, key: &[u8], iv: &[u8], aad: &[u8], ciphertext: &[u8], tag: &[u8]) -> Option<Vec<u8>> {
  let nonce = Nonce::from_slice(iv);
  let tag = Tag::from_slice(tag);
  let mut buffer = ciphertext.to_vec();
  match cipher_type {
    ciphers::AES_128_GCM => Aes128Gcm::new_from_slice(key)
      .ok()?
      .decrypt_in_place_detached(nonce, aad, &mut buffer, tag)
      .ok()?,
    ciphers::AES_256_GCM => Aes256Gcm::new_from_slice(key)
      .ok()?
      .decrypt_in_place_detached(nonce, aad, &mut buffer, tag)
      .ok()?,
    _ => return None,
  }
  Some(buffer)
}

/// Encrypt under AES-128/256-GCM with a detached 16-byte tag.
pub fn encrypt(op: &ops::SymmetricEncrypt) -> Option<Ciphertext> {
  let expected_key_len = key_len_for(op.cipher.cipher_type)?;
  if op.cipher.key.len() != expected_key_len {
    return None;
  }
  if op.cipher.iv.len() != NONCE_LEN {
    return None;
  }
  if let Some(tag_size) = op.tag_size {
    if tag_size != TAG_LEN {
      return None;
    }
  }
  if op.ciphertext_size < op.cleartext.len() {
    return None;
  }

  let aad = op.aad.as_ref().map_or(&[][..], Buffer::as_slice);
  let (ciphertext, tag) = encrypt_detached(
    op.cipher.cipher_type,
    op.cipher.key.as_slice(),
    op.cipher.iv.as_slice(),
    aad,
    op.cleartext.as_slice(),
  )?;

  Some(Ciphertext {
    ciphertext: Buffer::from(ciphertext),
    tag: Some(Buffer::from(tag)),
  })
}

/// Decrypt under AES-128/256-GCM. The detached tag is required.
pub fn decrypt(op: &ops::SymmetricDecrypt) -> Option<Cleartext> {
  let expected_key_len = key_len_for(op.cipher.cipher_type)?;
  if op.cipher.key.len() != expected_key_len {
    return None;
  }
  if op.cipher.iv.len() != NONCE_LEN {
    return None;
  }
  let tag = op.tag.as_ref()?;
  if tag.len() != TAG_LEN {
    return None;
  }
  if op.cleartext_size < op.ciphertext.len() {
    return None;
  }

  let aad = op.aad.as_ref().map_or(&[][..], Buffer::as_slice);
  let cleartext = decrypt_detached(
    op.cipher.cipher_type,
    op.cipher.key.as_slice(),
    op.cipher.iv.as_slice(),
    aad,
    op.ciphertext.as_slice(),
    tag.as_slice(),
  )?;

  Some(Buffer::from(cleartext))
}
