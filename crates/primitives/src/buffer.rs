//! Owned byte strings and operation modifiers.

use core::fmt;

use datasource::{Datasource, OutOfData};
use serde::{Serialize, Serializer};

use crate::config;

/// An owned, immutable byte string.
///
/// The common currency for cleartexts, ciphertexts, keys, MACs and digests.
/// Serializes as a lowercase hex string.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Buffer(Vec<u8>);

impl Buffer {
  /// Create a buffer from owned bytes.
  #[inline]
  #[must_use]
  pub const fn new(bytes: Vec<u8>) -> Self {
    Self(bytes)
  }

  /// Create an empty buffer.
  #[inline]
  #[must_use]
  pub const fn empty() -> Self {
    Self(Vec::new())
  }

  /// Draw a buffer of at least `min` bytes from a datasource.
  pub fn from_datasource(ds: &mut Datasource<'_>, min: usize) -> Result<Self, OutOfData> {
    Ok(Self(ds.get_data(min)?))
  }

  /// Length in bytes.
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Whether the buffer holds no bytes.
  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Borrow the bytes.
  #[inline]
  #[must_use]
  pub fn as_slice(&self) -> &[u8] {
    &self.0
  }

  /// Lowercase hex rendering of the bytes.
  #[must_use]
  pub fn to_hex(&self) -> String {
    hex::encode(&self.0)
  }
}

impl From<&[u8]> for Buffer {
  #[inline]
  fn from(bytes: &[u8]) -> Self {
    Self(bytes.to_vec())
  }
}

impl From<Vec<u8>> for Buffer {
  #[inline]
  fn from(bytes: Vec<u8>) -> Self {
    Self(bytes)
  }
}

impl fmt::Debug for Buffer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Buffer({} bytes: {})", self.len(), self.to_hex())
  }
}

impl fmt::Display for Buffer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_hex())
  }
}

impl Serialize for Buffer {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.to_hex())
  }
}

/// An opaque byte string attached to an operation.
///
/// Backends read the modifier to steer internal choices (padding strategy,
/// API variant, staging of updates). The executor additionally mutates it to
/// break caching when the same module runs the same operation twice in a row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Modifier(Buffer);

impl Modifier {
  /// The empty modifier.
  #[inline]
  #[must_use]
  pub const fn empty() -> Self {
    Self(Buffer::empty())
  }

  /// Wrap raw modifier bytes.
  #[inline]
  #[must_use]
  pub const fn new(bytes: Vec<u8>) -> Self {
    Self(Buffer::new(bytes))
  }

  /// Draw modifier bytes from a datasource.
  pub fn from_datasource(ds: &mut Datasource<'_>) -> Result<Self, OutOfData> {
    Ok(Self(Buffer::from_datasource(ds, 0)?))
  }

  /// Whether the modifier is empty.
  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Borrow the bytes.
  #[inline]
  #[must_use]
  pub fn as_slice(&self) -> &[u8] {
    self.0.as_slice()
  }

  /// Make this modifier differ from its current value.
  ///
  /// Used when two consecutive tasks would hand the same module the same
  /// modifier: an empty modifier becomes a fixed-size run of `0x01` bytes,
  /// a non-empty one has every byte incremented modulo 256.
  pub fn mutate_for_duplicate(&mut self) {
    if self.0.0.is_empty() {
      self.0.0 = vec![1u8; config::DUPLICATE_MODIFIER_LEN];
    } else {
      for byte in &mut self.0.0 {
        *byte = byte.wrapping_add(1);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hex_rendering() {
    let buf = Buffer::from(&[0xDE, 0xAD, 0xBE, 0xEF][..]);
    assert_eq!(buf.to_hex(), "deadbeef");
    assert_eq!(buf.to_string(), "deadbeef");
  }

  #[test]
  fn serialize_as_hex_string() {
    let buf = Buffer::from(&[0x00, 0xFF][..]);
    assert_eq!(serde_json::to_string(&buf).unwrap(), "\"00ff\"");
  }

  #[test]
  fn from_datasource_honors_prefix() {
    let data = [0x03, 0x00, 1, 2, 3, 4];
    let mut ds = Datasource::new(&data);
    let buf = Buffer::from_datasource(&mut ds, 0).unwrap();
    assert_eq!(buf.as_slice(), &[1, 2, 3]);
  }

  #[test]
  fn empty_modifier_mutates_to_ones() {
    let mut modifier = Modifier::empty();
    modifier.mutate_for_duplicate();
    assert_eq!(modifier.as_slice().len(), config::DUPLICATE_MODIFIER_LEN);
    assert!(modifier.as_slice().iter().all(|&b| b == 1));
  }

  #[test]
  fn nonempty_modifier_increments_every_byte() {
    let mut modifier = Modifier::new(vec![0x00, 0x7F, 0xFF]);
    modifier.mutate_for_duplicate();
    assert_eq!(modifier.as_slice(), &[0x01, 0x80, 0x00]);
  }

  #[test]
  fn mutation_changes_equality() {
    let original = Modifier::new(vec![9, 9]);
    let mut mutated = original.clone();
    mutated.mutate_for_duplicate();
    assert_ne!(original, mutated);
  }
}
