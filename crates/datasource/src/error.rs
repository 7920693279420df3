//! Error type for datasource reads.

use core::fmt;

/// The datasource ran out of bytes.
///
/// Returned when a read asks for more bytes than the stream still holds.
/// Intentionally a unit type: the only information a caller can act on is
/// "stop drawing choices", and the position where exhaustion happened is a
/// property of the stream, not of the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct OutOfData;

impl OutOfData {
  /// Create a new exhaustion error.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Default for OutOfData {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for OutOfData {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("datasource out of data")
  }
}

impl core::error::Error for OutOfData {}
