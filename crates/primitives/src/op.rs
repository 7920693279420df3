//! The operation contract shared by every family.

use datasource::{Datasource, OutOfData};
use serde::Serialize;

use crate::{config, Modifier};

/// A typed, immutable fuzzer operation.
///
/// Operations are constructed deterministically from a [`Datasource`] plus a
/// modifier byte string, compare structurally (modifier included), and carry
/// enough identity — family name, algorithm name — for diagnostics.
pub trait Operation: Clone + PartialEq + Serialize + Sized {
  /// Family name, e.g. `"Digest"` or `"ECDSA_Sign"`.
  const FAMILY: &'static str;

  /// Per-run cap on accepted tasks for this family.
  const MAX_OPERATIONS: usize = config::DEFAULT_MAX_OPERATIONS;

  /// Construct an operation by consuming the datasource.
  fn from_datasource(ds: &mut Datasource<'_>, modifier: Modifier) -> Result<Self, OutOfData>;

  /// Name of the governing algorithm (digest, cipher, curve, calc op, ...).
  fn algorithm_name(&self) -> String;

  /// The attached modifier.
  fn modifier(&self) -> &Modifier;

  /// Mutable access to the modifier (duplicate-task mutation).
  fn modifier_mut(&mut self) -> &mut Modifier;

  /// JSON form for the dump sink.
  fn to_json(&self) -> serde_json::Value {
    serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
  }

  /// Human-readable form for diagnostics.
  fn describe(&self) -> String {
    let body = serde_json::to_string_pretty(&self.to_json()).unwrap_or_default();
    format!("operation name: {}\n{}", Self::FAMILY, body)
  }
}

/// Implement the [`Operation`] boilerplate for an operation struct.
///
/// The struct must have a `modifier: Modifier` field and an inherent
/// `fn draw(ds, modifier) -> Result<Self, OutOfData>` constructor; the macro
/// wires those into the trait along with the family name, the task cap, and
/// the algorithm-name expression.
macro_rules! impl_operation {
  ($ty:ident, family: $family:literal, max_ops: $max:expr, algorithm: |$op:ident| $alg:expr) => {
    impl $crate::Operation for $ty {
      const FAMILY: &'static str = $family;
      const MAX_OPERATIONS: usize = $max;

      fn from_datasource(
        ds: &mut datasource::Datasource<'_>,
        modifier: $crate::Modifier,
      ) -> Result<Self, datasource::OutOfData> {
        Self::draw(ds, modifier)
      }

      fn algorithm_name(&self) -> String {
        let $op = self;
        $alg
      }

      fn modifier(&self) -> &$crate::Modifier {
        &self.modifier
      }

      fn modifier_mut(&mut self) -> &mut $crate::Modifier {
        &mut self.modifier
      }
    }
  };
  ($ty:ident, family: $family:literal, algorithm: |$op:ident| $alg:expr) => {
    impl_operation!(
      $ty,
      family: $family,
      max_ops: $crate::config::DEFAULT_MAX_OPERATIONS,
      algorithm: |$op| $alg
    );
  };
}

pub(crate) use impl_operation;
