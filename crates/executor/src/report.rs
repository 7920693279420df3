//! Discrepancy reporting and process termination.

use std::fmt;
use std::io::Write;

/// A correctness violation found during a run.
///
/// Carries everything the diagnostic needs: the detail block printed before
/// the assertion line, and the sorted module names, operation, algorithm and
/// reason that make up the line itself. Discrepancies travel as values so
/// the policies stay testable; only [`abort`] is terminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Discrepancy {
  module_names: Vec<String>,
  operation: String,
  algorithm: String,
  reason: String,
  detail: String,
}

impl Discrepancy {
  /// Build a discrepancy; module names are sorted for a stable line.
  #[must_use]
  pub fn new(
    module_names: impl IntoIterator<Item = String>,
    operation: impl Into<String>,
    algorithm: impl Into<String>,
    reason: impl Into<String>,
    detail: impl Into<String>,
  ) -> Self {
    let mut module_names: Vec<String> = module_names.into_iter().collect();
    module_names.sort();
    Self {
      module_names,
      operation: operation.into(),
      algorithm: algorithm.into(),
      reason: reason.into(),
      detail: detail.into(),
    }
  }

  /// The stable, sorted assertion line.
  #[must_use]
  pub fn assertion_line(&self) -> String {
    let mut line = String::from("Assertion failure: ");
    for name in &self.module_names {
      line.push_str(name);
      line.push('-');
    }
    line.push_str(&self.operation);
    line.push('-');
    line.push_str(&self.algorithm);
    line.push('-');
    line.push_str(&self.reason);
    line
  }

  /// Diagnostic block printed before the assertion line.
  #[inline]
  #[must_use]
  pub fn detail(&self) -> &str {
    &self.detail
  }

  /// Short reason slug, e.g. `"difference"`.
  #[inline]
  #[must_use]
  pub fn reason(&self) -> &str {
    &self.reason
  }

  /// Sorted module names involved.
  #[inline]
  #[must_use]
  pub fn module_names(&self) -> &[String] {
    &self.module_names
  }
}

impl fmt::Display for Discrepancy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.assertion_line())
  }
}

/// Print the diagnostic, flush stdout, and terminate the process.
///
/// Flushing before termination is load-bearing: CI harnesses scrape the
/// assertion line from stdout of the dead process.
pub fn abort(discrepancy: &Discrepancy) -> ! {
  let mut stdout = std::io::stdout();
  let _ = write!(stdout, "{}", discrepancy.detail());
  let _ = writeln!(stdout, "{}", discrepancy.assertion_line());
  let _ = stdout.flush();
  std::process::abort();
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn module_names_are_sorted() {
    let d = Discrepancy::new(
      ["ZModule".to_owned(), "AModule".to_owned()],
      "Digest",
      "SHA256",
      "difference",
      "",
    );
    assert_eq!(d.module_names(), ["AModule", "ZModule"]);
    assert_eq!(
      d.assertion_line(),
      "Assertion failure: AModule-ZModule-Digest-SHA256-difference"
    );
  }

  #[test]
  fn single_module_line() {
    let d = Discrepancy::new(
      ["OpenSSL".to_owned()],
      "SymmetricEncrypt",
      "AES_256_GCM",
      "cannot decrypt ciphertext",
      "",
    );
    assert_eq!(
      d.to_string(),
      "Assertion failure: OpenSSL-SymmetricEncrypt-AES_256_GCM-cannot decrypt ciphertext"
    );
  }
}
