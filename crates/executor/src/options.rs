//! Run-time configuration: algorithm filters, module selection, behavior
//! switches, and the NDJSON dump sink.

use std::collections::BTreeSet;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use primitives::ModuleId;

/// Inclusion filter over algorithm ids.
///
/// The default filter allows everything; a populated filter allows only its
/// members. This mirrors how operators narrow a fuzzing campaign to the
/// algorithms both backends claim to support.
#[derive(Clone, Debug, Default)]
pub struct IdFilter {
  allowed: Option<BTreeSet<u64>>,
}

impl IdFilter {
  /// Allow every id.
  #[inline]
  #[must_use]
  pub const fn allow_all() -> Self {
    Self { allowed: None }
  }

  /// Allow only the given ids.
  #[must_use]
  pub fn only(ids: impl IntoIterator<Item = u64>) -> Self {
    Self {
      allowed: Some(ids.into_iter().collect()),
    }
  }

  /// Whether `id` passes the filter.
  #[inline]
  #[must_use]
  pub fn have(&self, id: u64) -> bool {
    match &self.allowed {
      None => true,
      Some(set) => set.contains(&id),
    }
  }
}

/// Exclusion set over module ids.
///
/// Unlike [`IdFilter`], absence means enabled: a module is only skipped when
/// it was explicitly disabled.
#[derive(Clone, Debug, Default)]
pub struct ModuleFilter {
  disabled: BTreeSet<u64>,
}

impl ModuleFilter {
  /// Disable a module.
  pub fn disable(&mut self, id: ModuleId) {
    self.disabled.insert(id.get());
  }

  /// Whether `id` was explicitly disabled.
  #[inline]
  #[must_use]
  pub fn have_explicit(&self, id: ModuleId) -> bool {
    self.disabled.contains(&id.get())
  }
}

/// Writable sink for per-call NDJSON records.
#[derive(Clone)]
pub struct DumpSink {
  inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl DumpSink {
  /// Wrap a writer.
  #[must_use]
  pub fn new(writer: impl Write + Send + 'static) -> Self {
    Self {
      inner: Arc::new(Mutex::new(Box::new(writer))),
    }
  }

  /// Emit one `{"operation": ..., "result": ...}` line.
  ///
  /// Dump failures are swallowed: the sink is observability, not a
  /// correctness surface, and a full disk must not mask a real finding.
  pub fn write_record(&self, operation: serde_json::Value, result: serde_json::Value) {
    let record = serde_json::json!({ "operation": operation, "result": result });
    let mut writer = self.inner.lock();
    let _ = writeln!(writer, "{record}");
    let _ = writer.flush();
  }
}

impl fmt::Debug for DumpSink {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("DumpSink")
  }
}

/// Executor options.
#[derive(Clone, Debug)]
pub struct Options {
  /// Enabled digest algorithms.
  pub digests: IdFilter,
  /// Enabled ciphers.
  pub ciphers: IdFilter,
  /// Enabled curves.
  pub curves: IdFilter,
  /// Enabled bignum calc operations.
  pub calc_ops: IdFilter,
  /// Explicitly disabled modules.
  pub disable_modules: ModuleFilter,
  /// Override every drawn module id with this one.
  pub force_module: Option<ModuleId>,
  /// Minimum task count required before a run executes anything.
  pub min_modules: usize,
  /// Skip the encrypt→decrypt round-trip self-check.
  pub no_decrypt: bool,
  /// Skip cross-module comparison.
  pub no_compare: bool,
  /// Skip per-operation invariant checks.
  pub disable_tests: bool,
  /// Print operations and per-module results to stdout.
  pub debug: bool,
  /// Optional sink receiving one JSON line per successful call.
  pub json_dump: Option<DumpSink>,
}

impl Default for Options {
  fn default() -> Self {
    Self {
      digests: IdFilter::allow_all(),
      ciphers: IdFilter::allow_all(),
      curves: IdFilter::allow_all(),
      calc_ops: IdFilter::allow_all(),
      disable_modules: ModuleFilter::default(),
      force_module: None,
      min_modules: 1,
      no_decrypt: false,
      no_compare: false,
      disable_tests: false,
      debug: false,
      json_dump: None,
    }
  }
}
