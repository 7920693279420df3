//! The per-family policy contract.
//!
//! Each operation family supplies one [`Family`] implementation deciding
//! how its operations are gated and dispatched, what self-checks run after
//! a call, which results feed the pools, and whether cross-module results
//! may legitimately differ. The run loop is family-generic; everything
//! family-specific lives behind this trait.

use std::sync::Arc;

use datasource::Datasource;
use primitives::{Modifier, OpResult, Operation};

use crate::module::{Module, ModuleSet};
use crate::options::Options;
use crate::report::Discrepancy;
use crate::sanitizer;

/// One scheduled unit of work: a module and the operation to run on it.
pub type Task<O> = (Arc<dyn Module>, O);

/// The outcome of one task. `None` covers both gated and failed calls.
pub type ResultPair<R> = (Arc<dyn Module>, Option<R>);

/// All outcomes of a run, in execution order.
pub type ResultSet<R> = Vec<ResultPair<R>>;

/// Per-family policy hooks.
pub trait Family {
  /// Operation type of this family.
  type Op: Operation;
  /// Result type of this family.
  type Res: OpResult + PartialEq + Clone;

  /// Gate on option filters and input-size sanity caps, then dispatch to
  /// the module. `None` means gated, unsupported, or failed — all three are
  /// silent no-ops for comparison and pools.
  fn call_module(&self, options: &Options, module: &dyn Module, op: &Self::Op) -> Option<Self::Res>;

  /// Post-call hook: sanitizer probe, pool insertion, self-consistency.
  ///
  /// The default probes the result's flat byte region and nothing else.
  fn postprocess(
    &self,
    options: &Options,
    module: &dyn Module,
    op: &Self::Op,
    result: &Option<Self::Res>,
  ) -> Result<(), Discrepancy> {
    let _ = (options, module, op);
    probe_result(result);
    Ok(())
  }

  /// Whether a correct backend may legitimately produce a differing result
  /// for this operation (randomized nonces, randomized IVs, key
  /// generation).
  fn dont_compare(&self, op: &Self::Op) -> bool {
    let _ = op;
    false
  }

  /// Cross-module comparison over a completed run.
  fn compare(&self, tasks: &[Task<Self::Op>], results: &ResultSet<Self::Res>, data: &[u8]) -> Result<(), Discrepancy> {
    default_compare(self, tasks, results, data)
  }

  /// Rewrite or replace a freshly built operation before scheduling.
  fn op_postprocess(
    &self,
    parent: &mut Datasource<'_>,
    modules: &ModuleSet,
    options: &Options,
    op: Self::Op,
  ) -> Self::Op {
    let _ = (parent, modules, options);
    op
  }

  /// Per-operation invariant check, run on every present result unless
  /// disabled.
  fn check(&self, module: &dyn Module, op: &Self::Op, result: &Self::Res) -> Result<(), Discrepancy> {
    let _ = (module, op, result);
    Ok(())
  }
}

/// Probe the flat byte region of a present result.
pub(crate) fn probe_result<R: OpResult>(result: &Option<R>) {
  if let Some(result) = result {
    if let Some(region) = result.flat_region() {
      sanitizer::probe_defined(region);
    }
  }
}

/// The default comparator.
///
/// Absent results are filtered first; fewer than two present results, or a
/// family that declared this operation incomparable, ends the comparison
/// quietly. Otherwise adjacent present results must be equal.
pub fn default_compare<F: Family + ?Sized>(
  family: &F,
  tasks: &[Task<F::Op>],
  results: &ResultSet<F::Res>,
  data: &[u8],
) -> Result<(), Discrepancy> {
  if results.len() < 2 {
    return Ok(());
  }

  let present: Vec<(&Arc<dyn Module>, &F::Res)> = results
    .iter()
    .filter_map(|(module, result)| result.as_ref().map(|result| (module, result)))
    .collect();

  if present.len() < 2 {
    return Ok(());
  }

  let Some((_, first_op)) = tasks.first() else {
    return Ok(());
  };

  if family.dont_compare(first_op) {
    return Ok(());
  }

  for ((prev_module, prev_result), (cur_module, cur_result)) in present.iter().zip(present.iter().skip(1)) {
    if prev_result == cur_result {
      continue;
    }

    // Rebuild the operation from the raw buffer for the diagnostic; the
    // modifier-free form is what both modules agreed to compute.
    let op = F::Op::from_datasource(&mut Datasource::new(data), Modifier::empty()).unwrap_or_else(|_| first_op.clone());

    let detail = format!(
      "Difference detected\n\nOperation:\n{}\nModule {} result:\n\n{}\n\nModule {} result:\n\n{}\n\n",
      op.describe(),
      prev_module.name(),
      prev_result.describe(),
      cur_module.name(),
      cur_result.describe(),
    );

    return Err(Discrepancy::new(
      [prev_module.name().to_owned(), cur_module.name().to_owned()],
      F::Op::FAMILY,
      op.algorithm_name(),
      "difference",
      detail,
    ));
  }

  Ok(())
}
