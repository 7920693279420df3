//! The family-generic run loop.

use std::collections::BTreeSet;

use datasource::Datasource;
use primitives::{Modifier, ModuleId, OpResult, Operation};

use crate::family::{Family, ResultSet, Task};
use crate::module::{draw_module, ModuleSet};
use crate::options::Options;
use crate::report::{self, Discrepancy};

/// Drives one operation family over one fuzzer buffer.
///
/// An executor owns nothing long-lived but its policy instance: modules are
/// shared handles, options are plain data, and every [`run`](Self::run)
/// invocation is independent. Within a run, execution is strictly
/// sequential — no task starts before the previous returned.
pub struct Executor<F: Family> {
  family: F,
  modules: ModuleSet,
  options: Options,
}

impl<F: Family> Executor<F> {
  /// Create an executor over a module registry.
  #[must_use]
  pub fn new(family: F, modules: ModuleSet, options: Options) -> Self {
    Self {
      family,
      modules,
      options,
    }
  }

  /// The module registry.
  #[inline]
  #[must_use]
  pub fn modules(&self) -> &ModuleSet {
    &self.modules
  }

  /// The active options.
  #[inline]
  #[must_use]
  pub fn options(&self) -> &Options {
    &self.options
  }

  /// Run one buffer; terminate the process on any correctness violation.
  pub fn run(&self, parent: &mut Datasource<'_>, data: &[u8]) {
    if let Err(discrepancy) = self.run_checked(parent, data) {
      report::abort(&discrepancy);
    }
  }

  /// Run one buffer, returning a discrepancy instead of aborting.
  ///
  /// This is the whole run loop; [`run`](Self::run) only adds the terminal
  /// abort. Kept public so harness tests can assert on discrepancies.
  pub fn run_checked(&self, parent: &mut Datasource<'_>, data: &[u8]) -> Result<(), Discrepancy> {
    let mut tasks = self.build_tasks(parent, data);

    if tasks.is_empty() {
      return Ok(());
    }

    self.expand_to_all_modules(&mut tasks);

    if tasks.len() < self.options.min_modules {
      return Ok(());
    }

    if self.options.debug {
      if let Some((_, op)) = tasks.first() {
        println!("Running:\n{}\n", op.describe());
      }
    }

    let mut results: ResultSet<F::Res> = Vec::with_capacity(tasks.len());

    for index in 0..tasks.len() {
      self.distinguish_duplicate(&mut tasks, index);

      let Some((module, op)) = tasks.get(index) else {
        break;
      };

      let result = self.family.call_module(&self.options, module.as_ref(), op);

      if let Some(present) = &result {
        if let Some(sink) = &self.options.json_dump {
          sink.write_record(op.to_json(), present.to_json());
        }
      }

      if self.options.debug {
        let rendered = result.as_ref().map_or_else(|| "(empty)".to_owned(), OpResult::describe);
        println!("Module {} result:\n\n{}\n", module.name(), rendered);
      }

      if !self.options.disable_tests {
        if let Some(present) = &result {
          self.family.check(module.as_ref(), op, present)?;
        }
      }

      self.family.postprocess(&self.options, module.as_ref(), op, &result)?;

      results.push((module.clone(), result));
    }

    if !self.options.no_compare {
      self.family.compare(&tasks, &results, data)?;
    }

    Ok(())
  }

  /// Draw `(operation, module)` pairs until the family cap, a zero stop
  /// bit, or datasource exhaustion. Unknown and disabled module draws skip
  /// the iteration without consuming a task slot.
  fn build_tasks(&self, parent: &mut Datasource<'_>, data: &[u8]) -> Vec<Task<F::Op>> {
    let mut tasks: Vec<Task<F::Op>> = Vec::new();

    loop {
      let Some(op) = self.get_op(parent, data) else {
        break;
      };

      match draw_module(parent, &self.modules, &self.options) {
        Err(_) => break,
        Ok(None) => {}
        Ok(Some(module)) => {
          tasks.push((module, op));
          if tasks.len() == F::Op::MAX_OPERATIONS {
            break;
          }
        }
      }

      if !parent.get_bool().unwrap_or(false) {
        break;
      }
    }

    tasks
  }

  /// Build one operation: modifier from the parent stream, fields from the
  /// raw buffer, then the family's operation rewrite.
  fn get_op(&self, parent: &mut Datasource<'_>, data: &[u8]) -> Option<F::Op> {
    let modifier = Modifier::from_datasource(parent).ok()?;
    let op = F::Op::from_datasource(&mut Datasource::new(data), modifier).ok()?;
    Some(self.family.op_postprocess(parent, &self.modules, &self.options, op))
  }

  /// Append `(module, first_op)` for every enabled module that has no task
  /// yet, so each backend runs the first operation at least once.
  fn expand_to_all_modules(&self, tasks: &mut Vec<Task<F::Op>>) {
    let Some((_, first_op)) = tasks.first() else {
      return;
    };
    let first_op = first_op.clone();

    let scheduled: BTreeSet<ModuleId> = tasks.iter().map(|(module, _)| module.id()).collect();

    for (id, module) in &self.modules {
      if self.options.disable_modules.have_explicit(*id) || scheduled.contains(id) {
        continue;
      }
      tasks.push((module.clone(), first_op.clone()));
    }
  }

  /// If this task repeats the previous task's module with an identical
  /// modifier, mutate the modifier so backend-internal caching cannot make
  /// the two calls artificially identical.
  fn distinguish_duplicate(&self, tasks: &mut [Task<F::Op>], index: usize) {
    if index == 0 {
      return;
    }
    let Some(previous) = tasks.get(index - 1).map(|(module, op)| (module.id(), op.modifier().clone())) else {
      return;
    };
    let Some((module, op)) = tasks.get_mut(index) else {
      return;
    };
    if module.id() == previous.0 && *op.modifier() == previous.1 {
      op.modifier_mut().mutate_for_duplicate();
    }
  }
}
