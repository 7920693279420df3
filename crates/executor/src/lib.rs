//! Differential execution core.
//!
//! An [`Executor`] drives one operation family through a registry of backend
//! modules: it materializes `(module, operation)` tasks from a fuzzer byte
//! buffer, invokes each backend sequentially, probes results for
//! uninitialized memory, runs per-operation invariant checks and family
//! self-checks, feeds interesting values to the result pools, and compares
//! results across modules. Any disagreement terminates the process with a
//! stable diagnostic.
//!
//! Family-specific behavior — gating, size caps, pool insertion, comparison
//! exemptions — lives in [`Family`] implementations under [`families`]; the
//! run loop itself is family-generic.
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to
//! ensure all error paths are handled explicitly. The only terminal path is
//! [`report::abort`].
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]

pub mod checks;
pub mod families;
mod family;
mod module;
mod options;
pub mod report;
mod run;
pub mod sanitizer;

pub use family::{default_compare, Family, ResultPair, ResultSet, Task};
pub use module::{module_set, Module, ModuleSet};
pub use options::{DumpSink, IdFilter, ModuleFilter, Options};
pub use report::Discrepancy;
pub use run::Executor;
