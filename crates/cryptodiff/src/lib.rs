//! Differential fuzzing core for cryptographic backends.
//!
//! `cryptodiff` drives the same cryptographic operation through multiple
//! independent backend modules and terminates the process on any
//! disagreement: a cross-module result difference, a failed
//! encrypt→decrypt round trip, or a sanitizer hit inside backend memory.
//!
//! # Quick Start
//!
//! ```no_run
//! use cryptodiff::{families::DigestFamily, module_set, Datasource, Executor, Options};
//! # fn modules() -> Vec<std::sync::Arc<dyn cryptodiff::Module>> { Vec::new() }
//!
//! let executor = Executor::new(DigestFamily, module_set(modules()), Options::default());
//!
//! // One fuzzer invocation: scheduling choices come from `parent`, the
//! // operation itself is decoded from `data`.
//! # let (parent_bytes, data): (Vec<u8>, Vec<u8>) = (Vec::new(), Vec::new());
//! let mut parent = Datasource::new(&parent_bytes);
//! executor.run(&mut parent, &data);
//! ```
//!
//! The run loop is family-generic; per-family behavior (option gating,
//! input-size caps, pool feedback, comparison exemptions) lives in
//! [`families`]. Backend modules implement [`Module`] and are free to
//! decline any operation with `None`.

pub use datasource::{Datasource, OutOfData};
pub use executor::{
  default_compare, families, module_set, Discrepancy, DumpSink, Executor, Family, IdFilter, Module, ModuleFilter,
  ModuleSet, Options, ResultPair, ResultSet, Task,
};
pub use pools::{seed_prng, Pool};
pub use primitives::{component, config, ids, ops, Bignum, Buffer, Modifier, OpResult, Operation};
