//! Digest operations through the differential executor.
//!
//! With a single in-tree backend there is nothing to cross-compare, but the
//! run still exercises operation decoding, scheduling, the sanitizer probe
//! and the per-operation size checks on every input.

#![no_main]

use cryptodiff::families::DigestFamily;
use cryptodiff::{module_set, Datasource, Executor, Options};
use libfuzzer_sys::fuzz_target;
use module_rustcrypto::RustCryptoModule;

fuzz_target!(|data: &[u8]| {
  // First half drives scheduling, second half is the operation encoding.
  let (parent, op_data) = data.split_at(data.len() / 2);

  let executor = Executor::new(
    DigestFamily,
    module_set([RustCryptoModule::handle()]),
    Options::default(),
  );
  executor.run(&mut Datasource::new(parent), op_data);
});
