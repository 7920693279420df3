//! AES-GCM encryption with the encrypt→decrypt self-check live.
//!
//! Every successful encryption is decrypted back through the same backend;
//! a ciphertext the backend cannot invert aborts the process.

#![no_main]

use cryptodiff::families::SymmetricEncryptFamily;
use cryptodiff::{module_set, Datasource, Executor, Options};
use libfuzzer_sys::fuzz_target;
use module_rustcrypto::RustCryptoModule;

fuzz_target!(|data: &[u8]| {
  let (parent, op_data) = data.split_at(data.len() / 2);

  let executor = Executor::new(
    SymmetricEncryptFamily,
    module_set([RustCryptoModule::handle()]),
    Options::default(),
  );
  executor.run(&mut Datasource::new(parent), op_data);
});
