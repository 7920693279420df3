//! ECDSA signing and verification, alternating by the first byte.

#![no_main]

use cryptodiff::families::{EcdsaSignFamily, EcdsaVerifyFamily};
use cryptodiff::{module_set, Datasource, Executor, Options};
use libfuzzer_sys::fuzz_target;
use module_rustcrypto::RustCryptoModule;

fuzz_target!(|data: &[u8]| {
  let Some((&selector, rest)) = data.split_first() else {
    return;
  };
  let (parent, op_data) = rest.split_at(rest.len() / 2);
  let modules = module_set([RustCryptoModule::handle()]);

  if selector & 1 == 0 {
    let executor = Executor::new(EcdsaSignFamily, modules, Options::default());
    executor.run(&mut Datasource::new(parent), op_data);
  } else {
    let executor = Executor::new(EcdsaVerifyFamily, modules, Options::default());
    executor.run(&mut Datasource::new(parent), op_data);
  }
});
