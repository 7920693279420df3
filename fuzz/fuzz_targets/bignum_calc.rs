#![no_main]

use cryptodiff::families::BignumCalcFamily;
use cryptodiff::{module_set, Datasource, Executor, Options};
use libfuzzer_sys::fuzz_target;
use module_rustcrypto::RustCryptoModule;

fuzz_target!(|data: &[u8]| {
  let (parent, op_data) = data.split_at(data.len() / 2);

  let executor = Executor::new(
    BignumCalcFamily::new(),
    module_set([RustCryptoModule::handle()]),
    Options::default(),
  );
  executor.run(&mut Datasource::new(parent), op_data);
});
