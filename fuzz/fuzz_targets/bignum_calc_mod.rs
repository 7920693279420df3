//! Modular bignum calculation: the first byte picks the pinned modulus.

#![no_main]

use cryptodiff::families::BignumCalcFamily;
use cryptodiff::{module_set, Datasource, Executor, Options};
use libfuzzer_sys::fuzz_target;
use module_rustcrypto::RustCryptoModule;

fuzz_target!(|data: &[u8]| {
  let Some((&selector, rest)) = data.split_first() else {
    return;
  };
  let (parent, op_data) = rest.split_at(rest.len() / 2);

  let family = match selector % 3 {
    0 => BignumCalcFamily::mod_bls12_381_r(),
    1 => BignumCalcFamily::mod_bls12_381_p(),
    _ => BignumCalcFamily::mod_2_exp_256(),
  };

  let executor = Executor::new(family, module_set([RustCryptoModule::handle()]), Options::default());
  executor.run(&mut Datasource::new(parent), op_data);
});
