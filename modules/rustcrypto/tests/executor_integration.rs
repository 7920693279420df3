//! The module driven through the real executor run loop.

use datasource::Datasource;
use executor::families::{BignumCalcFamily, DigestFamily, SymmetricEncryptFamily};
use executor::{module_set, Executor, Options};
use module_rustcrypto::RustCryptoModule;
use primitives::ids::{calc_ops, ciphers, digests, modules};

/// Parent stream scheduling one task on the RustCrypto module.
fn single_task_parent() -> Vec<u8> {
  let mut parent = vec![0x00, 0x00]; // empty modifier
  parent.extend_from_slice(&modules::RUSTCRYPTO.get().to_le_bytes());
  parent.push(0x00); // stop
  parent
}

fn push_data(buffer: &mut Vec<u8>, data: &[u8]) {
  let len = u16::try_from(data.len()).unwrap();
  buffer.extend_from_slice(&len.to_le_bytes());
  buffer.extend_from_slice(data);
}

#[test]
fn digest_run_completes() {
  let executor = Executor::new(
    DigestFamily,
    module_set([RustCryptoModule::handle()]),
    Options::default(),
  );

  let mut data = digests::SHA256.get().to_le_bytes().to_vec();
  push_data(&mut data, b"hello world");

  executor
    .run_checked(&mut Datasource::new(&single_task_parent()), &data)
    .unwrap();
}

#[test]
fn encrypt_run_survives_its_own_self_decrypt_check() {
  let executor = Executor::new(
    SymmetricEncryptFamily,
    module_set([RustCryptoModule::handle()]),
    Options::default(),
  );

  // SymmetricEncrypt buffer: iv, key, cipher id, cleartext, aad flag,
  // tag-size flag + value, ciphertext headroom.
  let mut data = Vec::new();
  push_data(&mut data, &[0x24; 12]); // iv
  push_data(&mut data, &[0x42; 32]); // key
  data.extend_from_slice(&ciphers::AES_256_GCM.get().to_le_bytes());
  push_data(&mut data, b"round trip me"); // cleartext
  data.push(0x00); // no aad
  data.push(0x01); // explicit tag size
  data.push(16);
  data.push(32); // headroom

  // The run executes encrypt, then postprocess decrypts through the same
  // module and compares cleartexts; any mismatch would be an Err here.
  executor
    .run_checked(&mut Datasource::new(&single_task_parent()), &data)
    .unwrap();
}

#[test]
fn modular_bignum_run_stamps_and_computes() {
  let executor = Executor::new(
    BignumCalcFamily::mod_2_exp_256(),
    module_set([RustCryptoModule::handle()]),
    Options::default(),
  );

  let mut data = calc_ops::ADD.get().to_le_bytes().to_vec();
  for digit in [1u8, 2, 0, 0] {
    push_data(&mut data, &[digit]);
  }

  executor
    .run_checked(&mut Datasource::new(&single_task_parent()), &data)
    .unwrap();
}

#[test]
fn unsupported_digest_produces_no_result_and_no_failure() {
  let executor = Executor::new(
    DigestFamily,
    module_set([RustCryptoModule::handle()]),
    Options::default(),
  );

  let mut data = digests::MD5.get().to_le_bytes().to_vec();
  push_data(&mut data, b"nobody implements me");

  executor
    .run_checked(&mut Datasource::new(&single_task_parent()), &data)
    .unwrap();
}
