//! End-to-end run-loop behavior over scripted backends.

mod support;

use std::sync::Arc;

use datasource::Datasource;
use executor::families::{BignumCalcFamily, DigestFamily};
use executor::{Executor, Options};
use primitives::ids::{calc_ops, digests};
use primitives::{Buffer, ModuleId};
use support::{bignum_calc_buffer, digest_op_buffer, registry, ParentStream, ScriptedModule};

const MODULE_A: ModuleId = ModuleId::from_name("ModuleA");
const MODULE_B: ModuleId = ModuleId::from_name("ModuleB");
const MODULE_C: ModuleId = ModuleId::from_name("ModuleC");

fn sha256_module(id: ModuleId, name: &str, output: &[u8]) -> Arc<ScriptedModule> {
  let mut module = ScriptedModule::new(id, name);
  module.digest_result = Some(Buffer::from(output));
  Arc::new(module)
}

#[test]
fn digest_single_module_runs_once_without_comparison() {
  let module = sha256_module(MODULE_A, "ModuleA", &[0xAA; 32]);
  let executor = Executor::new(
    DigestFamily,
    registry(vec![module.clone()]),
    Options::default(),
  );

  let parent = ParentStream::new().schedule(&[], MODULE_A, false).build();
  let data = digest_op_buffer(digests::SHA256, b"hello");

  executor
    .run_checked(&mut Datasource::new(&parent), &data)
    .unwrap();

  assert_eq!(module.call_count(), 1);
}

#[test]
fn digest_disagreement_reports_sorted_difference() {
  let module_a = sha256_module(MODULE_A, "ModuleA", &[0x11; 32]);
  let module_b = sha256_module(MODULE_B, "ModuleB", &[0x22; 32]);
  let executor = Executor::new(
    DigestFamily,
    registry(vec![module_b.clone(), module_a.clone()]),
    Options::default(),
  );

  let parent = ParentStream::new().schedule(&[], MODULE_A, false).build();
  let data = digest_op_buffer(digests::SHA256, b"hello");

  let discrepancy = executor
    .run_checked(&mut Datasource::new(&parent), &data)
    .unwrap_err();

  assert_eq!(discrepancy.reason(), "difference");
  assert_eq!(
    discrepancy.assertion_line(),
    "Assertion failure: ModuleA-ModuleB-Digest-SHA256-difference"
  );
  assert!(discrepancy.detail().contains("Difference detected"));
  assert!(discrepancy.detail().contains("ModuleA"));
  assert!(discrepancy.detail().contains("ModuleB"));
}

#[test]
fn fan_out_reaches_every_enabled_module() {
  let module_a = sha256_module(MODULE_A, "ModuleA", &[0x33; 32]);
  let module_b = sha256_module(MODULE_B, "ModuleB", &[0x33; 32]);
  let module_c = sha256_module(MODULE_C, "ModuleC", &[0x33; 32]);
  let executor = Executor::new(
    DigestFamily,
    registry(vec![module_a.clone(), module_b.clone(), module_c.clone()]),
    Options::default(),
  );

  let parent = ParentStream::new().schedule(&[], MODULE_B, false).build();
  let data = digest_op_buffer(digests::SHA256, b"spread");

  executor
    .run_checked(&mut Datasource::new(&parent), &data)
    .unwrap();

  assert_eq!(module_a.call_count(), 1);
  assert_eq!(module_b.call_count(), 1);
  assert_eq!(module_c.call_count(), 1);
}

#[test]
fn fan_out_skips_disabled_modules() {
  let module_a = sha256_module(MODULE_A, "ModuleA", &[0x44; 32]);
  let module_b = sha256_module(MODULE_B, "ModuleB", &[0x44; 32]);
  let mut options = Options::default();
  options.disable_modules.disable(MODULE_B);
  let executor = Executor::new(
    DigestFamily,
    registry(vec![module_a.clone(), module_b.clone()]),
    options,
  );

  let parent = ParentStream::new().schedule(&[], MODULE_A, false).build();
  let data = digest_op_buffer(digests::SHA256, b"solo");

  executor
    .run_checked(&mut Datasource::new(&parent), &data)
    .unwrap();

  assert_eq!(module_a.call_count(), 1);
  assert_eq!(module_b.call_count(), 0);
}

#[test]
fn unknown_module_draw_skips_without_consuming_a_slot() {
  let module_a = sha256_module(MODULE_A, "ModuleA", &[0x55; 32]);
  let executor = Executor::new(
    DigestFamily,
    registry(vec![module_a.clone()]),
    Options::default(),
  );

  // First draw names an unknown module, second draw lands on A.
  let parent = ParentStream::new()
    .schedule(&[], ModuleId::from_name("NoSuchModule"), true)
    .schedule(&[], MODULE_A, false)
    .build();
  let data = digest_op_buffer(digests::SHA256, b"retry");

  executor
    .run_checked(&mut Datasource::new(&parent), &data)
    .unwrap();

  assert_eq!(module_a.call_count(), 1);
}

#[test]
fn min_modules_suppresses_small_runs() {
  let module_a = sha256_module(MODULE_A, "ModuleA", &[0x66; 32]);
  let options = Options {
    min_modules: 3,
    ..Options::default()
  };
  let executor = Executor::new(DigestFamily, registry(vec![module_a.clone()]), options);

  let parent = ParentStream::new().schedule(&[], MODULE_A, false).build();
  let data = digest_op_buffer(digests::SHA256, b"small");

  executor
    .run_checked(&mut Datasource::new(&parent), &data)
    .unwrap();

  assert_eq!(module_a.call_count(), 0);
}

#[test]
fn empty_task_list_is_a_quiet_return() {
  let module_a = sha256_module(MODULE_A, "ModuleA", &[0x77; 32]);
  let executor = Executor::new(
    DigestFamily,
    registry(vec![module_a.clone()]),
    Options::default(),
  );

  // Parent exhausts immediately: no modifier can be drawn.
  executor
    .run_checked(&mut Datasource::new(&[]), &digest_op_buffer(digests::SHA256, b"x"))
    .unwrap();

  assert_eq!(module_a.call_count(), 0);
}

#[test]
fn duplicate_consecutive_tasks_get_distinct_modifiers() {
  let module_a = sha256_module(MODULE_A, "ModuleA", &[0x88; 32]);
  let executor = Executor::new(
    DigestFamily,
    registry(vec![module_a.clone()]),
    Options::default(),
  );

  // Same module, same (empty) modifier, twice in a row.
  let parent = ParentStream::new()
    .schedule(&[], MODULE_A, true)
    .schedule(&[], MODULE_A, false)
    .build();
  let data = digest_op_buffer(digests::SHA256, b"dup");

  executor
    .run_checked(&mut Datasource::new(&parent), &data)
    .unwrap();

  let calls = module_a.calls();
  assert_eq!(calls.len(), 2);
  assert_eq!(calls[0], "digest modifier=");
  // The second call saw the mutated 512-byte fill, not the empty modifier.
  assert_eq!(calls[1], format!("digest modifier={}", "01".repeat(512)));
}

#[test]
fn identical_runs_replay_identically() {
  let parent = ParentStream::new()
    .schedule(&[0xAB], MODULE_A, true)
    .schedule(&[], MODULE_B, false)
    .build();
  let data = digest_op_buffer(digests::SHA256, b"replay");

  let mut logs = Vec::new();
  for _ in 0..2 {
    let module_a = sha256_module(MODULE_A, "ModuleA", &[0x99; 32]);
    let module_b = sha256_module(MODULE_B, "ModuleB", &[0x99; 32]);
    let executor = Executor::new(
      DigestFamily,
      registry(vec![module_a.clone(), module_b.clone()]),
      Options::default(),
    );
    executor
      .run_checked(&mut Datasource::new(&parent), &data)
      .unwrap();
    logs.push((module_a.calls(), module_b.calls()));
  }

  assert_eq!(logs[0], logs[1]);
}

#[test]
fn task_cap_bounds_the_schedule() {
  let module_a = {
    let mut module = ScriptedModule::new(MODULE_A, "ModuleA");
    module.bignum_result = Some(primitives::Bignum::from("7"));
    Arc::new(module)
  };
  let executor = Executor::new(
    BignumCalcFamily::new(),
    registry(vec![module_a.clone()]),
    Options::default(),
  );

  // Offer far more iterations than BignumCalc's cap of five.
  let mut parent = ParentStream::new();
  for _ in 0..16 {
    parent = parent.schedule(&[], MODULE_A, true);
  }
  let parent = parent.build();
  let data = bignum_calc_buffer(calc_ops::ADD, ["1", "2", "0", "0"]);

  executor
    .run_checked(&mut Datasource::new(&parent), &data)
    .unwrap();

  assert_eq!(module_a.call_count(), 5);
}

#[test]
fn json_dump_emits_one_line_per_successful_call() {
  use parking_lot::Mutex;
  use std::io::Write;

  #[derive(Clone)]
  struct Shared(Arc<Mutex<Vec<u8>>>);
  impl Write for Shared {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
      self.0.lock().extend_from_slice(buf);
      Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
      Ok(())
    }
  }

  let shared = Shared(Arc::new(Mutex::new(Vec::new())));
  let options = Options {
    json_dump: Some(executor::DumpSink::new(shared.clone())),
    ..Options::default()
  };

  let module_a = sha256_module(MODULE_A, "ModuleA", &[0xAB; 32]);
  let executor = Executor::new(DigestFamily, registry(vec![module_a]), options);

  let parent = ParentStream::new().schedule(&[], MODULE_A, false).build();
  let data = digest_op_buffer(digests::SHA256, b"dump");

  executor
    .run_checked(&mut Datasource::new(&parent), &data)
    .unwrap();

  let written = String::from_utf8(shared.0.lock().clone()).unwrap();
  let lines: Vec<&str> = written.lines().collect();
  assert_eq!(lines.len(), 1);
  let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
  assert!(record.get("operation").is_some());
  assert_eq!(
    record.get("result").and_then(|r| r.as_str()),
    Some("ab".repeat(32).as_str())
  );
}
