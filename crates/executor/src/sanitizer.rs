//! Uninitialized-memory probe.

/// Declare that `region` must be fully initialized.
///
/// Reads every byte through a non-elidable path. Under MemorySanitizer (or
/// valgrind), a backend that leaked uninitialized memory into a result
/// triggers its report *here*, before the bytes influence comparison or
/// pool contents, which pins the finding to the producing call.
#[inline(never)]
pub fn probe_defined(region: &[u8]) {
  let mut acc = 0u8;
  for byte in region {
    acc ^= *byte;
  }
  core::hint::black_box(acc);
}
