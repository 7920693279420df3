//! Algorithm identifiers.
//!
//! Every algorithm — digest, cipher, curve, bignum calc op — is identified by
//! the 64-bit FNV-1a hash of its canonical name, wrapped in a per-kind
//! newtype so a curve id cannot be passed where a cipher id is expected.
//! Known names are exposed as `const` items so match arms and option filters
//! stay symbolic; unknown ids are still representable, they just have no
//! pretty name.

use core::fmt;

/// FNV-1a 64-bit hash of a canonical algorithm name.
///
/// `const` so ids can be baked into `const` items and match guards.
#[inline]
#[must_use]
#[allow(clippy::indexing_slicing)] // const fn: no iterator form available
pub const fn id(name: &str) -> u64 {
  let bytes = name.as_bytes();
  let mut hash = 0xcbf2_9ce4_8422_2325u64;
  let mut i = 0;
  while i < bytes.len() {
    hash ^= bytes[i] as u64;
    hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    i += 1;
  }
  hash
}

/// Look up a canonical name in a `(id, name)` table.
fn lookup(raw: u64, table: &'static [(u64, &'static str)]) -> Option<&'static str> {
  table.iter().find(|(k, _)| *k == raw).map(|(_, v)| *v)
}

macro_rules! define_id_type {
  ($(#[$meta:meta])* $name:ident, $table:path) => {
    $(#[$meta])*
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
    #[serde(transparent)]
    pub struct $name(pub u64);

    impl $name {
      /// Wrap a raw id.
      #[inline]
      #[must_use]
      pub const fn new(raw: u64) -> Self {
        Self(raw)
      }

      /// Id of a canonical algorithm name.
      #[inline]
      #[must_use]
      pub const fn from_name(name: &str) -> Self {
        Self(id(name))
      }

      /// Raw id value.
      #[inline]
      #[must_use]
      pub const fn get(self) -> u64 {
        self.0
      }

      /// Canonical name, if this is a known id.
      #[inline]
      #[must_use]
      pub fn name(self) -> Option<&'static str> {
        lookup(self.0, $table)
      }

      /// Canonical name, or the raw id rendered in hex.
      #[must_use]
      pub fn name_or_id(self) -> String {
        match self.name() {
          Some(name) => name.to_owned(),
          None => format!("{:#018x}", self.0),
        }
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name_or_id())
      }
    }
  };
}

macro_rules! known_names {
  ($mod_name:ident, $ty:ident, { $($konst:ident => $name:literal),+ $(,)? }) => {
    pub mod $mod_name {
      #![allow(missing_docs)]
      use super::$ty;

      $(pub const $konst: $ty = $ty::from_name($name);)+

      /// Id → canonical name table over the known set.
      pub(super) const NAMES: &[(u64, &'static str)] = &[$(($konst.get(), $name)),+];

      /// All known ids, in declaration order.
      pub const ALL: &[$ty] = &[$($konst),+];
    }
  };
}

define_id_type! {
  /// Identifies a digest algorithm (e.g. `SHA256`).
  DigestType, digests::NAMES
}
define_id_type! {
  /// Identifies a symmetric cipher (e.g. `AES_256_GCM`).
  CipherType, ciphers::NAMES
}
define_id_type! {
  /// Identifies an elliptic curve (e.g. `secp256k1`).
  CurveType, curves::NAMES
}
define_id_type! {
  /// Identifies a bignum calculator operation (e.g. `Add(A,B)`).
  CalcOp, calc_ops::NAMES
}
define_id_type! {
  /// Identifies a backend module (e.g. `OpenSSL`).
  ModuleId, modules::NAMES
}
define_id_type! {
  /// Identifies a miscellaneous backend-defined operation.
  MiscOp, misc_ops::NAMES
}

known_names!(digests, DigestType, {
  MD5 => "MD5",
  RIPEMD160 => "RIPEMD160",
  SHA1 => "SHA1",
  SHA224 => "SHA224",
  SHA256 => "SHA256",
  SHA384 => "SHA384",
  SHA512 => "SHA512",
  SHA3_224 => "SHA3-224",
  SHA3_256 => "SHA3-256",
  SHA3_384 => "SHA3-384",
  SHA3_512 => "SHA3-512",
  BLAKE2B512 => "BLAKE2B512",
  BLAKE2S256 => "BLAKE2S256",
});

known_names!(ciphers, CipherType, {
  AES_128_CBC => "AES_128_CBC",
  AES_192_CBC => "AES_192_CBC",
  AES_256_CBC => "AES_256_CBC",
  AES_128_CTR => "AES_128_CTR",
  AES_192_CTR => "AES_192_CTR",
  AES_256_CTR => "AES_256_CTR",
  AES_128_GCM => "AES_128_GCM",
  AES_192_GCM => "AES_192_GCM",
  AES_256_GCM => "AES_256_GCM",
  AES_128_CCM => "AES_128_CCM",
  AES_192_CCM => "AES_192_CCM",
  AES_256_CCM => "AES_256_CCM",
  AES_128_OCB => "AES_128_OCB",
  AES_256_OCB => "AES_256_OCB",
  ARIA_128_GCM => "ARIA_128_GCM",
  ARIA_192_GCM => "ARIA_192_GCM",
  ARIA_256_GCM => "ARIA_256_GCM",
  ARIA_128_CCM => "ARIA_128_CCM",
  ARIA_192_CCM => "ARIA_192_CCM",
  ARIA_256_CCM => "ARIA_256_CCM",
  CHACHA20_POLY1305 => "CHACHA20_POLY1305",
  DES_EDE3_WRAP => "DES_EDE3_WRAP",
});

known_names!(curves, CurveType, {
  SECP192R1 => "secp192r1",
  SECP224R1 => "secp224r1",
  SECP256R1 => "secp256r1",
  SECP256K1 => "secp256k1",
  SECP384R1 => "secp384r1",
  SECP521R1 => "secp521r1",
  BRAINPOOL256R1 => "brainpool256r1",
  ED25519 => "ed25519",
  ED448 => "ed448",
  X25519 => "x25519",
  X448 => "x448",
  BLS12_381 => "BLS12_381",
});

known_names!(calc_ops, CalcOp, {
  ADD => "Add(A,B)",
  SUB => "Sub(A,B)",
  MUL => "Mul(A,B)",
  DIV => "Div(A,B)",
  MOD => "Mod(A,B)",
  EXP_MOD => "ExpMod(A,B,C)",
  SQR => "Sqr(A)",
  GCD => "GCD(A,B)",
  INV_MOD => "InvMod(A,B)",
  CMP => "Cmp(A,B)",
  CMP_ABS => "CmpAbs(A,B)",
  ABS => "Abs(A)",
  NEG => "Neg(A)",
  RSHIFT => "RShift(A,B)",
  LSHIFT1 => "LShift1(A)",
  IS_NEG => "IsNeg(A)",
  IS_EQ => "IsEq(A,B)",
  IS_ZERO => "IsZero(A)",
  IS_ONE => "IsOne(A)",
  IS_ODD => "IsOdd(A)",
  IS_EVEN => "IsEven(A)",
  MUL_MOD => "MulMod(A,B,C)",
  ADD_MOD => "AddMod(A,B,C)",
  SUB_MOD => "SubMod(A,B,C)",
  SQR_MOD => "SqrMod(A,B)",
  BIT => "Bit(A,B)",
  SET_BIT => "SetBit(A,B)",
  CLEAR_BIT => "ClearBit(A,B)",
  EXP => "Exp(A,B)",
  EXP2 => "Exp2(A)",
  MOD_LSHIFT => "ModLShift(A,B,C)",
  NUM_BITS => "NumBits(A)",
  MIN => "Min(A,B)",
  MAX => "Max(A,B)",
  RAND => "Rand()",
});

known_names!(modules, ModuleId, {
  OPENSSL => "OpenSSL",
  BORINGSSL => "BoringSSL",
  RUSTCRYPTO => "RustCrypto",
  WOLFCRYPT => "wolfCrypt",
  BOTAN => "Botan",
});

known_names!(misc_ops, MiscOp, {
  FREE => "Free",
  PRINT => "Print",
});

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fnv1a_reference_vectors() {
    // Standard FNV-1a 64 test vectors.
    assert_eq!(id(""), 0xcbf2_9ce4_8422_2325);
    assert_eq!(id("a"), 0xaf63_dc4c_8601_ec8c);
    assert_eq!(id("foobar"), 0x85944171f73967e8);
  }

  #[test]
  fn ids_are_stable_and_distinct() {
    assert_eq!(DigestType::from_name("SHA256"), digests::SHA256);
    assert_ne!(digests::SHA256, digests::SHA512);
    assert_ne!(ciphers::AES_128_GCM.get(), ciphers::AES_256_GCM.get());
  }

  #[test]
  fn kind_is_part_of_the_type() {
    // Same name, different kind: the raw hash matches but the types do not
    // unify, which is the point of the newtypes.
    assert_eq!(CipherType::from_name("SHA256").get(), digests::SHA256.get());
  }

  #[test]
  fn known_names_round_trip() {
    for digest in digests::ALL {
      let name = digest.name().unwrap();
      assert_eq!(DigestType::from_name(name), *digest);
    }
    for op in calc_ops::ALL {
      let name = op.name().unwrap();
      assert_eq!(CalcOp::from_name(name), *op);
    }
  }

  #[test]
  fn unknown_id_renders_as_hex() {
    let unknown = DigestType::new(0x1234);
    assert_eq!(unknown.name(), None);
    assert_eq!(unknown.to_string(), "0x0000000000001234");
  }

  #[test]
  fn display_uses_canonical_name() {
    assert_eq!(curves::ED25519.to_string(), "ed25519");
    assert_eq!(calc_ops::EXP_MOD.to_string(), "ExpMod(A,B,C)");
  }

  #[test]
  fn no_table_collisions() {
    let mut seen = std::collections::BTreeSet::new();
    for curve in curves::ALL {
      assert!(seen.insert(curve.get()));
    }
  }
}
