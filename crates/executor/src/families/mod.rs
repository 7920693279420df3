//! Per-family policy implementations.

mod bignum;
mod bls;
mod cipher;
mod dh;
mod digest;
mod ecc;
mod kdf;
mod misc;

pub use bignum::BignumCalcFamily;
pub use bls::{
  BlsCompressG1Family, BlsCompressG2Family, BlsDecompressG1Family, BlsDecompressG2Family, BlsGenerateKeyPairFamily,
  BlsHashToG1Family, BlsHashToG2Family, BlsIsG1OnCurveFamily, BlsIsG2OnCurveFamily, BlsPairingFamily,
  BlsPrivateToPublicFamily, BlsSignFamily, BlsVerifyFamily,
};
pub use cipher::{SymmetricDecryptFamily, SymmetricEncryptFamily};
pub use dh::{DhDeriveFamily, DhGenerateKeyPairFamily};
pub use digest::{CmacFamily, DigestFamily, HmacFamily};
pub use ecc::{
  EccGenerateKeyPairFamily, EccPrivateToPublicFamily, EccValidatePubkeyFamily, EcdhDeriveFamily, EcdsaSignFamily,
  EcdsaVerifyFamily, EciesDecryptFamily, EciesEncryptFamily,
};
pub use kdf::{
  KdfArgon2Family, KdfBcryptFamily, KdfHkdfFamily, KdfPbkdf1Family, KdfPbkdf2Family, KdfPbkdfFamily,
  KdfScryptFamily, KdfSp800_108Family, KdfSshFamily, KdfTls1PrfFamily, KdfX963Family,
};
pub use misc::{MiscFamily, Sr25519VerifyFamily};
