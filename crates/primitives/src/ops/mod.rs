//! Operation value types, one module per family group.

mod bignum;
mod bls;
mod cipher;
mod dh;
mod digest;
mod ecc;
mod kdf;
mod mac;
mod misc;

pub use bignum::BignumCalc;
pub use bls::{
  BlsCompressG1, BlsCompressG2, BlsDecompressG1, BlsDecompressG2, BlsGenerateKeyPair, BlsHashToG1, BlsHashToG2,
  BlsIsG1OnCurve, BlsIsG2OnCurve, BlsPairing, BlsPrivateToPublic, BlsSign, BlsVerify,
};
pub use cipher::{SymmetricDecrypt, SymmetricEncrypt};
pub use dh::{DhDerive, DhGenerateKeyPair};
pub use digest::Digest;
pub use ecc::{
  EccGenerateKeyPair, EccPrivateToPublic, EccValidatePubkey, EcdhDerive, EcdsaSign, EcdsaVerify, EciesDecrypt,
  EciesEncrypt, NonceSource,
};
pub use kdf::{
  KdfArgon2, KdfBcrypt, KdfHkdf, KdfMech, KdfPbkdf, KdfPbkdf1, KdfPbkdf2, KdfScrypt, KdfSp800_108, KdfSsh,
  KdfTls1Prf, KdfX963,
};
pub use mac::{Cmac, Hmac, SymmetricCipher};
pub use misc::{Misc, Sr25519Verify};
