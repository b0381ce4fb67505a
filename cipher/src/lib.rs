//! 数论公钥层: DSA签名, ElGamal加密, 以及将二者与外部对称密码组合起来的混合信封协议.

mod error;
pub use error::CipherError;

pub use rand::{DefaultRand, Rand, SeededRand};
pub use utils::{SearchBudget, DEFAULT_PRIME_TEST_ROUNDS};

pub mod digest;
pub use digest::{CodePointSum, MessageDigest, Sha256Digest};

pub mod dsa;
pub mod elgamal;

pub mod block_cipher;
pub mod cipher_mode;

pub mod envelope;
pub use envelope::{AesCbcCipher, Envelope, HybridEnvelope, SymmetricCipher};
