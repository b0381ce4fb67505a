//! 混合信封协议
//!
//! - seal: 对称加密明文得到(iv, body); 将对称密钥按大端序解释为整数, 用ElGamal公钥加密,
//! 编码为文本`"k c"`; 对该文本做DSA签名;
//! - open: 先验证签名, 失败则立即返回[`CipherError::SignatureInvalid`], 不做任何解码或解密;
//! 之后才解析`"k c"`, ElGamal解密得到对称密钥, 再解密body.
//!

use crate::dsa::{self, Dsa, Signature};
use crate::elgamal::{self, Ciphertext};
use crate::{CipherError, MessageDigest, Rand, SearchBudget};
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

mod aes_cbc;
pub use aes_cbc::AesCbcCipher;


/// Symmetric cipher used for the envelope body.
///
/// `encrypt` chooses the iv; `decrypt` must accept the iv it produced.
pub trait SymmetricCipher {
    /// fixed key length in bytes
    fn key_len(&self) -> usize;

    /// 返回(iv, ciphertext)
    fn encrypt(&mut self, key: &[u8], plaintext: &[u8]) -> Result<(Vec<u8>, Vec<u8>), CipherError>;

    fn decrypt(&mut self, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>;
}

impl<C: SymmetricCipher + ?Sized> SymmetricCipher for &mut C {
    fn key_len(&self) -> usize {
        (**self).key_len()
    }

    fn encrypt(&mut self, key: &[u8], plaintext: &[u8]) -> Result<(Vec<u8>, Vec<u8>), CipherError> {
        (**self).encrypt(key, plaintext)
    }

    fn decrypt(&mut self, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).decrypt(key, iv, ciphertext)
    }
}

/// The unit exchanged between sender and receiver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    // "k c", ElGamal ciphertext of the symmetric key
    encoded_key: String,
    iv: Vec<u8>,
    body: Vec<u8>,
    // DSA signature over `encoded_key`
    signature: Signature,
}

impl Envelope {
    pub fn new(encoded_key: String, iv: Vec<u8>, body: Vec<u8>, signature: Signature) -> Self {
        Self {
            encoded_key,
            iv,
            body,
            signature,
        }
    }

    pub fn encoded_key(&self) -> &str {
        &self.encoded_key
    }

    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

/// Seals and opens [`Envelope`]s with ElGamal key transport, DSA authentication of the
/// key-transport text and `C` for the body.
pub struct HybridEnvelope<C, D: MessageDigest> {
    cipher: C,
    dsa: Dsa<D>,
    // bound on ephemeral draws in ElGamal encryption
    budget: SearchBudget,
}

impl<C: SymmetricCipher, D: MessageDigest> HybridEnvelope<C, D> {
    pub fn new(cipher: C, dsa: Dsa<D>) -> Self {
        Self {
            cipher,
            dsa,
            budget: SearchBudget::default(),
        }
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    pub fn seal<R: Rand>(
        &mut self,
        plaintext: &[u8],
        key: &[u8],
        eg_pk: &elgamal::PublicKey,
        dsa_key: &dsa::KeyPair,
        rng: &mut R,
    ) -> Result<Envelope, CipherError> {
        let key_len = self.cipher.key_len();
        if key.len() != key_len {
            return Err(CipherError::InvalidKeySize {
                target: key_len,
                real: key.len(),
            });
        }

        let (iv, body) = self.cipher.encrypt(key, plaintext)?;

        let m = BigUint::from_bytes_be(key);
        let encoded_key = eg_pk.encrypt(&m, rng, self.budget)?.to_string();
        let signature = self.dsa.sign(&encoded_key, dsa_key, rng)?;

        log::debug!(
            "envelope: sealed {} bytes, key transport `{}` bytes",
            body.len(),
            encoded_key.len()
        );
        Ok(Envelope::new(encoded_key, iv, body, signature))
    }

    pub fn open(
        &mut self,
        envelope: &Envelope,
        eg_sk: &elgamal::PrivateKey,
        eg_pk: &elgamal::PublicKey,
        dsa_pk: &dsa::PublicKey,
    ) -> Result<Vec<u8>, CipherError> {
        if !self
            .dsa
            .verify(envelope.encoded_key(), envelope.signature(), dsa_pk)
        {
            log::warn!("envelope: signature verification failed, rejected");
            return Err(CipherError::SignatureInvalid);
        }

        let ct = envelope.encoded_key().parse::<Ciphertext>()?;
        let m = eg_sk.decrypt(&ct, eg_pk)?;
        let key = Self::key_bytes(&m, self.cipher.key_len())?;

        let plaintext = self.cipher.decrypt(&key, envelope.iv(), envelope.body())?;
        log::debug!("envelope: opened {} bytes", plaintext.len());
        Ok(plaintext)
    }

    // 大端序, 左侧补零到`key_len`字节
    fn key_bytes(m: &BigUint, key_len: usize) -> Result<Zeroizing<Vec<u8>>, CipherError> {
        let bytes = if m.is_zero() {
            Zeroizing::new(Vec::new())
        } else {
            Zeroizing::new(m.to_bytes_be())
        };

        if bytes.len() > key_len {
            return Err(CipherError::InvalidCiphertext(format!(
                "recovered key does not fit in {key_len} bytes"
            )));
        }

        let mut key = Zeroizing::new(vec![0u8; key_len]);
        key[key_len - bytes.len()..].copy_from_slice(&bytes);
        Ok(key)
    }
}
