use super::SymmetricCipher;
use crate::block_cipher::AES;
use crate::cipher_mode::{Pkcs7Padding, CBC};
use crate::{CipherError, Rand};

/// 信封正文的对称密码: AES-CBC + PKCS#7, 每次加密从`R`抽取新的16字节IV.
///
/// 密钥长度16/24/32字节分别对应AES-128/192/256. 不提供完整性保护, 信封只对密钥传输签名.
pub struct AesCbcCipher<R> {
    rng: R,
    key_len: usize,
}

impl<R: Rand> AesCbcCipher<R> {
    pub const KEY_LEN: usize = 16;
    pub const IV_LEN: usize = AES::BLOCK_SIZE;

    pub fn new(rng: R) -> Self {
        Self {
            rng,
            key_len: Self::KEY_LEN,
        }
    }

    pub fn with_key_len(rng: R, key_len: usize) -> Result<Self, CipherError> {
        if !matches!(key_len, 16 | 24 | 32) {
            return Err(CipherError::InvalidParameters(format!(
                "AES key length must be 16, 24 or 32 bytes, got `{key_len}`"
            )));
        }

        Ok(Self { rng, key_len })
    }

    fn cbc(&self, key: &[u8]) -> Result<CBC<Pkcs7Padding, AES, 16>, CipherError> {
        if key.len() != self.key_len {
            return Err(CipherError::InvalidKeySize {
                target: self.key_len,
                real: key.len(),
            });
        }

        AES::new(key).map(CBC::new)
    }
}

impl<R: Rand> SymmetricCipher for AesCbcCipher<R> {
    fn key_len(&self) -> usize {
        self.key_len
    }

    fn encrypt(&mut self, key: &[u8], plaintext: &[u8]) -> Result<(Vec<u8>, Vec<u8>), CipherError> {
        let cbc = self.cbc(key)?;

        let mut iv = [0u8; 16];
        self.rng.rand(&mut iv);
        let ciphertext = cbc.encrypt(&iv, plaintext);

        Ok((iv.to_vec(), ciphertext))
    }

    fn decrypt(&mut self, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let cbc = self.cbc(key)?;

        let iv: [u8; 16] = iv.try_into().map_err(|_| {
            CipherError::Symmetric(format!(
                "iv must be {} bytes, got {}",
                Self::IV_LEN,
                iv.len()
            ))
        })?;

        cbc.decrypt(&iv, ciphertext)
    }
}
