use crate::block_cipher::{BlockDecrypt, BlockEncrypt};
use crate::cipher_mode::BlockPadding;
use crate::CipherError;

/// Cipher Block Chaining Mode(CBC) <br>
///
/// 一次性处理整段数据; 每次加密都需要调用方提供新的不可预测的`IV`. <br>
pub struct CBC<P, E, const BLOCK_SIZE: usize> {
    cipher: E,
    padding: P,
}

impl<P, E, const N: usize> CBC<P, E, N>
where
    P: BlockPadding,
{
    pub fn new(cipher: E) -> Self {
        Self {
            cipher,
            padding: P::new(N),
        }
    }

    pub fn set_padding(&mut self, padding: P) {
        self.padding = padding;
    }

    pub fn cipher(&self) -> &E {
        &self.cipher
    }
}

impl<P, E, const N: usize> CBC<P, E, N>
where
    P: BlockPadding,
    E: BlockEncrypt<N>,
{
    pub fn encrypt(&self, iv: &[u8; N], plaintext: &[u8]) -> Vec<u8> {
        let mut buf = plaintext.to_vec();
        self.padding.padding(&mut buf);

        let mut chain = *iv;
        for chunk in buf.chunks_exact_mut(N) {
            chain.iter_mut().zip(chunk.iter()).for_each(|(a, b)| *a ^= b);
            chain = self.cipher.encrypt_block(&chain);
            chunk.copy_from_slice(&chain);
        }

        buf
    }
}

impl<P, E, const N: usize> CBC<P, E, N>
where
    P: BlockPadding,
    E: BlockDecrypt<N>,
{
    pub fn decrypt(&self, iv: &[u8; N], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        if ciphertext.is_empty() || ciphertext.len() % N != 0 {
            return Err(CipherError::InvalidBlockSize {
                target: N,
                real: ciphertext.len() % N,
            });
        }

        let mut buf = ciphertext.to_vec();
        let mut chain = *iv;
        for chunk in buf.chunks_exact_mut(N) {
            let mut block = [0u8; N];
            block.copy_from_slice(chunk);

            let mut d = self.cipher.decrypt_block(&block);
            d.iter_mut().zip(chain.iter()).for_each(|(a, b)| *a ^= b);
            chunk.copy_from_slice(&d);
            chain = block;
        }

        self.padding.unpadding(&mut buf)?;
        Ok(buf)
    }
}
