//! AES加密<br>
//! FIPS 197  <br>
//! [FIPS 197-upd1](https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.197-upd1.pdf)<br>
//!
//! 按字节实现的状态矩阵, state[r + 4c]对应第r行第c列; S盒在编译期由GF(2^8)求逆加仿射变换生成.

use super::{BlockDecrypt, BlockEncrypt};
use crate::CipherError;
use zeroize::Zeroize;

const BLOCK_SIZE: usize = 16;
// AES-256的轮数
const MAX_ROUNDS: usize = 14;

const fn xtime(b: u8) -> u8 {
    (b << 1) ^ if b & 0x80 != 0 { 0x1b } else { 0 }
}

// p遍历乘法群(每次乘3), q同步除以3即为p的逆元
const fn sbox() -> ([u8; 256], [u8; 256]) {
    let (mut sbox, mut inv) = ([0u8; 256], [0u8; 256]);
    let (mut p, mut q) = (1u8, 1u8);

    loop {
        p ^= xtime(p);

        q ^= q << 1;
        q ^= q << 2;
        q ^= q << 4;
        if q & 0x80 != 0 {
            q ^= 0x09;
        }

        let s = q ^ q.rotate_left(1) ^ q.rotate_left(2) ^ q.rotate_left(3) ^ q.rotate_left(4) ^ 0x63;
        sbox[p as usize] = s;
        inv[s as usize] = p;

        if p == 1 {
            break;
        }
    }

    // 0没有逆元
    sbox[0] = 0x63;
    inv[0x63] = 0;
    (sbox, inv)
}

const SBOXES: ([u8; 256], [u8; 256]) = sbox();
const SBOX: [u8; 256] = SBOXES.0;
const INV_SBOX: [u8; 256] = SBOXES.1;

/// AES-128/192/256, 由密钥长度决定.
#[derive(Clone)]
pub struct AES {
    rounds: usize,
    round_keys: [[u8; BLOCK_SIZE]; MAX_ROUNDS + 1],
}

impl AES {
    pub const BLOCK_SIZE: usize = BLOCK_SIZE;

    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        if !matches!(key.len(), 16 | 24 | 32) {
            return Err(CipherError::InvalidKeySize {
                target: 16,
                real: key.len(),
            });
        }

        let nk = key.len() / 4;
        let rounds = nk + 6;
        let mut aes = Self {
            rounds,
            round_keys: [[0u8; BLOCK_SIZE]; MAX_ROUNDS + 1],
        };
        aes.expand_key(key, nk);

        Ok(aes)
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    // 密钥扩展
    fn expand_key(&mut self, key: &[u8], nk: usize) {
        let total = 4 * (self.rounds + 1);
        let mut w = [[0u8; 4]; 4 * (MAX_ROUNDS + 1)];
        for (wi, chunk) in w.iter_mut().zip(key.chunks_exact(4)) {
            wi.copy_from_slice(chunk);
        }

        let mut rcon = 1u8;
        for i in nk..total {
            let mut t = w[i - 1];
            if i % nk == 0 {
                t.rotate_left(1);
                t.iter_mut().for_each(|b| *b = SBOX[*b as usize]);
                t[0] ^= rcon;
                rcon = xtime(rcon);
            } else if nk > 6 && i % nk == 4 {
                t.iter_mut().for_each(|b| *b = SBOX[*b as usize]);
            }

            for j in 0..4 {
                w[i][j] = w[i - nk][j] ^ t[j];
            }
        }

        for (r, rk) in self.round_keys.iter_mut().take(self.rounds + 1).enumerate() {
            for c in 0..4 {
                rk[4 * c..4 * c + 4].copy_from_slice(&w[4 * r + c]);
            }
        }

        w.zeroize();
    }

    fn add_round_key(state: &mut [u8; BLOCK_SIZE], rk: &[u8; BLOCK_SIZE]) {
        state.iter_mut().zip(rk.iter()).for_each(|(s, k)| *s ^= k);
    }

    fn sub_bytes(state: &mut [u8; BLOCK_SIZE], sbox: &[u8; 256]) {
        state.iter_mut().for_each(|b| *b = sbox[*b as usize]);
    }

    // 第r行循环左移r字节
    fn shift_rows(state: &mut [u8; BLOCK_SIZE]) {
        let s = *state;
        for r in 1..4 {
            for c in 0..4 {
                state[r + 4 * c] = s[r + 4 * ((c + r) % 4)];
            }
        }
    }

    fn inv_shift_rows(state: &mut [u8; BLOCK_SIZE]) {
        let s = *state;
        for r in 1..4 {
            for c in 0..4 {
                state[r + 4 * c] = s[r + 4 * ((c + 4 - r) % 4)];
            }
        }
    }

    fn mix_columns(state: &mut [u8; BLOCK_SIZE]) {
        for col in state.chunks_exact_mut(4) {
            let (a0, a1, a2, a3) = (col[0], col[1], col[2], col[3]);
            let t = a0 ^ a1 ^ a2 ^ a3;
            col[0] ^= t ^ xtime(a0 ^ a1);
            col[1] ^= t ^ xtime(a1 ^ a2);
            col[2] ^= t ^ xtime(a2 ^ a3);
            col[3] ^= t ^ xtime(a3 ^ a0);
        }
    }

    // InvMixColumns = MixColumns * {04}x^2 + {05}
    fn inv_mix_columns(state: &mut [u8; BLOCK_SIZE]) {
        for col in state.chunks_exact_mut(4) {
            let u = xtime(xtime(col[0] ^ col[2]));
            let v = xtime(xtime(col[1] ^ col[3]));
            col[0] ^= u;
            col[1] ^= v;
            col[2] ^= u;
            col[3] ^= v;
        }
        Self::mix_columns(state);
    }
}

impl BlockEncrypt<16> for AES {
    fn encrypt_block(&self, plaintext: &[u8; 16]) -> [u8; 16] {
        let mut state = *plaintext;
        let rk = &self.round_keys;

        Self::add_round_key(&mut state, &rk[0]);
        // SubBytes -> ShiftRows -> MixColumns -> AddRoundKey
        for k in &rk[1..self.rounds] {
            Self::sub_bytes(&mut state, &SBOX);
            Self::shift_rows(&mut state);
            Self::mix_columns(&mut state);
            Self::add_round_key(&mut state, k);
        }
        // SubBytes -> ShiftRows -> AddRoundKey
        Self::sub_bytes(&mut state, &SBOX);
        Self::shift_rows(&mut state);
        Self::add_round_key(&mut state, &rk[self.rounds]);

        state
    }
}

impl BlockDecrypt<16> for AES {
    fn decrypt_block(&self, ciphertext: &[u8; 16]) -> [u8; 16] {
        let mut state = *ciphertext;
        let rk = &self.round_keys;

        Self::add_round_key(&mut state, &rk[self.rounds]);
        for k in rk[1..self.rounds].iter().rev() {
            Self::inv_shift_rows(&mut state);
            Self::sub_bytes(&mut state, &INV_SBOX);
            Self::add_round_key(&mut state, k);
            Self::inv_mix_columns(&mut state);
        }
        Self::inv_shift_rows(&mut state);
        Self::sub_bytes(&mut state, &INV_SBOX);
        Self::add_round_key(&mut state, &rk[0]);

        state
    }
}

impl Zeroize for AES {
    fn zeroize(&mut self) {
        self.round_keys.zeroize();
    }
}

impl Drop for AES {
    fn drop(&mut self) {
        self.zeroize();
    }
}
