//! ElGamal encryption over $Z_p^*$.
//!
//! - 公钥$(a, p, b)$, a是模p乘法群的生成元, $b = a^x \mod p$;
//! - 私钥$x \in [2, p-2]$;
//! - 加密: 选择与$p-1$互质的临时$y$, $k = a^y \mod p$, $c = b^y m \mod p$;
//! - 解密: $s = k^x \mod p$, $m = c s^{p-2} \mod p$ (费马小定理求逆, 要求p为素数).
//!

mod generator;
pub use generator::{find_generator, is_generator, DEFAULT_GENERATOR_ATTEMPTS};

mod key;
pub use key::{generate_key, PrivateKey, PublicKey};

mod ciphertext;
pub use ciphertext::Ciphertext;
