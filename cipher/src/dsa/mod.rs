//! FIPS 186: Digital Signature Algorithm over a prime-order subgroup of $Z_p^*$.
//!
//! - 域参数$(p, q, g)$: q是素数, p是素数且$q | (p-1)$, g的阶为q;
//! - 私钥$x \in [1, q-1]$, 公钥$y = g^x \mod p$;
//! - 签名: $r = (g^k \mod p) \mod q$, $s = k^{-1}(H(m) + xr) \mod q$;
//! - 验证: $w = s^{-1}$, $v = (g^{H(m)w} y^{rw} \mod p) \mod q$, 检查$v = r$.
//!

mod params;
pub use params::DomainParameters;

mod key;
pub use key::{KeyPair, PublicKey};

mod sig;
pub use sig::Signature;

mod signer;
pub use signer::Dsa;

#[cfg(test)]
mod tests;
