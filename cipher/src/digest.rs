//! Message digests for DSA: text in, integer in $[0, 2^{160})$ out.

use num_bigint::BigUint;
use num_traits::One;
use sha2::{Digest, Sha256};

/// bit length bound of every digest value
pub const DIGEST_BITS: usize = 160;

pub trait MessageDigest {
    /// 返回值小于$2^{160}$
    fn digest(&self, msg: &str) -> BigUint;
}

/// Sum of the message's Unicode code points modulo $2^{160}$.
///
/// This is a placeholder, not a cryptographic hash: any permutation of the message
/// collides, so signatures over it are trivially forgeable. Swap in [`Sha256Digest`]
/// (or another [`MessageDigest`]) wherever forgery matters.
#[derive(Clone, Copy, Debug, Default)]
pub struct CodePointSum;

impl MessageDigest for CodePointSum {
    fn digest(&self, msg: &str) -> BigUint {
        let sum: BigUint = msg.chars().map(|c| BigUint::from(c as u32)).sum();
        sum % (BigUint::one() << DIGEST_BITS)
    }
}

/// SHA-256 truncated to its leftmost 160 bits, as DSA does when the hash is longer than `q`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Digest;

impl MessageDigest for Sha256Digest {
    fn digest(&self, msg: &str) -> BigUint {
        let h = Sha256::digest(msg.as_bytes());
        BigUint::from_bytes_be(&h[..DIGEST_BITS >> 3])
    }
}

#[cfg(test)]
mod tests {
    use super::{CodePointSum, MessageDigest, Sha256Digest, DIGEST_BITS};
    use num_bigint::BigUint;

    #[test]
    fn code_point_sum() {
        let d = CodePointSum;
        assert_eq!(d.digest(""), BigUint::from(0u32));
        assert_eq!(d.digest("abc"), BigUint::from(97u32 + 98 + 99));
        // 'П' = U+041F, 'р' = U+0440
        assert_eq!(d.digest("Пр"), BigUint::from(0x41Fu32 + 0x440));
        // 置换不改变摘要
        assert_eq!(d.digest("SECRET"), d.digest("TERCES"));
    }

    #[test]
    fn sha256_truncated() {
        let d = Sha256Digest;
        // SHA-256("abc") = ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad
        let expected = BigUint::parse_bytes(b"ba7816bf8f01cfea414140de5dae2223b00361a3", 16).unwrap();
        assert_eq!(d.digest("abc"), expected);
        assert_ne!(d.digest("SECRET"), d.digest("TERCES"));

        for msg in ["", "a", "SECRET MESSAGE"] {
            assert!(d.digest(msg).bits() as usize <= DIGEST_BITS);
        }
    }
}
