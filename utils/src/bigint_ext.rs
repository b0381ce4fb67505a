use crate::NumError;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::borrow::Borrow;
use std::ops::Deref;

pub struct BigIntExt<T: Borrow<BigInt>>(pub T);

impl<T: Borrow<BigInt>> Deref for BigIntExt<T> {
    type Target = BigInt;
    fn deref(&self) -> &Self::Target {
        self.0.borrow()
    }
}

impl<T: Borrow<BigInt>> BigIntExt<T> {
    /// 扩展欧几里得算法, 返回`(g, x, y)`满足`self * x + other * y = g = gcd(self, other)`, 且`g >= 0`.
    ///
    /// 迭代实现, 每轮携带余数及两组系数:
    /// $r_{i+1} = r_{i-1} - q_i r_i$, $s_{i+1} = s_{i-1} - q_i s_i$, $t_{i+1} = t_{i-1} - q_i t_i$.
    pub fn extended_gcd(&self, other: &BigInt) -> (BigInt, BigInt, BigInt) {
        let (mut old_r, mut r) = (self.deref().clone(), other.clone());
        let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
        let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

        while !r.is_zero() {
            let q = &old_r / &r;

            let next_r = &old_r - &q * &r;
            (old_r, r) = (r, next_r);

            let next_s = &old_s - &q * &s;
            (old_s, s) = (s, next_s);

            let next_t = &old_t - &q * &t;
            (old_t, t) = (t, next_t);
        }

        if old_r.is_negative() {
            (-old_r, -old_s, -old_t)
        } else {
            (old_r, old_s, old_t)
        }
    }

    /// <<算法导论>> 推论31.26: 当且仅当gcd(a, n) = 1时, 方程ax = 1 (mod n)有唯一解.
    ///
    /// 返回`inv`满足`self * inv = 1 mod |modulus|`, `inv`在`[0, |modulus|)`之间.
    pub fn modinv(&self, modulus: &BigInt) -> Result<BigInt, NumError> {
        let n = modulus.abs();
        if n.is_zero() {
            return Err(NumError::NoInverse);
        }

        let a = self.mod_floor(&n);
        let (g, x, _) = BigIntExt(&a).extended_gcd(&n);
        if g.is_one() {
            Ok(x.mod_floor(&n))
        } else {
            Err(NumError::NoInverse)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BigIntExt;
    use crate::NumError;
    use num_bigint::BigInt;
    use num_integer::Integer;

    fn check_bezout(a: i64, b: i64) {
        let (a, b) = (BigInt::from(a), BigInt::from(b));
        let (g, x, y) = BigIntExt(&a).extended_gcd(&b);
        assert_eq!(&a * &x + &b * &y, g, "bezout identity failed for ({a}, {b})");
        assert_eq!(g, a.gcd(&b), "wrong gcd for ({a}, {b})");
    }

    #[test]
    fn extended_gcd_vector() {
        let (g, x, y) = BigIntExt(BigInt::from(35)).extended_gcd(&BigInt::from(15));
        assert_eq!(g, BigInt::from(5));
        assert_eq!((x, y), (BigInt::from(1), BigInt::from(-2)));
    }

    #[test]
    fn extended_gcd_cases() {
        let cases = [
            (0, 0),
            (0, 7),
            (7, 0),
            (1, 1),
            (240, 46),
            (46, 240),
            (17, 5),
            (1 << 40, 3 * (1 << 20)),
            (982451653, 57885161),
            (-35, 15),
            (35, -15),
        ];

        for (a, b) in cases {
            check_bezout(a, b);
        }
    }

    #[test]
    fn extended_gcd_large() {
        let a: BigInt = "784637716923335095479473677900958302012794430558004314147"
            .parse()
            .unwrap();
        let b: BigInt = "512611549290850354559007451159799160374583379513555087922"
            .parse()
            .unwrap();
        let (g, x, y) = BigIntExt(&a).extended_gcd(&b);
        assert_eq!(&a * x + &b * y, g);
        assert_eq!(g, a.gcd(&b));
    }

    #[test]
    fn modinv() {
        let inv = BigIntExt(BigInt::from(3)).modinv(&BigInt::from(11)).unwrap();
        assert_eq!(inv, BigInt::from(4));

        for (a, m) in [(7, 40), (10, 17), (123456789, 1000000007), (-3, 11), (1, 2)] {
            let (a, m) = (BigInt::from(a), BigInt::from(m));
            let inv = BigIntExt(&a).modinv(&m).unwrap();
            assert!(inv >= BigInt::from(0) && inv < m);
            assert_eq!((&a * &inv).mod_floor(&m), BigInt::from(1));
        }

        assert_eq!(
            BigIntExt(BigInt::from(6)).modinv(&BigInt::from(9)),
            Err(NumError::NoInverse)
        );
        assert_eq!(
            BigIntExt(BigInt::from(6)).modinv(&BigInt::from(0)),
            Err(NumError::NoInverse)
        );
    }
}
