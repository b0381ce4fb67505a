use crate::{small_primes, BigIntExt, NumError, SearchBudget};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rand;
use std::borrow::Borrow;
use std::ops::Deref;

pub struct BigUintExt<T: Borrow<BigUint>>(pub T);

impl<T: Borrow<BigUint>> Deref for BigUintExt<T> {
    type Target = BigUint;
    fn deref(&self) -> &Self::Target {
        self.0.borrow()
    }
}

impl<T: Borrow<BigUint>> BigUintExt<T> {
    /// self * inv = 1 \mod modulus
    pub fn modinv(&self, modulus: &BigUint) -> Result<BigUint, NumError> {
        let (a, n) = (BigInt::from(self.deref().clone()), BigInt::from(modulus.clone()));
        let inv = BigIntExt(a).modinv(&n)?;
        // modinv的结果落在[0, n)之间, 不会是负数
        inv.to_biguint().ok_or(NumError::NoInverse)
    }

    pub fn gcd(&self, other: &BigUint) -> BigUint {
        self.deref().gcd(other)
    }

    // 生成[0..self)之间的随机数, self为0时返回0
    pub fn gen_random<R: Rand>(&self, rng: &mut R) -> BigUint {
        if self.is_zero() {
            return BigUint::zero();
        }

        let bits = self.bits() as usize;
        let (mut n, b) = (vec![0u8; (bits + 7) >> 3], bits & 7);

        loop {
            rng.rand(n.as_mut_slice());
            // 清除高于bits的位, 使得每次采样被接受的概率不小于1/2
            if b != 0 {
                if let Some(x) = n.last_mut() {
                    *x &= (1u8 << b) - 1;
                }
            }

            let r = BigUint::from_bytes_le(n.as_slice());
            if self.deref() > &r {
                return r;
            }
        }
    }

    /// uniformly random value in `[self, high]`, `self` when `high < self`
    pub fn gen_range<R: Rand>(&self, high: &BigUint, rng: &mut R) -> BigUint {
        let low = self.deref();
        if high < low {
            return low.clone();
        }

        let span = high - low + 1u32;
        low + BigUintExt(span).gen_random(rng)
    }

    /// Probabilistic primality test.
    ///
    /// Values up to the small-prime table are decided by table lookup and direct
    /// divisibility; anything else runs `rounds` Miller-Rabin rounds with uniformly
    /// random witnesses in `[2, n-2]`. A composite passes with probability at most
    /// $4^{-rounds}$.
    pub fn is_probable_prime<R: Rand>(&self, rounds: usize, rng: &mut R) -> bool {
        let n = self.deref();
        if n <= &BigUint::one() {
            return false;
        }

        for &p in small_primes() {
            if n == &BigUint::from(p) {
                return true;
            }

            if (n % p).is_zero() {
                return false;
            }
        }

        self.miller_rabin(rounds, rng)
    }

    /// miller-rabin素数测试, self是大于3的奇数.
    ///
    /// $n - 1 = 2^s \cdot d$, 对每个证据a计算$x = a^d \mod n$, 若x为1或n-1, 或者x连续平方
    /// 至多s-1次的过程中出现n-1, 则该轮通过.
    fn miller_rabin<R: Rand>(&self, rounds: usize, rng: &mut R) -> bool {
        let n = self.deref();
        let n_m1 = n - 1u32;
        let s = n_m1.trailing_zeros().unwrap_or(0);
        let d = &n_m1 >> s;
        let (two, n_m2) = (BigUint::from(2u32), n - 2u32);

        'witness: for _ in 0..rounds {
            let a = BigUintExt(&two).gen_range(&n_m2, rng);
            let mut x = a.modpow(&d, n);
            if x.is_one() || x == n_m1 {
                continue;
            }

            for _ in 1..s {
                x = &x * &x % n;
                if x == n_m1 {
                    continue 'witness;
                }
            }

            return false;
        }

        true
    }

    /// generate a number p with the bits length of `bits_len`, such that p is prime
    /// with high probability that is related to the number of `test_rounds`.
    ///
    /// 每次采样`bits_len`位的随机数, 置最高位(固定位长)和最低位(奇数), 第一个通过
    /// 素性测试的候选值即为结果.
    pub fn generate_prime<R: Rand>(
        bits_len: usize,
        test_rounds: usize,
        rng: &mut R,
        budget: SearchBudget,
    ) -> Result<BigUint, NumError> {
        if bits_len < 2 {
            return Err(NumError::InvalidBitLength(bits_len));
        }

        let (mut p, b) = (
            vec![0u8; (bits_len + 7) >> 3],
            if (bits_len & 7) == 0 { 8 } else { bits_len & 7 },
        );

        for attempt in budget.attempts() {
            rng.rand(p.as_mut_slice());

            if let Some(x) = p.last_mut() {
                // 清除大于bits_len的位, 并置最高位
                if b != 8 {
                    *x &= (1u8 << b) - 1;
                }
                *x |= 1 << (b - 1);
            }

            // 奇数
            if let Some(x) = p.first_mut() {
                *x |= 1;
            }

            let n = BigUintExt(BigUint::from_bytes_le(p.as_slice()));
            if n.is_probable_prime(test_rounds, rng) {
                log::debug!("generate_prime: {bits_len}-bit prime found after {attempt} candidates");
                return Ok(n.0);
            }
        }

        Err(budget.exhausted("generate_prime"))
    }
}
