//! 整数分解: 小于[`TRIAL_DIVISION_LIMIT`]的部分用试除法, 更大的部分用Pollard's rho.
//!
//! 这是一个随机化且不完备的分解: 对形如$p-1$(p为中等规模的素数)的数有效, 对一般的难分解整数
//! (例如两个大素数的乘积)会在预算内失败.

use crate::{small_primes, BigUintExt, NumError, SearchBudget};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::Rand;
use std::borrow::Borrow;
use std::ops::Deref;

/// Residuals below this magnitude are factored by plain trial division.
pub const TRIAL_DIVISION_LIMIT: u64 = 1_000_000;

/// Steps one rho polynomial may take before it is abandoned for a fresh one.
const RHO_MAX_STEPS: usize = 1 << 20;

/// Steps per batched gcd in Pollard's rho.
const RHO_BATCH: usize = 128;

impl<T: Borrow<BigUint>> BigUintExt<T> {
    /// Prime factors of `self` in ascending order, with multiplicity; their
    /// product is `self`. `0` and `1` have no prime factors.
    ///
    /// `budget` bounds the number of rho polynomials tried per composite residual.
    pub fn prime_factors<R: Rand>(
        &self,
        test_rounds: usize,
        rng: &mut R,
        budget: SearchBudget,
    ) -> Result<Vec<BigUint>, NumError> {
        let mut factors = Vec::new();
        if self.is_zero() {
            return Ok(factors);
        }

        let tz = self.trailing_zeros().unwrap_or(0);
        factors.extend((0..tz).map(|_| BigUint::from(2u32)));

        let mut pending = vec![self.deref() >> tz];
        while let Some(mut n) = pending.pop() {
            if n.is_one() {
                continue;
            }

            if let Some(small) = n.to_u64().filter(|&x| x < TRIAL_DIVISION_LIMIT) {
                factors.extend(trial_division(small).into_iter().map(BigUint::from));
                continue;
            }

            for &p in small_primes() {
                while (&n % p).is_zero() {
                    factors.push(BigUint::from(p));
                    n /= p;
                }
            }

            if n.is_one() {
                continue;
            }

            if BigUintExt(&n).is_probable_prime(test_rounds, rng) {
                factors.push(n);
                continue;
            }

            let d = Self::pollard_rho(&n, rng, budget)?;
            log::trace!("pollard rho split a {}-bit residual", n.bits());
            pending.push(&n / &d);
            pending.push(d);
        }

        factors.sort();
        Ok(factors)
    }

    /// The distinct prime factors of `self`, ascending.
    pub fn distinct_prime_factors<R: Rand>(
        &self,
        test_rounds: usize,
        rng: &mut R,
        budget: SearchBudget,
    ) -> Result<Vec<BigUint>, NumError> {
        let mut factors = self.prime_factors(test_rounds, rng, budget)?;
        factors.dedup();
        Ok(factors)
    }

    /// Pollard's rho on an odd composite `n`: iterate $f(x) = x^2 + c \mod n$ with Floyd's
    /// cycle detection until $gcd(|x - y|, n)$ is a non-trivial divisor. A polynomial that
    /// degenerates to the full `n`, or runs past [`RHO_MAX_STEPS`], is replaced by one with
    /// a fresh random `c`.
    ///
    /// The differences are multiplied together mod n and one gcd is taken per
    /// [`RHO_BATCH`] steps; a batch whose gcd is `n` is replayed step by step.
    fn pollard_rho<R: Rand>(
        n: &BigUint,
        rng: &mut R,
        budget: SearchBudget,
    ) -> Result<BigUint, NumError> {
        let (one, n_m1) = (BigUint::one(), n - 1u32);

        for attempt in budget.attempts() {
            let c = BigUintExt(&one).gen_range(&n_m1, rng);
            let f = |x: &BigUint| (x * x + &c) % n;
            let step = |x: &mut BigUint, y: &mut BigUint| {
                *x = f(x);
                *y = f(&f(y));
                if *x > *y {
                    &*x - &*y
                } else {
                    &*y - &*x
                }
            };

            let (mut x, mut y) = (BigUint::from(2u32), BigUint::from(2u32));
            let mut steps = 0;
            while steps < RHO_MAX_STEPS {
                let (x0, y0) = (x.clone(), y.clone());
                let mut acc = one.clone();
                for _ in 0..RHO_BATCH {
                    acc = acc * step(&mut x, &mut y) % n;
                }
                steps += RHO_BATCH;

                let d = acc.gcd(n);
                if d.is_one() {
                    continue;
                }

                if &d != n {
                    return Ok(d);
                }

                (x, y) = (x0, y0);
                let d = (0..RHO_BATCH)
                    .map(|_| step(&mut x, &mut y).gcd(n))
                    .find(|d| !d.is_one());
                if let Some(d) = d.filter(|d| d != n) {
                    return Ok(d);
                }

                break;
            }

            log::trace!("pollard rho: polynomial {attempt} gave up after {steps} steps, retrying");
        }

        Err(budget.exhausted("pollard_rho"))
    }
}

fn trial_division(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    while n > 1 && n % 2 == 0 {
        factors.push(2);
        n /= 2;
    }

    let mut i = 3;
    while i * i <= n {
        while n % i == 0 {
            factors.push(i);
            n /= i;
        }
        i += 2;
    }

    if n > 1 {
        factors.push(n);
    }

    factors
}
