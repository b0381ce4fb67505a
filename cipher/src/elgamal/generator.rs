use crate::{CipherError, Rand};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use utils::{BigUintExt, SearchBudget};

/// 生成元搜索的默认尝试次数
pub const DEFAULT_GENERATOR_ATTEMPTS: usize = 100;

/// `g` generates $Z_p^*$ iff $g^{(p-1)/f} \ne 1 \mod p$ for every distinct prime factor
/// `f` of $p - 1$; `factors` must hold exactly those primes.
pub fn is_generator(g: &BigUint, p: &BigUint, factors: &[BigUint]) -> bool {
    if p <= &BigUint::one() || (g % p).is_zero() {
        return false;
    }

    let p_m1 = p - 1u32;
    factors
        .iter()
        .all(|f| !g.modpow(&(&p_m1 / f), p).is_one())
}

/// Finds a generator of the multiplicative group mod the prime `p`.
///
/// Factors $p - 1$ (rho restarts bounded by `factor_budget`), then draws candidates
/// from $[2, p-1]$ until one passes [`is_generator`], giving up with
/// [`CipherError::GeneratorNotFound`] after `max_attempts` candidates.
pub fn find_generator<R: Rand>(
    p: &BigUint,
    max_attempts: usize,
    test_rounds: usize,
    rng: &mut R,
    factor_budget: SearchBudget,
) -> Result<BigUint, CipherError> {
    if p == &BigUint::from(2u32) {
        return Ok(BigUint::one());
    }

    if p < &BigUint::from(2u32) {
        return Err(CipherError::InvalidParameters(format!(
            "elgamal: modulus `{p}` is not prime"
        )));
    }

    let p_m1 = p - 1u32;
    let factors = BigUintExt(&p_m1).distinct_prime_factors(test_rounds, rng, factor_budget)?;
    log::debug!(
        "elgamal: p - 1 has {} distinct prime factors, largest {} bits",
        factors.len(),
        factors.last().map(|f| f.bits()).unwrap_or(0)
    );

    let two = BigUint::from(2u32);
    for attempt in 1..=max_attempts {
        let g = BigUintExt(&two).gen_range(&p_m1, rng);
        if is_generator(&g, p, &factors) {
            log::debug!("elgamal: generator found after {attempt} candidates");
            return Ok(g);
        }
    }

    log::warn!("elgamal: no generator after {max_attempts} candidates");
    Err(CipherError::GeneratorNotFound {
        attempts: max_attempts,
    })
}
