use crate::{CipherError, Rand};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use utils::{BigUintExt, SearchBudget};

/// DSA domain parameters $(p, q, g)$.
///
/// Immutable once generated; key pairs share one instance through an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainParameters {
    // 1024-bit prime modulus
    p: BigUint,
    // 160-bit prime, q | (p - 1)
    q: BigUint,
    // g = h^((p-1)/q) mod p, order q
    g: BigUint,
}

impl DomainParameters {
    pub const P_BITS: usize = 1024;
    pub const Q_BITS: usize = 160;

    /// note: not to check `(p, q, g)` are valid domain parameters, see [`Self::validate`]
    pub fn new_uncheck(p: BigUint, q: BigUint, g: BigUint) -> Self {
        Self { p, q, g }
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// 生成1024位的p和160位的q
    pub fn generate<R: Rand>(
        test_rounds: usize,
        rng: &mut R,
        budget: SearchBudget,
    ) -> Result<Self, CipherError> {
        Self::generate_with_sizes(Self::P_BITS, Self::Q_BITS, test_rounds, rng, budget)
    }

    /// Generates a `q_bits` prime `q`, then a `p_bits` prime `p = k * q + 1`, then a
    /// generator `g` of the order-q subgroup.
    ///
    /// `k` is drawn from the range whose products have exactly `p_bits` bits, and is
    /// forced even so that `p` is odd. Each of the three searches draws at most
    /// `budget` candidates.
    pub fn generate_with_sizes<R: Rand>(
        p_bits: usize,
        q_bits: usize,
        test_rounds: usize,
        rng: &mut R,
        budget: SearchBudget,
    ) -> Result<Self, CipherError> {
        if q_bits < 2 || p_bits <= q_bits + 1 {
            return Err(CipherError::InvalidParameters(format!(
                "dsa: cannot fit a {q_bits}-bit q into a {p_bits}-bit p"
            )));
        }

        let q = BigUintExt::<BigUint>::generate_prime(q_bits, test_rounds, rng, budget)?;

        // p = k * q + 1 in [2^(L-1), 2^L - 1]
        let (low, high) = (BigUint::one() << (p_bits - 1), (BigUint::one() << p_bits) - 1u32);
        let k_min = (&low - 1u32) / &q + 1u32;
        let k_max = (&high - 1u32) / &q;

        let p = 'search: {
            for attempt in budget.attempts() {
                let mut k = BigUintExt(&k_min).gen_range(&k_max, rng);
                if k.is_odd() {
                    k += 1u32;
                }

                let p = &k * &q + 1u32;
                if p.bits() as usize == p_bits && BigUintExt(&p).is_probable_prime(test_rounds, rng) {
                    log::debug!("dsa: {p_bits}-bit p found after {attempt} candidates");
                    break 'search p;
                }
            }

            return Err(budget.exhausted("dsa: search p").into());
        };

        let g = Self::find_subgroup_generator(&p, &q, rng, budget)?;

        Ok(Self { p, q, g })
    }

    /// $g = h^{(p-1)/q} \mod p$ for random $h \in [2, p-2]$, resampled while $g = 1$.
    fn find_subgroup_generator<R: Rand>(
        p: &BigUint,
        q: &BigUint,
        rng: &mut R,
        budget: SearchBudget,
    ) -> Result<BigUint, CipherError> {
        let e = (p - 1u32) / q;
        let (two, p_m2) = (BigUint::from(2u32), p - 2u32);

        for attempt in budget.attempts() {
            let h = BigUintExt(&two).gen_range(&p_m2, rng);
            let g = h.modpow(&e, p);
            if !g.is_one() {
                log::debug!("dsa: subgroup generator found after {attempt} candidates");
                return Ok(g);
            }

            log::trace!("dsa: h^((p-1)/q) = 1, resampling h");
        }

        Err(budget.exhausted("dsa: search g").into())
    }

    /// 检查: p和q是素数, q | (p-1), 1 < g < p, $g^q \mod p = 1$.
    pub fn validate<R: Rand>(&self, test_rounds: usize, rng: &mut R) -> Result<(), CipherError> {
        let invalid = |msg: &str| -> Result<(), CipherError> {
            Err(CipherError::InvalidParameters(format!("dsa: {msg}")))
        };

        if !BigUintExt(&self.q).is_probable_prime(test_rounds, rng) {
            return invalid("q is not prime");
        }

        if !BigUintExt(&self.p).is_probable_prime(test_rounds, rng) {
            return invalid("p is not prime");
        }

        if !(&self.p - 1u32).is_multiple_of(&self.q) {
            return invalid("q does not divide p - 1");
        }

        if self.g <= BigUint::one() || self.g >= self.p {
            return invalid("g is out of range (1, p)");
        }

        if !self.g.modpow(&self.q, &self.p).is_one() {
            return invalid("g does not have order q");
        }

        Ok(())
    }
}

impl Display for DomainParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{p: {:#x}, q: {:#x}, g: {:#x}}}", self.p, self.q, self.g)
    }
}
