use super::{find_generator, Ciphertext};
use crate::{CipherError, Rand};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use utils::{BigUintExt, NumError, SearchBudget};

/// Rho polynomials tried per composite residual of $p - 1$ during key generation. A
/// modulus whose $p - 1$ resists is replaced by a fresh prime rather than retried.
const KEYGEN_FACTOR_BUDGET: SearchBudget = SearchBudget::at_most(2);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey {
    // generator of Z_p^*
    a: BigUint,
    // prime modulus
    p: BigUint,
    // b = a^x mod p
    b: BigUint,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKey {
    // x in [2, p-2]
    x: BigUint,
}

/// Generates a `bits_len`-bit prime `p`, a generator `a` of $Z_p^*$, a private
/// $x \in [2, p-2]$ and $b = a^x \mod p$.
///
/// `budget` bounds both the prime search and the number of primes tried when
/// factoring $p - 1$ fails; [`CipherError::GeneratorNotFound`] is surfaced as is.
pub fn generate_key<R: Rand>(
    bits_len: usize,
    test_rounds: usize,
    generator_attempts: usize,
    rng: &mut R,
    budget: SearchBudget,
) -> Result<(PublicKey, PrivateKey), CipherError> {
    if bits_len < 3 {
        return Err(CipherError::InvalidParameters(format!(
            "elgamal: modulus size `{bits_len}` is too small"
        )));
    }

    generate_key_from(
        |rng: &mut R| BigUintExt::<BigUint>::generate_prime(bits_len, test_rounds, rng, budget),
        test_rounds,
        generator_attempts,
        KEYGEN_FACTOR_BUDGET,
        rng,
        budget,
    )
}

// `next_prime`每次给出一个新的素数模数; 分解p-1耗尽`factor_budget`时换下一个.
fn generate_key_from<R, F>(
    mut next_prime: F,
    test_rounds: usize,
    generator_attempts: usize,
    factor_budget: SearchBudget,
    rng: &mut R,
    budget: SearchBudget,
) -> Result<(PublicKey, PrivateKey), CipherError>
where
    R: Rand,
    F: FnMut(&mut R) -> Result<BigUint, NumError>,
{
    for attempt in budget.attempts() {
        let p = next_prime(rng)?;

        let a = match find_generator(&p, generator_attempts, test_rounds, rng, factor_budget) {
            Ok(a) => a,
            Err(CipherError::SearchExhausted { .. }) => {
                log::debug!("elgamal: p - 1 resisted factorization, drawing prime {}", attempt + 1);
                continue;
            }
            Err(e) => return Err(e),
        };

        let x = BigUintExt(BigUint::from(2u32)).gen_range(&(&p - 2u32), rng);
        let b = a.modpow(&x, &p);

        return Ok((PublicKey::new_uncheck(a, p, b), PrivateKey::new_uncheck(x)));
    }

    Err(budget.exhausted("elgamal: key generation").into())
}

impl PublicKey {
    /// note: not to check `p` is prime, `a` is a generator or `b = a^x mod p`
    pub fn new_uncheck(a: BigUint, p: BigUint, b: BigUint) -> Self {
        Self { a, p, b }
    }

    pub fn a(&self) -> &BigUint {
        &self.a
    }

    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// Encrypts `m < p` under a fresh ephemeral $y \in [2, p-2]$ with $gcd(y, p-1) = 1$.
    pub fn encrypt<R: Rand>(
        &self,
        m: &BigUint,
        rng: &mut R,
        budget: SearchBudget,
    ) -> Result<Ciphertext, CipherError> {
        if m >= &self.p {
            return Err(CipherError::PlaintextTooLarge);
        }

        let (p_m1, p_m2, two) = (&self.p - 1u32, &self.p - 2u32, BigUint::from(2u32));
        let y = 'search: {
            for _ in budget.attempts() {
                let y = BigUintExt(&two).gen_range(&p_m2, rng);
                if BigUintExt(&y).gcd(&p_m1).is_one() {
                    break 'search y;
                }
            }

            return Err(budget.exhausted("elgamal: ephemeral y").into());
        };

        let k = self.a.modpow(&y, &self.p);
        let c = self.b.modpow(&y, &self.p) * m % &self.p;

        Ok(Ciphertext::new(k, c))
    }
}

impl PrivateKey {
    /// note: not to check `x` is in $[2, p-2]$
    pub fn new_uncheck(x: BigUint) -> Self {
        Self { x }
    }

    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// $s = k^x \mod p$, $m = c \cdot s^{p-2} \mod p$.
    pub fn decrypt(&self, ct: &Ciphertext, pk: &PublicKey) -> Result<BigUint, CipherError> {
        let p = pk.modulus();
        if ct.k().is_zero() || ct.k() >= p {
            return Err(CipherError::InvalidCiphertext(
                "elgamal: k must be in [1, p)".to_string(),
            ));
        }

        if ct.c() >= p {
            return Err(CipherError::InvalidCiphertext(
                "elgamal: c must be in [0, p)".to_string(),
            ));
        }

        let s = ct.k().modpow(&self.x, p);
        // 费马小定理: s^(p-2) = s^(-1) mod p
        let s_inv = s.modpow(&(p - 2u32), p);

        Ok(ct.c() * s_inv % p)
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{a: {}, p: {}, b: {}}}", self.a, self.p, self.b)
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey { x: <redacted> }")
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_key, generate_key_from, PrivateKey, PublicKey};
    use crate::elgamal::{is_generator, Ciphertext, DEFAULT_GENERATOR_ATTEMPTS};
    use crate::{CipherError, SearchBudget, SeededRand};
    use num_bigint::BigUint;
    use utils::BigUintExt;

    /// 固定的示例密钥, a = 2并不是生成元, 但加解密仍然成立
    fn sample_key() -> (PublicKey, PrivateKey) {
        let p: BigUint = "784637716923335095479473677900958302012794430558004314147"
            .parse()
            .unwrap();
        let b: BigUint = "512611549290850354559007451159799160374583379513555087922"
            .parse()
            .unwrap();
        let x: BigUint = "740087272825788791299402804606531437541517101921654580582"
            .parse()
            .unwrap();
        (
            PublicKey::new_uncheck(BigUint::from(2u32), p, b),
            PrivateKey::new_uncheck(x),
        )
    }

    #[test]
    fn sample_round_trip() {
        let mut rng = SeededRand::new(31);
        let (pk, sk) = sample_key();
        assert_eq!(pk.a().modpow(sk.x(), pk.modulus()), *pk.b());

        let messages = [
            BigUint::from(0u32),
            BigUint::from(1u32),
            "110873557931294071764567408812199994745".parse().unwrap(),
            pk.modulus() - 1u32,
        ];

        for m in messages {
            let ct = pk.encrypt(&m, &mut rng, SearchBudget::default()).unwrap();
            assert_eq!(sk.decrypt(&ct, &pk).unwrap(), m);
        }
    }

    #[test]
    fn probabilistic() {
        let mut rng = SeededRand::new(32);
        let (pk, sk) = sample_key();
        let m = BigUint::from(42u32);
        let (c1, c2) = (
            pk.encrypt(&m, &mut rng, SearchBudget::default()).unwrap(),
            pk.encrypt(&m, &mut rng, SearchBudget::default()).unwrap(),
        );
        assert_ne!(c1, c2);
        assert_eq!(sk.decrypt(&c1, &pk).unwrap(), sk.decrypt(&c2, &pk).unwrap());
    }

    #[test]
    fn plaintext_too_large() {
        let mut rng = SeededRand::new(33);
        let (pk, _) = sample_key();
        for m in [pk.modulus().clone(), pk.modulus() + 1u32] {
            assert_eq!(
                pk.encrypt(&m, &mut rng, SearchBudget::default()),
                Err(CipherError::PlaintextTooLarge)
            );
        }
    }

    #[test]
    fn invalid_ciphertext() {
        let (pk, sk) = sample_key();
        let p = pk.modulus().clone();
        for ct in [
            Ciphertext::new(BigUint::from(0u32), BigUint::from(1u32)),
            Ciphertext::new(p.clone(), BigUint::from(1u32)),
            Ciphertext::new(BigUint::from(1u32), p.clone()),
        ] {
            assert!(matches!(
                sk.decrypt(&ct, &pk),
                Err(CipherError::InvalidCiphertext(_))
            ));
        }
    }

    #[test]
    fn generated_keys() {
        let mut rng = SeededRand::new(34);
        for bits in [16, 32, 64] {
            let (pk, sk) =
                generate_key(bits, 5, DEFAULT_GENERATOR_ATTEMPTS, &mut rng, SearchBudget::default())
                    .unwrap();
            let p = pk.modulus();
            assert_eq!(p.bits() as usize, bits);
            assert!(BigUintExt(p).is_probable_prime(10, &mut rng));
            assert!(sk.x() >= &BigUint::from(2u32) && sk.x() <= &(p - 2u32));
            assert_eq!(&pk.a().modpow(sk.x(), p), pk.b());

            let factors = BigUintExt(&(p - 1u32))
                .distinct_prime_factors(5, &mut rng, SearchBudget::default())
                .unwrap();
            assert!(is_generator(pk.a(), p, &factors));

            for m in [0u32, 1, 2, 255] {
                let m = BigUint::from(m) % p;
                let ct = pk.encrypt(&m, &mut rng, SearchBudget::default()).unwrap();
                assert_eq!(sk.decrypt(&ct, &pk).unwrap(), m);
            }
        }
    }

    #[test]
    fn generated_key_128() {
        let mut rng = SeededRand::new(35);
        let (pk, sk) =
            generate_key(128, 5, DEFAULT_GENERATOR_ATTEMPTS, &mut rng, SearchBudget::default())
                .unwrap();
        let m = BigUint::from_bytes_be(b"Test16bytekey123") % pk.modulus();
        let ct = pk.encrypt(&m, &mut rng, SearchBudget::default()).unwrap();
        assert_eq!(sk.decrypt(&ct, &pk).unwrap(), m);
    }

    #[test]
    fn resample_unfactored_modulus() {
        // 400780379 - 1 = 2 * 10009 * 20021, 两个因子都不在小素数表内, 需要rho
        let (hard, easy) = (BigUint::from(400_780_379u32), BigUint::from(1_000_003u32));
        let no_rho = SearchBudget::at_most(0);

        let mut rng = SeededRand::new(37);
        let mut primes = vec![easy.clone(), hard.clone(), hard.clone()];
        let (pk, sk) = generate_key_from(
            |_: &mut SeededRand| Ok(primes.pop().unwrap()),
            5,
            DEFAULT_GENERATOR_ATTEMPTS,
            no_rho,
            &mut rng,
            SearchBudget::at_most(3),
        )
        .unwrap();
        assert!(primes.is_empty());
        assert_eq!(pk.modulus(), &easy);
        assert_eq!(&pk.a().modpow(sk.x(), &easy), pk.b());

        let mut draws = 0;
        let res = generate_key_from(
            |_: &mut SeededRand| {
                draws += 1;
                Ok(hard.clone())
            },
            5,
            DEFAULT_GENERATOR_ATTEMPTS,
            no_rho,
            &mut rng,
            SearchBudget::at_most(3),
        );
        assert_eq!(
            res,
            Err(CipherError::SearchExhausted {
                what: "elgamal: key generation",
                attempts: 3
            })
        );
        assert_eq!(draws, 3);

        // 预算足够时同一个模数可以直接使用
        let (pk, _) = generate_key_from(
            |_: &mut SeededRand| Ok(hard.clone()),
            5,
            DEFAULT_GENERATOR_ATTEMPTS,
            SearchBudget::at_most(8),
            &mut rng,
            SearchBudget::at_most(1),
        )
        .unwrap();
        assert_eq!(pk.modulus(), &hard);
    }

    #[test]
    fn invalid_size() {
        let mut rng = SeededRand::new(36);
        assert!(matches!(
            generate_key(2, 5, 10, &mut rng, SearchBudget::default()),
            Err(CipherError::InvalidParameters(_))
        ));
    }

    #[test]
    fn private_key_is_redacted() {
        let (_, sk) = sample_key();
        assert!(!format!("{sk:?}").contains(&sk.x().to_string()));
    }
}
