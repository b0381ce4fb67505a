use super::{KeyPair, PublicKey, Signature};
use crate::{CipherError, MessageDigest, Rand};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use utils::{BigUintExt, NumError, SearchBudget};

/// DSA signer/verifier over a pluggable message digest.
///
/// The digest is fixed by the type parameter, so swapping [`crate::CodePointSum`] for a real
/// hash does not touch the signing equations.
pub struct Dsa<D: MessageDigest> {
    digest: D,
    budget: SearchBudget,
}

impl<D: MessageDigest> Dsa<D> {
    pub fn new(digest: D) -> Self {
        Self {
            digest,
            budget: SearchBudget::default(),
        }
    }

    /// bound on ephemeral `k` draws per signature
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn digest(&self) -> &D {
        &self.digest
    }

    /// $r = (g^k \mod p) \mod q$, $s = k^{-1}(h + xr) \mod q$.
    ///
    /// A fresh ephemeral $k \in [1, q-1]$ is drawn until `r` and `s` are both non-zero
    /// and `k` is invertible mod q.
    pub fn sign<R: Rand>(
        &self,
        msg: &str,
        key: &KeyPair,
        rng: &mut R,
    ) -> Result<Signature, CipherError> {
        let params = key.params();
        let (p, q, g) = (params.p(), params.q(), params.g());
        let h = self.digest.digest(msg);
        let q_m1 = q - 1u32;

        for attempt in self.budget.attempts() {
            let k = BigUintExt(BigUint::one()).gen_range(&q_m1, rng);

            let r = g.modpow(&k, p) % q;
            if r.is_zero() {
                log::trace!("dsa: r = 0, drawing a new k");
                continue;
            }

            let k_inv = match BigUintExt(&k).modinv(q) {
                Ok(inv) => inv,
                Err(NumError::NoInverse) => {
                    log::trace!("dsa: k is not invertible mod q, drawing a new k");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let s = k_inv * (&h + key.private_key() * &r) % q;
            if s.is_zero() {
                log::trace!("dsa: s = 0, drawing a new k");
                continue;
            }

            log::trace!("dsa: signed after {attempt} ephemeral draws");
            return Ok(Signature::new(r, s));
        }

        Err(self.budget.exhausted("dsa: ephemeral k").into())
    }

    /// $w = s^{-1} \mod q$, $v = (g^{hw} y^{rw} \mod p) \mod q$, valid iff $v = r$.
    pub fn verify(&self, msg: &str, sig: &Signature, key: &PublicKey) -> bool {
        let params = key.params();
        let (p, q, g) = (params.p(), params.q(), params.g());

        if !sig.is_in_range(q) {
            return false;
        }

        let Ok(w) = BigUintExt(sig.s()).modinv(q) else {
            return false;
        };

        let h = self.digest.digest(msg);
        let (u1, u2) = (h * &w % q, sig.r() * &w % q);
        let v = g.modpow(&u1, p) * key.y().modpow(&u2, p) % p % q;

        &v == sig.r()
    }
}

impl<D: MessageDigest + Default> Default for Dsa<D> {
    fn default() -> Self {
        Self::new(D::default())
    }
}
