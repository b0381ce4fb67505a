use super::DomainParameters;
use crate::Rand;
use num_bigint::BigUint;
use num_traits::One;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use utils::BigUintExt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    params: Arc<DomainParameters>,
    // y = g^x mod p
    y: BigUint,
}

/// DSA key pair. The private scalar `x` is owned by the signer only and is never
/// printed by `Debug`.
#[derive(Clone, Serialize, Deserialize)]
pub struct KeyPair {
    pk: PublicKey,
    // x in [1, q-1]
    x: BigUint,
}

impl PublicKey {
    /// note: not to check `y` is in the order-q subgroup
    pub fn new_uncheck(params: Arc<DomainParameters>, y: BigUint) -> Self {
        Self { params, y }
    }

    pub fn params(&self) -> &DomainParameters {
        &self.params
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }
}

impl KeyPair {
    /// 随机选择$x \in [1, q-1]$, 计算$y = g^x \mod p$.
    pub fn generate<R: Rand>(params: Arc<DomainParameters>, rng: &mut R) -> Self {
        let q_m1 = params.q() - 1u32;
        let x = BigUintExt(BigUint::one()).gen_range(&q_m1, rng);
        Self::new_uncheck(params, x)
    }

    /// note: not to check `x` is in $[1, q-1]$
    pub fn new_uncheck(params: Arc<DomainParameters>, x: BigUint) -> Self {
        let y = params.g().modpow(&x, params.p());
        Self {
            pk: PublicKey::new_uncheck(params, y),
            x,
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }

    pub fn params(&self) -> &DomainParameters {
        self.pk.params()
    }

    pub fn private_key(&self) -> &BigUint {
        &self.x
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{params: {}, y: {:#x}}}", self.params, self.y)
    }
}

impl Debug for KeyPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("pk", &self.pk)
            .field("x", &"<redacted>")
            .finish()
    }
}
