use crate::Rand;
use xrand::rngs::StdRng;
use xrand::{RngCore, SeedableRng};

/// Deterministic source for replaying a run, e.g. in tests. <br>
/// 相同的种子生成相同的字节序列.
#[derive(Clone, Debug)]
pub struct SeededRand {
    rng: StdRng,
}

impl SeededRand {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Rand for SeededRand {
    fn rand(&mut self, random: &mut [u8]) {
        self.rng.fill_bytes(random);
    }
}
