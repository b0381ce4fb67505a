use crate::error::SealError;
use cipher::{CodePointSum, MessageDigest, SearchBudget, Sha256Digest};
use config::Config;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

static CONFIG: OnceLock<SealConfig> = OnceLock::new();

/// Digest used for DSA signatures.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DigestKind {
    #[default]
    CodePoint,
    Sha256,
}

impl MessageDigest for DigestKind {
    fn digest(&self, msg: &str) -> BigUint {
        match self {
            Self::CodePoint => CodePointSum.digest(msg),
            Self::Sha256 => Sha256Digest.digest(msg),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SealConfig {
    // Miller-Rabin rounds
    pub prime_test_rounds: usize,

    // candidates per randomized search, 0 means unbounded
    pub max_attempts: usize,

    pub generator_max_attempts: usize,

    // ElGamal modulus bits
    pub elgamal_bits: usize,

    pub dsa_p_bits: usize,
    pub dsa_q_bits: usize,

    // AES key byte size: 16, 24 or 32
    pub sym_key_len: usize,

    pub digest: DigestKind,

    // replay a run with a seeded random source
    pub seed: Option<u64>,
}

impl Default for SealConfig {
    fn default() -> Self {
        Self {
            prime_test_rounds: cipher::DEFAULT_PRIME_TEST_ROUNDS,
            max_attempts: SearchBudget::DEFAULT_MAX_ATTEMPTS,
            generator_max_attempts: cipher::elgamal::DEFAULT_GENERATOR_ATTEMPTS,
            elgamal_bits: 128,
            dsa_p_bits: 1024,
            dsa_q_bits: 160,
            sym_key_len: 16,
            digest: DigestKind::CodePoint,
            seed: None,
        }
    }
}

impl SealConfig {
    /// the installed config, or the defaults overlaid with `SEALBOX__*` environment variables
    pub fn config() -> &'static Self {
        CONFIG.get_or_init(|| {
            Self::load(None).unwrap_or_else(|e| {
                log::warn!("{e}, fall back to the default config");
                Self::default()
            })
        })
    }

    /// Loads the config, overrides the seed when `seed` is given and installs it
    /// process-wide. A config installed earlier is kept.
    pub fn init(f: Option<&Path>, seed: Option<u64>) -> anyhow::Result<&'static Self> {
        let mut config = Self::load(f)?;
        if seed.is_some() {
            config.seed = seed;
        }

        if CONFIG.set(config).is_err() {
            log::warn!("config has been installed, ignore the new one");
        }

        Ok(Self::config())
    }

    /// defaults <- environment variables (`SEALBOX__` prefix) <- file `f`
    pub fn load(f: Option<&Path>) -> anyhow::Result<Self> {
        let default_config = Config::try_from(&SealConfig::default())?;

        let mut config = Config::builder().add_source(default_config).add_source(
            config::Environment::with_prefix("SEALBOX")
                .try_parsing(true)
                .separator("__"),
        );

        if let Some(f) = f {
            config = config.add_source(config::File::from(f).required(true));
        }

        let config: SealConfig = config.build()?.try_deserialize()?;
        config.validate()?;

        log::trace!("{:?}", config);

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SealError> {
        let invalid = |msg: String| -> Result<(), SealError> { Err(SealError::InvalidConfig(msg)) };

        if self.prime_test_rounds == 0 {
            return invalid("`prime_test_rounds` must be positive".to_string());
        }

        if self.elgamal_bits < 3 {
            return invalid(format!("`elgamal_bits` {} is too small", self.elgamal_bits));
        }

        if self.dsa_q_bits < 2 || self.dsa_p_bits <= self.dsa_q_bits + 1 {
            return invalid(format!(
                "`dsa_q_bits` {} does not fit into `dsa_p_bits` {}",
                self.dsa_q_bits, self.dsa_p_bits
            ));
        }

        if !matches!(self.sym_key_len, 16 | 24 | 32) {
            return invalid(format!(
                "`sym_key_len` {} is not an AES key length",
                self.sym_key_len
            ));
        }

        Ok(())
    }

    pub fn budget(&self) -> SearchBudget {
        if self.max_attempts == 0 {
            SearchBudget::unbounded()
        } else {
            SearchBudget::at_most(self.max_attempts)
        }
    }
}
