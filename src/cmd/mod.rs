use crate::config::SealConfig;
use crate::error::SealError;
use cipher::{DefaultRand, Rand, SeededRand};
use clap::{ArgMatches, Command};
use num_bigint::BigUint;
use num_traits::Num;

pub trait Cmd {
    const NAME: &'static str;

    fn cmd() -> Command;

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()>;
}

/// `seed`存在时使用可复现的随机源, 否则使用OsRng
pub fn rng(config: &SealConfig) -> Box<dyn Rand> {
    match config.seed {
        Some(seed) => {
            log::info!("using the seeded random source, seed: {seed}");
            Box::new(SeededRand::new(seed))
        }
        None => Box::new(DefaultRand::default()),
    }
}

/// 十进制或`0x`开头的十六进制
pub fn parse_biguint(s: &str) -> Result<BigUint, SealError> {
    let s = s.trim();
    let n = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => BigUint::from_str_radix(hex, 16),
        None => BigUint::from_str_radix(s, 10),
    };

    n.map_err(|_| SealError::InvalidNumber(s.to_string()))
}

mod prime;
pub use prime::PrimeCmd;

mod factor;
pub use factor::FactorCmd;

mod generator;
pub use generator::GeneratorCmd;

mod keygen;
pub use keygen::KeygenCmd;

mod demo;
pub use demo::DemoCmd;
