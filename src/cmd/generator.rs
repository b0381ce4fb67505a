use crate::cmd::{parse_biguint, rng, Cmd};
use crate::config::SealConfig;
use cipher::elgamal::find_generator;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use num_bigint::BigUint;
use utils::BigUintExt;

pub struct GeneratorCmd;

impl Cmd for GeneratorCmd {
    const NAME: &'static str = "generator";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("find a generator of the multiplicative group modulo a prime")
            .arg(
                Arg::new("prime")
                    .long("prime")
                    .short('p')
                    .value_name("PRIME")
                    .action(ArgAction::Set)
                    .required(true)
                    .value_parser(parse_biguint)
                    .help("the prime modulus, decimal or 0x-prefixed hex"),
            )
            .arg(
                Arg::new("attempts")
                    .long("attempts")
                    .short('a')
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(usize))
                    .help("to specify the maximum candidates to try"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let config = SealConfig::config();
        let mut rng = rng(config);
        let p = m.get_one::<BigUint>("prime").cloned().unwrap_or_default();
        let attempts = m
            .get_one::<usize>("attempts")
            .copied()
            .unwrap_or(config.generator_max_attempts);

        if !BigUintExt(&p).is_probable_prime(config.prime_test_rounds, &mut rng) {
            anyhow::bail!("`{p}` is not a prime");
        }

        let g = find_generator(
            &p,
            attempts,
            config.prime_test_rounds,
            &mut rng,
            config.budget(),
        )?;
        println!("{g}");

        Ok(())
    }
}
