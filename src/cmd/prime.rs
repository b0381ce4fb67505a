use crate::cmd::{parse_biguint, rng, Cmd};
use crate::config::SealConfig;
use clap::{value_parser, Arg, ArgAction, ArgGroup, ArgMatches, Command};
use num_bigint::BigUint;
use utils::BigUintExt;

pub struct PrimeCmd;

impl Cmd for PrimeCmd {
    const NAME: &'static str = "prime";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("generate a probable prime, or test whether a number is prime")
            .arg(
                Arg::new("number")
                    .value_name("NUMBER")
                    .action(ArgAction::Set)
                    .value_parser(parse_biguint)
                    .help("the number to test, decimal or 0x-prefixed hex"),
            )
            .arg(
                Arg::new("bits")
                    .long("bits")
                    .short('b')
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(usize))
                    .help("to generate a prime with the specified bits length"),
            )
            .arg(
                Arg::new("test")
                    .long("test")
                    .short('t')
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(usize))
                    .help("to specify the Miller-Rabin test rounds"),
            )
            .group(
                ArgGroup::new("mode")
                    .args(["number", "bits"])
                    .required(true),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let config = SealConfig::config();
        let rounds = m
            .get_one::<usize>("test")
            .copied()
            .unwrap_or(config.prime_test_rounds);
        let mut rng = rng(config);

        if let Some(n) = m.get_one::<BigUint>("number") {
            let verdict = if BigUintExt(n).is_probable_prime(rounds, &mut rng) {
                "probably prime"
            } else {
                "composite"
            };
            println!("{n} is {verdict}");
        } else if let Some(&bits) = m.get_one::<usize>("bits") {
            let p = BigUintExt::<BigUint>::generate_prime(bits, rounds, &mut rng, config.budget())?;
            println!("{p}");
        }

        Ok(())
    }
}
