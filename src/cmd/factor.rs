use crate::cmd::{parse_biguint, rng, Cmd};
use crate::config::SealConfig;
use clap::{Arg, ArgAction, ArgMatches, Command};
use num_bigint::BigUint;
use utils::BigUintExt;

pub struct FactorCmd;

impl Cmd for FactorCmd {
    const NAME: &'static str = "factor";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("factor a number with trial division and Pollard's rho")
            .arg(
                Arg::new("number")
                    .value_name("NUMBER")
                    .action(ArgAction::Set)
                    .required(true)
                    .value_parser(parse_biguint)
                    .help("the number to factor, decimal or 0x-prefixed hex"),
            )
            .arg(
                Arg::new("distinct")
                    .long("distinct")
                    .short('d')
                    .action(ArgAction::SetTrue)
                    .help("only print the distinct prime factors"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let config = SealConfig::config();
        let mut rng = rng(config);
        let n = BigUintExt(m.get_one::<BigUint>("number").cloned().unwrap_or_default());

        let factors = if m.get_flag("distinct") {
            n.distinct_prime_factors(config.prime_test_rounds, &mut rng, config.budget())?
        } else {
            n.prime_factors(config.prime_test_rounds, &mut rng, config.budget())?
        };

        let factors = factors
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(" * ");
        println!("{} = {factors}", n.0);

        Ok(())
    }
}
