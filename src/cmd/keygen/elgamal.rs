use crate::cmd::{rng, Cmd};
use crate::config::SealConfig;
use cipher::elgamal::generate_key;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

pub struct ElGamalKeyCmd;

impl Cmd for ElGamalKeyCmd {
    const NAME: &'static str = "elgamal";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("elgamal key generate")
            .arg(
                Arg::new("bits")
                    .long("bits")
                    .short('b')
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(usize))
                    .help("to specify the prime modulus bits length"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let config = SealConfig::config();
        let bits = m
            .get_one::<usize>("bits")
            .copied()
            .unwrap_or(config.elgamal_bits);
        let mut rng = rng(config);

        let (pk, sk) = generate_key(
            bits,
            config.prime_test_rounds,
            config.generator_max_attempts,
            &mut rng,
            config.budget(),
        )?;

        let key = serde_json::json!({
            "public": pk,
            "private": sk,
        });
        println!("{}", serde_json::to_string_pretty(&key)?);
        Ok(())
    }
}
