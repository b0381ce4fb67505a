use crate::cmd::{rng, Cmd};
use crate::config::SealConfig;
use cipher::dsa::{DomainParameters, KeyPair};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::sync::Arc;
use std::time::Instant;

pub struct DsaKeyCmd;

impl Cmd for DsaKeyCmd {
    const NAME: &'static str = "dsa";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("dsa domain parameters and key pair generate")
            .arg(
                Arg::new("p-bits")
                    .long("p-bits")
                    .short('l')
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(usize))
                    .help("to specify the bits length of the modulus p"),
            )
            .arg(
                Arg::new("q-bits")
                    .long("q-bits")
                    .short('n')
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(usize))
                    .help("to specify the bits length of the subgroup order q"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let config = SealConfig::config();
        let (p_bits, q_bits) = (
            m.get_one::<usize>("p-bits").copied().unwrap_or(config.dsa_p_bits),
            m.get_one::<usize>("q-bits").copied().unwrap_or(config.dsa_q_bits),
        );
        let mut rng = rng(config);

        let now = Instant::now();
        let params = DomainParameters::generate_with_sizes(
            p_bits,
            q_bits,
            config.prime_test_rounds,
            &mut rng,
            config.budget(),
        )?;
        log::info!(
            "generated {p_bits}/{q_bits} domain parameters in {:?}",
            now.elapsed()
        );

        let key = KeyPair::generate(Arc::new(params), &mut rng);
        println!("{}", serde_json::to_string_pretty(&key)?);
        Ok(())
    }
}
