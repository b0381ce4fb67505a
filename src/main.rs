use clap::{value_parser, Arg, ArgAction, Command};
use log::LevelFilter;
use sealbox::cmd::{Cmd, DemoCmd, FactorCmd, GeneratorCmd, KeygenCmd, PrimeCmd};
use sealbox::config::SealConfig;
use sealbox::error::SealError;
use std::path::PathBuf;

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let version = env!("SEALBOX_VERSION_INFO");
    let app = Command::new("sealbox")
        .version(version)
        .about("dsa signatures, elgamal encryption and signed hybrid envelopes")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .action(ArgAction::Set)
                .value_parser(value_parser!(PathBuf))
                .global(true)
                .help("to specify the config file"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .short('s')
                .action(ArgAction::Set)
                .value_parser(value_parser!(u64))
                .global(true)
                .help("to replay a run with a seeded random source"),
        )
        .subcommand(PrimeCmd::cmd())
        .subcommand(FactorCmd::cmd())
        .subcommand(GeneratorCmd::cmd())
        .subcommand(KeygenCmd::cmd())
        .subcommand(DemoCmd::cmd())
        .get_matches();

    let Some((s, m)) = app.subcommand() else {
        println!(
            "{} {} {}",
            env!("CARGO_PKG_NAME"),
            version,
            env!("SEALBOX_GIT_INFO")
        );
        return;
    };

    let config = m.get_one::<PathBuf>("config").map(PathBuf::as_path);
    let seed = m.get_one::<u64>("seed").copied();
    if let Err(e) = SealConfig::init(config, seed) {
        log::error!("{e}");
        std::process::exit(1);
    }

    let res = match s {
        PrimeCmd::NAME => PrimeCmd.run(m),
        FactorCmd::NAME => FactorCmd.run(m),
        GeneratorCmd::NAME => GeneratorCmd.run(m),
        KeygenCmd::NAME => KeygenCmd.run(m),
        DemoCmd::NAME => DemoCmd.run(m),
        name => Err(SealError::NotSupport(name.to_string()).into()),
    };

    if let Err(e) = res {
        log::error!("{e}");
        std::process::exit(1);
    }
}
