use crate::cmd::Cmd;
use crate::error::SealError;
use clap::{ArgMatches, Command};

mod dsa;
use dsa::DsaKeyCmd;

mod elgamal;
use elgamal::ElGamalKeyCmd;

pub struct KeygenCmd;

impl Cmd for KeygenCmd {
    const NAME: &'static str = "keygen";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("generate key pairs and print them as json")
            .subcommand(DsaKeyCmd::cmd())
            .subcommand(ElGamalKeyCmd::cmd())
            .subcommand_required(true)
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        match m.subcommand() {
            Some((DsaKeyCmd::NAME, m)) => DsaKeyCmd.run(m),
            Some((ElGamalKeyCmd::NAME, m)) => ElGamalKeyCmd.run(m),
            Some((other, _m)) => Err(SealError::NotSupport(format!("{other} key generation")).into()),
            None => anyhow::bail!("need to specify the key name"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DsaKeyCmd, ElGamalKeyCmd, KeygenCmd};
    use crate::cmd::Cmd;
    use crate::error::SealError;
    use clap::Command;

    #[test]
    fn unknown_key_kind() {
        let m = Command::new(KeygenCmd::NAME)
            .subcommand(Command::new("rsa"))
            .get_matches_from([KeygenCmd::NAME, "rsa"]);

        let e = KeygenCmd.run(&m).unwrap_err();
        assert!(matches!(
            e.downcast_ref::<SealError>(),
            Some(SealError::NotSupport(s)) if s.contains("rsa")
        ));
    }

    #[test]
    fn keys_are_printed_only() {
        for cmd in [DsaKeyCmd::cmd(), ElGamalKeyCmd::cmd()] {
            let name = cmd.get_name().to_string();
            assert!(cmd
                .try_get_matches_from([name.as_str(), "--output", "key.json"])
                .is_err());
        }
    }
}
