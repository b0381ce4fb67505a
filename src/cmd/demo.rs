use crate::cmd::{rng, Cmd};
use crate::config::SealConfig;
use cipher::dsa::{DomainParameters, Dsa, KeyPair};
use cipher::elgamal::{self, PrivateKey, PublicKey};
use cipher::{AesCbcCipher, HybridEnvelope};
use clap::{Arg, ArgAction, ArgMatches, Command};
use num_bigint::BigUint;
use std::sync::Arc;

// 固定的示例ElGamal密钥
const SAMPLE_P: &str = "784637716923335095479473677900958302012794430558004314147";
const SAMPLE_B: &str = "512611549290850354559007451159799160374583379513555087922";
const SAMPLE_X: &str = "740087272825788791299402804606531437541517101921654580582";

fn sample_elgamal_key() -> anyhow::Result<(PublicKey, PrivateKey)> {
    let (p, b, x) = (
        SAMPLE_P.parse::<BigUint>()?,
        SAMPLE_B.parse::<BigUint>()?,
        SAMPLE_X.parse::<BigUint>()?,
    );

    Ok((
        PublicKey::new_uncheck(BigUint::from(2u32), p, b),
        PrivateKey::new_uncheck(x),
    ))
}

pub struct DemoCmd;

impl Cmd for DemoCmd {
    const NAME: &'static str = "demo";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("seal a message into an envelope and open it again")
            .arg(
                Arg::new("message")
                    .long("message")
                    .short('m')
                    .action(ArgAction::Set)
                    .default_value("SECRET MESSAGE")
                    .help("the plaintext to seal"),
            )
            .arg(
                Arg::new("key")
                    .long("key")
                    .short('k')
                    .action(ArgAction::Set)
                    .default_value("Test16bytekey123")
                    .help("the symmetric key, its byte length must equal `sym_key_len`"),
            )
            .arg(
                Arg::new("fresh")
                    .long("fresh")
                    .action(ArgAction::SetTrue)
                    .help("generate an elgamal key with `elgamal_bits` instead of the sample key"),
            )
    }

    fn run(&self, m: &ArgMatches) -> anyhow::Result<()> {
        let config = SealConfig::config();
        let (msg, key) = (
            m.get_one::<String>("message").cloned().unwrap_or_default(),
            m.get_one::<String>("key").cloned().unwrap_or_default(),
        );
        let mut rng = rng(config);

        let (eg_pk, eg_sk) = if m.get_flag("fresh") {
            elgamal::generate_key(
                config.elgamal_bits,
                config.prime_test_rounds,
                config.generator_max_attempts,
                &mut rng,
                config.budget(),
            )?
        } else {
            sample_elgamal_key()?
        };
        println!("elgamal public key: {eg_pk}");

        let params = DomainParameters::generate_with_sizes(
            config.dsa_p_bits,
            config.dsa_q_bits,
            config.prime_test_rounds,
            &mut rng,
            config.budget(),
        )?;
        let dsa_key = KeyPair::generate(Arc::new(params), &mut rng);
        println!("dsa public key: {}", dsa_key.public_key());

        let body_rng = self::rng(config);
        let cipher = AesCbcCipher::with_key_len(body_rng, config.sym_key_len)?;
        let mut envelope =
            HybridEnvelope::new(cipher, Dsa::new(config.digest)).with_budget(config.budget());

        let sealed = envelope.seal(msg.as_bytes(), key.as_bytes(), &eg_pk, &dsa_key, &mut rng)?;
        println!("envelope: {}", serde_json::to_string_pretty(&sealed)?);

        let opened = envelope.open(&sealed, &eg_sk, &eg_pk, dsa_key.public_key())?;
        println!("opened: {}", String::from_utf8_lossy(&opened));

        if opened != msg.as_bytes() {
            anyhow::bail!("the opened plaintext does not match the sealed one");
        }

        Ok(())
    }
}
