use super::{DomainParameters, Dsa, KeyPair, Signature};
use crate::{CipherError, CodePointSum, Sha256Digest, SearchBudget, SeededRand};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use std::sync::{Arc, OnceLock};
use utils::BigUintExt;

fn cases() -> Vec<&'static str> {
    vec![
        "",
        "Hello, DSA!",
        "sky",
        "algorithm",
        "4243105785427461234 993812374092873409128374",
        r#"The Digital Signature Algorithm (DSA) is a public-key cryptosystem and Federal
Information Processing Standard for digital signatures, based on the mathematical
concept of modular exponentiation and the discrete logarithm problem."#,
    ]
}

fn params() -> Arc<DomainParameters> {
    static PARAMS: OnceLock<Arc<DomainParameters>> = OnceLock::new();
    PARAMS
        .get_or_init(|| {
            let mut rng = SeededRand::new(0x5eed);
            let params =
                DomainParameters::generate_with_sizes(512, 160, 5, &mut rng, SearchBudget::default())
                    .unwrap();
            Arc::new(params)
        })
        .clone()
}

#[test]
fn small_domain_parameters() {
    let mut rng = SeededRand::new(1);
    let params =
        DomainParameters::generate_with_sizes(256, 64, 5, &mut rng, SearchBudget::default()).unwrap();

    assert_eq!(params.p().bits(), 256);
    assert_eq!(params.q().bits(), 64);
    assert!((params.p() - 1u32).is_multiple_of(params.q()));
    assert!(params.g() > &BigUint::one());
    assert!(params.g().modpow(params.q(), params.p()).is_one());
    params.validate(10, &mut rng).unwrap();
}

#[test]
fn default_domain_parameters() {
    let mut rng = SeededRand::new(2);
    let params = DomainParameters::generate(5, &mut rng, SearchBudget::default()).unwrap();

    assert_eq!(params.p().bits() as usize, DomainParameters::P_BITS);
    assert_eq!(params.q().bits() as usize, DomainParameters::Q_BITS);
    params.validate(5, &mut rng).unwrap();
}

#[test]
fn invalid_domain_parameters() {
    let mut rng = SeededRand::new(3);
    assert!(matches!(
        DomainParameters::generate_with_sizes(160, 160, 5, &mut rng, SearchBudget::default()),
        Err(CipherError::InvalidParameters(_))
    ));

    let params = params();
    let (p, q, g) = (params.p().clone(), params.q().clone(), params.g().clone());

    let bad_g = DomainParameters::new_uncheck(p.clone(), q.clone(), BigUint::one());
    assert!(bad_g.validate(5, &mut rng).is_err());

    let bad_q = DomainParameters::new_uncheck(p.clone(), &q + 2u32, g.clone());
    assert!(bad_q.validate(5, &mut rng).is_err());

    let bad_p = DomainParameters::new_uncheck(&p + 2u32, q, g);
    assert!(bad_p.validate(5, &mut rng).is_err());
}

#[test]
fn exhausted_parameter_search() {
    let mut rng = SeededRand::new(4);
    assert!(matches!(
        DomainParameters::generate_with_sizes(512, 160, 5, &mut rng, SearchBudget::at_most(0)),
        Err(CipherError::SearchExhausted { .. })
    ));
}

#[test]
fn key_pair() {
    let mut rng = SeededRand::new(5);
    let params = params();
    for _ in 0..8 {
        let key = KeyPair::generate(params.clone(), &mut rng);
        let x = key.private_key();
        assert!(x >= &BigUint::one() && x < params.q());
        assert_eq!(key.public_key().y(), &params.g().modpow(x, params.p()));
    }

    let key = KeyPair::generate(params, &mut rng);
    assert!(!format!("{key:?}").contains(&key.private_key().to_string()));
}

#[test]
fn sign_verify() {
    let mut rng = SeededRand::new(6);
    let key = KeyPair::generate(params(), &mut rng);
    let dsa = Dsa::new(CodePointSum);

    for case in cases() {
        let sig = dsa.sign(case, &key, &mut rng).unwrap();
        assert!(sig.is_in_range(key.params().q()));
        assert!(dsa.verify(case, &sig, key.public_key()), "verify `{case}` failed");
    }
}

#[test]
fn sign_verify_sha256() {
    let mut rng = SeededRand::new(7);
    let key = KeyPair::generate(params(), &mut rng);
    let dsa = Dsa::new(Sha256Digest);

    for case in cases() {
        let sig = dsa.sign(case, &key, &mut rng).unwrap();
        assert!(dsa.verify(case, &sig, key.public_key()));
        assert!(!dsa.verify("Fake message", &sig, key.public_key()));
    }
}

#[test]
fn tampered_signature() {
    let mut rng = SeededRand::new(8);
    let key = KeyPair::generate(params(), &mut rng);
    let q = key.params().q().clone();
    let dsa = Dsa::new(CodePointSum);

    let msg = "Hello, DSA!";
    let sig = dsa.sign(msg, &key, &mut rng).unwrap();

    assert!(!dsa.verify("Fake message", &sig, key.public_key()));

    let r_inc = Signature::new((sig.r() + 1u32) % &q, sig.s().clone());
    assert!(!dsa.verify(msg, &r_inc, key.public_key()));

    let s_inc = Signature::new(sig.r().clone(), (sig.s() + 1u32) % &q);
    assert!(!dsa.verify(msg, &s_inc, key.public_key()));

    // 另一把密钥
    let other = KeyPair::generate(params(), &mut rng);
    assert!(!dsa.verify(msg, &sig, other.public_key()));
}

#[test]
fn out_of_range_signature() {
    let mut rng = SeededRand::new(9);
    let key = KeyPair::generate(params(), &mut rng);
    let q = key.params().q().clone();
    let dsa = Dsa::new(CodePointSum);
    let sig = dsa.sign("range", &key, &mut rng).unwrap();

    let cases = [
        Signature::new(BigUint::from(0u32), sig.s().clone()),
        Signature::new(sig.r().clone(), BigUint::from(0u32)),
        Signature::new(sig.r() + &q, sig.s().clone()),
        Signature::new(sig.r().clone(), sig.s() + &q),
        Signature::new(q.clone(), q.clone()),
    ];

    for bad in cases {
        assert!(!dsa.verify("range", &bad, key.public_key()));
    }
}

#[test]
fn weak_digest_collides() {
    // 字符的置换得到相同的摘要, 因此签名同样有效
    let mut rng = SeededRand::new(10);
    let key = KeyPair::generate(params(), &mut rng);
    let dsa = Dsa::new(CodePointSum);
    let sig = dsa.sign("SECRET", &key, &mut rng).unwrap();
    assert!(dsa.verify("TERCES", &sig, key.public_key()));
}

#[test]
fn exhausted_signing() {
    let mut rng = SeededRand::new(11);
    let key = KeyPair::generate(params(), &mut rng);
    let dsa = Dsa::new(CodePointSum).with_budget(SearchBudget::at_most(0));
    assert!(matches!(
        dsa.sign("msg", &key, &mut rng),
        Err(CipherError::SearchExhausted { .. })
    ));
}

#[test]
fn seeded_signing_is_reproducible() {
    let key = KeyPair::generate(params(), &mut SeededRand::new(12));
    let dsa = Dsa::new(CodePointSum);
    let a = dsa.sign("replay", &key, &mut SeededRand::new(13)).unwrap();
    let b = dsa.sign("replay", &key, &mut SeededRand::new(13)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn serde_round() {
    let mut rng = SeededRand::new(14);
    let key = KeyPair::generate(params(), &mut rng);
    let json = serde_json::to_string(key.public_key()).unwrap();
    let pk: super::PublicKey = serde_json::from_str(&json).unwrap();
    assert_eq!(&pk, key.public_key());
    assert!(BigUintExt(pk.params().q()).is_probable_prime(5, &mut rng));
}
