use crate::CipherError;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// ElGamal ciphertext pair $(k, c)$.
///
/// The text form is `"<k> <c>"`: two decimal integers separated by exactly one
/// space. Surrounding whitespace is ignored when parsing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ciphertext {
    k: BigUint,
    c: BigUint,
}

impl Ciphertext {
    pub fn new(k: BigUint, c: BigUint) -> Self {
        Self { k, c }
    }

    pub fn k(&self) -> &BigUint {
        &self.k
    }

    pub fn c(&self) -> &BigUint {
        &self.c
    }
}

impl Display for Ciphertext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.k, self.c)
    }
}

fn parse_decimal(token: &str, name: &str) -> Result<BigUint, CipherError> {
    // BigUint::from_str也接受`+`和`_`, 这里只允许十进制数字
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CipherError::MalformedCiphertextEncoding(format!(
            "`{name}` is not a decimal integer: `{token}`"
        )));
    }

    BigUint::parse_bytes(token.as_bytes(), 10).ok_or_else(|| {
        CipherError::MalformedCiphertextEncoding(format!("`{name}` is not a decimal integer: `{token}`"))
    })
}

impl FromStr for Ciphertext {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, c) = s.trim().split_once(' ').ok_or_else(|| {
            CipherError::MalformedCiphertextEncoding(
                "expected two integers separated by a space".to_string(),
            )
        })?;

        Ok(Self::new(parse_decimal(k, "k")?, parse_decimal(c, "c")?))
    }
}

#[cfg(test)]
mod tests {
    use super::Ciphertext;
    use crate::CipherError;
    use num_bigint::BigUint;

    #[test]
    fn display_parse() {
        let ct = Ciphertext::new(BigUint::from(123u32), BigUint::from(456u32));
        assert_eq!(ct.to_string(), "123 456");
        assert_eq!("123 456".parse::<Ciphertext>().unwrap(), ct);
        assert_eq!("  123 456\n".parse::<Ciphertext>().unwrap(), ct);

        let big: BigUint = "784637716923335095479473677900958302012794430558004314146"
            .parse()
            .unwrap();
        let ct = Ciphertext::new(big.clone(), BigUint::from(0u32));
        assert_eq!(ct.to_string().parse::<Ciphertext>().unwrap().k(), &big);
    }

    #[test]
    fn malformed() {
        let cases = [
            "",
            "123",
            "123abc 456",
            "123  456",
            "123 456 789",
            "-1 456",
            "+1 456",
            "1_0 456",
            "0x10 456",
            "123\t456",
        ];

        for case in cases {
            assert!(
                matches!(
                    case.parse::<Ciphertext>(),
                    Err(CipherError::MalformedCiphertextEncoding(_))
                ),
                "`{case}` should be rejected"
            );
        }
    }
}
