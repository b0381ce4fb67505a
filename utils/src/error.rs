use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumError {
    #[error("no modular inverse: the operands are not coprime")]
    NoInverse,

    #[error("{what}: search exhausted after {attempts} attempts")]
    SearchExhausted { what: &'static str, attempts: usize },

    #[error("invalid bit length `{0}`, need at least 2 bits")]
    InvalidBitLength(usize),
}
