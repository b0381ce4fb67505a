use thiserror::Error;
use utils::NumError;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CipherError {
    #[error("no modular inverse: the operands are not coprime")]
    NoInverse,

    #[error("plaintext must be less than the modulus")]
    PlaintextTooLarge,

    #[error("no generator found after {attempts} candidates")]
    GeneratorNotFound { attempts: usize },

    #[error("malformed key-transport ciphertext: {0}")]
    MalformedCiphertextEncoding(String),

    #[error("signature verification failed")]
    SignatureInvalid,

    #[error("{what}: search exhausted after {attempts} attempts")]
    SearchExhausted { what: &'static str, attempts: usize },

    /// 不合法的密钥长度
    #[error("Invalid key size `{real}` not match to target size `{target}`")]
    InvalidKeySize { target: usize, real: usize },

    #[error("Invalid block size `{real}` not match to target size `{target}`")]
    InvalidBlockSize { target: usize, real: usize },

    #[error("unpadding not match the padding format `{0}`")]
    UnpaddingNotMatch(String),

    #[error("invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("symmetric cipher: {0}")]
    Symmetric(String),
}

impl From<NumError> for CipherError {
    fn from(value: NumError) -> Self {
        match value {
            NumError::NoInverse => Self::NoInverse,
            NumError::SearchExhausted { what, attempts } => Self::SearchExhausted { what, attempts },
            NumError::InvalidBitLength(bits) => {
                Self::InvalidParameters(format!("invalid bit length `{bits}`"))
            }
        }
    }
}
