use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SealError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid number `{0}`")]
    InvalidNumber(String),

    #[error("unsupport for `{0}`")]
    NotSupport(String),
}
