use thiserror::Error;

#[derive(Debug, Error)]
pub enum KexError {
    #[error("entropy source unavailable: {0}")]
    EntropySourceUnavailable(String),

    #[error("shared secrets do not match")]
    SecretMismatch,

    #[error("invalid range: min {min} exceeds max {max}")]
    InvalidRange { min: String, max: String },

    #[error("invalid modulus: {0}")]
    InvalidModulus(&'static str),

    #[error("generator must lie in [2, p-2]")]
    InvalidGenerator,

    #[error("public key must lie in (1, p-1)")]
    InvalidPublicKey,

    #[error("parse error: {0}")]
    Parse(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
