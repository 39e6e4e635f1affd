use thiserror::Error;

/// Errors from record protection and transcript hashing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Cipher suite has not been initialized")]
    NotInitialized,

    #[error("Cipher suite is already initialized")]
    AlreadyInitialized,

    #[error("Key derivation failed: {0}")]
    Derivation(String),

    /// The record did not authenticate. Carries no detail.
    #[error("Record authentication failed")]
    Authentication,

    #[error("Digest failed: {0}")]
    Digest(String),

    #[error("Record too short to hold a protected payload: {0}")]
    RecordTooShort(usize),

    #[error("Plaintext too big (> max_plaintext_len): {0}")]
    RecordTooLarge(usize),

    #[error("Record sequence number exceeds 48 bits: {0}")]
    SequenceOverflow(u64),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Invalid config: {0}")]
    Config(String),
}
