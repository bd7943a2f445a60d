use thiserror::Error;

/// Failure kinds surfaced by the tokenization pipeline.
///
/// Messages carried by these variants are shown to callers, so they must
/// never contain card numbers, security codes, ciphertext or plaintext.
#[derive(Error, Debug)]
pub enum TokenizeError {
    #[error("unauthorized: authentication is required")]
    Unauthorized,
    #[error("user not found")]
    UserNotFound,
    #[error("user is disabled")]
    UserDisabled,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("encrypted payload could not be decrypted")]
    DecryptionFailed,
    #[error("failed precondition: {0}")]
    FailedPrecondition(String),
    #[error("private key unavailable: {0}")]
    KeyUnavailable(String),
    #[error("internal error: {0}")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl TokenizeError {
    /// Machine-readable kind reported alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::UserNotFound => "user-not-found",
            Self::UserDisabled => "user-disabled",
            Self::InvalidArgument(_) => "invalid-argument",
            Self::DecryptionFailed => "decryption-failed",
            Self::FailedPrecondition(_) => "failed-precondition",
            Self::KeyUnavailable(_) => "key-unavailable",
            Self::Internal(_) => "internal",
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(Box::new(std::io::Error::other(message.into())))
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for TokenizeError {
    fn from(err: rocksdb::Error) -> Self {
        Self::Internal(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, TokenizeError>;
