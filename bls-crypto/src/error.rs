use std::path::PathBuf;

use thiserror::Error;

/// The error type of every public operation in this crate.
#[derive(Error, Debug)]
pub enum BlsError {
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("invalid argument: {0}")]
    Argument(String),

    #[error("not enough shares, need {required}, got {got}")]
    InsufficientShares { required: usize, got: usize },

    #[error("mismatched share context: {0}")]
    MismatchedContext(String),

    #[error("duplicate share index {0}")]
    DuplicateIndex(u8),

    #[error("invalid shares from nodes {indices:?}")]
    InvalidShare { indices: Vec<u8> },

    #[error("decryption failed")]
    Decryption(#[source] Option<Box<BlsError>>),

    #[error("signature verification failed")]
    Verification,

    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("crypto error: {0}")]
    Crypto(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BlsError {
    /// Wrap an error that occurred on the way to a plaintext.
    pub(crate) fn decryption(e: BlsError) -> Self {
        match e {
            e @ Self::Decryption(_) => e,
            e => Self::Decryption(Some(Box::new(e))),
        }
    }

    /// The innermost error, looking through `Decryption` wrappers.
    pub fn root(&self) -> &BlsError {
        match self {
            Self::Decryption(Some(inner)) => inner.root(),
            e => e,
        }
    }
}

impl From<ark_serialize::SerializationError> for BlsError {
    fn from(e: ark_serialize::SerializationError) -> Self {
        Self::Encoding(e.to_string())
    }
}

impl From<data_encoding::DecodeError> for BlsError {
    fn from(e: data_encoding::DecodeError) -> Self {
        Self::Encoding(e.to_string())
    }
}

#[derive(Debug, Error)]
#[error("config error {0}: {1}")]
pub struct ConfigError(
    pub(crate) PathBuf,
    #[source] pub(crate) Box<dyn std::error::Error + Send + Sync>,
);
