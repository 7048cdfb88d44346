use thiserror::Error;

/// Failures raised by collaborators (encoder, store, authenticator).
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Decoding error: {0}")]
    Decoding(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Package already exists: {0}")]
    DuplicatePackage(String),

    #[error("Package not found: {0}")]
    PackageNotFound(String),

    #[error("Authentication backend error: {0}")]
    Auth(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
