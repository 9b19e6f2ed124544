use thiserror::Error;

/// Failure turning a validated request into a Move call.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid package ID `{0}`: {1}")]
    InvalidPackageId(String, String),
    #[error("invalid recipient address `{0}`: {1}")]
    InvalidRecipient(String, String),
    #[error("failed to encode argument: {0}")]
    Encoding(#[from] bcs::Error),
}

#[derive(Debug, Error)]
pub enum ListError {
    #[error("wallet not connected")]
    NotConnected,
    #[error("package ID is required")]
    MissingPackageId,
    #[error("failed to query loyalty cards: {0}")]
    Query(#[source] anyhow::Error),
}
