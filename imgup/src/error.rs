/// Errors produced by uploader selection and the upload pipeline.
///
/// Every variant is terminal for the operation that produced it - nothing is
/// retried automatically. Messages are written to be shown to the user at
/// the panel boundary as-is.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("no storage provider is configured - add a provider section to the settings")]
    NoProviderConfigured,

    #[error("{count} storage providers are configured - make sure exactly one is active")]
    AmbiguousProviderConfiguration { count: usize },

    #[error("provider configuration is incomplete: missing '{0}'")]
    MissingConfiguration(&'static str),

    #[error("invalid upload dir '{0}': leading or trailing slashes are not allowed")]
    InvalidUploadDir(String),

    #[error("no credentials found - configure the provider credentials first")]
    MissingCredentials,

    #[error("unsupported image MIME type '{0}'")]
    UnsupportedMimeType(String),

    #[error("invalid image payload: {0}")]
    InvalidPayload(String),

    #[error("upload failed: {0}")]
    StorageWriteFailed(anyhow::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
