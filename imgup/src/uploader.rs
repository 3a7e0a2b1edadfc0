use std::sync::Arc;

use crate::{UploadError, UploadRequest, UploadResult};

/// Capability implemented by each storage provider variant.
#[async_trait::async_trait]
pub trait Uploader: Send + Sync + std::fmt::Debug {
    /// Short provider name.
    ///
    /// eg: "r2"
    fn kind(&self) -> &str;

    /// Whether this provider has a configuration block in the settings.
    ///
    /// Must re-read the settings source on every call - selection has to
    /// observe mid-session configuration edits. Presence of the block is
    /// enough; field contents are only validated at upload time so a
    /// partial config does not block other providers from being selected.
    fn is_available(&self) -> Result<bool, anyhow::Error>;

    /// True iff both credential secrets are stored and non-empty.
    async fn has_credentials(&self) -> Result<bool, anyhow::Error>;

    /// Run the two-step credential input flow and persist the result.
    ///
    /// Returns `false` without persisting anything if the user cancels
    /// either input.
    async fn prompt_and_save_credentials(&self) -> Result<bool, anyhow::Error>;

    /// Remove stored credentials. Idempotent.
    async fn clear_credentials(&self) -> Result<(), anyhow::Error>;

    /// Upload one image and return its public URL.
    async fn upload(&self, request: UploadRequest) -> Result<UploadResult, UploadError>;
}

#[async_trait::async_trait]
impl<U: Uploader> Uploader for Arc<U> {
    fn kind(&self) -> &str {
        self.as_ref().kind()
    }

    fn is_available(&self) -> Result<bool, anyhow::Error> {
        self.as_ref().is_available()
    }

    async fn has_credentials(&self) -> Result<bool, anyhow::Error> {
        self.as_ref().has_credentials().await
    }

    async fn prompt_and_save_credentials(&self) -> Result<bool, anyhow::Error> {
        self.as_ref().prompt_and_save_credentials().await
    }

    async fn clear_credentials(&self) -> Result<(), anyhow::Error> {
        self.as_ref().clear_credentials().await
    }

    async fn upload(&self, request: UploadRequest) -> Result<UploadResult, UploadError> {
        self.as_ref().upload(request).await
    }
}

pub type DynUploader = Arc<dyn Uploader>;

/// Pick the single available uploader out of all known provider variants.
///
/// Fails with [`UploadError::NoProviderConfigured`] when no variant has a
/// configuration block, and with
/// [`UploadError::AmbiguousProviderConfiguration`] when more than one does.
///
/// Pure over the current availability flags - callers re-run this on every
/// top-level operation instead of caching the result.
pub fn select_uploader(variants: &[DynUploader]) -> Result<DynUploader, UploadError> {
    let mut available = Vec::new();
    for uploader in variants {
        if uploader.is_available()? {
            available.push(uploader.clone());
        }
    }

    match available.len() {
        0 => Err(UploadError::NoProviderConfigured),
        1 => Ok(available.remove(0)),
        count => Err(UploadError::AmbiguousProviderConfiguration { count }),
    }
}
