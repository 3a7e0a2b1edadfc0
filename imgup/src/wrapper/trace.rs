use crate::{UploadError, UploadRequest, UploadResult, Uploader};

/// Wrapper for an uploader that logs operations with the `tracing` crate.
///
/// * Read-only checks (`is_available`, `has_credentials`) are logged at the
///   `TRACE` level.
/// * Credential changes and uploads are logged at the `TRACE` level on start
///   and at the `DEBUG` level on completion.
/// * All errors are logged at the `ERROR` level.
#[derive(Debug)]
pub struct TracedUploader<U> {
    name: String,
    inner: U,
}

impl<U> TracedUploader<U> {
    /// Creates a new `TracedUploader` with the given name and inner uploader.
    ///
    /// All logs will contain the name.
    pub fn new(name: impl Into<String>, inner: U) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }
}

#[async_trait::async_trait]
impl<U> Uploader for TracedUploader<U>
where
    U: Uploader,
{
    fn kind(&self) -> &str {
        self.inner.kind()
    }

    fn is_available(&self) -> Result<bool, anyhow::Error> {
        match self.inner.is_available() {
            Ok(available) => {
                tracing::trace!(uploader = %self.name, available, "is_available");
                Ok(available)
            }
            Err(err) => {
                tracing::error!(uploader = %self.name, error = %err, "is_available::failed");
                Err(err)
            }
        }
    }

    async fn has_credentials(&self) -> Result<bool, anyhow::Error> {
        match self.inner.has_credentials().await {
            Ok(present) => {
                tracing::trace!(uploader = %self.name, present, "has_credentials");
                Ok(present)
            }
            Err(err) => {
                tracing::error!(uploader = %self.name, error = %err, "has_credentials::failed");
                Err(err)
            }
        }
    }

    async fn prompt_and_save_credentials(&self) -> Result<bool, anyhow::Error> {
        tracing::trace!(uploader = %self.name, "prompt_credentials::start");
        match self.inner.prompt_and_save_credentials().await {
            Ok(saved) => {
                tracing::debug!(uploader = %self.name, saved, "prompt_credentials::done");
                Ok(saved)
            }
            Err(err) => {
                tracing::error!(uploader = %self.name, error = %err, "prompt_credentials::failed");
                Err(err)
            }
        }
    }

    async fn clear_credentials(&self) -> Result<(), anyhow::Error> {
        tracing::trace!(uploader = %self.name, "clear_credentials::start");
        match self.inner.clear_credentials().await {
            Ok(()) => {
                tracing::debug!(uploader = %self.name, "clear_credentials::done");
                Ok(())
            }
            Err(err) => {
                tracing::error!(uploader = %self.name, error = %err, "clear_credentials::failed");
                Err(err)
            }
        }
    }

    async fn upload(&self, request: UploadRequest) -> Result<UploadResult, UploadError> {
        tracing::trace!(
            uploader = %self.name,
            mime_type = %request.mime_type,
            size = request.data.len(),
            "upload::start"
        );
        match self.inner.upload(request).await {
            Ok(result) => {
                tracing::debug!(uploader = %self.name, url = %result.url, "upload::done");
                Ok(result)
            }
            Err(err) => {
                tracing::error!(uploader = %self.name, error = %err, "upload::failed");
                Err(err)
            }
        }
    }
}
