use crate::{
    DynUploader, UploadError, UploadRequest, UploadResult, select_uploader,
};

/// Entry point used by the presentation shell.
///
/// Holds the fixed list of known provider variants and re-runs uploader
/// selection on every operation, so a configuration change applies on the
/// next call without a restart.
#[derive(Clone, Debug)]
pub struct UploadManager {
    uploaders: Vec<DynUploader>,
}

impl UploadManager {
    pub fn new(uploaders: Vec<DynUploader>) -> Self {
        Self { uploaders }
    }

    fn active(&self) -> Result<DynUploader, UploadError> {
        select_uploader(&self.uploaders)
    }

    /// Decode a panel data URL and upload it with the active provider.
    pub async fn upload_data_url(&self, data_url: &str) -> Result<UploadResult, UploadError> {
        let request = UploadRequest::from_data_url(data_url)?;
        self.upload(request).await
    }

    pub async fn upload(&self, request: UploadRequest) -> Result<UploadResult, UploadError> {
        self.active()?.upload(request).await
    }

    pub async fn has_credentials(&self) -> Result<bool, UploadError> {
        Ok(self.active()?.has_credentials().await?)
    }

    pub async fn prompt_and_save_credentials(&self) -> Result<bool, UploadError> {
        Ok(self.active()?.prompt_and_save_credentials().await?)
    }

    pub async fn clear_credentials(&self) -> Result<(), UploadError> {
        Ok(self.active()?.clear_credentials().await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, atomic::Ordering};

    use pretty_assertions::assert_eq;

    use crate::uploader::testing::StubUploader;

    use super::*;

    fn png_data_url() -> String {
        use base64::Engine as _;
        let payload = base64::engine::general_purpose::STANDARD.encode(b"png bytes");
        format!("data:image/png;base64,{payload}")
    }

    #[tokio::test]
    async fn test_upload_data_url() {
        let uploader = Arc::new(StubUploader::available());
        let manager = UploadManager::new(vec![uploader.clone()]);

        let result = manager.upload_data_url(&png_data_url()).await.unwrap();
        assert_eq!(result.url, "https://cdn.test/stub.png");
        assert_eq!(uploader.uploads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_upload_fails_without_provider() {
        let manager =
            UploadManager::new(vec![Arc::new(StubUploader::unavailable()) as DynUploader]);

        let err = manager.upload_data_url(&png_data_url()).await.unwrap_err();
        assert!(matches!(err, UploadError::NoProviderConfigured));
    }

    #[tokio::test]
    async fn test_invalid_payload_short_circuits_selection() {
        // A bad payload must fail even when provider selection would fail
        // too - the decode happens first, mirroring the shell control flow.
        let manager = UploadManager::new(vec![]);
        let err = manager.upload_data_url("not a data url").await.unwrap_err();
        assert!(matches!(err, UploadError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn test_credential_operations_route_to_active_uploader() {
        let uploader = Arc::new(StubUploader::available());
        let manager = UploadManager::new(vec![uploader.clone()]);

        assert!(!manager.has_credentials().await.unwrap());
        assert!(manager.prompt_and_save_credentials().await.unwrap());
        assert!(manager.has_credentials().await.unwrap());

        manager.clear_credentials().await.unwrap();
        manager.clear_credentials().await.unwrap();
        assert!(!manager.has_credentials().await.unwrap());
    }
}
