mod client;
mod config;

pub use self::{client::S3StorageClient, config::R2Config};

use std::sync::Arc;

use anyhow::Context as _;

use imgup::{
    DynCredentialPrompt, DynSecretStore, DynSettingsSource, DynStorageClient, ImageFormat,
    InputOptions, PutObject, StorageCredentials, UploadError, UploadRequest, UploadResult,
    Uploader, object_key, object_name, public_url,
};

// Secret-store keys, namespaced so other provider variants can never
// collide.
const ACCESS_KEY_ID_KEY: &str = "imgup.r2.accessKeyId";
const SECRET_ACCESS_KEY_KEY: &str = "imgup.r2.secretAccessKey";

/// Uploader backed by an R2-compatible S3 bucket.
///
/// Implements the [`Uploader`] trait. Configuration is re-read from the
/// settings source on every operation and credentials from the secret
/// store, so neither is ever cached across uploads.
#[derive(Clone, Debug)]
pub struct R2Uploader {
    settings: DynSettingsSource,
    secrets: DynSecretStore,
    prompt: DynCredentialPrompt,
    client: DynStorageClient,
}

impl R2Uploader {
    /// The kind of this uploader (see [`Uploader::kind`]).
    pub const KIND: &'static str = "r2";

    pub fn new(
        settings: DynSettingsSource,
        secrets: DynSecretStore,
        prompt: DynCredentialPrompt,
    ) -> Self {
        Self::new_with_client(settings, secrets, prompt, Arc::new(S3StorageClient::new()))
    }

    pub fn new_with_client(
        settings: DynSettingsSource,
        secrets: DynSecretStore,
        prompt: DynCredentialPrompt,
        client: DynStorageClient,
    ) -> Self {
        Self {
            settings,
            secrets,
            prompt,
            client,
        }
    }

    async fn load_credentials(&self) -> Result<Option<StorageCredentials>, anyhow::Error> {
        let access_key_id = self
            .secrets
            .get(ACCESS_KEY_ID_KEY)
            .await?
            .unwrap_or_default();
        let secret_access_key = self
            .secrets
            .get(SECRET_ACCESS_KEY_KEY)
            .await?
            .unwrap_or_default();

        if access_key_id.is_empty() || secret_access_key.is_empty() {
            return Ok(None);
        }
        Ok(Some(StorageCredentials {
            access_key_id,
            secret_access_key,
        }))
    }
}

#[async_trait::async_trait]
impl Uploader for R2Uploader {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn is_available(&self) -> Result<bool, anyhow::Error> {
        Ok(self.settings.read_section(R2Config::SECTION)?.is_some())
    }

    async fn has_credentials(&self) -> Result<bool, anyhow::Error> {
        Ok(self.load_credentials().await?.is_some())
    }

    async fn prompt_and_save_credentials(&self) -> Result<bool, anyhow::Error> {
        let access_key_id = match self
            .prompt
            .input(
                InputOptions::new("Enter the R2 Access Key ID")
                    .with_placeholder("eg: 03cd7a54e98b902ffce72c251eccee3c"),
            )
            .await?
        {
            Some(value) if !value.is_empty() => value,
            _ => return Ok(false),
        };

        let secret_access_key = match self
            .prompt
            .input(
                InputOptions::new("Enter the R2 Secret Access Key")
                    .masked()
                    .with_placeholder("the value is stored securely"),
            )
            .await?
        {
            Some(value) if !value.is_empty() => value,
            _ => return Ok(false),
        };

        self.secrets.set(ACCESS_KEY_ID_KEY, &access_key_id).await?;
        self.secrets
            .set(SECRET_ACCESS_KEY_KEY, &secret_access_key)
            .await?;
        self.prompt
            .notify("credentials saved to the secret store")
            .await?;

        Ok(true)
    }

    async fn clear_credentials(&self) -> Result<(), anyhow::Error> {
        self.secrets.delete(ACCESS_KEY_ID_KEY).await?;
        self.secrets.delete(SECRET_ACCESS_KEY_KEY).await?;
        Ok(())
    }

    async fn upload(&self, request: UploadRequest) -> Result<UploadResult, UploadError> {
        let config = R2Config::resolve(self.settings.as_ref())
            .context("could not read the r2 settings section")?
            .unwrap_or_default();
        config.validate()?;

        let credentials = self
            .load_credentials()
            .await?
            .ok_or(UploadError::MissingCredentials)?;

        // Fails closed before any network traffic.
        let format = ImageFormat::from_mime(&request.mime_type)?;
        let file_name = object_name(format);
        let key = object_key(&config.upload_dir, &file_name);

        let put = PutObject {
            endpoint: config.endpoint()?,
            bucket: config.bucket_name.clone(),
            key,
            body: request.data,
            content_type: request.mime_type,
            credentials,
        };
        self.client
            .put_object(put)
            .await
            .map_err(UploadError::StorageWriteFailed)?;

        Ok(UploadResult {
            url: public_url(&config.public_domain, &config.upload_dir, &file_name),
        })
    }
}
