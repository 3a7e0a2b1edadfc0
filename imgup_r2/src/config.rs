use anyhow::Context as _;
use url::Url;

use imgup::{SettingsSource, UploadError};

/// Configuration block for the R2-compatible provider.
///
/// Lives under the `r2` section of the settings. Credentials are
/// deliberately not part of this block - they only ever live in the secret
/// store.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct R2Config {
    pub account_id: String,
    pub bucket_name: String,
    pub upload_dir: String,
    pub public_domain: String,
}

impl R2Config {
    pub(crate) const SECTION: &'static str = "r2";

    /// Read the `r2` section from the settings.
    ///
    /// Returns `None` when the section is absent. Field contents are not
    /// validated here - a partial or placeholder block still counts as
    /// "picked" for uploader selection. See [`R2Config::validate`].
    pub fn resolve(settings: &dyn SettingsSource) -> Result<Option<Self>, anyhow::Error> {
        let Some(value) = settings.read_section(Self::SECTION)? else {
            return Ok(None);
        };
        let config =
            serde_json::from_value(value).context("could not parse the 'r2' settings section")?;
        Ok(Some(config))
    }

    /// Validate the fields an upload needs.
    ///
    /// The upload dir is joined into keys and URLs verbatim, so leading or
    /// trailing slashes are rejected here instead of being normalized.
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.account_id.is_empty() {
            return Err(UploadError::MissingConfiguration("accountId"));
        }
        if self.bucket_name.is_empty() {
            return Err(UploadError::MissingConfiguration("bucketName"));
        }
        if self.public_domain.is_empty() {
            return Err(UploadError::MissingConfiguration("publicDomain"));
        }
        if self.upload_dir.starts_with('/') || self.upload_dir.ends_with('/') {
            return Err(UploadError::InvalidUploadDir(self.upload_dir.clone()));
        }
        Ok(())
    }

    /// S3 endpoint derived from the account id.
    pub fn endpoint(&self) -> Result<Url, anyhow::Error> {
        format!("https://{}.r2.cloudflarestorage.com", self.account_id)
            .parse()
            .context("could not build the R2 endpoint URL")
    }
}
