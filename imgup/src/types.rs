use bytes::Bytes;

use crate::UploadError;

/// Image formats accepted for upload.
///
/// The set is closed: a MIME type outside of it is rejected before any
/// network traffic happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageFormat {
    /// Map a MIME type to its format.
    ///
    /// Both `image/jpeg` and the non-standard `image/jpg` map to
    /// [`ImageFormat::Jpeg`].
    pub fn from_mime(mime: &str) -> Result<Self, UploadError> {
        match mime {
            "image/jpeg" | "image/jpg" => Ok(Self::Jpeg),
            "image/png" => Ok(Self::Png),
            "image/gif" => Ok(Self::Gif),
            "image/webp" => Ok(Self::Webp),
            other => Err(UploadError::UnsupportedMimeType(other.to_string())),
        }
    }

    /// File extension used for object names.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }
}

/// A raw image payload together with its MIME type.
#[derive(Clone, Debug)]
pub struct UploadRequest {
    pub data: Bytes,
    pub mime_type: String,
}

impl UploadRequest {
    pub fn new(data: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Decode a `data:<mime>;base64,<payload>` URL as sent by the panel.
    pub fn from_data_url(data_url: &str) -> Result<Self, UploadError> {
        let rest = data_url
            .strip_prefix("data:")
            .ok_or_else(|| UploadError::InvalidPayload("missing 'data:' prefix".to_string()))?;
        let (mime_type, payload) = rest.split_once(";base64,").ok_or_else(|| {
            UploadError::InvalidPayload("expected a base64-encoded data URL".to_string())
        })?;
        if mime_type.is_empty() {
            return Err(UploadError::InvalidPayload(
                "missing MIME type".to_string(),
            ));
        }

        use base64::Engine as _;
        let data = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|err| UploadError::InvalidPayload(format!("base64 decode failed: {err}")))?;

        Ok(Self {
            data: Bytes::from(data),
            mime_type: mime_type.to_string(),
        })
    }
}

/// Result of a successful upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadResult {
    /// Fully-formed public URL of the uploaded object.
    pub url: String,
}

/// Generate a random object file name: 32 hex characters plus the extension.
///
/// Uniqueness is probabilistic (UUID v4 entropy) - no collision check is
/// performed against the bucket.
pub fn object_name(format: ImageFormat) -> String {
    format!("{}.{}", uuid::Uuid::new_v4().simple(), format.extension())
}

/// Compute the storage key for a file name under an optional upload dir.
///
/// The dir is joined verbatim, without slash normalization.
pub fn object_key(upload_dir: &str, file_name: &str) -> String {
    if upload_dir.is_empty() {
        file_name.to_string()
    } else {
        format!("{upload_dir}/{file_name}")
    }
}

/// Build the public URL for an uploaded object.
///
/// Uses the same upload-dir presence rule as [`object_key`], so the URL path
/// always mirrors the storage key.
pub fn public_url(public_domain: &str, upload_dir: &str, file_name: &str) -> String {
    if upload_dir.is_empty() {
        format!("{public_domain}/{file_name}")
    } else {
        format!("{public_domain}/{upload_dir}/{file_name}")
    }
}
