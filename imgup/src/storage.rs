use std::sync::Arc;

use bytes::Bytes;
use url::Url;

/// Credentials passed to the storage client for a single request.
#[derive(Clone)]
pub struct StorageCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for StorageCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// A single object write request.
#[derive(Debug)]
pub struct PutObject {
    pub endpoint: Url,
    pub bucket: String,
    pub key: String,
    pub body: Bytes,
    pub content_type: String,
    pub credentials: StorageCredentials,
}

/// Remote object write API.
///
/// Treated as an opaque call: no retries, no visibility into the transport
/// beyond what is passed in the request.
#[async_trait::async_trait]
pub trait StorageClient: Send + Sync + std::fmt::Debug {
    async fn put_object(&self, put: PutObject) -> Result<(), anyhow::Error>;
}

pub type DynStorageClient = Arc<dyn StorageClient>;
