use std::sync::Arc;

/// Opaque key/value store for credential material.
///
/// Keys are namespaced per provider variant (eg `imgup.r2.accessKeyId`) so
/// multiple providers can never collide on a key.
#[async_trait::async_trait]
pub trait SecretStore: Send + Sync + std::fmt::Debug {
    async fn get(&self, key: &str) -> Result<Option<String>, anyhow::Error>;

    async fn set(&self, key: &str, value: &str) -> Result<(), anyhow::Error>;

    /// Delete a key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), anyhow::Error>;
}

pub type DynSecretStore = Arc<dyn SecretStore>;
