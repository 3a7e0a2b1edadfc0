//! Test helpers for the imgup workspace.
//!
//! In-memory/scripted implementations of every core port, plus a shared
//! conformance check for the credential lifecycle, so provider crates can
//! be tested without a live settings file, secret store or network.

use std::{
    collections::{BTreeMap, VecDeque},
    sync::Mutex,
};

use bytes::Bytes;
use imgup::{
    CredentialPrompt, InputOptions, PutObject, SecretStore, SettingsSource, StorageClient,
    Uploader,
};
use url::Url;

/// Mutable in-memory settings.
///
/// Sections can be changed mid-test to simulate a user editing the settings
/// while the uploader list stays alive.
#[derive(Debug, Default)]
pub struct MemorySettings {
    sections: Mutex<serde_json::Map<String, serde_json::Value>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(section: impl Into<String>, value: serde_json::Value) -> Self {
        let settings = Self::new();
        settings.set_section(section, value);
        settings
    }

    pub fn set_section(&self, section: impl Into<String>, value: serde_json::Value) {
        self.sections
            .lock()
            .unwrap()
            .insert(section.into(), value);
    }

    pub fn remove_section(&self, section: &str) {
        self.sections.lock().unwrap().remove(section);
    }
}

impl SettingsSource for MemorySettings {
    fn read_section(&self, section: &str) -> Result<Option<serde_json::Value>, anyhow::Error> {
        Ok(self.sections.lock().unwrap().get(section).cloned())
    }
}

/// In-memory [`SecretStore`].
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    data: tokio::sync::RwLock<BTreeMap<String, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn keys(&self) -> Vec<String> {
        self.data.read().await.keys().cloned().collect()
    }
}

#[async_trait::async_trait]
impl SecretStore for MemorySecretStore {
    async fn get(&self, key: &str) -> Result<Option<String>, anyhow::Error> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        self.data
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), anyhow::Error> {
        self.data.write().await.remove(key);
        Ok(())
    }
}

/// Prompt that replays a scripted list of responses.
///
/// `None` entries simulate the user cancelling an input. Running out of
/// responses also counts as a cancel. Notifications are recorded.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    responses: Mutex<VecDeque<Option<String>>>,
    inputs: Mutex<Vec<InputOptions>>,
    notices: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let prompt = Self::new();
        prompt.responses.lock().unwrap().extend(
            responses
                .into_iter()
                .map(|response| response.map(Into::into)),
        );
        prompt
    }

    /// Options of every input request seen so far.
    pub fn inputs(&self) -> Vec<InputOptions> {
        self.inputs.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CredentialPrompt for ScriptedPrompt {
    async fn input(&self, options: InputOptions) -> Result<Option<String>, anyhow::Error> {
        self.inputs.lock().unwrap().push(options);
        let response = self.responses.lock().unwrap().pop_front();
        Ok(response.flatten())
    }

    async fn notify(&self, message: &str) -> Result<(), anyhow::Error> {
        self.notices.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

/// One recorded object write.
#[derive(Clone, Debug)]
pub struct RecordedPut {
    pub endpoint: Url,
    pub bucket: String,
    pub key: String,
    pub body: Bytes,
    pub content_type: String,
    pub access_key_id: String,
}

/// [`StorageClient`] that records every write instead of talking to a
/// remote, with an optional injected failure.
#[derive(Debug, Default)]
pub struct RecordingStorageClient {
    puts: Mutex<Vec<RecordedPut>>,
    fail_with: Mutex<Option<String>>,
}

impl RecordingStorageClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put_object` fail with the given message.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fail_with.lock().unwrap() = Some(message.into());
    }

    pub fn puts(&self) -> Vec<RecordedPut> {
        self.puts.lock().unwrap().clone()
    }

    pub fn put_count(&self) -> usize {
        self.puts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl StorageClient for RecordingStorageClient {
    async fn put_object(&self, put: PutObject) -> Result<(), anyhow::Error> {
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(anyhow::anyhow!("{message}"));
        }

        self.puts.lock().unwrap().push(RecordedPut {
            endpoint: put.endpoint,
            bucket: put.bucket,
            key: put.key,
            body: put.body,
            content_type: put.content_type,
            access_key_id: put.credentials.access_key_id,
        });
        Ok(())
    }
}

/// Conformance check for the credential lifecycle of an uploader.
///
/// Expects the uploader's prompt to be scripted to produce a full set of
/// credentials on the first `prompt_and_save_credentials` call.
pub async fn test_credential_lifecycle(uploader: &dyn Uploader) {
    assert!(
        !uploader.has_credentials().await.unwrap(),
        "uploader must start without credentials"
    );

    assert!(
        uploader.prompt_and_save_credentials().await.unwrap(),
        "scripted prompt must save credentials"
    );
    assert!(uploader.has_credentials().await.unwrap());

    // Clearing is idempotent.
    uploader.clear_credentials().await.unwrap();
    uploader.clear_credentials().await.unwrap();
    assert!(!uploader.has_credentials().await.unwrap());
}
