//! Image upload abstractions.
//!
//! See the [`Uploader`] trait and the [`UploadManager`].

mod error;
mod manager;
pub mod panel;
mod prompt;
mod secrets;
mod settings;
mod storage;
mod types;
mod uploader;
pub mod wrapper;

pub use self::{
    error::UploadError,
    manager::UploadManager,
    prompt::{CredentialPrompt, DynCredentialPrompt, InputOptions},
    secrets::{DynSecretStore, SecretStore},
    settings::{DynSettingsSource, SettingsSource},
    storage::{DynStorageClient, PutObject, StorageClient, StorageCredentials},
    types::{ImageFormat, UploadRequest, UploadResult, object_key, object_name, public_url},
    uploader::{DynUploader, Uploader, select_uploader},
};
