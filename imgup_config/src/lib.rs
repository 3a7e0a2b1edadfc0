//! Filesystem-backed implementations of the imgup settings and secret
//! store ports.
//!
//! Both stores re-read their file on every access, so edits made while the
//! tool is running are picked up by the next operation.

mod secrets;
mod settings;

pub use self::{secrets::FsSecretStore, settings::FsSettingsStore};
