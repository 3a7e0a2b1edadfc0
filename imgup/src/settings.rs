use std::sync::Arc;

/// Read access to host settings.
///
/// Implementations must re-read the underlying source on every call, so
/// that a settings edit takes effect on the next operation without a
/// restart. Sections are raw JSON values; each provider parses its own
/// section into its config type.
pub trait SettingsSource: Send + Sync + std::fmt::Debug {
    /// Read a named configuration section.
    ///
    /// Returns `None` if the section is not present.
    fn read_section(&self, section: &str) -> Result<Option<serde_json::Value>, anyhow::Error>;
}

pub type DynSettingsSource = Arc<dyn SettingsSource>;
