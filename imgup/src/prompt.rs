use std::sync::Arc;

/// Options for a single text input request.
#[derive(Clone, Debug, Default)]
pub struct InputOptions {
    pub prompt: String,
    /// Mask the typed value (for secrets).
    pub masked: bool,
    pub placeholder: Option<String>,
}

impl InputOptions {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            masked: false,
            placeholder: None,
        }
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

/// User-facing input surface used for credential entry.
#[async_trait::async_trait]
pub trait CredentialPrompt: Send + Sync + std::fmt::Debug {
    /// Request a single line of input.
    ///
    /// `None` means the user cancelled the input.
    async fn input(&self, options: InputOptions) -> Result<Option<String>, anyhow::Error>;

    /// Show a non-blocking informational message.
    async fn notify(&self, message: &str) -> Result<(), anyhow::Error>;
}

pub type DynCredentialPrompt = Arc<dyn CredentialPrompt>;
