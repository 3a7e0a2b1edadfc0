//! Headless upload panel.
//!
//! Reads panel commands as JSON lines on stdin and writes panel events as
//! JSON lines on stdout, eg:
//!
//! ```text
//! {"command":"getKeyStatus"}
//! {"command":"setKey"}
//! {"command":"upload","data":"data:image/png;base64,..."}
//! ```
//!
//! Settings come from `~/.config/imgup/settings.yaml` and credentials from
//! `~/.config/imgup/secrets.json`.

use std::sync::Arc;

use anyhow::Context as _;
use imgup::{
    CredentialPrompt, InputOptions, UploadManager,
    panel::{self, PanelCommand},
    wrapper::TracedUploader,
};
use imgup_config::{FsSecretStore, FsSettingsStore};
use imgup_r2::R2Uploader;

/// Line-based prompt on the terminal.
///
/// Masked inputs are read like normal ones - good enough for a demo.
#[derive(Debug)]
struct StdinPrompt;

#[async_trait::async_trait]
impl CredentialPrompt for StdinPrompt {
    async fn input(&self, options: InputOptions) -> Result<Option<String>, anyhow::Error> {
        if let Some(placeholder) = &options.placeholder {
            eprintln!("{} ({placeholder})", options.prompt);
        } else {
            eprintln!("{}", options.prompt);
        }

        let line = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line).map(|_| line)
        })
        .await
        .context("prompt task failed")??;

        let line = line.trim().to_string();
        Ok(if line.is_empty() { None } else { Some(line) })
    }

    async fn notify(&self, message: &str) -> Result<(), anyhow::Error> {
        eprintln!("{message}");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let settings = Arc::new(FsSettingsStore::new_default()?);
    let secrets = Arc::new(FsSecretStore::new_default()?);
    let uploader = R2Uploader::new(settings, secrets, Arc::new(StdinPrompt));
    let manager = UploadManager::new(vec![
        Arc::new(TracedUploader::new("r2", uploader)) as imgup::DynUploader,
    ]);

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let command: PanelCommand = match serde_json::from_str(input) {
            Ok(command) => command,
            Err(err) => {
                eprintln!("invalid command: {err}");
                continue;
            }
        };

        let event = panel::handle_command(&manager, command).await;
        println!("{}", serde_json::to_string(&event)?);
    }

    Ok(())
}
