//! Message contract with the upload panel.
//!
//! The panel is a thin interactive surface (a webview in the original
//! deployment); it talks to the core through these two message enums. The
//! wire format is JSON with a `command` tag and camelCase fields.

use serde::{Deserialize, Serialize};

use crate::UploadManager;

/// Inbound message from the panel.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PanelCommand {
    /// Upload an image given as a base64 data URL.
    Upload { data: String },
    /// Ask whether credentials are currently stored.
    GetKeyStatus,
    /// Run the interactive credential input flow.
    SetKey,
    /// Delete stored credentials.
    ClearKey,
}

/// Outbound message to the panel.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PanelEvent {
    UploadSuccess {
        url: String,
    },
    UploadError {
        error: String,
    },
    #[serde(rename_all = "camelCase")]
    KeyStatus {
        has_key: bool,
    },
    KeyActionResult {
        success: bool,
        message: String,
    },
}

/// Handle one panel command.
///
/// Never fails: every error is rendered into an event so the panel always
/// gets a response it can display.
pub async fn handle_command(manager: &UploadManager, command: PanelCommand) -> PanelEvent {
    match command {
        PanelCommand::Upload { data } => match manager.upload_data_url(&data).await {
            Ok(result) => PanelEvent::UploadSuccess { url: result.url },
            Err(err) => PanelEvent::UploadError {
                error: err.to_string(),
            },
        },
        PanelCommand::GetKeyStatus => match manager.has_credentials().await {
            Ok(has_key) => PanelEvent::KeyStatus { has_key },
            Err(err) => PanelEvent::KeyActionResult {
                success: false,
                message: err.to_string(),
            },
        },
        PanelCommand::SetKey => match manager.prompt_and_save_credentials().await {
            Ok(true) => PanelEvent::KeyActionResult {
                success: true,
                message: "credentials saved".to_string(),
            },
            Ok(false) => PanelEvent::KeyActionResult {
                success: false,
                message: "credentials not saved".to_string(),
            },
            Err(err) => PanelEvent::KeyActionResult {
                success: false,
                message: err.to_string(),
            },
        },
        PanelCommand::ClearKey => match manager.clear_credentials().await {
            Ok(()) => PanelEvent::KeyActionResult {
                success: true,
                message: "credentials cleared".to_string(),
            },
            Err(err) => PanelEvent::KeyActionResult {
                success: false,
                message: err.to_string(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::uploader::testing::StubUploader;

    use super::*;

    #[test]
    fn test_command_wire_format() {
        let command: PanelCommand =
            serde_json::from_value(json!({"command": "upload", "data": "data:image/png;base64,"}))
                .unwrap();
        assert_eq!(
            command,
            PanelCommand::Upload {
                data: "data:image/png;base64,".to_string()
            }
        );

        let command: PanelCommand =
            serde_json::from_value(json!({"command": "getKeyStatus"})).unwrap();
        assert_eq!(command, PanelCommand::GetKeyStatus);

        let command: PanelCommand = serde_json::from_value(json!({"command": "setKey"})).unwrap();
        assert_eq!(command, PanelCommand::SetKey);

        let command: PanelCommand = serde_json::from_value(json!({"command": "clearKey"})).unwrap();
        assert_eq!(command, PanelCommand::ClearKey);
    }

    #[test]
    fn test_event_wire_format() {
        assert_eq!(
            serde_json::to_value(PanelEvent::UploadSuccess {
                url: "https://cdn.example.com/a.png".to_string()
            })
            .unwrap(),
            json!({"command": "uploadSuccess", "url": "https://cdn.example.com/a.png"})
        );
        assert_eq!(
            serde_json::to_value(PanelEvent::KeyStatus { has_key: true }).unwrap(),
            json!({"command": "keyStatus", "hasKey": true})
        );
        assert_eq!(
            serde_json::to_value(PanelEvent::KeyActionResult {
                success: false,
                message: "credentials not saved".to_string()
            })
            .unwrap(),
            json!({"command": "keyActionResult", "success": false, "message": "credentials not saved"})
        );
    }

    fn png_data_url() -> String {
        use base64::Engine as _;
        let payload = base64::engine::general_purpose::STANDARD.encode(b"png bytes");
        format!("data:image/png;base64,{payload}")
    }

    #[tokio::test]
    async fn test_upload_dispatch() {
        let manager =
            UploadManager::new(vec![Arc::new(StubUploader::available()) as crate::DynUploader]);

        let event = handle_command(&manager, PanelCommand::Upload { data: png_data_url() }).await;
        assert_eq!(
            event,
            PanelEvent::UploadSuccess {
                url: "https://cdn.test/stub.png".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_upload_error_becomes_event() {
        let manager = UploadManager::new(vec![]);

        let event = handle_command(&manager, PanelCommand::Upload { data: png_data_url() }).await;
        let PanelEvent::UploadError { error } = event else {
            panic!("expected an uploadError event, got {event:?}");
        };
        assert!(error.contains("no storage provider is configured"));
    }

    #[tokio::test]
    async fn test_key_lifecycle_dispatch() {
        let manager =
            UploadManager::new(vec![Arc::new(StubUploader::available()) as crate::DynUploader]);

        let event = handle_command(&manager, PanelCommand::GetKeyStatus).await;
        assert_eq!(event, PanelEvent::KeyStatus { has_key: false });

        let event = handle_command(&manager, PanelCommand::SetKey).await;
        assert_eq!(
            event,
            PanelEvent::KeyActionResult {
                success: true,
                message: "credentials saved".to_string()
            }
        );

        let event = handle_command(&manager, PanelCommand::GetKeyStatus).await;
        assert_eq!(event, PanelEvent::KeyStatus { has_key: true });

        let event = handle_command(&manager, PanelCommand::ClearKey).await;
        assert_eq!(
            event,
            PanelEvent::KeyActionResult {
                success: true,
                message: "credentials cleared".to_string()
            }
        );

        let event = handle_command(&manager, PanelCommand::GetKeyStatus).await;
        assert_eq!(event, PanelEvent::KeyStatus { has_key: false });
    }
}
