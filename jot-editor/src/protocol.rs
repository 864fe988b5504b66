use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Commands: host → editor (sent via evaluate_javascript)
// ---------------------------------------------------------------------------

/// Replies the native host injects into the webview. Each completes the
/// front-end request carrying the same `request_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BridgeCommand {
    FileCleared {
        request_id: u64,
    },
    FileOpened {
        request_id: u64,
        path: String,
        content: String,
    },
    FileSaved {
        request_id: u64,
        path: String,
    },
    /// The user dismissed the dialog. Not an error; the front end resolves
    /// the request with an empty result.
    DialogCancelled {
        request_id: u64,
    },
    OperationFailed {
        request_id: u64,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Events: editor → host (sent via postMessage)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BridgeEvent {
    Ready,
    NewFileRequested {
        request_id: u64,
    },
    OpenFileRequested {
        request_id: u64,
    },
    SaveRequested {
        request_id: u64,
        content: String,
    },
    SaveAsRequested {
        request_id: u64,
        content: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_deserialize_from_bridge_json() {
        let event: BridgeEvent =
            serde_json::from_str(r#"{"type":"SaveRequested","request_id":3,"content":"hi"}"#)
                .unwrap();
        match event {
            BridgeEvent::SaveRequested {
                request_id,
                content,
            } => {
                assert_eq!(request_id, 3);
                assert_eq!(content, "hi");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn ready_event_has_no_payload() {
        let event: BridgeEvent = serde_json::from_str(r#"{"type":"Ready"}"#).unwrap();
        assert!(matches!(event, BridgeEvent::Ready));
    }

    #[test]
    fn commands_serialize_with_type_tag() {
        let json =
            serde_json::to_string(&BridgeCommand::DialogCancelled { request_id: 7 }).unwrap();
        assert_eq!(json, r#"{"type":"DialogCancelled","request_id":7}"#);
    }

    #[test]
    fn failure_command_carries_message() {
        let json = serde_json::to_string(&BridgeCommand::OperationFailed {
            request_id: 2,
            message: "Failed to write '/etc/shadow': permission denied".to_string(),
        })
        .unwrap();
        assert!(json.contains(r#""type":"OperationFailed""#));
        assert!(json.contains("permission denied"));
    }
}
