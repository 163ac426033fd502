//! Drag-lock WebSocket message protocol.
//!
//! Serialized as JSON. The inbound frame keeps `action` as a raw string so
//! that unknown actions can be echoed back in the reply, which a closed enum
//! cannot express.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{NoteId, UserId};

/// `type` discriminator carried by every direct reply.
pub const RESPONSE_TYPE: &str = "DRAG_LOCK";

/// Known client actions, plus the reply-only error marker.
pub mod actions {
    pub const ACQUIRE: &str = "ACQUIRE";
    pub const RELEASE: &str = "RELEASE";
    pub const ERROR: &str = "ERROR";
}

// ---------------------------------------------------------------------------
// Client -> server
// ---------------------------------------------------------------------------

/// Inbound frame on a board connection.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DragLockRequest {
    pub action: String,
    #[serde(rename = "noteId")]
    pub note_id: NoteId,
}

impl DragLockRequest {
    /// Decode a raw text frame.
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        serde_json::from_str(text).map_err(|e| CoreError::Validation(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Server -> client (direct reply, same connection)
// ---------------------------------------------------------------------------

/// Reply to the connection that sent a [`DragLockRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DragLockResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub action: String,
    /// Absent when the inbound frame was too malformed to carry one.
    #[serde(rename = "noteId", skip_serializing_if = "Option::is_none")]
    pub note_id: Option<NoteId>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DragLockResponse {
    pub fn granted(action: &str, note_id: NoteId) -> Self {
        Self {
            kind: RESPONSE_TYPE.to_string(),
            action: action.to_string(),
            note_id: Some(note_id),
            success: true,
            error: None,
        }
    }

    pub fn denied(action: &str, note_id: Option<NoteId>, error: &str) -> Self {
        Self {
            kind: RESPONSE_TYPE.to_string(),
            action: action.to_string(),
            note_id,
            success: false,
            error: Some(error.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Server -> board subscribers (broadcast)
// ---------------------------------------------------------------------------

/// Board-wide event published on a successful lock state transition.
///
/// Adjacent tagging produces the wire shape
/// `{ "type": "NOTE_DRAG_START", "data": { "noteId": ..., "userId": ... } }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum BoardEvent {
    #[serde(rename = "NOTE_DRAG_START")]
    NoteDragStart {
        #[serde(rename = "noteId")]
        note_id: NoteId,
        #[serde(rename = "userId")]
        user_id: UserId,
    },

    #[serde(rename = "NOTE_DRAG_END")]
    NoteDragEnd {
        #[serde(rename = "noteId")]
        note_id: NoteId,
        #[serde(rename = "userId")]
        user_id: UserId,
    },
}

impl BoardEvent {
    /// The user whose drag produced this event. Broadcast fan-out uses this
    /// to skip the actor's own connections.
    pub fn user_id(&self) -> UserId {
        match self {
            BoardEvent::NoteDragStart { user_id, .. } => *user_id,
            BoardEvent::NoteDragEnd { user_id, .. } => *user_id,
        }
    }

    pub fn note_id(&self) -> NoteId {
        match self {
            BoardEvent::NoteDragStart { note_id, .. } => *note_id,
            BoardEvent::NoteDragEnd { note_id, .. } => *note_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn request_parses_known_action() {
        let note_id = uuid::Uuid::new_v4();
        let text = format!(r#"{{"action":"ACQUIRE","noteId":"{note_id}"}}"#);

        let req = DragLockRequest::parse(&text).unwrap();
        assert_eq!(req.action, actions::ACQUIRE);
        assert_eq!(req.note_id, note_id);
    }

    #[test]
    fn request_keeps_unknown_action_verbatim() {
        let note_id = uuid::Uuid::new_v4();
        let text = format!(r#"{{"action":"WIGGLE","noteId":"{note_id}"}}"#);

        let req = DragLockRequest::parse(&text).unwrap();
        assert_eq!(req.action, "WIGGLE");
    }

    #[test]
    fn malformed_request_is_a_validation_error() {
        assert_matches!(
            DragLockRequest::parse("not json"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            DragLockRequest::parse(r#"{"action":"ACQUIRE"}"#),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            DragLockRequest::parse(r#"{"action":"ACQUIRE","noteId":"not-a-uuid"}"#),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn granted_response_omits_error_field() {
        let note_id = uuid::Uuid::new_v4();
        let json =
            serde_json::to_string(&DragLockResponse::granted(actions::ACQUIRE, note_id)).unwrap();

        assert!(json.contains(r#""type":"DRAG_LOCK""#));
        assert!(json.contains(r#""action":"ACQUIRE""#));
        assert!(json.contains(r#""success":true"#));
        assert!(!json.contains("error"));
    }

    #[test]
    fn denied_response_carries_error_string() {
        let json = serde_json::to_string(&DragLockResponse::denied(
            actions::ERROR,
            None,
            "Invalid message format",
        ))
        .unwrap();

        assert!(json.contains(r#""action":"ERROR""#));
        assert!(json.contains(r#""success":false"#));
        assert!(json.contains(r#""error":"Invalid message format""#));
        // No noteId could be decoded, so none is echoed.
        assert!(!json.contains("noteId"));
    }

    #[test]
    fn board_event_wire_shape() {
        let note_id = uuid::Uuid::new_v4();
        let user_id = uuid::Uuid::new_v4();
        let event = BoardEvent::NoteDragStart { note_id, user_id };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "NOTE_DRAG_START");
        assert_eq!(json["data"]["noteId"], note_id.to_string());
        assert_eq!(json["data"]["userId"], user_id.to_string());

        let back: BoardEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn board_event_end_round_trip() {
        let event = BoardEvent::NoteDragEnd {
            note_id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"NOTE_DRAG_END""#));

        let back: BoardEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
