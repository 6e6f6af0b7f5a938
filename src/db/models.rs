use serde::Serialize;
use serde_json::Value;

/// Shown in place of a message whose stored payload cannot be decoded.
pub const DECODE_ERROR_SENTINEL: &str = "Erro ao processar mensagem";

/// One normalized message of a conversation, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: i64,
    pub session_id: String,
    pub sender: String,
    pub content: String,
}

/// Roll-up of all conversations belonging to one client prefix.
#[derive(Debug, Clone, Serialize)]
pub struct ClientSummary {
    pub client: String,
    pub number_count: i64,
    pub message_count: i64,
    pub last_id: i64,
}

/// One session id with its message count.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub message_count: i64,
    pub last_id: i64,
}

impl ChatMessage {
    /// Normalizes a raw stored payload into a display record.
    ///
    /// The store holds the payload either as native JSON or as a text column
    /// with a JSON document inside (and occasionally double-encoded), so the
    /// payload is decoded defensively: an object is used as-is, a string is
    /// parsed one more time, and everything else lands on the sentinel.
    /// Total function: a malformed row never aborts the batch.
    pub fn from_payload(id: i64, session_id: String, payload: Option<Value>) -> Self {
        let object = match payload {
            Some(Value::Object(map)) => Some(map),
            Some(Value::String(inner)) => match serde_json::from_str(&inner) {
                Ok(Value::Object(map)) => Some(map),
                _ => None,
            },
            _ => None,
        };

        match object {
            Some(map) => ChatMessage {
                id,
                session_id,
                sender: map
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                content: map
                    .get("content")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
            },
            None => ChatMessage {
                id,
                session_id,
                sender: "system".to_string(),
                content: DECODE_ERROR_SENTINEL.to_string(),
            },
        }
    }
}
