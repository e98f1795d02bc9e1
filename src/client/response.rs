//! WestFax response envelope.
//!
//! Endpoints answer with an arbitrary JSON object. We keep the raw value and
//! only interpret the three fields the workflows care about: the `Success`
//! flag and the `InfoString`/`ErrorString` messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiResponse(pub Value);

impl ApiResponse {
    /// The `Success` flag, when present and boolean.
    pub fn success(&self) -> Option<bool> {
        self.0.get("Success").and_then(Value::as_bool)
    }

    pub fn info_string(&self) -> Option<&str> {
        self.message_field("InfoString")
    }

    pub fn error_string(&self) -> Option<&str> {
        self.message_field("ErrorString")
    }

    /// The `Result` payload (contact array, user info object, ...).
    pub fn result(&self) -> Option<&Value> {
        self.0.get("Result")
    }

    /// Raw response pretty-printed for the details panel.
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }

    fn message_field(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
