use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAGIC_LINK_SENT_MESSAGE: &str = "Check your inbox for the magic link.";
pub const AUTH_CALLBACK_PATH: &str = "/auth/callback";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
}

/// Body of `POST /auth/v1/magiclink`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagicLinkPayload {
    pub email: String,
    pub data: serde_json::Map<String, serde_json::Value>,
    pub gotrue_meta_security: serde_json::Map<String, serde_json::Value>,
    pub redirect_to: String,
}

impl MagicLinkPayload {
    /// `origin` is a serialized origin (`scheme://host[:port]`, no trailing slash).
    pub fn new(email: &str, origin: &str) -> Self {
        Self {
            email: email.to_string(),
            data: serde_json::Map::new(),
            gotrue_meta_security: serde_json::Map::new(),
            redirect_to: format!("{}{}", origin, AUTH_CALLBACK_PATH),
        }
    }
}

/// Error body returned by GoTrue on non-2xx responses. Only `msg` is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoTrueErrorBody {
    pub msg: Option<serde_json::Value>,
}

impl GoTrueErrorBody {
    /// `msg` rendered as text. Strings are used verbatim, numbers and booleans
    /// are stringified; blank strings, objects and arrays yield `None`.
    pub fn message(&self) -> Option<String> {
        match self.msg.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Loading,
    Sent(String),
    Error(String),
}

impl SubmissionStatus {
    pub fn message(&self) -> &str {
        match self {
            Self::Sent(message) | Self::Error(message) => message,
            Self::Idle | Self::Loading => "",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Sent(_) => "sent",
            Self::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Email,
}

impl FormField {
    pub fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
        }
    }
}

pub type FieldErrors = BTreeMap<FormField, String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_message_renders_scalars() {
        let body = |raw: &str| serde_json::from_str::<GoTrueErrorBody>(raw).unwrap().message();

        assert_eq!(body(r#"{"msg": "Rate limited"}"#).as_deref(), Some("Rate limited"));
        assert_eq!(body(r#"{"msg": 429}"#).as_deref(), Some("429"));
        assert_eq!(body(r#"{"msg": false}"#).as_deref(), Some("false"));
        assert_eq!(body(r#"{"msg": "  "}"#), None);
        assert_eq!(body(r#"{"msg": null}"#), None);
        assert_eq!(body(r#"{"msg": {"detail": "x"}}"#), None);
        assert_eq!(body(r#"{"error": "invalid_request"}"#), None);
    }

    #[test]
    fn test_payload_shape() {
        let payload = MagicLinkPayload::new("owner@cafe.in", "https://cafe.example");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "email": "owner@cafe.in",
                "data": {},
                "gotrue_meta_security": {},
                "redirect_to": "https://cafe.example/auth/callback"
            })
        );
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(SubmissionStatus::default(), SubmissionStatus::Idle);
        assert_eq!(SubmissionStatus::Loading.message(), "");
        assert_eq!(SubmissionStatus::Error("Rate limited".into()).message(), "Rate limited");
        assert!(SubmissionStatus::Loading.is_loading());
        assert_eq!(SubmissionStatus::Sent(String::new()).label(), "sent");
    }
}
