use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// The part of a successful response the session cares about. `reply`
/// is `None` when the server answered but gave nothing usable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplyPayload {
    pub reply: Option<String>,
}

impl ReplyPayload {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
        }
    }

    pub fn empty() -> Self {
        Self { reply: None }
    }

    /// Pull `field` out of a decoded response body. Anything other than
    /// a non-empty string counts as no reply.
    pub fn from_body(body: &Value, field: &str) -> Self {
        let reply = body
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self { reply }
    }
}

/// Anything that kept a response from being obtained or decoded.
#[derive(Debug, Error)]
pub enum TransportFailure {
    #[error("request to chat server failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("chat server responded with status {0}")]
    Status(reqwest::StatusCode),
    #[error("chat server returned a malformed body: {0}")]
    Body(#[from] serde_json::Error),
}

/// Sends one user message to a chat backend and resolves once with
/// either the decoded payload or the reason it failed.
#[async_trait]
pub trait ChatService {
    async fn send(&self, message: &str) -> Result<ReplyPayload, TransportFailure>;
}

pub type BoxedChatService = Box<dyn ChatService + Send + Sync + 'static>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_body_with_reply() {
        let payload = ReplyPayload::from_body(&json!({"response": "Hi there"}), "response");
        assert_eq!(payload, ReplyPayload::new("Hi there"));
    }

    #[test]
    fn test_from_body_missing_field() {
        let payload = ReplyPayload::from_body(&json!({}), "response");
        assert_eq!(payload, ReplyPayload::empty());
    }

    #[test]
    fn test_from_body_empty_string() {
        let payload = ReplyPayload::from_body(&json!({"response": ""}), "response");
        assert_eq!(payload.reply, None);
    }

    #[test]
    fn test_from_body_wrong_type() {
        let payload = ReplyPayload::from_body(&json!({"response": 42}), "response");
        assert_eq!(payload.reply, None);

        let payload = ReplyPayload::from_body(&json!({"response": null}), "response");
        assert_eq!(payload.reply, None);
    }

    #[test]
    fn test_from_body_not_an_object() {
        assert_eq!(ReplyPayload::from_body(&json!([1, 2]), "response").reply, None);
        assert_eq!(ReplyPayload::from_body(&json!("hi"), "response").reply, None);
    }

    #[test]
    fn test_from_body_custom_field() {
        let body = json!({"reply": "Hello there! 😊", "response": "ignored"});
        let payload = ReplyPayload::from_body(&body, "reply");
        assert_eq!(payload.reply.as_deref(), Some("Hello there! 😊"));
    }

    #[test]
    fn test_transport_failure_display() {
        let err = TransportFailure::Status(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(
            err.to_string(),
            "chat server responded with status 502 Bad Gateway"
        );

        let parse_err = serde_json::from_str::<Value>("<html>").unwrap_err();
        let err = TransportFailure::from(parse_err);
        assert!(err.to_string().starts_with("chat server returned a malformed body"));
    }
}
