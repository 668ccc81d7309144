use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::chat::service::{ChatService, ReplyPayload, TransportFailure};
use crate::core::AppConfig;

/// Talks to a chat server over HTTP. One POST per message, JSON in and
/// JSON out.
#[derive(Clone, Debug)]
pub struct HttpChatClient {
    http: reqwest::Client,
    endpoint: String,
    reply_field: String,
    timeout: Option<Duration>,
}

impl HttpChatClient {
    pub fn new(server_url: &str, chat_path: &str, reply_field: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint_url(server_url, chat_path),
            reply_field: reply_field.to_string(),
            timeout: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.server_url, &config.chat_path, &config.reply_field)
            .with_timeout(config.timeout)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn endpoint_url(server_url: &str, chat_path: &str) -> String {
    format!(
        "{}/{}",
        server_url.trim_end_matches('/'),
        chat_path.trim_start_matches('/')
    )
}

#[async_trait]
impl ChatService for HttpChatClient {
    async fn send(&self, message: &str) -> Result<ReplyPayload, TransportFailure> {
        let payload = json!({ "message": message });

        let mut request = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&payload);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("POST {} ({} chars)", self.endpoint, message.len());
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportFailure::Status(status));
        }

        // Read the raw text first so a non-JSON body is reported as a
        // parse failure rather than a transport error
        let body = response.text().await?;
        let body: Value = serde_json::from_str(&body)?;
        tracing::trace!("Chat response body: {}", body);

        Ok(ReplyPayload::from_body(&body, &self.reply_field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serial_test::serial;

    #[test]
    fn test_endpoint_url_joins_slashes() {
        assert_eq!(
            endpoint_url("http://localhost:5000", "/chat"),
            "http://localhost:5000/chat"
        );
        assert_eq!(
            endpoint_url("http://localhost:5000/", "/api/chat"),
            "http://localhost:5000/api/chat"
        );
        assert_eq!(
            endpoint_url("http://localhost:5000", "chat"),
            "http://localhost:5000/chat"
        );
    }

    #[tokio::test]
    async fn test_send_posts_message_and_reads_reply() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/chat")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"message": "Hi"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response": "Hello!"}"#)
            .create_async()
            .await;

        let client = HttpChatClient::new(&server.url(), "/chat", "response");
        let result = client.send("Hi").await;

        mock.assert_async().await;
        assert_eq!(result.unwrap(), ReplyPayload::new("Hello!"));
    }

    #[tokio::test]
    async fn test_send_missing_reply_is_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = HttpChatClient::new(&server.url(), "/chat", "response");
        let result = client.send("Hi").await.unwrap();

        assert_eq!(result.reply, None);
    }

    #[tokio::test]
    async fn test_send_custom_reply_field() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"reply": "Take care!"}"#)
            .create_async()
            .await;

        let client = HttpChatClient::new(&server.url(), "/api/chat", "reply");
        let result = client.send("bye").await.unwrap();

        assert_eq!(result.reply.as_deref(), Some("Take care!"));
    }

    #[tokio::test]
    async fn test_send_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat")
            .with_status(500)
            .with_body(r#"{"response": "should not be used"}"#)
            .create_async()
            .await;

        let client = HttpChatClient::new(&server.url(), "/chat", "response");
        let err = client.send("Hi").await.unwrap_err();

        assert!(matches!(
            err,
            TransportFailure::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
        ));
    }

    #[tokio::test]
    async fn test_send_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let client = HttpChatClient::new(&server.url(), "/chat", "response");
        let err = client.send("Hi").await.unwrap_err();

        assert!(matches!(err, TransportFailure::Body(_)));
    }

    #[tokio::test]
    async fn test_send_connection_refused() {
        // Nothing listens on port 1
        let client = HttpChatClient::new("http://127.0.0.1:1", "/chat", "response");
        let err = client.send("Hi").await.unwrap_err();

        assert!(matches!(err, TransportFailure::Request(_)));
    }

    #[tokio::test]
    async fn test_send_times_out() {
        // The kernel completes the handshake but nothing ever answers
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let client = HttpChatClient::new(&format!("http://{}", addr), "/chat", "response")
            .with_timeout(Some(Duration::from_millis(100)));
        let err = client.send("Hi").await.unwrap_err();

        assert!(matches!(err, TransportFailure::Request(ref e) if e.is_timeout()));
        drop(listener);
    }

    #[test]
    #[serial]
    fn test_from_config() {
        let config = AppConfig {
            server_url: String::from("http://example.test/"),
            chat_path: String::from("/api/chat"),
            reply_field: String::from("reply"),
            timeout: Some(Duration::from_secs(3)),
            ..AppConfig::default()
        };
        let client = HttpChatClient::from_config(&config);

        assert_eq!(client.endpoint(), "http://example.test/api/chat");
        assert_eq!(client.reply_field, "reply");
        assert_eq!(client.timeout, Some(Duration::from_secs(3)));
    }
}
