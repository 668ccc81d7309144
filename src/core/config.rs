use std::env;
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_CHAT_PATH: &str = "/chat";
pub const DEFAULT_REPLY_FIELD: &str = "response";
pub const DEFAULT_FALLBACK_TEXT: &str = "Sorry, I didn't understand that.";
pub const DEFAULT_ERROR_TEXT: &str = "⚠️ Error connecting to the server.";
pub const DEFAULT_BUSY_TEXT: &str = "Bot is typing...";

/// Text shown to the user that doesn't come from the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserStrings {
    /// Shown when the server answered without a usable reply
    pub fallback: String,
    /// Shown when the request failed
    pub error: String,
    /// Shown next to the busy indicator
    pub busy: String,
}

impl Default for UserStrings {
    fn default() -> Self {
        Self {
            fallback: env::var("CHATLINE_FALLBACK_TEXT")
                .unwrap_or_else(|_| DEFAULT_FALLBACK_TEXT.to_string()),
            error: env::var("CHATLINE_ERROR_TEXT")
                .unwrap_or_else(|_| DEFAULT_ERROR_TEXT.to_string()),
            busy: env::var("CHATLINE_BUSY_TEXT").unwrap_or_else(|_| DEFAULT_BUSY_TEXT.to_string()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_url: String,
    pub chat_path: String,
    pub reply_field: String,
    pub timeout: Option<Duration>,
    pub strings: UserStrings,
}

impl Default for AppConfig {
    fn default() -> Self {
        let server_url =
            env::var("CHATLINE_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        let chat_path =
            env::var("CHATLINE_CHAT_PATH").unwrap_or_else(|_| DEFAULT_CHAT_PATH.to_string());
        let reply_field =
            env::var("CHATLINE_REPLY_FIELD").unwrap_or_else(|_| DEFAULT_REPLY_FIELD.to_string());
        let timeout = env::var("CHATLINE_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| match secs.parse::<u64>() {
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(e) => {
                    tracing::warn!("Ignoring CHATLINE_TIMEOUT_SECS={}: {}", secs, e);
                    None
                }
            });

        Self {
            server_url,
            chat_path,
            reply_field,
            timeout,
            strings: UserStrings::default(),
        }
    }
}
