//! Test utilities for integration tests
use chatline::chat::{ChatSession, HttpChatClient};
use chatline::core::{AppConfig, UserStrings};
use chatline::ui::{MemoryIndicator, MemoryInput, MemoryTranscript, MemoryTrigger, Surfaces};

pub const FALLBACK: &str = "Sorry, I didn't understand that.";
pub const ERROR: &str = "⚠️ Error connecting to the server.";

/// Handles onto the surfaces of a session under test.
pub struct TestSession {
    pub session: ChatSession,
    pub transcript: MemoryTranscript,
    pub input: MemoryInput,
    pub indicator: MemoryIndicator,
    pub trigger: MemoryTrigger,
}

/// A config pointed at `server_url` that doesn't depend on the
/// process environment.
pub fn test_config(server_url: &str) -> AppConfig {
    AppConfig {
        server_url: server_url.to_string(),
        chat_path: String::from("/chat"),
        reply_field: String::from("response"),
        timeout: None,
        strings: UserStrings {
            fallback: FALLBACK.to_string(),
            error: ERROR.to_string(),
            busy: String::from("Bot is typing..."),
        },
    }
}

/// Creates a headless session talking HTTP to `config`'s server.
pub fn test_session(config: &AppConfig) -> TestSession {
    let transcript = MemoryTranscript::new();
    let input = MemoryInput::new();
    let indicator = MemoryIndicator::new();
    let trigger = MemoryTrigger::new();

    let surfaces = Surfaces::new(
        transcript.clone(),
        input.clone(),
        indicator.clone(),
        trigger.clone(),
    );
    let client = HttpChatClient::from_config(config);
    let session = ChatSession::new(Box::new(client), surfaces, config.strings.clone());

    TestSession {
        session,
        transcript,
        input,
        indicator,
        trigger,
    }
}
