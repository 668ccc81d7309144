pub mod client;
pub mod models;
pub mod service;
pub mod session;

pub use client::HttpChatClient;
pub use models::{Message, Sender, Transcript};
pub use service::{BoxedChatService, ChatService, ReplyPayload, TransportFailure};
pub use session::{ChatSession, Completion, SessionState, Skipped, SubmitOutcome, Trigger};
