//! The core models for a chat transcript shown to the user.
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "bot")]
    Bot,
}

impl Sender {
    /// Label shown in front of a message when it is rendered.
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "Bot",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single entry in the transcript. Fields are private so a message
/// can't be changed after it is created.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    sender: Sender,
    text: String,
    created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(sender: Sender, text: &str) -> Self {
        Message {
            sender,
            text: text.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn user(text: &str) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: &str) -> Self {
        Self::new(Sender::Bot, text)
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.sender, self.text)
    }
}

/// Append-only list of messages in the order they were shown.
#[derive(Default, Debug)]
pub struct Transcript(Vec<Message>);

impl Transcript {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, msg: Message) {
        self.0.push(msg)
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    pub fn last(&self) -> Option<&Message> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }
}
