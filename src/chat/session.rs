//! A chat session owns the transcript, the busy flag and the surfaces
//! it renders to. Each submit runs through `Idle -> Sending -> Idle`
//! and always ends with exactly one bot message.
use std::fmt;

use crate::chat::models::{Message, Transcript};
use crate::chat::service::{BoxedChatService, ReplyPayload, TransportFailure};
use crate::core::UserStrings;
use crate::ui::Surfaces;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
}

/// How a request settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The server sent a reply
    Success,
    /// The server answered but without a usable reply
    Fallback,
    /// The request failed or the body couldn't be decoded
    Error,
}

/// Why a submit didn't send anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Skipped {
    EmptyInput,
    Busy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Completed(Completion),
    Skipped(Skipped),
}

/// What fired a submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    SendControl,
    EnterKey,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::SendControl => write!(f, "send control"),
            Trigger::EnterKey => write!(f, "enter key"),
        }
    }
}

pub struct ChatSession {
    service: BoxedChatService,
    surfaces: Surfaces,
    strings: UserStrings,
    transcript: Transcript,
    busy: bool,
}

impl ChatSession {
    pub fn new(service: BoxedChatService, surfaces: Surfaces, strings: UserStrings) -> Self {
        Self {
            service,
            surfaces,
            strings,
            transcript: Transcript::new(),
            busy: false,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn state(&self) -> SessionState {
        if self.busy {
            SessionState::Sending
        } else {
            SessionState::Idle
        }
    }

    /// Read the input and, if it has text, send it and wait for the
    /// reply to be shown.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let text = match self.begin_submit() {
            Ok(text) => text,
            Err(skipped) => return SubmitOutcome::Skipped(skipped),
        };

        let result = self.service.send(&text).await;
        SubmitOutcome::Completed(self.settle(result))
    }

    /// Route a trigger to `submit`. Triggers are ignored while the send
    /// control is disabled.
    pub async fn handle_trigger(&mut self, trigger: Trigger) -> SubmitOutcome {
        if !self.surfaces.trigger.is_enabled() {
            tracing::debug!("Ignoring {} while a request is outstanding", trigger);
            return SubmitOutcome::Skipped(Skipped::Busy);
        }
        tracing::trace!("Submit fired by {}", trigger);
        self.submit().await
    }

    /// First half of a submit: everything up to the point where the
    /// request goes out. Returns the trimmed text to send. The caller
    /// must report the result with `on_request_complete`.
    pub fn begin_submit(&mut self) -> Result<String, Skipped> {
        if self.busy {
            return Err(Skipped::Busy);
        }

        let text = self.surfaces.input.contents().trim().to_string();
        if text.is_empty() {
            return Err(Skipped::EmptyInput);
        }

        self.append(Message::user(&text));
        self.surfaces.input.clear();
        self.busy = true;
        self.surfaces.indicator.show();
        self.surfaces.trigger.set_enabled(false);

        Ok(text)
    }

    /// Second half of a submit. Returns `None` when there was no
    /// request outstanding, in which case nothing changes.
    pub fn on_request_complete(
        &mut self,
        result: Result<ReplyPayload, TransportFailure>,
    ) -> Option<Completion> {
        if !self.busy {
            tracing::warn!("Dropping a chat result with no request outstanding");
            return None;
        }
        Some(self.settle(result))
    }

    /// Empty the transcript. Refused while a request is outstanding so
    /// the pending reply can't land in an empty transcript.
    pub fn clear(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.transcript.clear();
        self.surfaces.transcript.clear();
        true
    }

    fn settle(&mut self, result: Result<ReplyPayload, TransportFailure>) -> Completion {
        self.busy = false;
        self.surfaces.indicator.hide();
        self.surfaces.trigger.set_enabled(true);

        let (completion, text) = match result {
            Ok(ReplyPayload { reply: Some(reply) }) => (Completion::Success, reply),
            Ok(ReplyPayload { reply: None }) => {
                (Completion::Fallback, self.strings.fallback.clone())
            }
            Err(e) => {
                tracing::error!("Chat request failed: {}", e);
                (Completion::Error, self.strings.error.clone())
            }
        };
        self.append(Message::bot(&text));

        completion
    }

    fn append(&mut self, msg: Message) {
        self.surfaces.transcript.append(&msg);
        self.surfaces.transcript.scroll_to_latest();
        self.transcript.push(msg);
    }
}
