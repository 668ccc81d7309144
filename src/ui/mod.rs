//! The surfaces a chat session drives. A front-end provides one of
//! each; the session never looks them up on its own.
use crate::chat::Message;

pub mod memory;
pub mod terminal;

pub use memory::{MemoryIndicator, MemoryInput, MemoryTranscript, MemoryTrigger};
pub use terminal::{SpinnerIndicator, TerminalTranscript};

/// Where rendered messages go.
pub trait TranscriptView {
    fn append(&mut self, message: &Message);
    /// Bring the most recently appended message into view.
    fn scroll_to_latest(&mut self);
    fn clear(&mut self);
}

/// The single-line text entry.
pub trait InputField {
    fn contents(&self) -> String;
    fn clear(&mut self);
}

pub trait BusyIndicator {
    fn show(&mut self);
    fn hide(&mut self);
    fn is_visible(&self) -> bool;
}

/// The control that fires a submit (send button or Enter key).
pub trait SendTrigger {
    fn set_enabled(&mut self, enabled: bool);
    fn is_enabled(&self) -> bool;
}

/// The four surfaces a session is constructed with.
pub struct Surfaces {
    pub transcript: Box<dyn TranscriptView>,
    pub input: Box<dyn InputField>,
    pub indicator: Box<dyn BusyIndicator>,
    pub trigger: Box<dyn SendTrigger>,
}

impl Surfaces {
    pub fn new(
        transcript: impl TranscriptView + 'static,
        input: impl InputField + 'static,
        indicator: impl BusyIndicator + 'static,
        trigger: impl SendTrigger + 'static,
    ) -> Self {
        Self {
            transcript: Box::new(transcript),
            input: Box::new(input),
            indicator: Box::new(indicator),
            trigger: Box::new(trigger),
        }
    }
}
