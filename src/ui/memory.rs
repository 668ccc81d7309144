//! Headless surfaces that keep everything in memory. Each one is a
//! cheap handle: clone it before handing it to a session and the clone
//! still sees what the session did.
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{BusyIndicator, InputField, SendTrigger, TranscriptView};
use crate::chat::Message;

#[derive(Default, Debug)]
struct TranscriptState {
    messages: Vec<Message>,
    // Number of messages that were in view after the last scroll
    scrolled_to: usize,
}

#[derive(Clone, Default, Debug)]
pub struct MemoryTranscript {
    state: Arc<Mutex<TranscriptState>>,
}

impl MemoryTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.state
            .lock()
            .expect("Unable to lock transcript")
            .messages
            .clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.messages()
            .iter()
            .map(|m| m.text().to_string())
            .collect()
    }

    pub fn last(&self) -> Option<Message> {
        self.messages().last().cloned()
    }

    /// True when the latest message has been scrolled into view.
    pub fn is_scrolled_to_latest(&self) -> bool {
        let state = self.state.lock().expect("Unable to lock transcript");
        state.scrolled_to == state.messages.len()
    }
}

impl TranscriptView for MemoryTranscript {
    fn append(&mut self, message: &Message) {
        let mut state = self.state.lock().expect("Unable to lock transcript");
        state.messages.push(message.clone());
    }

    fn scroll_to_latest(&mut self) {
        let mut state = self.state.lock().expect("Unable to lock transcript");
        state.scrolled_to = state.messages.len();
    }

    fn clear(&mut self) {
        let mut state = self.state.lock().expect("Unable to lock transcript");
        state.messages.clear();
        state.scrolled_to = 0;
    }
}

#[derive(Clone, Default, Debug)]
pub struct MemoryInput {
    value: Arc<Mutex<String>>,
}

impl MemoryInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let input = Self::new();
        input.set(text);
        input
    }

    /// Simulates the user typing into the field.
    pub fn set(&self, text: &str) {
        *self.value.lock().expect("Unable to lock input") = text.to_string();
    }
}

impl InputField for MemoryInput {
    fn contents(&self) -> String {
        self.value.lock().expect("Unable to lock input").clone()
    }

    fn clear(&mut self) {
        self.value.lock().expect("Unable to lock input").clear();
    }
}

#[derive(Clone, Default, Debug)]
pub struct MemoryIndicator {
    visible: Arc<AtomicBool>,
    shown: Arc<AtomicUsize>,
}

impl MemoryIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the indicator has been shown.
    pub fn show_count(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }
}

impl BusyIndicator for MemoryIndicator {
    fn show(&mut self) {
        self.visible.store(true, Ordering::SeqCst);
        self.shown.fetch_add(1, Ordering::SeqCst);
    }

    fn hide(&mut self) {
        self.visible.store(false, Ordering::SeqCst);
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Debug)]
pub struct MemoryTrigger {
    enabled: Arc<AtomicBool>,
}

impl MemoryTrigger {
    pub fn new() -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl Default for MemoryTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl SendTrigger for MemoryTrigger {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}
