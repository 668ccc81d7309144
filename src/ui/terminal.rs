//! Surfaces for an interactive terminal. Messages are printed to
//! stdout, the busy indicator is a spinner on stderr so it never ends
//! up in a piped transcript.
use std::time::Duration;

use chrono::Local;
use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

use super::{BusyIndicator, TranscriptView};
use crate::chat::{Message, Sender};

/// Format a message the way it is printed: local time it was created,
/// then the sender label, then the text.
pub fn render_line(message: &Message) -> String {
    let time = message.created_at().with_timezone(&Local).format("%H:%M");
    let label = format!("{}:", message.sender().label());
    let label = match message.sender() {
        Sender::User => style(label).cyan().bold(),
        Sender::Bot => style(label).green().bold(),
    };
    format!("{} {} {}", style(format!("[{}]", time)).dim(), label, message.text())
}

pub struct TerminalTranscript {
    term: Term,
}

impl TerminalTranscript {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TerminalTranscript {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptView for TerminalTranscript {
    fn append(&mut self, message: &Message) {
        if let Err(e) = self.term.write_line(&render_line(message)) {
            tracing::warn!("Failed to write message to terminal: {}", e);
        }
    }

    fn scroll_to_latest(&mut self) {
        // The terminal scrolls on its own once the line is flushed
        if let Err(e) = self.term.flush() {
            tracing::warn!("Failed to flush terminal: {}", e);
        }
    }

    fn clear(&mut self) {
        if let Err(e) = self.term.clear_screen() {
            tracing::warn!("Failed to clear terminal: {}", e);
        }
    }
}

/// Spinner shown while a reply is outstanding.
pub struct SpinnerIndicator {
    message: String,
    quiet: bool,
    spinner: Option<ProgressBar>,
}

impl SpinnerIndicator {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            quiet: false,
            spinner: None,
        }
    }

    /// An indicator that tracks visibility but never draws anything.
    pub fn quiet(message: &str) -> Self {
        Self {
            message: message.to_string(),
            quiet: true,
            spinner: None,
        }
    }
}

impl BusyIndicator for SpinnerIndicator {
    fn show(&mut self) {
        if self.spinner.is_some() {
            return;
        }
        let spinner = if self.quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        match ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            Ok(template) => spinner.set_style(template),
            Err(e) => tracing::warn!("Invalid spinner template: {}", e),
        }
        spinner.set_message(self.message.clone());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    fn hide(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn is_visible(&self) -> bool {
        self.spinner.is_some()
    }
}

impl Drop for SpinnerIndicator {
    fn drop(&mut self) {
        self.hide();
    }
}
