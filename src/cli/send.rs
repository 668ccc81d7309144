use std::io::{self, Write};

use anyhow::{Result, bail};

use crate::chat::{ChatSession, Completion, HttpChatClient, Skipped, SubmitOutcome};
use crate::core::AppConfig;
use crate::ui::{MemoryInput, MemoryTranscript, MemoryTrigger, SpinnerIndicator, Surfaces};

/// The bot message a one-shot send produced and how the request settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub completion: Completion,
    pub text: String,
    pub endpoint: String,
}

/// Send one message through a headless session. Every outcome the
/// session can show, including the error text, comes back as an
/// `Exchange`; only a message that was never sent is an `Err`.
pub async fn send_message(config: &AppConfig, message: &str, quiet: bool) -> Result<Exchange> {
    let indicator = if quiet {
        SpinnerIndicator::quiet(&config.strings.busy)
    } else {
        SpinnerIndicator::new(&config.strings.busy)
    };
    let surfaces = Surfaces::new(
        MemoryTranscript::new(),
        MemoryInput::with_text(message),
        indicator,
        MemoryTrigger::new(),
    );
    let client = HttpChatClient::from_config(config);
    let endpoint = client.endpoint().to_string();
    let mut session = ChatSession::new(Box::new(client), surfaces, config.strings.clone());

    let completion = match session.submit().await {
        SubmitOutcome::Completed(completion) => completion,
        SubmitOutcome::Skipped(Skipped::EmptyInput) => bail!("Message is empty"),
        SubmitOutcome::Skipped(Skipped::Busy) => bail!("A request is already outstanding"),
    };

    let text = match session.transcript().last() {
        Some(msg) => msg.text().to_string(),
        None => bail!("No reply was recorded"),
    };

    Ok(Exchange {
        completion,
        text,
        endpoint,
    })
}

/// Print the bot text, then fail if it was the error text so the
/// process exits non-zero.
pub fn report(exchange: &Exchange, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", exchange.text)?;
    out.flush()?;
    if exchange.completion == Completion::Error {
        bail!("Could not get a reply from {}", exchange.endpoint);
    }
    Ok(())
}

pub async fn run(config: AppConfig, message: &str, quiet: bool) -> Result<()> {
    let exchange = send_message(&config, message, quiet).await?;
    report(&exchange, &mut io::stdout())
}
