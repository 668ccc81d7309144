use anyhow::{Context, Result};
use console::{Term, measure_text_width};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::chat::{ChatSession, HttpChatClient, Trigger};
use crate::core::AppConfig;
use crate::ui::{MemoryInput, MemoryTrigger, SpinnerIndicator, Surfaces, TerminalTranscript};

const PROMPT: &str = ">>> ";

const HELP: &str = "Type a message and press Enter to send it.
/clear clears the transcript, /help shows this message, /quit exits.";

#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Clear,
    Help,
    Quit,
    Unknown(String),
}

/// Lines starting with `/` are commands for the client, everything
/// else is a message for the server.
fn parse_command(line: &str) -> Option<ReplCommand> {
    let name = line.trim().strip_prefix('/')?;
    let cmd = match name {
        "clear" => ReplCommand::Clear,
        "help" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        other => ReplCommand::Unknown(other.to_string()),
    };
    Some(cmd)
}

/// Number of terminal rows rustyline used to echo `prompt` followed by
/// `line` on a terminal `cols` wide.
fn echoed_rows(prompt: &str, line: &str, cols: usize) -> usize {
    let width = measure_text_width(prompt) + measure_text_width(line);
    if cols == 0 || width == 0 {
        return 1;
    }
    width.div_ceil(cols).max(1)
}

/// Erase the line rustyline echoed so the message only shows once, as
/// the labelled transcript entry.
fn erase_echo(term: &Term, line: &str) {
    if !term.is_term() {
        return;
    }
    let (_, cols) = term.size();
    if let Err(e) = term.clear_last_lines(echoed_rows(PROMPT, line, cols as usize)) {
        tracing::debug!("Failed to erase echoed input: {}", e);
    }
}

pub async fn run(config: AppConfig, quiet: bool) -> Result<()> {
    let mut rl = DefaultEditor::new().context("Failed to start the line editor")?;

    // rustyline owns the keyboard, the session reads whatever line it
    // last returned from this shared buffer
    let input = MemoryInput::new();
    let indicator = if quiet {
        SpinnerIndicator::quiet(&config.strings.busy)
    } else {
        SpinnerIndicator::new(&config.strings.busy)
    };
    let surfaces = Surfaces::new(
        TerminalTranscript::new(),
        input.clone(),
        indicator,
        MemoryTrigger::new(),
    );

    let client = HttpChatClient::from_config(&config);
    tracing::info!("Chatting with {}", client.endpoint());
    let mut session = ChatSession::new(Box::new(client), surfaces, config.strings);

    let term = Term::stdout();
    println!("{}", HELP);

    loop {
        let readline = rl.readline(PROMPT);
        match readline {
            Ok(line) => match parse_command(&line) {
                Some(ReplCommand::Quit) => break,
                Some(ReplCommand::Help) => println!("{}", HELP),
                Some(ReplCommand::Clear) => {
                    if !session.clear() {
                        println!("Can't clear while waiting for a reply");
                    }
                }
                Some(ReplCommand::Unknown(name)) => {
                    println!("Unknown command /{}. Try /help", name);
                }
                None => {
                    if !line.trim().is_empty() {
                        if let Err(e) = rl.add_history_entry(line.as_str()) {
                            tracing::debug!("Failed to add history entry: {}", e);
                        }
                        erase_echo(&term, &line);
                    }
                    input.set(&line);
                    let outcome = session.handle_trigger(Trigger::EnterKey).await;
                    tracing::debug!("Submit finished: {:?}", outcome);
                }
            },
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("Failed to read input"),
        }
    }

    Ok(())
}
