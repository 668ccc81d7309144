use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

pub mod chat;
pub mod send;

use crate::core::{AppConfig, logging};

/// Options for reaching the chat server. Anything left unset falls
/// back to the environment, then to the built-in defaults.
#[derive(Args, Debug, Default, Clone)]
pub struct ConnectionArgs {
    /// Base URL of the chat server
    #[arg(long)]
    server: Option<String>,

    /// Path of the chat endpoint on the server
    #[arg(long)]
    path: Option<String>,

    /// Name of the JSON field holding the reply
    #[arg(long)]
    reply_field: Option<String>,

    /// Give up on a request after this many seconds
    #[arg(long)]
    timeout: Option<u64>,
}

impl ConnectionArgs {
    pub fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(server) = self.server {
            config.server_url = server;
        }
        if let Some(path) = self.path {
            config.chat_path = path;
        }
        if let Some(reply_field) = self.reply_field {
            config.reply_field = reply_field;
        }
        if let Some(secs) = self.timeout {
            config.timeout = Some(Duration::from_secs(secs));
        }
        config
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start an interactive chat session
    Chat {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Don't draw the busy spinner
        #[arg(long, action, default_value = "false")]
        quiet: bool,
    },
    /// Send a single message and print the reply
    Send {
        /// The message to send
        message: String,

        #[command(flatten)]
        connection: ConnectionArgs,

        /// Don't draw the busy spinner
        #[arg(long, action, default_value = "false")]
        quiet: bool,
    },
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    logging::init(args.verbose);

    // Handle each sub command
    match args.command {
        Some(Command::Chat { connection, quiet }) => {
            let config = connection.apply(AppConfig::default());
            chat::run(config, quiet).await?;
        }
        Some(Command::Send {
            message,
            connection,
            quiet,
        }) => {
            let config = connection.apply(AppConfig::default());
            send::run(config, &message, quiet).await?;
        }
        None => {
            chat::run(AppConfig::default(), false).await?;
        }
    }

    Ok(())
}
