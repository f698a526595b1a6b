use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "expense-bot")]
#[command(author, version, about = "Telegram bot that records expenses into a Google Sheets spreadsheet", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the bot (webhook mode by default)
    Run {
        /// Use long polling instead of registering a webhook
        #[arg(long)]
        polling: bool,
    },

    /// Connect to the spreadsheet once and report which worksheet rows go to
    CheckSheet,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
