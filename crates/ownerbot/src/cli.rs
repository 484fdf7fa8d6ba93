use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ownerbot")]
#[command(author, version, about = "Single-owner Telegram control bot", long_about = None)]
pub struct Cli {
    /// Port to listen on (overrides PORT)
    #[arg(long, global = true)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Register the webhook (if RENDER_EXTERNAL_URL is set) and serve updates
    Run,

    /// Register the webhook with Telegram and exit
    SetWebhook,

    /// Remove the webhook registration and exit
    DeleteWebhook,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
