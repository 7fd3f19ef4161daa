use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::info;
use murmur::{app, logging::init_logging, relay, Config};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "murmur", version, about = "Chat with a /chat endpoint from the terminal")]
struct Cli {
    /// Config file (default: ~/.config/murmur/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the chat widget (default)
    Chat {
        /// Base URL of the chat server
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Serve /chat backed by the Gemini API
    Serve {
        /// Address to listen on
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Chat { endpoint: None }) {
        Command::Chat { endpoint } => {
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint;
                murmur::config::validate_config(&config)?;
            }
            let _logger = init_logging(&config.log_level, false)?;
            app::run(&config).await?;
        }
        Command::Serve { bind } => {
            let _logger = init_logging(&config.log_level, true)?;
            let bind = bind.unwrap_or_else(|| config.relay.bind.clone());
            let state = relay::RelayState::new(&config.relay)?;
            info!("Forwarding /chat to {}", config.relay.api_url);
            relay::serve(&bind, state).await?;
        }
    }

    Ok(())
}
