use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rikki_core::{logging, Config, EcoApiClient, ReplyMode, SessionBuilder};
use tokio::sync::mpsc;

mod app;
mod handler;
mod tui;
mod ui;

use app::App;
use tui::EventHandler;

#[derive(Parser, Debug)]
#[command(name = "rikki")]
#[command(version, about = "Rikki, your eco-friendly AI assistant, in the terminal")]
struct Cli {
    /// Get chat replies from the remote endpoint instead of canned responses
    #[arg(long)]
    remote: bool,

    /// Chat endpoint URL
    #[arg(long, value_name = "URL")]
    chat_url: Option<String>,

    /// Base URL for the image analysis API
    #[arg(long, value_name = "URL")]
    api_base: Option<String>,

    /// Seed for canned reply selection and delays
    #[arg(long)]
    seed: Option<u64>,

    /// Minimum scripted reply delay in milliseconds
    #[arg(long, value_name = "MS")]
    min_delay_ms: Option<u64>,

    /// Maximum scripted reply delay in milliseconds
    #[arg(long, value_name = "MS")]
    max_delay_ms: Option<u64>,

    /// Write the effective settings to the config file before starting
    #[arg(long)]
    save_config: bool,
}

impl Cli {
    fn apply_to(&self, config: &mut Config) {
        if self.remote {
            config.reply_mode = ReplyMode::Remote;
        }
        if let Some(url) = &self.chat_url {
            config.chat_url = url.clone();
        }
        if let Some(base) = &self.api_base {
            config.api_base = base.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(ms) = self.min_delay_ms {
            config.min_reply_delay_ms = ms;
        }
        if let Some(ms) = self.max_delay_ms {
            config.max_reply_delay_ms = ms;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init().context("Failed to initialize logging")?;

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!("Ignoring unreadable config: {}", err);
        let mut config = Config::new();
        config.apply_env();
        config
    });
    cli.apply_to(&mut config);
    config
        .validate()
        .map_err(|message| anyhow::anyhow!("Invalid settings: {}", message))?;

    if cli.save_config {
        config.save().context("Failed to save config")?;
        tracing::info!("Saved config to {}", Config::get_config_path()?.display());
    }

    let client = Arc::new(EcoApiClient::new(&config.chat_url, &config.api_base));
    tracing::info!(
        "Reply mode: {}, chat endpoint: {}, image analysis: {}",
        config.reply_mode.as_str(),
        client.chat_url(),
        client.analyze_url()
    );

    let (session_tx, mut session_rx) = mpsc::unbounded_channel();
    let session_builder = SessionBuilder::new(client, session_tx)
        .mode(config.reply_mode)
        .seed(config.seed)
        .delay_range(config.min_delay(), config.max_delay());

    let mut app = App::new(session_builder);

    // Setup terminal
    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();

    let result = run(&mut terminal, &mut app, &mut events, &mut session_rx).await;

    // Restore terminal
    tui::restore()?;

    if let Err(err) = &result {
        tracing::error!("Exited with error: {:#}", err);
        eprintln!("Logs: {}", logging::current_log_file().display());
    }

    result
}

async fn run(
    terminal: &mut tui::Tui,
    app: &mut App,
    events: &mut EventHandler,
    session_rx: &mut mpsc::UnboundedReceiver<rikki_core::SessionEvent>,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        tokio::select! {
            event = events.next() => match event {
                Some(event) => handler::handle_event(app, event).await?,
                None => break,
            },
            Some(event) = session_rx.recv() => app.apply_session_event(event),
        }
    }

    // Drop any in-flight reply work before the runtime shuts down
    app.go_to_landing();
    tracing::info!("Rikki exiting");
    Ok(())
}
