//! Interactive console chat with the companion, one message per line.

use clap::Parser;
use emo_companion_core::{
    CompanionConfig, CompanionEngine, FallbackPicker, GeminiGenerator, InMemoryProfileStore, ProfileStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "companion-chat")]
#[command(version)]
#[command(about = "Chat with the EMO companion from the terminal")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "EMO_CONFIG")]
    config: Option<PathBuf>,

    /// User the conversation belongs to
    #[arg(short, long, default_value = "local-user")]
    user: String,

    /// Gemini API key; without one every reply is a fallback phrase
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Seed for the fallback phrase picker
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("emo_companion_core={},companion_chat={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => CompanionConfig::load(path)?,
        None => CompanionConfig::default(),
    };

    if cli.api_key.is_none() {
        warn!("no API key given, replies will use fallback phrases");
    }

    let store: Arc<dyn ProfileStore> = Arc::new(InMemoryProfileStore::new());
    let generator = Arc::new(GeminiGenerator::new(&config.generation, cli.api_key.clone()));
    let fallback = match cli.seed {
        Some(seed) => FallbackPicker::seeded(seed),
        None => FallbackPicker::new(),
    };
    let name = config.identity.name.clone();

    let engine = CompanionEngine::new(config, store, generator, fallback);
    let profile = engine.profile_for_user(&cli.user).await?;

    println!("{} está listo. Escribe un mensaje (Ctrl+D para salir).", name);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match engine.chat(&profile.id, &line).await {
            Ok(outcome) => {
                println!("{}: {}", name, outcome.response_text);
                println!(
                    "   [{} | energía {} | estrés {} | confianza {} | voz {:.1}/{:.1}]",
                    outcome.new_state.mood,
                    outcome.new_state.energy,
                    outcome.new_state.stress,
                    outcome.new_state.trust,
                    outcome.voice.rate,
                    outcome.voice.pitch,
                );
            }
            Err(e) => {
                error!(error = %e, "turn failed");
                println!("{}: {}", name, e.public_message());
            }
        }
    }

    Ok(())
}
