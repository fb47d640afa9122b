use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use word_rush::{config::Config, ui};

// Ticks and taps share one thread; nothing in a round runs in parallel
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing; stdout belongs to the game screens
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_rush=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting word-rush...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        "Configuration loaded: {} ms rounds, {} ms ticks, panic at {} s, {:?} cycling",
        config.game.round_duration_ms,
        config.game.tick_interval_ms,
        config.game.panic_threshold_secs,
        config.game.cycling
    );

    ui::run(config).await
}
