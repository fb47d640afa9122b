use std::time::Duration;

use anyhow::{Context, Result};
use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// Prefix for environment overrides, e.g. `WORD_RUSH_GAME__ROUND_DURATION_MS`
const ENV_PREFIX: &str = "WORD_RUSH";
/// Optional config file looked up in the working directory (any format `config` knows)
const CONFIG_FILE: &str = "word-rush";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub game: GameConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// Total length of a round
    pub round_duration_ms: u64,
    /// Countdown decrement per tick
    pub tick_interval_ms: u64,
    /// Every tick at or below this many whole seconds left buzzes
    pub panic_threshold_secs: u64,
    pub cycling: CyclingMode,
}

/// How words and images advance through their queues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclingMode {
    /// One queue of (word, image) cards with a single cursor
    Paired,
    /// Separate word and image queues that may drift apart after a reshuffle
    Independent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub render: RenderMode,
    pub haptics: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Text,
    Json,
}

impl Config {
    /// Load defaults, then `word-rush.{toml,json,...}`, then `WORD_RUSH_*` env vars
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let builder = Self::defaults()
            .context("Failed to register configuration defaults")?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::load(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("game.round_duration_ms", 10_000_i64)?
            .set_default("game.tick_interval_ms", 1_000_i64)?
            .set_default("game.panic_threshold_secs", 10_i64)?
            .set_default("game.cycling", "paired")?
            .set_default("ui.render", "text")?
            .set_default("ui.haptics", true)
    }

    fn load(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: Config = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")?;

        config.game.validate()?;
        Ok(config)
    }
}

impl GameConfig {
    pub fn validate(&self) -> GameResult<()> {
        if self.round_duration_ms == 0 {
            return Err(GameError::InvalidConfig(
                "round_duration_ms must be positive".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfig(
                "tick_interval_ms must be positive".to_string(),
            ));
        }
        if self.tick_interval_ms > self.round_duration_ms {
            return Err(GameError::InvalidConfig(format!(
                "tick_interval_ms ({}) exceeds round_duration_ms ({})",
                self.tick_interval_ms, self.round_duration_ms
            )));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_duration_ms: 10_000,
            tick_interval_ms: 1_000,
            panic_threshold_secs: 10,
            cycling: CyclingMode::Paired,
        }
    }
}
