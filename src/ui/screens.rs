use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    config::RenderMode,
    game::{Feedback, ImageRef, RoundSnapshot},
    round::RoundSummary,
};

/// A line typed by the player, interpreted by whichever screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    Correct,
    Skip,
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_lowercase().as_str() {
        "" | "p" | "play" | "y" | "yes" => Some(Command::Play),
        "c" | "correct" | "+" => Some(Command::Correct),
        "s" | "skip" | "-" => Some(Command::Skip),
        "q" | "quit" | "n" | "no" => Some(Command::Quit),
        _ => None,
    }
}

/// `MM:SS`, or `H:MM:SS` from one hour up
pub fn format_elapsed(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Everything the frontend puts on screen
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScreenEvent<'a> {
    Home,
    Round {
        snapshot: &'a RoundSnapshot,
    },
    Buzz {
        feedback: Feedback,
        pattern: &'static [u64],
    },
    Score {
        summary: &'a RoundSummary,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    mode: RenderMode,
}

impl Renderer {
    pub fn new(mode: RenderMode) -> Self {
        Self { mode }
    }

    /// Text to print for an event, if this mode shows it at all
    pub fn render(&self, event: &ScreenEvent<'_>) -> Result<Option<String>> {
        match self.mode {
            RenderMode::Json => serde_json::to_string(event)
                .map(Some)
                .context("Failed to serialize screen event"),
            RenderMode::Text => Ok(Self::render_text(event)),
        }
    }

    pub fn show(&self, event: &ScreenEvent<'_>) -> Result<()> {
        if let Some(line) = self.render(event)? {
            println!("{}", line);
        }
        Ok(())
    }

    fn render_text(event: &ScreenEvent<'_>) -> Option<String> {
        match event {
            ScreenEvent::Home => {
                Some("word-rush: press enter to play, q to quit".to_string())
            }
            ScreenEvent::Round { snapshot } => Some(format!(
                "[{}] score {:>3} | {} ({})   c = correct, s = skip",
                format_elapsed(snapshot.remaining_secs()),
                snapshot.score,
                snapshot.word,
                snapshot.image
            )),
            // The bell is the buzz; nothing to print
            ScreenEvent::Buzz { .. } => None,
            ScreenEvent::Score { summary } => Some(format!(
                "Time's up! Final score: {} ({} correct, {} skipped)\nplay again? [y/n]",
                summary.score, summary.corrects, summary.skips
            )),
        }
    }
}

/// Remembers what the round screen last showed so unchanged state is not redrawn
#[derive(Debug, Default)]
pub struct RoundView {
    shown: Option<(u64, i32, String, ImageRef)>,
}

impl RoundView {
    pub fn needs_redraw(&mut self, snapshot: &RoundSnapshot) -> bool {
        let next = (
            snapshot.remaining_secs(),
            snapshot.score,
            snapshot.word.clone(),
            snapshot.image.clone(),
        );
        if self.shown.as_ref() == Some(&next) {
            return false;
        }
        self.shown = Some(next);
        true
    }
}
