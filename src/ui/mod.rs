// Terminal frontend: home, round and score screens

pub mod haptics;
pub mod screens;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use crate::{
    config::{Config, GameConfig},
    game::{Feedback, IntervalTicker, Ticker},
    round::{spawn_round, RoundSummary},
};
use haptics::{buzz_pattern, Haptics, TerminalBell};
use screens::{parse_command, Command, Renderer, RoundView, ScreenEvent};

/// Where the player currently is
#[derive(Debug)]
enum Screen {
    Home,
    Round,
    Score(RoundSummary),
    Exit,
}

/// Drive the game from stdin until the player quits or input ends
pub async fn run(config: Config) -> Result<()> {
    let renderer = Renderer::new(config.ui.render);
    let mut haptics = TerminalBell::new(config.ui.haptics);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let mut screen = Screen::Home;
    loop {
        screen = match screen {
            Screen::Home => home(&renderer, &mut input).await?,
            Screen::Round => {
                round(
                    &config.game,
                    &renderer,
                    &mut haptics,
                    &mut input,
                    IntervalTicker::new(),
                )
                .await?
            }
            Screen::Score(summary) => score(&renderer, &summary, &mut input).await?,
            Screen::Exit => break,
        };
    }

    tracing::info!("Goodbye");
    Ok(())
}

async fn home<R>(renderer: &Renderer, input: &mut Lines<R>) -> Result<Screen>
where
    R: AsyncBufRead + Unpin,
{
    renderer.show(&ScreenEvent::Home)?;

    while let Some(line) = input.next_line().await.context("Failed to read input")? {
        match parse_command(&line) {
            Some(Command::Play) => return Ok(Screen::Round),
            Some(Command::Quit) => return Ok(Screen::Exit),
            _ => {}
        }
    }
    Ok(Screen::Exit)
}

async fn round<R, T>(
    game: &GameConfig,
    renderer: &Renderer,
    haptics: &mut dyn Haptics,
    input: &mut Lines<R>,
    ticker: T,
) -> Result<Screen>
where
    R: AsyncBufRead + Unpin,
    T: Ticker + 'static,
{
    let mut handle = spawn_round(game.clone(), ticker).context("Failed to start round")?;
    let mut snapshots = handle.subscribe();
    let mut view = RoundView::default();
    let mut input_open = true;

    let first = snapshots.borrow_and_update().clone();
    view.needs_redraw(&first);
    renderer.show(&ScreenEvent::Round { snapshot: &first })?;

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    tracing::warn!("Round {} stopped unexpectedly", handle.round_id());
                    return Ok(Screen::Home);
                }
                let snapshot = snapshots.borrow_and_update().clone();

                if view.needs_redraw(&snapshot) {
                    renderer.show(&ScreenEvent::Round { snapshot: &snapshot })?;
                }

                if snapshot.feedback != Feedback::None {
                    let pattern = buzz_pattern(snapshot.feedback);
                    renderer.show(&ScreenEvent::Buzz {
                        feedback: snapshot.feedback,
                        pattern,
                    })?;
                    haptics.buzz(pattern);
                    handle.acknowledge_feedback().await?;
                }

                if snapshot.finished {
                    handle.acknowledge_finish().await?;
                    let summary = handle.cancel().await?;
                    return Ok(Screen::Score(summary));
                }
            }
            line = input.next_line(), if input_open => {
                match line.context("Failed to read input")? {
                    Some(line) => match parse_command(&line) {
                        Some(Command::Correct) => handle.correct().await?,
                        Some(Command::Skip) => handle.skip().await?,
                        Some(Command::Quit) => {
                            let summary = handle.cancel().await?;
                            tracing::info!(
                                "Round {} abandoned with score {}",
                                summary.round_id,
                                summary.score
                            );
                            return Ok(Screen::Home);
                        }
                        _ => {}
                    },
                    // Let the countdown finish without input
                    None => input_open = false,
                }
            }
        }
    }
}

async fn score<R>(
    renderer: &Renderer,
    summary: &RoundSummary,
    input: &mut Lines<R>,
) -> Result<Screen>
where
    R: AsyncBufRead + Unpin,
{
    renderer.show(&ScreenEvent::Score { summary })?;

    while let Some(line) = input.next_line().await.context("Failed to read input")? {
        match parse_command(&line) {
            Some(Command::Play) => return Ok(Screen::Home),
            Some(Command::Quit) => return Ok(Screen::Exit),
            _ => {}
        }
    }
    Ok(Screen::Exit)
}
