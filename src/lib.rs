//! Timed word-guessing game: a countdown round engine with a terminal frontend.

pub mod config;
pub mod error;
pub mod game;
pub mod round;
pub mod ui;
