//! A Dino-style runner for the terminal.
//!
//! The game core ([`run::RunController`]) is host-agnostic: it is driven by
//! explicit time stamps and talks to the outside world only through the
//! [`input::InputSource`], [`audio::AudioSink`] and
//! [`storage::HighScoreStore`] seams. [`app`] is the crossterm host.

pub mod app;
pub mod assets;
pub mod audio;
pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod physics;
pub mod render;
pub mod run;
pub mod score;
pub mod spawner;
pub mod storage;
pub mod tasks;
pub mod world;

pub use error::{Error, Result};
