//! The run controller: idle → running → game over → running …
//!
//! One [`RunController`] owns all mutable game state. The host loop feeds it
//! start/reset triggers, calls [`RunController::frame`] at display cadence and
//! [`RunController::pump`] on every wakeup so deferred cues can fire even
//! after the run has ended.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info, warn};

use crate::assets::Catalog;
use crate::audio::{AudioSink, Clip};
use crate::clock::FrameClock;
use crate::config::Config;
use crate::geometry::Viewport;
use crate::input::{InputFrame, InputSource};
use crate::physics::Player;
use crate::score::Score;
use crate::spawner::{Spawner, spawn_obstacle};
use crate::storage::HighScoreStore;
use crate::tasks::Timeline;
use crate::world::{Obstacle, World};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    GameOver,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Idle => "ready",
            Status::Running => "running",
            Status::GameOver => "gameover",
        }
    }
}

/// Result of one finished run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u32,
    pub best: u32,
    pub new_record: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GameOver(RunSummary),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    Play(Clip),
    RestoreStatus,
}

/// Everything a single run mutates.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub world: World,
    pub spawner: Spawner,
    pub score: Score,
    pub status: Status,
    pub base_speed: f64,
    pub ticks: u64,
}

impl GameState {
    fn new(config: &Config, viewport: &Viewport) -> Self {
        GameState {
            player: Player::new(config, viewport),
            world: World::new(config.offscreen_margin),
            spawner: Spawner::new(config, viewport),
            score: Score::default(),
            status: Status::Idle,
            base_speed: viewport.base_speed(),
            ticks: 0,
        }
    }

    /// Fresh run in `viewport`: speed and gap are fixed here for the whole
    /// run.
    fn reset(&mut self, config: &Config, viewport: &Viewport) {
        self.base_speed = viewport.base_speed();
        self.spawner = Spawner::new(config, viewport);
        self.score.reset();
        self.world.clear();
        self.player.land();
        self.spawner.reset();
        self.ticks = 0;
    }
}

/// Read-only view handed to the renderer.
pub struct Snapshot<'a> {
    pub viewport: Viewport,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub catalog: &'a Catalog,
    pub status: Status,
    pub status_text: &'a str,
    pub score: u32,
    pub best: u32,
    pub travelled: f64,
    pub tick: u64,
    /// Opacity of the high-score banner, when showing.
    pub high_score_cue: Option<f32>,
}

pub struct RunController<S, A, R> {
    config: Config,
    viewport: Viewport,
    catalog: Catalog,
    state: GameState,
    clock: FrameClock,
    timeline: Timeline<Task>,
    store: S,
    audio: A,
    rng: R,
    best: u32,
    status_text: String,
    high_score_shown: Option<Instant>,
}

impl<S: HighScoreStore, A: AudioSink, R: Rng> RunController<S, A, R> {
    pub fn new(
        config: Config,
        viewport: Viewport,
        catalog: Catalog,
        store: S,
        audio: A,
        rng: R,
    ) -> Self {
        let state = GameState::new(&config, &viewport);
        let clock = FrameClock::new(config.frame_interval_ms);
        let best = store.high_score();
        let status_text = if catalog.failed > 0 {
            format!("ready (assets failed: {})", catalog.failed)
        } else {
            Status::Idle.label().to_string()
        };
        RunController {
            config,
            viewport,
            catalog,
            state,
            clock,
            timeline: Timeline::new(),
            store,
            audio,
            rng,
            best,
            status_text,
            high_score_shown: None,
        }
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn is_running(&self) -> bool {
        self.state.status == Status::Running
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn frame_interval(&self) -> Duration {
        self.clock.interval()
    }

    /// When the host should next call [`Self::frame`].
    pub fn next_frame_due(&self, now: Instant) -> Instant {
        self.clock.next_due(now)
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Idle or game over → running. Ignored while already running.
    pub fn start(&mut self, now: Instant) {
        if self.is_running() {
            return;
        }
        self.timeline.cancel_all();
        self.high_score_shown = None;
        self.state.reset(&self.config, &self.viewport);
        self.state.status = Status::Running;
        self.status_text = Status::Running.label().to_string();
        self.clock.begin(now);
        self.audio.play(Clip::Ambient);
        info!(
            base_speed = self.state.base_speed,
            min_gap = self.state.spawner.min_gap(),
            "run started"
        );
    }

    /// One scheduled callback. Skipped (returns `None`) when not running or
    /// when it arrives too soon after the previous tick.
    pub fn frame(&mut self, now: Instant, input: &impl InputSource) -> Option<TickOutcome> {
        if !self.is_running() {
            return None;
        }
        let dt_ms = self.clock.ready(now)?;
        let frame = input.poll();
        Some(self.tick(now, dt_ms, frame))
    }

    fn tick(&mut self, now: Instant, dt_ms: f64, input: InputFrame) -> TickOutcome {
        let speed = self.state.base_speed;
        self.state.ticks += 1;

        if self.state.spawner.advance(speed, dt_ms, &mut self.rng) {
            if let Some(o) =
                spawn_obstacle(&self.catalog, &self.config, &self.viewport, speed, &mut self.rng)
            {
                debug!(variant = o.variant, w = o.width, h = o.height, speed = o.speed, "spawn");
                self.state.world.push(o);
            }
        }

        self.state.score.accrue(speed, dt_ms);
        self.state.world.advance(speed);

        if self.state.player.step(input.jump) {
            self.audio.play(Clip::Jump);
        }

        let hit = self.state.world.first_hit(&self.state.player.bounds()).is_some();
        if hit {
            TickOutcome::GameOver(self.game_over(now))
        } else {
            TickOutcome::Continue
        }
    }

    fn game_over(&mut self, now: Instant) -> RunSummary {
        self.state.status = Status::GameOver;
        self.status_text = Status::GameOver.label().to_string();
        self.clock.stop();

        self.audio.stop_ambient();
        self.audio.play(Clip::Hit);
        self.timeline.schedule(
            now,
            Duration::from_millis(self.config.game_over_cue_delay_ms),
            Task::Play(Clip::GameOver),
        );

        let score = self.state.score.points();
        let stored = self.store.high_score();
        let new_record = score > stored;
        if new_record {
            if let Err(e) = self.store.set_high_score(score) {
                warn!(error = %e, "could not persist high score");
            }
            self.audio.play(Clip::HighScore);
            self.high_score_shown = Some(now);
        }
        self.best = stored.max(score);

        let summary = RunSummary {
            score,
            best: self.best,
            new_record,
        };
        info!("Game Over | Score: {} | High Score: {}", score, self.best);
        summary
    }

    /// Fires deferred work that has come due.
    pub fn pump(&mut self, now: Instant) {
        for task in self.timeline.due(now) {
            match task {
                Task::Play(clip) => self.audio.play(clip),
                Task::RestoreStatus => {
                    self.status_text = self.state.status.label().to_string();
                }
            }
        }
        if self.high_score_cue(now).is_none() {
            self.high_score_shown = None;
        }
    }

    /// Clears the persisted high score and shows a transient message.
    pub fn reset_high_score(&mut self, now: Instant) {
        if let Err(e) = self.store.clear_high_score() {
            warn!(error = %e, "could not clear high score");
        }
        self.best = 0;
        self.high_score_shown = None;
        self.status_text = "Highscore reset!".to_string();
        self.timeline.cancel_where(|t| *t == Task::RestoreStatus);
        self.timeline.schedule(
            now,
            Duration::from_millis(self.config.status_message_ms),
            Task::RestoreStatus,
        );
        info!("high score cleared");
    }

    /// Banner opacity: fully visible, then a linear fade, then gone.
    pub fn high_score_cue(&self, now: Instant) -> Option<f32> {
        let shown = self.high_score_shown?;
        let elapsed = now.saturating_duration_since(shown).as_millis() as u64;
        let visible = self.config.high_score_visible_ms;
        let fade = self.config.high_score_fade_ms;
        if elapsed < visible {
            Some(1.0)
        } else if elapsed < visible + fade {
            Some(1.0 - (elapsed - visible) as f32 / fade as f32)
        } else {
            None
        }
    }

    /// Re-lays the world out for a new viewport; the player is put back on
    /// the ground. Scroll speed and spawn gap keep their values until the
    /// next start.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.state.player.fit(&self.config, &viewport);
        debug!(w = viewport.width, h = viewport.height, "viewport resized");
    }

    pub fn snapshot(&self, now: Instant) -> Snapshot<'_> {
        Snapshot {
            viewport: self.viewport,
            player: &self.state.player,
            obstacles: &self.state.world.obstacles,
            catalog: &self.catalog,
            status: self.state.status,
            status_text: &self.status_text,
            score: self.state.score.points(),
            best: self.best,
            travelled: self.state.world.travelled,
            tick: self.state.ticks,
            high_score_cue: self.high_score_cue(now),
        }
    }
}
