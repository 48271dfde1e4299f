//! Tuning values and on-disk locations.
//!
//! Every field has a default, so a partial `config.json` only overrides what
//! it names. Units are logical world units (see [`crate::geometry::Viewport`])
//! and milliseconds.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::audio::Clip;
use crate::error::{Error, Result};
use crate::physics::jump_apex;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player_scale: f64,
    pub max_player_height: f64,
    pub global_obstacle_scale: f64,
    pub obstacle_scales: Vec<f64>,
    pub safety_margin: f64,
    pub max_fixed_obs_height: f64,
    pub gravity: f64,
    pub jump_impulse: f64,
    pub world_height: f64,
    pub frame_interval_ms: f64,
    pub spawn_interval_min_ms: f64,
    pub spawn_interval_max_ms: f64,
    pub min_gap_ratio: f64,
    pub speed_jitter: f64,
    pub spawn_offset: f64,
    pub offscreen_margin: f64,
    pub game_over_cue_delay_ms: u64,
    pub high_score_visible_ms: u64,
    pub high_score_fade_ms: u64,
    pub status_message_ms: u64,
    pub volumes: Volumes,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            player_scale: 3.4,
            max_player_height: 220.0,
            global_obstacle_scale: 1.3,
            obstacle_scales: vec![1.0, 1.0, 0.9, 1.0, 1.0, 1.0, 1.0, 0.9, 1.0],
            safety_margin: 8.0,
            max_fixed_obs_height: 180.0,
            gravity: 0.55,
            jump_impulse: -20.0,
            world_height: 600.0,
            frame_interval_ms: 1000.0 / 60.0,
            spawn_interval_min_ms: 800.0,
            spawn_interval_max_ms: 1800.0,
            min_gap_ratio: 0.45,
            speed_jitter: 1.2,
            spawn_offset: 20.0,
            offscreen_margin: 50.0,
            game_over_cue_delay_ms: 300,
            high_score_visible_ms: 3200,
            high_score_fade_ms: 800,
            status_message_ms: 1500,
            volumes: Volumes::default(),
        }
    }
}

impl Config {
    /// Per-variant obstacle scale; variants past the end of the list use 1.
    pub fn obstacle_scale(&self, variant: usize) -> f64 {
        self.obstacle_scales.get(variant).copied().unwrap_or(1.0)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.gravity > 0.0) {
            return Err(Error::Config(format!(
                "gravity must be positive, got {}",
                self.gravity
            )));
        }
        if !(self.jump_impulse < 0.0) {
            return Err(Error::Config(format!(
                "jump_impulse must be negative (upward), got {}",
                self.jump_impulse
            )));
        }
        if !(self.frame_interval_ms > 0.0) {
            return Err(Error::Config(format!(
                "frame_interval_ms must be positive, got {}",
                self.frame_interval_ms
            )));
        }
        if !(self.spawn_interval_min_ms < self.spawn_interval_max_ms) {
            return Err(Error::Config(format!(
                "spawn interval [{}, {}) is empty",
                self.spawn_interval_min_ms, self.spawn_interval_max_ms
            )));
        }
        if !(self.world_height > 0.0) {
            return Err(Error::Config(format!(
                "world_height must be positive, got {}",
                self.world_height
            )));
        }
        if !(self.speed_jitter >= 0.0) {
            return Err(Error::Config(format!(
                "speed_jitter must not be negative, got {}",
                self.speed_jitter
            )));
        }
        if !(self.max_fixed_obs_height > 0.0) {
            return Err(Error::Config(format!(
                "max_fixed_obs_height must be positive, got {}",
                self.max_fixed_obs_height
            )));
        }
        let clearance = jump_apex(self.jump_impulse, self.gravity) - self.safety_margin;
        if !(clearance >= 1.0) {
            return Err(Error::Config(format!(
                "jump apex leaves no room for obstacles above the {} safety margin",
                self.safety_margin
            )));
        }
        Ok(())
    }

    /// Reads `path`. A missing file gives the defaults; a malformed one is
    /// logged and also gives the defaults.
    pub fn load(path: &Path) -> Result<Config> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            Err(e) => return Err(Error::io(path, e)),
        };
        match serde_json::from_str::<Config>(&text) {
            Ok(config) => {
                config.validate()?;
                Ok(config)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "malformed config, using defaults");
                Ok(Config::default())
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Volumes {
    pub ambient: f32,
    pub jump: f32,
    pub hit: f32,
    pub high_score: f32,
    pub game_over: f32,
}

impl Default for Volumes {
    fn default() -> Self {
        Self {
            ambient: 0.90,
            jump: 0.20,
            hit: 0.80,
            high_score: 0.90,
            game_over: 0.90,
        }
    }
}

impl Volumes {
    pub fn of(&self, clip: Clip) -> f32 {
        match clip {
            Clip::Ambient => self.ambient,
            Clip::Jump => self.jump,
            Clip::Hit => self.hit,
            Clip::HighScore => self.high_score,
            Clip::GameOver => self.game_over,
        }
    }
}

pub struct Paths {
    pub config_path: PathBuf,
    pub store_path: PathBuf,
    pub log_path: PathBuf,
}

pub fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "dino-tui", "DinoTui").ok_or(Error::NoProjectDirs)?;
    let data = proj.data_local_dir().to_path_buf();
    let config = proj.config_dir().to_path_buf();
    fs::create_dir_all(&data).map_err(|e| Error::io(&data, e))?;
    Ok(Paths {
        config_path: config.join("config.json"),
        store_path: data.join("store.json"),
        log_path: data.join("dino-tui.log"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config: Config = serde_json::from_str(r#"{"gravity": 0.8}"#).unwrap();
        assert_eq!(config.gravity, 0.8);
        assert_eq!(config.jump_impulse, -20.0);
        assert_eq!(config.obstacle_scales.len(), 9);
        assert_eq!(config.volumes, Volumes::default());
    }

    #[test]
    fn obstacle_scale_defaults_to_one_past_the_list() {
        let config = Config::default();
        assert_eq!(config.obstacle_scale(2), 0.9);
        assert_eq!(config.obstacle_scale(42), 1.0);
    }

    #[test]
    fn validate_rejects_downward_jump() {
        let config = Config {
            jump_impulse: 5.0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_spawn_interval() {
        let config = Config {
            spawn_interval_min_ms: 900.0,
            spawn_interval_max_ms: 900.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("dino-tui-no-such-config.json");
        let _ = fs::remove_file(&path);
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn validate_rejects_negative_jitter() {
        let config = Config {
            speed_jitter: -0.5,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        let still = Config {
            speed_jitter: 0.0,
            ..Config::default()
        };
        assert!(still.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unjumpable_layouts() {
        // apex 2^2 / (2 * 0.55) = 3.6, below the 8 unit margin
        let weak = Config {
            jump_impulse: -2.0,
            ..Config::default()
        };
        assert!(matches!(weak.validate(), Err(Error::Config(_))));

        let capped = Config {
            max_fixed_obs_height: 0.0,
            ..Config::default()
        };
        assert!(matches!(capped.validate(), Err(Error::Config(_))));
    }

    fn temp_config(name: &str, text: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "dino-tui-config-{}-{name}.json",
            std::process::id()
        ));
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn malformed_file_loads_defaults() {
        let path = temp_config("malformed", "not json");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn invalid_file_is_rejected() {
        let path = temp_config("invalid", r#"{"gravity": -1}"#);
        assert!(matches!(Config::load(&path), Err(Error::Config(_))));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn volumes_map_clips() {
        let v = Volumes::default();
        assert_eq!(v.of(Clip::Jump), 0.20);
        assert_eq!(v.of(Clip::Hit), 0.80);
    }
}
