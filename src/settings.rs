//! Game balance settings
//!
//! Everything the simulation tunes (speeds, timers, scoring, lives) lives here
//! so a front end can ship presets or load overrides as JSON. `Normal` matches
//! the reference constants in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SimError, SimResult};

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Multiplier on the adversary base speed
    pub fn adversary_speed_factor(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.2,
        }
    }

    /// Seconds a power pellet keeps adversaries frightened
    pub fn frightened_duration(&self) -> f32 {
        match self {
            Difficulty::Easy => 10.0,
            Difficulty::Normal => FRIGHTENED_DURATION,
            Difficulty::Hard => 5.0,
        }
    }

    /// Lives at the start of a run
    pub fn starting_lives(&self) -> u8 {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Normal => STARTING_LIVES,
            Difficulty::Hard => 2,
        }
    }
}

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset the difficulty-dependent values were derived from
    pub difficulty: Difficulty,

    // === Movement (cells per second) ===
    pub player_speed: f32,
    pub adversary_speed: f32,
    /// Adversary speed multiplier while frightened
    pub frightened_speed_factor: f32,

    // === Timers (seconds) ===
    pub frightened_duration: f32,
    /// Chase/scatter alternation period
    pub mode_cycle_duration: f32,

    // === Rules ===
    /// Player/adversary contact distance (cells)
    pub collision_distance: f32,
    pub starting_lives: u8,

    // === Scoring ===
    pub pellet_score: u64,
    pub power_pellet_score: u64,
    pub adversary_eaten_score: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,

            player_speed: PLAYER_SPEED,
            adversary_speed: ADVERSARY_SPEED,
            frightened_speed_factor: FRIGHTENED_SPEED_FACTOR,

            frightened_duration: FRIGHTENED_DURATION,
            mode_cycle_duration: MODE_CYCLE_DURATION,

            collision_distance: COLLISION_DISTANCE,
            starting_lives: STARTING_LIVES,

            pellet_score: PELLET_SCORE,
            power_pellet_score: POWER_PELLET_SCORE,
            adversary_eaten_score: ADVERSARY_EATEN_SCORE,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset (applies preset defaults)
    pub fn from_preset(preset: Difficulty) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a difficulty preset (updates difficulty-dependent settings)
    pub fn apply_preset(&mut self, preset: Difficulty) {
        self.difficulty = preset;
        self.adversary_speed = ADVERSARY_SPEED * preset.adversary_speed_factor();
        self.frightened_duration = preset.frightened_duration();
        self.starting_lives = preset.starting_lives();
    }

    /// Adversary speed while frightened
    pub fn frightened_speed(&self) -> f32 {
        self.adversary_speed * self.frightened_speed_factor
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> SimResult<()> {
        let positive = [
            ("player_speed", self.player_speed),
            ("adversary_speed", self.adversary_speed),
            ("frightened_speed_factor", self.frightened_speed_factor),
            ("frightened_duration", self.frightened_duration),
            ("mode_cycle_duration", self.mode_cycle_duration),
            ("collision_distance", self.collision_distance),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidSettings(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.collision_distance >= 1.0 {
            return Err(SimError::InvalidSettings(format!(
                "collision_distance must stay under one cell, got {}",
                self.collision_distance
            )));
        }
        if self.starting_lives == 0 {
            return Err(SimError::InvalidSettings(
                "starting_lives must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> SimResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings ({})", settings.difficulty.as_str());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
