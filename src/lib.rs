//! Nexus Bird - a side-scrolling arcade flyer
//!
//! Core modules:
//! - `sim`: Simulation core (physics, spawning, collisions, progression, effects)
//! - `highscores`: High score persistence
//! - `settings`: Player/runner configuration
//!
//! Rendering, audio synthesis and input wiring are host concerns. Hosts drive
//! [`sim::tick`] once per frame and read [`sim::RenderSnapshot`] afterwards.

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::{HighScoreStore, HighScoreTracker, JsonFileStore, MemoryStore};
pub use settings::Settings;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Reference play field (the canvas the game was tuned on)
    pub const FIELD_WIDTH: f32 = 500.0;
    pub const FIELD_HEIGHT: f32 = 700.0;
    /// Bird sits at this fraction of the field width
    pub const BIRD_X_FRACTION: f32 = 0.16;

    /// Bird defaults
    pub const BIRD_SIZE: f32 = 25.0;
    pub const GRAVITY: f32 = 0.7;
    pub const JUMP_VELOCITY: f32 = -14.0;
    pub const JUMP_ROTATION: f32 = -0.3;
    pub const SUPER_JUMP_VELOCITY: f32 = -18.0;
    pub const SUPER_JUMP_COST: f32 = 20.0;
    pub const DIVE_IMPULSE: f32 = 5.0;
    pub const MAX_ROTATION: f32 = 0.5;
    pub const ROTATION_PER_VELOCITY: f32 = 0.05;
    pub const MAX_ENERGY: f32 = 100.0;
    pub const ENERGY_REGEN: f32 = 0.1;
    pub const TRAIL_LENGTH: usize = 12;
    pub const STARTING_LIVES: u8 = 3;

    /// Pipes
    pub const PIPE_WIDTH: f32 = 60.0;
    pub const PIPE_MARGIN: f32 = 50.0;
    pub const SPECIAL_PIPE_CHANCE: f64 = 0.2;
    pub const GLITCH_PIPE_CHANCE: f64 = 0.1;
    pub const SPECIAL_PIPE_POINTS: u32 = 3;

    /// Power-ups
    pub const POWER_UP_CADENCE: u64 = 400;
    pub const POWER_UP_CHANCE: f64 = 0.4;
    pub const POWER_UP_MARGIN: f32 = 150.0;
    pub const POWER_UP_CULL_X: f32 = -50.0;
    pub const POWER_UP_PICKUP_PADDING: f32 = 20.0;
    pub const MAGNET_RANGE: f32 = 100.0;
    pub const MAGNET_PULL: f32 = 0.1;
    pub const SLOT_ENERGY_BONUS: f32 = 50.0;

    /// Durations, converted from wall-clock milliseconds
    pub const SHIELD_TICKS: u32 = crate::ms_to_ticks(5000);
    pub const MAGNET_TICKS: u32 = crate::ms_to_ticks(8000);
    pub const TIME_WARP_TICKS: u32 = crate::ms_to_ticks(3000);
    pub const INVULNERABLE_TICKS: u32 = crate::ms_to_ticks(2000);
    pub const GLITCH_TICKS: u32 = crate::ms_to_ticks(500);
    pub const SLOT_COOLDOWN_TICKS: u32 = crate::ms_to_ticks(5000);

    /// Time warp multiplier while the "time" power-up is active
    pub const TIME_WARP_FACTOR: f32 = 0.5;

    /// Particles
    pub const PARTICLE_LIFE: u32 = 40;
    pub const PARTICLE_DECAY: f32 = 0.98;
    pub const PARTICLE_GRAVITY: f32 = 0.2;
    pub const SCREEN_SHAKE_DECAY: f32 = 0.9;
}

/// Errors from the file-backed collaborators (high scores, settings)
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Play field dimensions supplied by the layout collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldGeometry {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            width: consts::FIELD_WIDTH,
            height: consts::FIELD_HEIGHT,
        }
    }
}

impl FieldGeometry {
    /// Create a geometry, refusing degenerate (zero/negative/NaN) sizes
    pub fn new(width: f32, height: f32) -> Self {
        let sane = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
        Self {
            width: sane(width),
            height: sane(height),
        }
    }

    /// Fit the reference 500x700 field into a viewport, keeping aspect ratio.
    ///
    /// The field never exceeds 60% of the viewport width or 70% of its height.
    pub fn fit(viewport_width: f32, viewport_height: f32) -> Self {
        let aspect = consts::FIELD_WIDTH / consts::FIELD_HEIGHT;
        let max_width = consts::FIELD_WIDTH.min(viewport_width * 0.6);
        let max_height = consts::FIELD_HEIGHT.min(viewport_height * 0.7);

        let mut width = max_width;
        let mut height = max_width / aspect;
        if height > max_height {
            height = max_height;
            width = height * aspect;
        }
        Self::new(width, height)
    }

    /// Bird's fixed horizontal position for this field
    #[inline]
    pub fn bird_x(&self) -> f32 {
        self.width * consts::BIRD_X_FRACTION
    }

    /// Bird's vertical rest position (field center)
    #[inline]
    pub fn rest_y(&self) -> f32 {
        self.height * 0.5
    }
}

/// Convert a duration in milliseconds to whole ticks
#[inline]
pub const fn ms_to_ticks(ms: u32) -> u32 {
    ms * consts::TICKS_PER_SECOND / 1000
}
