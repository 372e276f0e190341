//! Game settings and preferences
//!
//! Persisted as JSON next to the high score file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::SimConfig;
use crate::sim::state::MAX_PARTICLES;
use crate::{FieldGeometry, PersistenceError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,

    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Visual Effects ===
    /// Particle bursts
    pub particles: bool,
    /// Particle cap
    pub max_particles: usize,
    /// Screen shake on hits/level-ups
    pub screen_shake: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,

    // === Storage ===
    pub high_score_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        let field = FieldGeometry::default();
        Self {
            seed: None,
            field_width: field.width,
            field_height: field.height,
            particles: true,
            max_particles: MAX_PARTICLES,
            screen_shake: true,
            reduced_motion: false,
            high_score_path: crate::JsonFileStore::DEFAULT_FILE.to_string(),
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.max_particles
        }
    }

    pub fn field(&self) -> FieldGeometry {
        FieldGeometry::new(self.field_width, self.field_height)
    }

    /// Simulation tunables derived from these settings
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            field: self.field(),
            max_particles: self.max_particles(),
            screen_shake: self.effective_screen_shake(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, PersistenceError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({e})");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PersistenceError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved");
        Ok(())
    }
}
