//! Simulation module
//!
//! All gameplay logic lives here. This module must be pure:
//! - One tick per call, no wall-clock timers
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod actions;
pub mod collision;
pub mod effects;
pub mod movement;
pub mod physics;
pub mod powerup;
pub mod progression;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use actions::{activate_power_up, dive, jump, restart, start_run, super_jump, toggle_pause};
pub use collision::{CollisionOutcome, resolve_collisions};
pub use effects::{BurstSpec, EffectEvent};
pub use progression::{ACHIEVEMENTS, Achievement, AchievementTrigger, efficiency, level_for_score};
pub use snapshot::{RenderSnapshot, leaderboard_summary};
pub use spawn::{gap_size, pipe_frequency};
pub use state::{
    AchievementId, Bird, Effects, GameEvent, GameOverSummary, GameState, Particle, ParticleColor,
    Pipe, PowerUp, PowerUpKind, RunPhase, Severity, SimConfig, SoundCue,
};
pub use tick::{TickInput, tick};
