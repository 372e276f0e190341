//! Read-only view handed to the renderer/HUD after each tick

use serde::Serialize;

use super::progression::score_progress;
use super::state::{Bird, Effects, GameState, Particle, Pipe, PowerUp, RunPhase};
use crate::FieldGeometry;

#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot<'a> {
    pub phase: RunPhase,
    pub field: FieldGeometry,
    pub bird: &'a Bird,
    pub pipes: &'a [Pipe],
    pub power_ups: &'a [PowerUp],
    pub particles: &'a [Particle],
    pub effects: &'a Effects,
    pub score: u32,
    pub level: u32,
    pub lives: u8,
    pub high_score: u32,
    /// Progress toward the next wave in [0, 1)
    pub score_progress: f32,
}

impl GameState {
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            phase: self.phase,
            field: self.field(),
            bird: &self.bird,
            pipes: &self.pipes,
            power_ups: &self.power_ups,
            particles: &self.particles,
            effects: &self.effects,
            score: self.score,
            level: self.level,
            lives: self.lives,
            high_score: self.high_score,
            score_progress: score_progress(self.score),
        }
    }
}

/// HUD line for the leaderboard button
pub fn leaderboard_summary(state: &GameState) -> String {
    format!(
        "High Score: {} | Current: {} | Wave: {}",
        state.high_score, state.score, state.level
    )
}
