//! Bird integration
//!
//! Per-tick gravity, position, rotation hint, energy regeneration and trail.

use super::state::Bird;
use crate::consts::*;

/// Advance the bird by one tick, scaled by the time warp multiplier
pub fn update_bird(bird: &mut Bird, time_warp: f32) {
    bird.velocity += GRAVITY;
    bird.pos.y += bird.velocity * time_warp;
    // Recomputed every tick, never integrated
    bird.rotation = (bird.velocity * ROTATION_PER_VELOCITY).min(MAX_ROTATION);

    bird.energy = (bird.energy + ENERGY_REGEN).clamp(0.0, MAX_ENERGY);

    bird.record_trail();
}
