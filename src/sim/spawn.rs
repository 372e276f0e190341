//! Procedural pipe and power-up spawning
//!
//! Pipes arrive faster and with tighter gaps as the level rises, bounded by
//! floors so the ramp never becomes unplayable.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Pipe, PowerUp, PowerUpKind};
use crate::FieldGeometry;
use crate::consts::*;

/// Ticks between pipes: `max(80, 150 - 3 * level)`
pub fn pipe_frequency(level: u32) -> u64 {
    150u64.saturating_sub(3 * level as u64).max(80)
}

/// Gap height: `max(140, 200 - 2 * level)`
pub fn gap_size(level: u32) -> f32 {
    200u32.saturating_sub(2 * level).max(140) as f32
}

/// Spawn a pipe at the right edge when the cadence comes round
pub fn spawn_pipes(state: &mut GameState) {
    if !state.frame_count.is_multiple_of(pipe_frequency(state.level)) {
        return;
    }
    let id = state.next_entity_id();
    let field = state.field();
    let pipe = make_pipe(&mut state.rng, &field, state.level, id);
    state.pipes.push(pipe);
}

/// Build a pipe with a random gap placement.
///
/// Fields too short for the gap plus margins shrink the margins first, then
/// the gap, so `top < bottom` and the gap stays inside the field.
pub fn make_pipe<R: Rng>(rng: &mut R, field: &FieldGeometry, level: u32, id: u32) -> Pipe {
    let gap = gap_size(level).min(field.height).max(1.0);
    let margin = PIPE_MARGIN.min((field.height - gap) / 2.0).max(0.0);
    let span = field.height - gap - 2.0 * margin;
    let top = if span > 0.0 {
        margin + rng.random_range(0.0..span)
    } else {
        margin
    };

    let special = rng.random_bool(SPECIAL_PIPE_CHANCE);
    let glitch = rng.random_bool(GLITCH_PIPE_CHANCE);

    Pipe {
        id,
        x: field.width,
        width: PIPE_WIDTH,
        top,
        bottom: top + gap,
        passed: false,
        special,
        points: if special { SPECIAL_PIPE_POINTS } else { 1 },
        glitch,
    }
}

/// Maybe spawn a power-up on the 400-tick cadence
pub fn spawn_power_ups(state: &mut GameState) {
    if !state.frame_count.is_multiple_of(POWER_UP_CADENCE) {
        return;
    }
    if !state.rng.random_bool(POWER_UP_CHANCE) {
        return;
    }
    let field = state.field();
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let band = field.height - 2.0 * POWER_UP_MARGIN;
    let y = if band > 0.0 {
        POWER_UP_MARGIN + state.rng.random_range(0.0..band)
    } else {
        field.rest_y()
    };

    let id = state.next_entity_id();
    state.power_ups.push(PowerUp {
        id,
        kind,
        pos: Vec2::new(field.width, y),
        collected: false,
        pulse: 0.0,
    });
    log::debug!("Spawned {} power-up at y={:.0}", kind.as_str(), y);
}
