//! Particle bursts and shared effect flags
//!
//! Each gameplay event maps to a fixed burst and, for some, a screen shake
//! magnitude. Timed flags (time warp, glitch) are tick countdowns so they
//! freeze with the rest of the simulation while paused.

use glam::Vec2;
use rand::Rng;

use super::state::{Effects, GameState, Particle, ParticleColor};
use crate::consts::*;

/// Events that produce visual feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectEvent {
    Jump,
    SuperJump,
    Dive,
    Damage,
    LevelUp,
    Collect,
}

/// How many particles to emit and in what color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstSpec {
    pub count: usize,
    pub color: ParticleColor,
}

impl EffectEvent {
    pub fn burst(&self) -> BurstSpec {
        let (count, color) = match self {
            EffectEvent::Jump => (8, ParticleColor::Cyan),
            EffectEvent::SuperJump => (15, ParticleColor::Pink),
            EffectEvent::Dive => (5, ParticleColor::Violet),
            EffectEvent::Damage => (25, ParticleColor::Pink),
            EffectEvent::LevelUp => (20, ParticleColor::Green),
            EffectEvent::Collect => (15, ParticleColor::Green),
        };
        BurstSpec { count, color }
    }

    /// Screen shake magnitude set by this event, if any
    pub fn shake(&self) -> Option<f32> {
        match self {
            EffectEvent::SuperJump => Some(10.0),
            EffectEvent::LevelUp => Some(15.0),
            EffectEvent::Damage => Some(20.0),
            _ => None,
        }
    }
}

/// Spread of burst spawn positions around the origin
const BURST_JITTER: f32 = 15.0;
/// Max initial speed per axis
const BURST_SPEED: f32 = 4.0;

/// Emit the burst and flags for an event at `origin`
pub fn emit(state: &mut GameState, event: EffectEvent, origin: Vec2) {
    spawn_burst(state, origin, event.burst());

    if let Some(shake) = event.shake() {
        if state.config.screen_shake {
            state.effects.screen_shake = shake;
        }
    }
    if event == EffectEvent::Damage {
        state.effects.glitch = true;
        state.effects.glitch_ticks = GLITCH_TICKS;
    }
}

/// Push `spec.count` particles, evicting the oldest past the configured cap
pub fn spawn_burst(state: &mut GameState, origin: Vec2, spec: BurstSpec) {
    let cap = state.config.max_particles;
    if cap == 0 {
        return;
    }
    for _ in 0..spec.count {
        if state.particles.len() >= cap {
            state.particles.remove(0);
        }
        let rng = &mut state.rng;
        let offset = Vec2::new(
            rng.random_range(-BURST_JITTER..BURST_JITTER),
            rng.random_range(-BURST_JITTER..BURST_JITTER),
        );
        let vel = Vec2::new(
            rng.random_range(-BURST_SPEED..BURST_SPEED),
            rng.random_range(-BURST_SPEED..BURST_SPEED),
        );
        let size = rng.random_range(2.0..6.0);
        state.particles.push(Particle {
            pos: origin + offset,
            vel,
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
            size,
            color: spec.color,
        });
    }
}

/// Slow everything to half speed for the time warp duration
pub fn start_time_warp(effects: &mut Effects) {
    effects.time_warp = TIME_WARP_FACTOR;
    effects.time_warp_ticks = TIME_WARP_TICKS;
}

/// Per-tick decay of shake and countdown of timed flags
pub fn decay(effects: &mut Effects) {
    effects.screen_shake *= SCREEN_SHAKE_DECAY;
    if effects.screen_shake < 0.01 {
        effects.screen_shake = 0.0;
    }

    if effects.time_warp_ticks > 0 {
        effects.time_warp_ticks -= 1;
        if effects.time_warp_ticks == 0 {
            effects.time_warp = 1.0;
        }
    }

    if effects.glitch_ticks > 0 {
        effects.glitch_ticks -= 1;
        if effects.glitch_ticks == 0 {
            effects.glitch = false;
        }
    }
}
