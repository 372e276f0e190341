//! Horizontal scrolling and culling of pipes, power-ups and particles

use glam::Vec2;

use super::state::{Bird, Particle, Pipe, PowerUp};
use crate::consts::*;

/// Scroll speed shared by pipes and power-ups
#[inline]
pub fn scroll_speed(level: u32, time_warp: f32) -> f32 {
    (3.0 + 0.3 * level as f32) * time_warp
}

pub fn advance_pipes(pipes: &mut [Pipe], speed: f32) {
    for pipe in pipes.iter_mut() {
        pipe.x -= speed;
    }
}

/// Drop pipes whose trailing edge has left the field
pub fn cull_pipes(pipes: &mut Vec<Pipe>) {
    pipes.retain(|p| !p.is_offscreen());
}

/// Scroll power-ups, apply magnet pull, then cull collected/offscreen ones
pub fn advance_power_ups(power_ups: &mut Vec<PowerUp>, speed: f32, bird: &Bird) {
    let magnetism = bird.magnetism();
    for power_up in power_ups.iter_mut() {
        power_up.pos.x -= speed;
        power_up.pulse += 0.2;

        if magnetism && !power_up.collected {
            let to_bird = bird.pos - power_up.pos;
            if to_bird.length() < MAGNET_RANGE {
                power_up.pos += to_bird * MAGNET_PULL;
            }
        }
    }
    power_ups.retain(|p| !p.collected && p.pos.x >= POWER_UP_CULL_X);
}

/// Ballistic particle motion with gravity, shrink and expiry
pub fn advance_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel += Vec2::new(0.0, PARTICLE_GRAVITY);
        particle.life = particle.life.saturating_sub(1);
        particle.size *= PARTICLE_DECAY;
    }
    particles.retain(|p| p.life > 0);
}
