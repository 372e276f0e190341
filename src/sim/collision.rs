//! Collision detection and resolution
//!
//! Discrete per-tick checks: the bird is treated as a square of half-extent
//! `size` against the field bounds and pipe columns, and as a circle against
//! power-ups.

use glam::Vec2;

use super::effects::{self, EffectEvent};
use super::powerup::{self, PowerUpSource};
use super::progression;
use super::state::{GameEvent, GameState, Pipe, PowerUpKind, RunPhase, Severity};
use crate::consts::*;

/// What the resolver did this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionOutcome {
    /// A life was lost
    pub damaged: bool,
    /// Shield clamped the bird back inside the field
    pub clamped: bool,
    pub collected: Vec<PowerUpKind>,
}

/// Bird's vertical extent touches or leaves `[0, height]`
#[inline]
pub fn exits_field(y: f32, size: f32, height: f32) -> bool {
    y - size <= 0.0 || y + size >= height
}

/// Bird's horizontal extent overlaps the pipe column
#[inline]
pub fn overlaps_pipe_column(bird_x: f32, size: f32, pipe: &Pipe) -> bool {
    bird_x + size > pipe.x && bird_x - size < pipe.trailing_edge()
}

/// Bird's vertical extent is not fully inside the gap
#[inline]
pub fn outside_gap(y: f32, size: f32, pipe: &Pipe) -> bool {
    y - size < pipe.top || y + size > pipe.bottom
}

#[inline]
pub fn within_pickup_range(bird_pos: Vec2, size: f32, power_up_pos: Vec2) -> bool {
    bird_pos.distance(power_up_pos) < size + POWER_UP_PICKUP_PADDING
}

/// Resolve boundary, pipe and power-up contacts for this tick.
///
/// Boundary contact wins and ends resolution immediately. Pipes are checked in
/// spawn order and stop at the first damaging one. Power-ups are still
/// collected after pipe damage as long as the run survived it.
pub fn resolve_collisions(state: &mut GameState) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    if state.phase != RunPhase::Running || state.bird.invulnerable() {
        return outcome;
    }

    let height = state.field().height;
    let size = state.bird.size;

    if exits_field(state.bird.pos.y, size, height) {
        if state.bird.shield() {
            state.bird.pos.y = state.bird.pos.y.clamp(size, (height - size).max(size));
            state.bird.velocity = 0.0;
            outcome.clamped = true;
        } else {
            lose_life(state);
            outcome.damaged = true;
        }
        return outcome;
    }

    if !state.bird.shield() {
        let bird = &state.bird;
        let hit = state
            .pipes
            .iter()
            .any(|pipe| overlaps_pipe_column(bird.pos.x, size, pipe) && outside_gap(bird.pos.y, size, pipe));
        if hit {
            lose_life(state);
            outcome.damaged = true;
            if state.phase != RunPhase::Running {
                return outcome;
            }
        }
    }

    let bird_pos = state.bird.pos;
    state.power_ups.retain_mut(|power_up| {
        if !power_up.collected && within_pickup_range(bird_pos, size, power_up.pos) {
            power_up.collected = true;
            outcome.collected.push(power_up.kind);
            false
        } else {
            true
        }
    });
    for &kind in &outcome.collected {
        collect(state, kind);
    }

    outcome
}

fn collect(state: &mut GameState, kind: PowerUpKind) {
    powerup::apply(state, kind, PowerUpSource::Collected);
    let origin = state.bird.pos;
    effects::emit(state, EffectEvent::Collect, origin);
    state.notify(
        format!("{} collected!", kind.as_str().to_uppercase()),
        Severity::Success,
    );
}

/// Take one life. Ends the run at zero, otherwise respawns the bird at rest
/// height with a grace period of full invulnerability.
pub fn lose_life(state: &mut GameState) {
    if state.bird.invulnerable() {
        return;
    }
    state.lives = state.lives.saturating_sub(1);
    let origin = state.bird.pos;
    effects::emit(state, EffectEvent::Damage, origin);
    state.emit(GameEvent::LifeLost { lives: state.lives });

    if state.lives == 0 {
        progression::finish_run(state);
    } else {
        state.bird.pos.y = state.field().rest_y();
        state.bird.velocity = 0.0;
        // The damage tick's own countdown consumes one tick
        state.bird.invulnerable_ticks = INVULNERABLE_TICKS + 1;
        log::info!("Life lost, {} remaining", state.lives);
        state.notify(format!("{} lives remaining", state.lives), Severity::Warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PowerUp;

    fn running() -> GameState {
        let mut state = GameState::new(42);
        state.phase = RunPhase::Running;
        state
    }

    fn pipe_at(x: f32, top: f32, bottom: f32) -> Pipe {
        Pipe {
            id: 1,
            x,
            width: 60.0,
            top,
            bottom,
            passed: false,
            special: false,
            points: 1,
            glitch: false,
        }
    }

    fn power_up_at(pos: Vec2, kind: PowerUpKind) -> PowerUp {
        PowerUp {
            id: 9,
            kind,
            pos,
            collected: false,
            pulse: 0.0,
        }
    }

    #[test]
    fn test_boundary_checks() {
        assert!(exits_field(25.0, 25.0, 700.0));
        assert!(exits_field(675.0, 25.0, 700.0));
        assert!(!exits_field(350.0, 25.0, 700.0));
    }

    #[test]
    fn test_pipe_geometry() {
        let pipe = pipe_at(100.0, 200.0, 400.0);
        assert!(overlaps_pipe_column(80.0, 25.0, &pipe));
        assert!(!overlaps_pipe_column(75.0, 25.0, &pipe));
        assert!(!outside_gap(300.0, 25.0, &pipe));
        assert!(outside_gap(210.0, 25.0, &pipe));
        assert!(outside_gap(390.0, 25.0, &pipe));
    }

    #[test]
    fn test_ceiling_without_shield_costs_life() {
        let mut state = running();
        state.bird.pos.y = 10.0;
        let outcome = resolve_collisions(&mut state);
        assert!(outcome.damaged);
        assert_eq!(state.lives, 2);
        assert_eq!(state.bird.pos.y, 350.0);
        assert!(state.bird.invulnerable());
    }

    #[test]
    fn test_shield_clamps_at_floor() {
        let mut state = running();
        state.bird.shield_ticks = 100;
        state.bird.pos.y = 690.0;
        state.bird.velocity = 9.0;
        let outcome = resolve_collisions(&mut state);
        assert!(outcome.clamped);
        assert_eq!(state.lives, 3);
        assert_eq!(state.bird.pos.y, 675.0);
        assert_eq!(state.bird.velocity, 0.0);
    }

    #[test]
    fn test_shield_ignores_pipes() {
        let mut state = running();
        state.bird.shield_ticks = 100;
        state.pipes.push(pipe_at(70.0, 400.0, 600.0));
        let outcome = resolve_collisions(&mut state);
        assert!(!outcome.damaged);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_pipe_hit_costs_one_life_even_with_two_pipes() {
        let mut state = running();
        state.pipes.push(pipe_at(70.0, 400.0, 600.0));
        state.pipes.push(pipe_at(90.0, 400.0, 600.0));
        resolve_collisions(&mut state);
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_invulnerable_skips_everything() {
        let mut state = running();
        state.bird.invulnerable_ticks = 5;
        state.bird.pos.y = 5.0;
        state
            .power_ups
            .push(power_up_at(state.bird.pos, PowerUpKind::Energy));
        let outcome = resolve_collisions(&mut state);
        assert_eq!(outcome, CollisionOutcome::default());
        assert_eq!(state.lives, 3);
        assert_eq!(state.power_ups.len(), 1);
    }

    #[test]
    fn test_collects_multiple_power_ups() {
        let mut state = running();
        let at = state.bird.pos;
        state.bird.energy = 30.0;
        state.power_ups.push(power_up_at(at + Vec2::new(10.0, 0.0), PowerUpKind::Energy));
        state.power_ups.push(power_up_at(at - Vec2::new(0.0, 30.0), PowerUpKind::Shield));
        state.power_ups.push(power_up_at(at + Vec2::new(200.0, 0.0), PowerUpKind::Magnet));
        let outcome = resolve_collisions(&mut state);
        assert_eq!(outcome.collected, vec![PowerUpKind::Energy, PowerUpKind::Shield]);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.bird.energy, 100.0);
        assert!(state.bird.shield());
        assert_eq!(state.particles.len(), 30);
    }

    #[test]
    fn test_power_up_collected_on_pipe_damage_tick() {
        let mut state = running();
        state.pipes.push(pipe_at(70.0, 400.0, 600.0));
        // Bird respawns at rest height (350), where this orb waits
        state
            .power_ups
            .push(power_up_at(Vec2::new(80.0, 350.0), PowerUpKind::Time));
        let outcome = resolve_collisions(&mut state);
        assert!(outcome.damaged);
        assert_eq!(outcome.collected, vec![PowerUpKind::Time]);
        assert_eq!(state.effects.time_warp, 0.5);
    }

    #[test]
    fn test_last_life_ends_run() {
        let mut state = running();
        state.lives = 1;
        state.score = 7;
        state.bird.pos.y = 699.0;
        state
            .power_ups
            .push(power_up_at(Vec2::new(80.0, 690.0), PowerUpKind::Shield));
        resolve_collisions(&mut state);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, RunPhase::GameOver);
        assert_eq!(state.high_score, 7);
        assert_eq!(state.power_ups.len(), 1);
    }
}
