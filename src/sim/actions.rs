//! Player actions
//!
//! Each action is validated against the run phase; anything invalid is a
//! silent no-op. Actions that can be declined return whether they took effect.

use glam::Vec2;

use super::effects::{self, EffectEvent};
use super::powerup::{self, PowerUpSource};
use super::state::{GameEvent, GameState, PowerUpKind, RunPhase, Severity, SoundCue};
use crate::consts::*;

/// Begin the run from the title screen
pub fn start_run(state: &mut GameState) {
    if state.phase != RunPhase::NotStarted {
        return;
    }
    state.phase = RunPhase::Running;
    state.notify("Neural link established", Severity::Success);
    log::info!("Run started (seed {})", state.seed);
}

/// Normal flap. Before the run starts, the first jump starts it instead.
pub fn jump(state: &mut GameState) -> bool {
    match state.phase {
        RunPhase::NotStarted => {
            start_run(state);
            false
        }
        RunPhase::Running => {
            state.bird.velocity = JUMP_VELOCITY;
            state.bird.rotation = JUMP_ROTATION;
            let origin = state.bird.pos + Vec2::new(-20.0, 10.0);
            effects::emit(state, EffectEvent::Jump, origin);
            state.emit(GameEvent::Sound(SoundCue::Jump));
            true
        }
        RunPhase::Paused | RunPhase::GameOver => false,
    }
}

/// High-power jump; needs more than 20 energy
pub fn super_jump(state: &mut GameState) -> bool {
    if !state.is_running() || state.bird.energy <= SUPER_JUMP_COST {
        return false;
    }
    state.bird.velocity = SUPER_JUMP_VELOCITY;
    state.bird.energy = (state.bird.energy - SUPER_JUMP_COST).max(0.0);
    let origin = state.bird.pos;
    effects::emit(state, EffectEvent::SuperJump, origin);
    state.emit(GameEvent::Sound(SoundCue::Boost));
    true
}

pub fn dive(state: &mut GameState) -> bool {
    if !state.is_running() {
        return false;
    }
    state.bird.velocity += DIVE_IMPULSE;
    let origin = state.bird.pos + Vec2::new(0.0, 20.0);
    effects::emit(state, EffectEvent::Dive, origin);
    true
}

/// Toggle between running and paused; ignored before start and after game over
pub fn toggle_pause(state: &mut GameState) {
    state.phase = match state.phase {
        RunPhase::Running => {
            log::info!("Paused at tick {}", state.frame_count);
            RunPhase::Paused
        }
        RunPhase::Paused => {
            log::info!("Resumed at tick {}", state.frame_count);
            RunPhase::Running
        }
        other => other,
    };
}

/// Fire a power-up slot. Each slot has its own cooldown.
pub fn activate_power_up(state: &mut GameState, kind: PowerUpKind) -> bool {
    if !state.is_running() || state.slot_cooldowns[kind.slot()] > 0 {
        return false;
    }
    state.slot_cooldowns[kind.slot()] = SLOT_COOLDOWN_TICKS;
    powerup::apply(state, kind, PowerUpSource::Slot);
    state.notify(
        format!("{} activated", kind.as_str().to_uppercase()),
        Severity::Success,
    );
    true
}

/// Start a fresh run from any phase. The high score carries over.
pub fn restart(state: &mut GameState) {
    state.reset_run();
    state.phase = RunPhase::Running;
    log::info!("Run restarted (best {})", state.high_score);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> GameState {
        let mut state = GameState::new(8);
        start_run(&mut state);
        state
    }

    #[test]
    fn test_first_jump_starts_run_without_flap() {
        let mut state = GameState::new(8);
        assert!(!jump(&mut state));
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.bird.velocity, 0.0);
        assert!(jump(&mut state));
        assert_eq!(state.bird.velocity, -14.0);
        assert_eq!(state.bird.rotation, -0.3);
        assert!(state.pending_events().contains(&GameEvent::Sound(SoundCue::Jump)));
    }

    #[test]
    fn test_super_jump_energy_gate() {
        let mut state = running();
        state.bird.energy = 25.0;
        assert!(super_jump(&mut state));
        assert_eq!(state.bird.velocity, -18.0);
        assert_eq!(state.bird.energy, 5.0);

        state.bird.velocity = 3.0;
        assert!(!super_jump(&mut state));
        assert_eq!(state.bird.velocity, 3.0);
        assert_eq!(state.bird.energy, 5.0);
    }

    #[test]
    fn test_super_jump_at_exactly_twenty_declines() {
        let mut state = running();
        state.bird.energy = 20.0;
        assert!(!super_jump(&mut state));
    }

    #[test]
    fn test_dive_adds_impulse() {
        let mut state = running();
        state.bird.velocity = -3.0;
        assert!(dive(&mut state));
        assert_eq!(state.bird.velocity, 2.0);
    }

    #[test]
    fn test_actions_ignored_while_paused() {
        let mut state = running();
        toggle_pause(&mut state);
        assert_eq!(state.phase, RunPhase::Paused);
        assert!(!jump(&mut state));
        assert!(!dive(&mut state));
        assert!(!super_jump(&mut state));
        assert!(!activate_power_up(&mut state, PowerUpKind::Shield));
        toggle_pause(&mut state);
        assert_eq!(state.phase, RunPhase::Running);
    }

    #[test]
    fn test_pause_ignored_before_start_and_after_game_over() {
        let mut state = GameState::new(8);
        toggle_pause(&mut state);
        assert_eq!(state.phase, RunPhase::NotStarted);
        state.phase = RunPhase::GameOver;
        toggle_pause(&mut state);
        assert_eq!(state.phase, RunPhase::GameOver);
    }

    #[test]
    fn test_slot_cooldown() {
        let mut state = running();
        assert!(activate_power_up(&mut state, PowerUpKind::Shield));
        assert!(!activate_power_up(&mut state, PowerUpKind::Shield));
        // Other slots are independent
        assert!(activate_power_up(&mut state, PowerUpKind::Magnet));
        assert!(state.bird.shield());
        assert!(state.bird.magnetism());
    }

    #[test]
    fn test_time_slot_only_notifies() {
        let mut state = running();
        assert!(activate_power_up(&mut state, PowerUpKind::Time));
        assert_eq!(state.effects.time_warp, 1.0);
        assert!(state.pending_events().contains(&GameEvent::Notify {
            message: "TIME activated".to_string(),
            severity: Severity::Success,
        }));
    }

    #[test]
    fn test_restart_resets_run_keeps_best() {
        let mut state = running().with_high_score(33);
        state.score = 12;
        state.lives = 0;
        state.phase = RunPhase::GameOver;
        restart(&mut state);
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.high_score, 33);
    }
}
