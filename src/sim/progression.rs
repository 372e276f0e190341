//! Score, level and achievement tracking
//!
//! Level is derived from score (`score / 10 + 1`). Crossing into a new level
//! fires the level-up effects once. Achievements fire on an exact match of
//! their tracked value, so a 3-point pipe can jump over a score threshold.

use super::effects::{self, EffectEvent};
use super::state::{AchievementId, GameEvent, GameOverSummary, GameState, RunPhase, Severity, SoundCue};
use crate::consts::TICKS_PER_SECOND;

/// What an achievement watches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementTrigger {
    Score(u32),
    Level(u32),
}

#[derive(Debug, Clone, Copy)]
pub struct Achievement {
    pub id: AchievementId,
    pub trigger: AchievementTrigger,
    pub text: &'static str,
}

pub const ACHIEVEMENTS: [Achievement; 4] = [
    Achievement {
        id: AchievementId::First,
        trigger: AchievementTrigger::Score(1),
        text: "Neural link established",
    },
    Achievement {
        id: AchievementId::Wave5,
        trigger: AchievementTrigger::Level(5),
        text: "Wave master",
    },
    Achievement {
        id: AchievementId::Score50,
        trigger: AchievementTrigger::Score(50),
        text: "System override",
    },
    Achievement {
        id: AchievementId::Wave10,
        trigger: AchievementTrigger::Level(10),
        text: "Neural transcendence",
    },
];

#[inline]
pub fn level_for_score(score: u32) -> u32 {
    score / 10 + 1
}

/// Fraction of the way to the next level, for the HUD progress bar
#[inline]
pub fn score_progress(score: u32) -> f32 {
    (score % 10) as f32 / 10.0
}

/// Final efficiency: points per second of play, as a rounded percentage
pub fn efficiency(score: u32, frame_count: u64) -> u32 {
    let seconds = (frame_count as f64 / TICKS_PER_SECOND as f64).max(1.0);
    (score as f64 / seconds * 100.0).round() as u32
}

/// Credit every pipe whose trailing edge the bird has cleared, once each
pub fn credit_passed_pipes(state: &mut GameState) {
    let bird_x = state.bird.pos.x;
    let mut earned = Vec::new();
    for pipe in state.pipes.iter_mut() {
        if !pipe.passed && pipe.trailing_edge() < bird_x {
            pipe.passed = true;
            earned.push(pipe.points);
        }
    }
    for points in earned {
        add_score(state, points);
    }
}

/// Add points, re-derive the level and run the achievement check
pub fn add_score(state: &mut GameState, points: u32) {
    state.score += points;
    state.emit(GameEvent::Sound(SoundCue::Score));

    let new_level = level_for_score(state.score);
    if new_level > state.level {
        state.level = new_level;
        on_level_up(state);
    }
    check_achievements(state);
}

fn on_level_up(state: &mut GameState) {
    let origin = state.bird.pos;
    effects::emit(state, EffectEvent::LevelUp, origin);
    state.emit(GameEvent::LevelUp { level: state.level });
    state.notify(format!("Wave {} reached!", state.level), Severity::Success);
    log::info!("Wave {} reached at score {}", state.level, state.score);
}

/// Unlock any achievement whose value matches exactly and is not yet held
pub fn check_achievements(state: &mut GameState) {
    for achievement in ACHIEVEMENTS {
        let triggered = match achievement.trigger {
            AchievementTrigger::Score(score) => state.score == score,
            AchievementTrigger::Level(level) => state.level == level,
        };
        if triggered && !state.achievements.contains(&achievement.id) {
            state.achievements.push(achievement.id);
            state.emit(GameEvent::AchievementUnlocked {
                id: achievement.id,
                text: achievement.text.to_string(),
            });
            log::info!("Achievement unlocked: {}", achievement.text);
        }
    }
}

/// Terminal transition: stop the run and settle the high score
pub fn finish_run(state: &mut GameState) {
    state.phase = RunPhase::GameOver;

    let new_high_score = state.score > state.high_score;
    if new_high_score {
        state.high_score = state.score;
        state.notify("New high score!", Severity::Success);
    }

    let summary = GameOverSummary {
        score: state.score,
        level: state.level,
        high_score: state.high_score,
        efficiency: efficiency(state.score, state.frame_count),
        new_high_score,
    };
    log::info!(
        "Game over: score={} wave={} efficiency={}% (best {})",
        summary.score,
        summary.level,
        summary.efficiency,
        summary.high_score
    );
    state.emit(GameEvent::GameOver(summary));
}
