//! Game state and core simulation types
//!
//! Everything a run owns lives on [`GameState`]. Per-run entities are reset
//! together by [`GameState::reset_run`]; the high score survives restarts.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::FieldGeometry;
use crate::consts::*;

/// Run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Waiting for the first jump
    NotStarted,
    /// Ticks advance the simulation
    Running,
    /// Frozen, timers included
    Paused,
    /// Lives exhausted; only a restart leaves this phase
    GameOver,
}

/// The player-controlled bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub pos: Vec2,
    /// Vertical velocity (positive = falling)
    pub velocity: f32,
    /// Render hint derived from velocity
    pub rotation: f32,
    /// Collision radius
    pub size: f32,
    /// Boost energy in [0, 100]
    pub energy: f32,
    /// Ticks of shield remaining (blocks boundary/pipe damage)
    pub shield_ticks: u32,
    /// Ticks of post-hit invulnerability remaining (blocks all damage)
    pub invulnerable_ticks: u32,
    /// Ticks of power-up magnetism remaining
    pub magnet_ticks: u32,
    /// Recent positions, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Bird {
    pub fn new(field: &FieldGeometry) -> Self {
        Self {
            pos: Vec2::new(field.bird_x(), field.rest_y()),
            velocity: 0.0,
            rotation: 0.0,
            size: BIRD_SIZE,
            energy: MAX_ENERGY,
            shield_ticks: 0,
            invulnerable_ticks: 0,
            magnet_ticks: 0,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    #[inline]
    pub fn shield(&self) -> bool {
        self.shield_ticks > 0
    }

    #[inline]
    pub fn invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    #[inline]
    pub fn magnetism(&self) -> bool {
        self.magnet_ticks > 0
    }

    /// Append current position to the trail, evicting the oldest point
    pub fn record_trail(&mut self) {
        self.trail.push_back(self.pos);
        while self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    /// Count down the timed flags
    pub fn tick_timers(&mut self) {
        self.shield_ticks = self.shield_ticks.saturating_sub(1);
        self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);
        self.magnet_ticks = self.magnet_ticks.saturating_sub(1);
    }
}

/// A pipe pair with a vertical gap between `top` and `bottom`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    /// Leading (left) edge
    pub x: f32,
    pub width: f32,
    pub top: f32,
    pub bottom: f32,
    /// Score already credited
    pub passed: bool,
    pub special: bool,
    pub points: u32,
    /// Cosmetic only
    pub glitch: bool,
}

impl Pipe {
    #[inline]
    pub fn gap(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    /// Fully past the left edge of the field
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.trailing_edge() <= 0.0
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    Energy,
    Magnet,
    Time,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Shield,
        PowerUpKind::Energy,
        PowerUpKind::Magnet,
        PowerUpKind::Time,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "shield",
            PowerUpKind::Energy => "energy",
            PowerUpKind::Magnet => "magnet",
            PowerUpKind::Time => "time",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "shield" => Some(PowerUpKind::Shield),
            "energy" | "boost" => Some(PowerUpKind::Energy),
            "magnet" => Some(PowerUpKind::Magnet),
            "time" => Some(PowerUpKind::Time),
            _ => None,
        }
    }

    /// Slot index used for activation cooldowns
    #[inline]
    pub fn slot(&self) -> usize {
        match self {
            PowerUpKind::Shield => 0,
            PowerUpKind::Energy => 1,
            PowerUpKind::Magnet => 2,
            PowerUpKind::Time => 3,
        }
    }
}

/// A collectible power-up orb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub collected: bool,
    /// Cosmetic pulse phase
    pub pulse: f32,
}

/// Particle palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Cyan,
    Pink,
    Violet,
    Green,
}

impl ParticleColor {
    pub fn hex(&self) -> &'static str {
        match self {
            ParticleColor::Cyan => "#00d4ff",
            ParticleColor::Pink => "#ff0080",
            ParticleColor::Violet => "#8b5cf6",
            ParticleColor::Green => "#00ff9f",
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
    pub color: ParticleColor,
}

/// Shared effect flags. Time warp is simulation-visible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effects {
    pub screen_shake: f32,
    pub time_warp: f32,
    pub time_warp_ticks: u32,
    pub glitch: bool,
    pub glitch_ticks: u32,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            screen_shake: 0.0,
            time_warp: 1.0,
            time_warp_ticks: 0,
            glitch: false,
            glitch_ticks: 0,
        }
    }
}

/// Achievement identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    First,
    Wave5,
    Score50,
    Wave10,
}

/// Notification severity for the UI sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Success,
    Warning,
}

/// Named audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Jump,
    Score,
    Boost,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Jump => "jump",
            SoundCue::Score => "score",
            SoundCue::Boost => "boost",
        }
    }
}

/// End-of-run report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOverSummary {
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    /// Points per second of play, as a percentage
    pub efficiency: u32,
    pub new_high_score: bool,
}

/// Fire-and-forget outputs for the audio/UI/persistence collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundCue),
    Notify { message: String, severity: Severity },
    AchievementUnlocked { id: AchievementId, text: String },
    LevelUp { level: u32 },
    LifeLost { lives: u8 },
    GameOver(GameOverSummary),
}

/// Tunables fixed for the lifetime of a state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub field: FieldGeometry,
    /// Oldest particles are evicted past this count (0 disables bursts)
    pub max_particles: usize,
    /// When false, events never raise screen shake
    pub screen_shake: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            field: FieldGeometry::default(),
            max_particles: MAX_PARTICLES,
            screen_shake: true,
        }
    }
}

/// Default particle cap
pub const MAX_PARTICLES: usize = 512;

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: RunPhase,
    pub config: SimConfig,
    pub bird: Bird,
    /// Spawn order (ascending id)
    pub pipes: Vec<Pipe>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub score: u32,
    /// Always `score / 10 + 1`
    pub level: u32,
    pub lives: u8,
    /// Best score across runs; never decreases
    pub high_score: u32,
    /// Ticks since the current run started
    pub frame_count: u64,
    /// Unlocked this run, in unlock order
    pub achievements: Vec<AchievementId>,
    pub effects: Effects,
    /// Per-kind activation cooldowns, indexed by [`PowerUpKind::slot`]
    pub slot_cooldowns: [u32; 4],
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new state on the reference field
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, SimConfig::default())
    }

    pub fn with_config(seed: u64, mut config: SimConfig) -> Self {
        config.field = FieldGeometry::new(config.field.width, config.field.height);
        let bird = Bird::new(&config.field);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RunPhase::NotStarted,
            config,
            bird,
            pipes: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            score: 0,
            level: 1,
            lives: STARTING_LIVES,
            high_score: 0,
            frame_count: 0,
            achievements: Vec::new(),
            effects: Effects::default(),
            slot_cooldowns: [0; 4],
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Seed the persisted high score (startup only; never lowers it)
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = self.high_score.max(high_score);
        self
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn field(&self) -> FieldGeometry {
        self.config.field
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Queue an event for the host
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.emit(GameEvent::Notify {
            message: message.into(),
            severity,
        });
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events queued but not yet drained
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Reset every per-run value. High score, config, RNG stream and any
    /// undrained events persist.
    pub fn reset_run(&mut self) {
        self.bird = Bird::new(&self.config.field);
        self.pipes.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.score = 0;
        self.level = 1;
        self.lives = STARTING_LIVES;
        self.frame_count = 0;
        self.achievements.clear();
        self.effects = Effects::default();
        self.slot_cooldowns = [0; 4];
    }

    /// Apply new field geometry from the layout collaborator.
    ///
    /// The bird keeps its relative height; entities already on the field are
    /// left where they are and scroll off naturally.
    /// Degenerate sizes are clamped the same way as [`FieldGeometry::new`].
    pub fn resize(&mut self, field: FieldGeometry) {
        let field = FieldGeometry::new(field.width, field.height);
        let old = self.config.field;
        self.config.field = field;
        self.bird.pos.x = field.bird_x();
        self.bird.pos.y = if self.phase == RunPhase::NotStarted {
            field.rest_y()
        } else {
            self.bird.pos.y / old.height * field.height
        };
        log::info!(
            "Field resized {}x{} -> {}x{}",
            old.width,
            old.height,
            field.width,
            field.height
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(1);
        assert_eq!(state.phase, RunPhase::NotStarted);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.bird.energy, 100.0);
        assert!((state.bird.pos.x - 80.0).abs() < 0.001);
        assert!((state.bird.pos.y - 350.0).abs() < 0.001);
    }

    #[test]
    fn test_trail_is_bounded_fifo() {
        let mut bird = Bird::new(&FieldGeometry::default());
        for i in 0..20 {
            bird.pos.y = i as f32;
            bird.record_trail();
        }
        assert_eq!(bird.trail.len(), TRAIL_LENGTH);
        assert_eq!(bird.trail.front().map(|p| p.y), Some(8.0));
        assert_eq!(bird.trail.back().map(|p| p.y), Some(19.0));
    }

    #[test]
    fn test_high_score_seed_never_lowers() {
        let state = GameState::new(1).with_high_score(40).with_high_score(10);
        assert_eq!(state.high_score, 40);
    }

    #[test]
    fn test_resize_keeps_relative_height() {
        let mut state = GameState::new(1);
        state.phase = RunPhase::Running;
        state.bird.pos.y = 175.0; // quarter height
        state.resize(FieldGeometry::new(250.0, 350.0));
        assert!((state.bird.pos.x - 40.0).abs() < 0.001);
        assert!((state.bird.pos.y - 87.5).abs() < 0.001);
    }

    #[test]
    fn test_resize_through_zero_size_stays_finite() {
        let mut state = GameState::new(1);
        state.phase = RunPhase::Running;
        state.resize(FieldGeometry {
            width: 0.0,
            height: 0.0,
        });
        assert_eq!(state.field(), FieldGeometry::new(1.0, 1.0));
        state.resize(FieldGeometry::new(500.0, 700.0));
        assert!(state.bird.pos.x.is_finite());
        assert!(state.bird.pos.y.is_finite());
        assert!((state.bird.pos.x - 80.0).abs() < 0.001);
    }

    #[test]
    fn test_reset_run_keeps_undrained_events() {
        let mut state = GameState::new(1);
        state.notify("hello", Severity::Info);
        state.reset_run();
        assert_eq!(state.pending_events().len(), 1);
    }

    #[test]
    fn test_particle_palette() {
        assert_eq!(ParticleColor::Cyan.hex(), "#00d4ff");
        assert_eq!(ParticleColor::Green.hex(), "#00ff9f");
    }

    #[test]
    fn test_power_up_kind_parse() {
        assert_eq!(PowerUpKind::from_str("BOOST"), Some(PowerUpKind::Energy));
        assert_eq!(PowerUpKind::from_str("time"), Some(PowerUpKind::Time));
        assert_eq!(PowerUpKind::from_str("laser"), None);
    }
}
