//! Power-up effect handlers

use super::effects;
use super::state::{GameState, PowerUpKind};
use crate::consts::*;

/// Where a power-up came from. Slot activations grant a smaller energy boost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpSource {
    Collected,
    Slot,
}

/// Apply a power-up's effect to the run
pub fn apply(state: &mut GameState, kind: PowerUpKind, source: PowerUpSource) {
    match kind {
        PowerUpKind::Shield => state.bird.shield_ticks = SHIELD_TICKS,
        PowerUpKind::Energy => {
            state.bird.energy = match source {
                PowerUpSource::Collected => MAX_ENERGY,
                PowerUpSource::Slot => (state.bird.energy + SLOT_ENERGY_BONUS).min(MAX_ENERGY),
            };
        }
        PowerUpKind::Magnet => state.bird.magnet_ticks = MAGNET_TICKS,
        // The time slot has no effect of its own; only a collected orb warps time
        PowerUpKind::Time => {
            if source == PowerUpSource::Collected {
                effects::start_time_warp(&mut state.effects);
            }
        }
    }
    log::debug!("Power-up {} applied ({:?})", kind.as_str(), source);
}
