//! Game state.
//!
//! ## GameState
//!
//! Everything a renderer needs to draw the game:
//! - Phase and turn number
//! - The grid (generator and consumer rows)
//! - The shop for this turn
//!
//! The engine owns the only mutable copy. Callers read it through
//! [`Engine::state`](crate::engine::Engine::state) or take an owned
//! snapshot; writes go through the engine's operations.

use serde::{Deserialize, Serialize};

use crate::cards::Stats;
use crate::grid::{GridState, SlotKind};
use crate::rules::balance::compute_totals;
use crate::rules::shop::Shop;

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Created but not yet dealt.
    #[default]
    Setup,
    Playing,
    /// Terminal: no Fossil remains.
    Won,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,

    /// Turn number (starts at 1).
    pub turn: u32,

    pub grid: GridState,

    /// Derived from the grid; rebuilt after every change.
    pub shop: Shop,
}

impl GameState {
    /// An undealt game with an empty grid.
    #[must_use]
    pub fn new(grid_size: usize) -> Self {
        Self {
            phase: Phase::Setup,
            turn: 1,
            grid: GridState::new(grid_size),
            shop: Shop::new(),
        }
    }

    #[must_use]
    pub fn game_won(&self) -> bool {
        self.phase == Phase::Won
    }

    /// Current grid totals.
    #[must_use]
    pub fn totals(&self) -> Stats {
        compute_totals(&self.grid)
    }

    /// Fossil generators still on the grid.
    #[must_use]
    pub fn fossils_remaining(&self) -> usize {
        self.grid
            .row(SlotKind::Generator)
            .iter()
            .flatten()
            .filter(|c| c.card.is_fossil())
            .count()
    }

    /// The turn the game was won on.
    #[must_use]
    pub fn final_score(&self) -> Option<u32> {
        self.game_won().then_some(self.turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCatalog, CardInstance, InstanceId, FOSSIL};

    #[test]
    fn test_new_state() {
        let state = GameState::new(8);

        assert_eq!(state.phase, Phase::Setup);
        assert_eq!(state.turn, 1);
        assert_eq!(state.grid.size(), 8);
        assert!(state.shop.is_empty());
        assert!(!state.game_won());
        assert_eq!(state.final_score(), None);
    }

    #[test]
    fn test_fossils_remaining() {
        let catalog = CardCatalog::standard();
        let fossil = catalog.find_by_name(FOSSIL).unwrap().clone();

        let mut state = GameState::new(8);
        state.grid.set(SlotKind::Generator, 0, CardInstance::new(InstanceId::Fossil(0), fossil.clone()));
        state.grid.set(SlotKind::Generator, 3, CardInstance::new(InstanceId::Fossil(3), fossil));

        assert_eq!(state.fossils_remaining(), 2);
        assert_eq!(state.totals(), Stats::new(4, 4, 4, 2));
    }

    #[test]
    fn test_final_score() {
        let mut state = GameState::new(8);
        state.turn = 7;
        state.phase = Phase::Won;
        assert_eq!(state.final_score(), Some(7));
    }

    #[test]
    fn test_snapshot_serde() {
        let state = GameState::new(4);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
