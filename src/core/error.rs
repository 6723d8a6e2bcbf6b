//! Error types.
//!
//! Every mutator on [`Engine`](crate::engine::Engine) returns
//! `Result<_, EngineError>`; a rejected call leaves the game untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{CardCategory, InstanceId, Stats};
use crate::grid::SlotKind;

/// Why a card cannot go into a slot.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PlacementError {
    #[error("slot {index} is outside a grid of {grid_size}")]
    InvalidSlotIndex { index: usize, grid_size: usize },

    #[error("slot already holds {name}")]
    SameName { name: String },

    #[error("{category} cards cannot go in a {slot} slot")]
    WrongSlotKind { category: CardCategory, slot: SlotKind },

    #[error("{incentive} has no consumer mapping")]
    Unmapped { incentive: String },

    #[error("incentives need a consumer to upgrade")]
    EmptyConsumerSlot,

    #[error("{incentive} upgrades {expected}, not {found}")]
    ConsumerMismatch {
        incentive: String,
        expected: String,
        found: String,
    },

    #[error("{consumer} is still face-down")]
    ConsumerFaceDown { consumer: String },

    #[error("{category} cards are never placed by the player")]
    NotPlaceable { category: CardCategory },

    #[error("placement leaves the grid unbalanced ({totals})")]
    Unbalanced { totals: Stats },
}

/// Problems with a card catalog.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("card {0} is already registered")]
    DuplicateName(String),

    #[error("card {0} is not in the catalog")]
    UnknownCard(String),

    #[error("{name} is a {found}, expected a {expected}")]
    WrongCategory {
        name: String,
        expected: CardCategory,
        found: CardCategory,
    },

    #[error("{0} is already part of an incentive mapping")]
    DuplicateMapping(String),

    #[error("incentive {0} has no consumer mapping")]
    UnmappedIncentive(String),

    #[error("catalog has no Fossil generator")]
    MissingFossil,

    #[error("catalog is full ({max} cards)")]
    Full { max: usize },
}

/// Invalid rules configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    EmptyGrid,

    #[error("grid size {grid_size} is above the maximum {max}")]
    GridTooLarge { grid_size: usize, max: usize },

    #[error("{field} is {value}, above the grid size {grid_size}")]
    ExceedsGrid {
        field: &'static str,
        value: usize,
        grid_size: usize,
    },
}

/// Rejection reasons for engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("slot {index} is outside a grid of {grid_size}")]
    InvalidSlotIndex { index: usize, grid_size: usize },

    #[error("illegal placement: {0}")]
    IllegalPlacement(PlacementError),

    #[error("no consumer on the grid matches {incentive}")]
    NoMatchingConsumer { incentive: String },

    #[error("the game is already won")]
    GameAlreadyWon,

    #[error("catalog integrity: {0}")]
    CatalogIntegrity(#[from] CatalogError),

    #[error("{id} is not in the shop")]
    UnknownCard { id: InstanceId },

    #[error("no game in progress; call reset first")]
    NotStarted,

    #[error("invalid rules configuration: {0}")]
    Config(#[from] ConfigError),
}

impl From<PlacementError> for EngineError {
    fn from(err: PlacementError) -> Self {
        match err {
            PlacementError::InvalidSlotIndex { index, grid_size } => {
                EngineError::InvalidSlotIndex { index, grid_size }
            }
            other => EngineError::IllegalPlacement(other),
        }
    }
}
