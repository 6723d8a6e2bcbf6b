//! Core engine types: configuration, RNG, errors, game state.

pub mod config;
pub mod error;
pub mod rng;
pub mod state;

pub use config::{AutoAdvance, RulesConfig, MAX_GRID_SIZE};
pub use error::{CatalogError, ConfigError, EngineError, PlacementError};
pub use rng::GameRng;
pub use state::{GameState, Phase};
