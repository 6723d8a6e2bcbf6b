//! # grid-balance
//!
//! Rules engine for a single-player grid-balancing card puzzle.
//!
//! A row of generator slots must cover a row of consumer slots across four
//! windows (night, day, eve, flex). The player buys one card per turn from
//! the shop, retiring Fossil generators one by one; the game is won when no
//! Fossil is left on the grid.
//!
//! ## Design Principles
//!
//! 1. **Pure rules**: totals, placement legality and shop composition are
//!    functions of a grid. They never touch live state.
//!
//! 2. **One owner**: `Engine` holds the only mutable `GameState` and exposes
//!    four mutators that commit completely or not at all.
//!
//! 3. **Cheap speculation**: grid rows are `im` vectors, so testing a
//!    placement clones in O(1).
//!
//! ## Modules
//!
//! - `core`: configuration, RNG, errors, game state
//! - `cards`: stats, definitions, instances, catalog
//! - `grid`: the two slot rows
//! - `rules`: balance, placement, shop
//! - `engine`: the state machine

pub mod cards;
pub mod core;
pub mod engine;
pub mod grid;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    AutoAdvance, CatalogError, ConfigError, EngineError, GameRng, GameState, Phase, PlacementError,
    RulesConfig,
};

pub use crate::cards::{
    CardCatalog, CardCategory, CardDefinition, CardId, CardInstance, InstanceId, StatKind, Stats,
    FOSSIL,
};

pub use crate::grid::{GridState, SlotKind, SlotRef};

pub use crate::rules::{IncentivePreview, Projection, Shop};

pub use crate::engine::{Engine, FollowUp, PendingAdvance, Placement, TurnAdvance, TurnReport};
