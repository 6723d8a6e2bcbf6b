//! Game state machine: `Setup -> Playing -> Won`.
//!
//! There is no losing state; a game ends only when the last Fossil
//! generator has been replaced.

pub mod machine;
pub mod outcome;

pub use machine::Engine;
pub use outcome::{FollowUp, PendingAdvance, Placement, TurnAdvance, TurnReport};
