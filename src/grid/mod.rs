//! Grid of card slots.
//!
//! ## Key Types
//!
//! - `GridState`: generator and consumer rows of equal length
//! - `SlotKind`: which row
//! - `SlotRef`: a row plus an index

pub mod state;

pub use state::{GridState, SlotKind, SlotRef};
