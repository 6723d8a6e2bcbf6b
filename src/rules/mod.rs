//! Game rules as pure functions over a grid.
//!
//! - `balance`: grid totals
//! - `placement`: legality of a card in a slot, previews
//! - `shop`: which cards are on offer
//!
//! Nothing here mutates a live grid; the engine commits results.

pub mod balance;
pub mod placement;
pub mod shop;

pub use balance::{compute_totals, is_stable};
pub use placement::{
    apply_hypothetically, can_place, can_place_anywhere, incentive_target, project, valid_slots,
    Projection, ValidSlots,
};
pub use shop::{recompose, revealed_incentives, upcoming_incentives, IncentivePreview, Shop};
