//! Grid totals.

use crate::cards::Stats;
use crate::grid::GridState;

/// Sum of every face-up card on the grid.
///
/// Face-down cards occupy their slot but contribute nothing until revealed.
#[must_use]
pub fn compute_totals(grid: &GridState) -> Stats {
    grid.cards().map(|card| card.contribution()).sum()
}

/// Is the grid stable (every window non-negative)?
#[must_use]
pub fn is_stable(grid: &GridState) -> bool {
    compute_totals(grid).is_balanced()
}
