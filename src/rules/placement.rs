//! Placement validation.
//!
//! A placement is legal when it passes the slot rules and the grid it
//! produces is still balanced. Every check runs against a copy of the grid;
//! the live grid is never touched here, so renderers may call these as often
//! as they like for hover previews and drop-zone highlighting.
//!
//! ## Slot rules, in order
//!
//! 1. The index is inside the grid.
//! 2. Generators go in generator slots, incentives in consumer slots.
//!    Consumers are dealt at reset and never placed.
//! 3. A card may not replace a card of the same name.
//! 4. An incentive may only replace the consumer it is mapped to, and only
//!    once that consumer is face-up.
//! 5. The resulting grid (Big Generators face-down) balances.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::balance::compute_totals;
use crate::cards::{CardCatalog, CardCategory, CardInstance, Stats};
use crate::core::error::PlacementError;
use crate::grid::{GridState, SlotKind, SlotRef};

/// Slots a card may legally go into.
pub type ValidSlots = SmallVec<[SlotRef; 8]>;

/// Before/after totals for a prospective placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    /// Totals of the grid as it stands.
    pub current: Stats,
    /// Totals if the card were placed. Equal to `current` when the slot
    /// cannot take the card at all.
    pub projected: Stats,
    /// `None` if the placement is legal.
    pub rejection: Option<PlacementError>,
}

impl Projection {
    #[must_use]
    pub fn is_legal(&self) -> bool {
        self.rejection.is_none()
    }

    /// Per-window change.
    #[must_use]
    pub fn delta(&self) -> Stats {
        self.projected - self.current
    }
}

/// Which row a card category may target.
fn target_row(category: CardCategory) -> Option<SlotKind> {
    match category {
        CardCategory::Generator | CardCategory::BigGenerator => Some(SlotKind::Generator),
        CardCategory::Incentive => Some(SlotKind::Consumer),
        CardCategory::Consumer => None,
    }
}

/// Check the slot rules, without the balance check.
fn check_slot_rules(
    grid: &GridState,
    catalog: &CardCatalog,
    card: &CardInstance,
    slot: SlotRef,
) -> Result<(), PlacementError> {
    if !grid.contains_index(slot.index) {
        return Err(PlacementError::InvalidSlotIndex {
            index: slot.index,
            grid_size: grid.size(),
        });
    }

    let category = card.category();
    match target_row(category) {
        None => return Err(PlacementError::NotPlaceable { category }),
        Some(row) if row != slot.kind => {
            return Err(PlacementError::WrongSlotKind {
                category,
                slot: slot.kind,
            })
        }
        Some(_) => {}
    }

    let occupant = grid.slot(slot.kind, slot.index);
    if let Some(existing) = occupant {
        if existing.name() == card.name() {
            return Err(PlacementError::SameName {
                name: existing.name().to_string(),
            });
        }
    }

    if category == CardCategory::Incentive {
        let expected = catalog
            .matching_consumer_for(card.name())
            .ok_or_else(|| PlacementError::Unmapped {
                incentive: card.name().to_string(),
            })?;
        let existing = occupant.ok_or(PlacementError::EmptyConsumerSlot)?;
        if existing.name() != expected {
            return Err(PlacementError::ConsumerMismatch {
                incentive: card.name().to_string(),
                expected: expected.to_string(),
                found: existing.name().to_string(),
            });
        }
        if existing.face_down {
            return Err(PlacementError::ConsumerFaceDown {
                consumer: existing.name().to_string(),
            });
        }
    }

    Ok(())
}

/// Apply a placement to a copy of the grid.
///
/// Returns the grid as it would be after the placement, or why the
/// placement is illegal. The input grid is never modified.
pub fn apply_hypothetically(
    grid: &GridState,
    catalog: &CardCatalog,
    card: &CardInstance,
    slot: SlotRef,
) -> Result<GridState, PlacementError> {
    check_slot_rules(grid, catalog, card, slot)?;

    let next = grid.with_card(slot.kind, slot.index, card.as_placed());
    let totals = compute_totals(&next);
    if !totals.is_balanced() {
        return Err(PlacementError::Unbalanced { totals });
    }
    Ok(next)
}

/// Can `card` go into `slot` without breaking the grid?
#[must_use]
pub fn can_place(grid: &GridState, catalog: &CardCatalog, card: &CardInstance, slot: SlotRef) -> bool {
    apply_hypothetically(grid, catalog, card, slot).is_ok()
}

/// Can `card` go into at least one slot?
///
/// Generators try every generator slot not already holding a card of the
/// same name. Incentives try the slots holding their mapped consumer.
/// Consumers are never placeable.
#[must_use]
pub fn can_place_anywhere(grid: &GridState, catalog: &CardCatalog, card: &CardInstance) -> bool {
    candidate_slots(grid, catalog, card).any(|slot| can_place(grid, catalog, card, slot))
}

/// Every slot `card` may legally go into.
#[must_use]
pub fn valid_slots(grid: &GridState, catalog: &CardCatalog, card: &CardInstance) -> ValidSlots {
    candidate_slots(grid, catalog, card)
        .filter(|&slot| can_place(grid, catalog, card, slot))
        .collect()
}

/// Slots worth testing for a card, before the balance check.
fn candidate_slots<'a>(
    grid: &'a GridState,
    catalog: &'a CardCatalog,
    card: &'a CardInstance,
) -> impl Iterator<Item = SlotRef> + 'a {
    let target = match card.category() {
        CardCategory::Incentive => catalog.matching_consumer_for(card.name()),
        _ => None,
    };

    (0..grid.size()).filter_map(move |index| match card.category() {
        CardCategory::Generator | CardCategory::BigGenerator => {
            let same = grid
                .slot(SlotKind::Generator, index)
                .is_some_and(|c| c.name() == card.name());
            (!same).then_some(SlotRef::generator(index))
        }
        CardCategory::Incentive => {
            let matches = grid
                .slot(SlotKind::Consumer, index)
                .zip(target)
                .is_some_and(|(c, t)| c.name() == t);
            matches.then_some(SlotRef::consumer(index))
        }
        CardCategory::Consumer => None,
    })
}

/// The consumer slot an incentive upgrades: the lowest-index slot holding
/// its mapped consumer.
#[must_use]
pub fn incentive_target(grid: &GridState, catalog: &CardCatalog, incentive: &CardInstance) -> Option<usize> {
    let consumer = catalog.matching_consumer_for(incentive.name())?;
    grid.position_of(SlotKind::Consumer, consumer)
}

/// Preview a placement: totals now, totals after, and whether it is legal.
#[must_use]
pub fn project(grid: &GridState, catalog: &CardCatalog, card: &CardInstance, slot: SlotRef) -> Projection {
    let current = compute_totals(grid);
    let rejection = apply_hypothetically(grid, catalog, card, slot).err();

    let fits_row = grid.contains_index(slot.index) && target_row(card.category()) == Some(slot.kind);
    let projected = if fits_row {
        compute_totals(&grid.with_card(slot.kind, slot.index, card.as_placed()))
    } else {
        current
    };

    Projection {
        current,
        projected,
        rejection,
    }
}
