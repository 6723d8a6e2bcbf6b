//! Grid storage for card slots.
//!
//! `GridState` holds two fixed-length rows, generators and consumers. Each
//! slot holds at most one card. Rows are `im::Vector`s so cloning a grid to
//! test a placement shares structure with the live one.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;

/// Which row a slot belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    Generator,
    Consumer,
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotKind::Generator => f.write_str("generator"),
            SlotKind::Consumer => f.write_str("consumer"),
        }
    }
}

/// A slot address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRef {
    pub kind: SlotKind,
    pub index: usize,
}

impl SlotRef {
    #[must_use]
    pub const fn generator(index: usize) -> Self {
        Self {
            kind: SlotKind::Generator,
            index,
        }
    }

    #[must_use]
    pub const fn consumer(index: usize) -> Self {
        Self {
            kind: SlotKind::Consumer,
            index,
        }
    }
}

impl std::fmt::Display for SlotRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.kind, self.index)
    }
}

/// The two rows of card slots.
///
/// ## Usage
///
/// ```
/// use grid_balance::grid::{GridState, SlotKind};
///
/// let grid = GridState::new(8);
/// assert_eq!(grid.size(), 8);
/// assert!(grid.slot(SlotKind::Generator, 0).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridState {
    generators: Vector<Option<CardInstance>>,
    consumers: Vector<Option<CardInstance>>,
}

impl GridState {
    /// Create an empty grid with `size` slots per row.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            generators: std::iter::repeat(None).take(size).collect(),
            consumers: std::iter::repeat(None).take(size).collect(),
        }
    }

    /// Slots per row.
    #[must_use]
    pub fn size(&self) -> usize {
        self.generators.len()
    }

    #[must_use]
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.size()
    }

    /// One row.
    #[must_use]
    pub fn row(&self, kind: SlotKind) -> &Vector<Option<CardInstance>> {
        match kind {
            SlotKind::Generator => &self.generators,
            SlotKind::Consumer => &self.consumers,
        }
    }

    fn row_mut(&mut self, kind: SlotKind) -> &mut Vector<Option<CardInstance>> {
        match kind {
            SlotKind::Generator => &mut self.generators,
            SlotKind::Consumer => &mut self.consumers,
        }
    }

    #[must_use]
    pub fn generators(&self) -> &Vector<Option<CardInstance>> {
        &self.generators
    }

    #[must_use]
    pub fn consumers(&self) -> &Vector<Option<CardInstance>> {
        &self.consumers
    }

    /// The card in a slot, or `None` if empty or out of range.
    #[must_use]
    pub fn slot(&self, kind: SlotKind, index: usize) -> Option<&CardInstance> {
        self.row(kind).get(index).and_then(Option::as_ref)
    }

    /// Every card on the grid, both rows.
    pub fn cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.generators
            .iter()
            .chain(self.consumers.iter())
            .filter_map(Option::as_ref)
    }

    /// Put a card in a slot, returning the previous occupant.
    ///
    /// Out-of-range indices leave the grid unchanged and return `None`.
    pub fn set(&mut self, kind: SlotKind, index: usize, card: CardInstance) -> Option<CardInstance> {
        let row = self.row_mut(kind);
        if index >= row.len() {
            return None;
        }
        row.set(index, Some(card))
    }

    /// A copy of this grid with one slot replaced.
    #[must_use]
    pub fn with_card(&self, kind: SlotKind, index: usize, card: CardInstance) -> Self {
        let mut next = self.clone();
        next.set(kind, index, card);
        next
    }

    /// Lowest-index slot in a row holding a card with this name.
    #[must_use]
    pub fn position_of(&self, kind: SlotKind, name: &str) -> Option<usize> {
        self.row(kind)
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|c| c.name() == name))
    }

    /// Turn over the lowest-index face-down consumer.
    ///
    /// Returns the slot index, or `None` if every consumer is face-up.
    pub fn reveal_next_consumer(&mut self) -> Option<usize> {
        let index = self
            .consumers
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|c| c.face_down))?;
        if let Some(Some(card)) = self.consumers.get_mut(index) {
            card.reveal();
        }
        Some(index)
    }

    /// Turn over every face-down generator. Returns how many flipped.
    pub fn reveal_generators(&mut self) -> usize {
        let mut flipped = 0;
        for card in self.generators.iter_mut().flatten() {
            if card.reveal() {
                flipped += 1;
            }
        }
        flipped
    }

    /// Indices of face-down consumers, lowest first.
    pub fn face_down_consumers(&self) -> impl Iterator<Item = (usize, &CardInstance)> {
        self.consumers
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().filter(|c| c.face_down).map(|c| (i, c)))
    }
}
