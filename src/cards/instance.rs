//! Card instances - runtime card state.
//!
//! `CardInstance` is a catalog definition together with an instance id and
//! a face-down flag. A face-down card occupies its slot but contributes
//! nothing to the grid totals until it is turned over.

use serde::{Deserialize, Serialize};

use super::definition::{CardCategory, CardDefinition};
use super::stats::Stats;

/// Identifier of a card instance.
///
/// Shop ids are derived from the catalog index, so the same id is offered
/// again after the card is bought and the shop recomposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstanceId {
    /// Starting Fossil in generator slot `n`.
    Fossil(u16),
    /// Consumer dealt into consumer slot `n`.
    Consumer(u16),
    /// Shop offer for catalog entry `n`.
    Shop(u16),
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceId::Fossil(n) => write!(f, "fossil-{n}"),
            InstanceId::Consumer(n) => write!(f, "consumer-{n}"),
            InstanceId::Shop(n) => write!(f, "shop-{n}"),
        }
    }
}

/// A card instance in a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    pub id: InstanceId,

    /// The card this instance was made from.
    pub card: CardDefinition,

    /// Is this card face-down?
    pub face_down: bool,
}

impl CardInstance {
    /// Create a face-up instance.
    #[must_use]
    pub fn new(id: InstanceId, card: CardDefinition) -> Self {
        Self {
            id,
            card,
            face_down: false,
        }
    }

    /// Create a face-down instance.
    #[must_use]
    pub fn face_down(id: InstanceId, card: CardDefinition) -> Self {
        Self {
            id,
            card,
            face_down: true,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.card.name
    }

    #[must_use]
    pub fn category(&self) -> CardCategory {
        self.card.category
    }

    /// What this card adds to the grid totals right now.
    #[must_use]
    pub fn contribution(&self) -> Stats {
        if self.face_down {
            Stats::ZERO
        } else {
            self.card.stats
        }
    }

    /// The instance as it sits on the grid once placed.
    ///
    /// Big Generators are stored face-down; everything else face-up.
    #[must_use]
    pub fn as_placed(&self) -> Self {
        Self {
            id: self.id,
            card: self.card.clone(),
            face_down: self.card.enters_face_down(),
        }
    }

    /// Turn the card face-up. Returns true if it was face-down.
    pub fn reveal(&mut self) -> bool {
        std::mem::replace(&mut self.face_down, false)
    }
}
