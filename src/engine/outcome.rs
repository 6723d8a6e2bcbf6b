//! Results returned by engine operations.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::grid::SlotRef;

/// A scheduled automatic turn advance.
///
/// Handed out after a successful placement in
/// [`AutoAdvance::Deferred`](crate::core::AutoAdvance::Deferred) mode. The
/// caller waits `delay` and passes the ticket to
/// [`Engine::fire_advance`](super::Engine::fire_advance). Each ticket fires
/// at most once, and tickets from a game replaced by `reset` are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingAdvance {
    /// Game the ticket belongs to.
    pub game: u64,
    pub serial: u64,
    pub delay: Duration,
}

/// What a turn advance changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// The new turn number.
    pub turn: u32,
    /// Consumer slot turned face-up, if any.
    pub revealed_consumer: Option<usize>,
    /// Big Generators that started contributing.
    pub activated_generators: usize,
    pub won: bool,
}

/// Result of firing a [`PendingAdvance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAdvance {
    Advanced(TurnReport),
    /// The ticket was already fired or its game was reset.
    Stale,
}

/// What happens after a placement is committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowUp {
    /// The last Fossil left the grid.
    Won,
    /// The turn advanced inside the call.
    Advanced(TurnReport),
    /// The turn advances when the ticket fires.
    Pending(PendingAdvance),
}

/// A committed placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub slot: SlotRef,
    /// The card that was in the slot before.
    pub replaced: Option<CardInstance>,
    pub follow_up: FollowUp,
}

impl Placement {
    #[must_use]
    pub fn won(&self) -> bool {
        matches!(self.follow_up, FollowUp::Won)
    }

    /// The ticket to fire, in deferred mode.
    #[must_use]
    pub fn pending(&self) -> Option<PendingAdvance> {
        match self.follow_up {
            FollowUp::Pending(ticket) => Some(ticket),
            _ => None,
        }
    }
}
