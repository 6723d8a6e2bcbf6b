//! Shop composition.
//!
//! The shop is derived from the grid and rebuilt from scratch each time:
//! - every Generator and Big Generator, Fossil included
//! - each Incentive whose mapped consumer sits somewhere in the consumer
//!   row, face-down or not
//!
//! Consumers are never offered. Offer ids come from the catalog index.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardCategory, CardDefinition, CardInstance, InstanceId};
use crate::grid::{GridState, SlotKind};

/// Cards available this turn, in catalog order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    offers: Vec<CardInstance>,
}

impl Shop {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&CardInstance> {
        self.offers.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&CardInstance> {
        self.offers.iter().find(|c| c.name() == name)
    }

    /// Take an offer out of the shop.
    pub fn remove(&mut self, id: InstanceId) -> Option<CardInstance> {
        let pos = self.offers.iter().position(|c| c.id == id)?;
        Some(self.offers.remove(pos))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.offers.iter()
    }

    /// Offers of one category.
    pub fn by_category(&self, category: CardCategory) -> impl Iterator<Item = &CardInstance> {
        self.offers.iter().filter(move |c| c.category() == category)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

/// Rebuild the shop for a grid.
#[must_use]
pub fn recompose(grid: &GridState, catalog: &CardCatalog) -> Shop {
    let consumer_present = |name: &str| {
        grid.consumers()
            .iter()
            .flatten()
            .any(|c| c.category() == CardCategory::Consumer && c.name() == name)
    };

    let offers = catalog
        .all_cards()
        .iter()
        .filter(|card| card.category.is_purchasable())
        .filter(|card| {
            card.category != CardCategory::Incentive
                || catalog
                    .matching_consumer_for(&card.name)
                    .is_some_and(|consumer| consumer_present(consumer))
        })
        // catalog indices fit: `register` stops at MAX_CARDS
        .map(|card| CardInstance::new(InstanceId::Shop(card.id.raw() as u16), card.clone()))
        .collect();

    Shop { offers }
}

/// Incentive offers whose consumer is already face-up.
///
/// This is the set a renderer shows as playable; offers for face-down
/// consumers are listed by [`upcoming_incentives`] instead.
#[must_use]
pub fn revealed_incentives<'a>(
    shop: &'a Shop,
    grid: &GridState,
    catalog: &CardCatalog,
) -> Vec<&'a CardInstance> {
    shop.by_category(CardCategory::Incentive)
        .filter(|offer| {
            catalog
                .matching_consumer_for(offer.name())
                .and_then(|consumer| grid.position_of(SlotKind::Consumer, consumer))
                .and_then(|index| grid.slot(SlotKind::Consumer, index))
                .is_some_and(|consumer| !consumer.face_down)
        })
        .collect()
}

/// An incentive that unlocks when a face-down consumer is revealed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentivePreview {
    /// Consumer slot holding the face-down consumer.
    pub slot: usize,
    pub incentive: CardDefinition,
    /// Turn on which the consumer turns face-up.
    pub reveal_turn: u32,
}

/// Incentives waiting behind face-down consumers.
///
/// One consumer is revealed per turn, lowest slot first, so the n-th
/// face-down consumer turns over on `turn + n`.
#[must_use]
pub fn upcoming_incentives(grid: &GridState, catalog: &CardCatalog, turn: u32) -> Vec<IncentivePreview> {
    grid.face_down_consumers()
        .zip(1u32..)
        .filter_map(|((slot, consumer), offset)| {
            catalog
                .incentive_for_consumer(consumer.name())
                .map(|incentive| IncentivePreview {
                    slot,
                    incentive: incentive.clone(),
                    reveal_turn: turn + offset,
                })
        })
        .collect()
}
