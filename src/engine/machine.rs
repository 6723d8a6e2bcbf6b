//! The game state machine.
//!
//! `Engine` owns the catalog, the configuration, the RNG and the one
//! mutable `GameState`. Four operations change the game:
//!
//! - `reset`: deal a fresh game (`Setup`/`Won` -> `Playing`)
//! - `place_card`: put a shop card into a slot
//! - `play_incentive`: upgrade the consumer an incentive maps to
//! - `advance_turn`: reveal a consumer and activate Big Generators
//!
//! Each either commits completely or returns an error and leaves the state
//! as it was. Query methods never mutate.

use smallvec::SmallVec;
use tracing::{debug, info};

use super::outcome::{FollowUp, PendingAdvance, Placement, TurnAdvance, TurnReport};
use crate::cards::{CardCatalog, CardCategory, CardId, CardInstance, InstanceId, Stats, FOSSIL};
use crate::core::config::{AutoAdvance, RulesConfig};
use crate::core::error::{CatalogError, EngineError, PlacementError};
use crate::core::rng::GameRng;
use crate::core::state::{GameState, Phase};
use crate::grid::{GridState, SlotKind, SlotRef};
use crate::rules::{balance, placement, shop};

/// Rules engine for one player's game.
///
/// ## Example
///
/// ```
/// use grid_balance::cards::InstanceId;
/// use grid_balance::core::Phase;
/// use grid_balance::engine::Engine;
///
/// let mut engine = Engine::standard(7);
/// engine.reset().unwrap();
/// assert_eq!(engine.state().phase, Phase::Playing);
/// assert_eq!(engine.state().fossils_remaining(), 4);
///
/// // Tidal never costs flex, so it only fails where the grid is already short
/// let tidal = InstanceId::Shop(2);
/// let legal = engine.valid_slots(tidal);
/// if let Some(&slot) = legal.first() {
///     let placed = engine.place_card(tidal, slot).unwrap();
///     assert!(placed.pending().is_some());
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Engine {
    config: RulesConfig,
    catalog: CardCatalog,
    rng: GameRng,
    state: GameState,
    /// Bumped by every reset; tickets carry it.
    game: u64,
    next_serial: u64,
    /// Unfired tickets for the current game.
    pending: SmallVec<[u64; 2]>,
}

impl Engine {
    /// Create an engine after checking the configuration and catalog.
    ///
    /// The game starts in `Setup`; call [`reset`](Self::reset) to deal.
    pub fn new(config: RulesConfig, catalog: CardCatalog, seed: u64) -> Result<Self, EngineError> {
        config.validate()?;
        catalog.validate()?;
        Ok(Self::from_parts(config, catalog, GameRng::new(seed)))
    }

    /// Default rules and the built-in catalog.
    #[must_use]
    pub fn standard(seed: u64) -> Self {
        Self::from_parts(RulesConfig::default(), CardCatalog::standard(), GameRng::new(seed))
    }

    /// Default rules and the built-in catalog, shuffled from OS entropy.
    #[must_use]
    pub fn unseeded() -> Self {
        Self::from_parts(RulesConfig::default(), CardCatalog::standard(), GameRng::from_entropy())
    }

    fn from_parts(config: RulesConfig, catalog: CardCatalog, rng: GameRng) -> Self {
        Self {
            state: GameState::new(config.grid_size),
            config,
            catalog,
            rng,
            game: 0,
            next_serial: 0,
            pending: SmallVec::new(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the state for a renderer to keep.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    /// Identifier of the current game; changes on every reset.
    #[must_use]
    pub fn game_id(&self) -> u64 {
        self.game
    }

    #[must_use]
    pub fn totals(&self) -> Stats {
        balance::compute_totals(&self.state.grid)
    }

    // === Lifecycle ===

    /// Deal a new game.
    ///
    /// Fossils fill the first generator slots; every consumer in the catalog
    /// is shuffled onto the consumer row, the first few face-up. Outstanding
    /// turn tickets are invalidated. On a catalog problem the current game is
    /// kept and the error returned.
    pub fn reset(&mut self) -> Result<(), EngineError> {
        let fossil = self
            .catalog
            .find_by_name(FOSSIL)
            .filter(|card| card.is_generator())
            .cloned()
            .ok_or(CatalogError::MissingFossil)?;

        let size = self.config.grid_size;
        let mut grid = GridState::new(size);

        // slot indices fit in u16: the config was validated against MAX_GRID_SIZE
        for slot in 0..self.config.initial_fossil_count.min(size) {
            grid.set(
                SlotKind::Generator,
                slot,
                CardInstance::new(InstanceId::Fossil(slot as u16), fossil.clone()),
            );
        }

        let mut consumers: Vec<_> = self
            .catalog
            .cards_by_category(CardCategory::Consumer)
            .cloned()
            .collect();
        self.rng.shuffle(&mut consumers);

        for (slot, card) in consumers.into_iter().take(size).enumerate() {
            let id = InstanceId::Consumer(slot as u16);
            let dealt = if slot < self.config.initial_revealed_consumers {
                CardInstance::new(id, card)
            } else {
                CardInstance::face_down(id, card)
            };
            grid.set(SlotKind::Consumer, slot, dealt);
        }

        let shop = shop::recompose(&grid, &self.catalog);
        self.state = GameState {
            phase: Phase::Playing,
            turn: 1,
            grid,
            shop,
        };
        self.game += 1;
        self.pending.clear();

        info!(game = self.game, totals = %self.totals(), "new game dealt");
        Ok(())
    }

    // === Mutations ===

    /// Place a shop card into a slot.
    pub fn place_card(&mut self, id: InstanceId, slot: SlotRef) -> Result<Placement, EngineError> {
        self.ensure_playing()?;
        let card = self.offer(id)?;
        let next = placement::apply_hypothetically(&self.state.grid, &self.catalog, &card, slot)
            .map_err(|err| self.reject(&card, slot, err))?;
        Ok(self.commit(card, slot, next))
    }

    /// Play an incentive onto the consumer it upgrades.
    pub fn play_incentive(&mut self, id: InstanceId) -> Result<Placement, EngineError> {
        self.ensure_playing()?;
        let card = self.offer(id)?;
        if card.category() != CardCategory::Incentive {
            return Err(EngineError::IllegalPlacement(PlacementError::WrongSlotKind {
                category: card.category(),
                slot: SlotKind::Consumer,
            }));
        }

        let index = placement::incentive_target(&self.state.grid, &self.catalog, &card).ok_or_else(|| {
            EngineError::NoMatchingConsumer {
                incentive: card.name().to_string(),
            }
        })?;
        let slot = SlotRef::consumer(index);
        let next = placement::apply_hypothetically(&self.state.grid, &self.catalog, &card, slot)
            .map_err(|err| self.reject(&card, slot, err))?;
        Ok(self.commit(card, slot, next))
    }

    /// Move to the next turn.
    ///
    /// Reveals the lowest face-down consumer, then turns every face-down
    /// generator face-up.
    pub fn advance_turn(&mut self) -> Result<TurnReport, EngineError> {
        self.ensure_playing()?;
        Ok(self.advance())
    }

    /// Fire a ticket from a deferred placement.
    ///
    /// Returns `Stale` without touching the game if the ticket was already
    /// fired or belongs to a game that has since been reset.
    pub fn fire_advance(&mut self, ticket: PendingAdvance) -> Result<TurnAdvance, EngineError> {
        let live = ticket.game == self.game && self.pending.contains(&ticket.serial);
        if !live {
            debug!(game = ticket.game, serial = ticket.serial, "ignoring stale turn ticket");
            return Ok(TurnAdvance::Stale);
        }
        self.pending.retain(|&mut serial| serial != ticket.serial);
        self.ensure_playing()?;
        Ok(TurnAdvance::Advanced(self.advance()))
    }

    /// Tickets issued for this game that have not fired yet.
    #[must_use]
    pub fn pending_advances(&self) -> usize {
        self.pending.len()
    }

    // === Queries ===

    /// Can the shop card `id` go into `slot`?
    #[must_use]
    pub fn can_place(&self, id: InstanceId, slot: SlotRef) -> bool {
        self.state
            .shop
            .get(id)
            .is_some_and(|card| placement::can_place(&self.state.grid, &self.catalog, card, slot))
    }

    /// Can the shop card `id` go anywhere on the grid?
    #[must_use]
    pub fn can_place_anywhere(&self, id: InstanceId) -> bool {
        self.state
            .shop
            .get(id)
            .is_some_and(|card| placement::can_place_anywhere(&self.state.grid, &self.catalog, card))
    }

    /// Every slot the shop card `id` may go into.
    #[must_use]
    pub fn valid_slots(&self, id: InstanceId) -> placement::ValidSlots {
        self.state
            .shop
            .get(id)
            .map(|card| placement::valid_slots(&self.state.grid, &self.catalog, card))
            .unwrap_or_default()
    }

    /// Before/after totals for placing the shop card `id` into `slot`.
    #[must_use]
    pub fn project(&self, id: InstanceId, slot: SlotRef) -> Option<placement::Projection> {
        let card = self.state.shop.get(id)?;
        Some(placement::project(&self.state.grid, &self.catalog, card, slot))
    }

    /// Incentive offers whose consumer is face-up.
    #[must_use]
    pub fn revealed_incentives(&self) -> Vec<&CardInstance> {
        shop::revealed_incentives(&self.state.shop, &self.state.grid, &self.catalog)
    }

    /// Incentives that unlock as face-down consumers are revealed.
    #[must_use]
    pub fn upcoming_incentives(&self) -> Vec<shop::IncentivePreview> {
        shop::upcoming_incentives(&self.state.grid, &self.catalog, self.state.turn)
    }

    // === Internals ===

    fn ensure_playing(&self) -> Result<(), EngineError> {
        match self.state.phase {
            Phase::Setup => Err(EngineError::NotStarted),
            Phase::Won => Err(EngineError::GameAlreadyWon),
            Phase::Playing => Ok(()),
        }
    }

    /// Look up a shop offer.
    ///
    /// An incentive that is missing only because its consumer is not on the
    /// grid reports `NoMatchingConsumer`.
    fn offer(&self, id: InstanceId) -> Result<CardInstance, EngineError> {
        if let Some(card) = self.state.shop.get(id) {
            return Ok(card.clone());
        }
        if let InstanceId::Shop(index) = id {
            if let Some(card) = self.catalog.get(CardId::new(u32::from(index))) {
                if card.category == CardCategory::Incentive {
                    return Err(EngineError::NoMatchingConsumer {
                        incentive: card.name.clone(),
                    });
                }
            }
        }
        Err(EngineError::UnknownCard { id })
    }

    fn reject(&self, card: &CardInstance, slot: SlotRef, err: PlacementError) -> EngineError {
        debug!(card = card.name(), %slot, %err, "placement rejected");
        err.into()
    }

    fn commit(&mut self, card: CardInstance, slot: SlotRef, next: GridState) -> Placement {
        let replaced = self.state.grid.slot(slot.kind, slot.index).cloned();
        self.state.grid = next;
        self.state.shop.remove(card.id);
        self.state.shop = shop::recompose(&self.state.grid, &self.catalog);

        info!(
            turn = self.state.turn,
            card = card.name(),
            %slot,
            totals = %self.totals(),
            "card placed"
        );

        let follow_up = if self.check_win() {
            FollowUp::Won
        } else {
            match self.config.auto_advance {
                AutoAdvance::Immediate => FollowUp::Advanced(self.advance()),
                AutoAdvance::Deferred => FollowUp::Pending(self.schedule_advance()),
            }
        };

        Placement {
            slot,
            replaced,
            follow_up,
        }
    }

    fn schedule_advance(&mut self) -> PendingAdvance {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.pending.push(serial);
        PendingAdvance {
            game: self.game,
            serial,
            delay: self.config.auto_advance_delay,
        }
    }

    fn advance(&mut self) -> TurnReport {
        self.state.turn += 1;

        let revealed_consumer = self.state.grid.reveal_next_consumer();
        if revealed_consumer.is_some() {
            self.state.shop = shop::recompose(&self.state.grid, &self.catalog);
        }
        let activated_generators = self.state.grid.reveal_generators();
        let won = self.check_win();

        info!(
            turn = self.state.turn,
            ?revealed_consumer,
            activated_generators,
            totals = %self.totals(),
            "turn advanced"
        );

        TurnReport {
            turn: self.state.turn,
            revealed_consumer,
            activated_generators,
            won,
        }
    }

    /// Move to `Won` if no Fossil is left. One-way.
    fn check_win(&mut self) -> bool {
        if self.state.phase == Phase::Won {
            return true;
        }
        if self.state.fossils_remaining() > 0 {
            return false;
        }
        self.state.phase = Phase::Won;
        self.pending.clear();
        info!(turn = self.state.turn, "last fossil retired, game won");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ConfigError;

    fn engine() -> Engine {
        let mut engine = Engine::new(
            RulesConfig::default().with_auto_advance(AutoAdvance::Deferred),
            CardCatalog::standard(),
            42,
        )
        .unwrap();
        engine.reset().unwrap();
        engine
    }

    #[test]
    fn test_setup_rejects_mutations() {
        let mut engine = Engine::standard(1);
        assert_eq!(engine.state().phase, Phase::Setup);
        assert_eq!(engine.advance_turn(), Err(EngineError::NotStarted));
        assert_eq!(
            engine.place_card(InstanceId::Shop(0), SlotRef::generator(4)),
            Err(EngineError::NotStarted)
        );
    }

    #[test]
    fn test_new_validates() {
        let bad = RulesConfig::default().with_grid_size(0);
        assert!(matches!(
            Engine::new(bad, CardCatalog::standard(), 1),
            Err(EngineError::Config(_))
        ));
        let huge = RulesConfig::default().with_grid_size(crate::core::MAX_GRID_SIZE + 1);
        assert!(matches!(
            Engine::new(huge, CardCatalog::standard(), 1),
            Err(EngineError::Config(ConfigError::GridTooLarge { .. }))
        ));
        assert!(matches!(
            Engine::new(RulesConfig::default(), CardCatalog::new(), 1),
            Err(EngineError::CatalogIntegrity(CatalogError::MissingFossil))
        ));
    }

    #[test]
    fn test_reset_deals() {
        let engine = engine();
        let state = engine.state();

        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.turn, 1);
        assert_eq!(state.fossils_remaining(), 4);
        for i in 4..8 {
            assert!(state.grid.slot(SlotKind::Generator, i).is_none());
        }
        assert_eq!(state.grid.face_down_consumers().count(), 4);
        assert_eq!(engine.game_id(), 1);
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = engine();
        let b = engine();
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_unknown_card() {
        let mut engine = engine();
        let err = engine
            .place_card(InstanceId::Consumer(0), SlotRef::generator(4))
            .unwrap_err();
        assert_eq!(err, EngineError::UnknownCard { id: InstanceId::Consumer(0) });
    }

    #[test]
    fn test_play_incentive_rejects_generators() {
        let mut engine = engine();
        let err = engine.play_incentive(InstanceId::Shop(0)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::IllegalPlacement(PlacementError::WrongSlotKind { .. })
        ));
    }

    #[test]
    fn test_advance_turn_reveals_one_consumer() {
        let mut engine = engine();
        let report = engine.advance_turn().unwrap();

        assert_eq!(report.turn, 2);
        assert_eq!(report.revealed_consumer, Some(4));
        assert_eq!(report.activated_generators, 0);
        assert!(!report.won);
        assert_eq!(engine.state().grid.face_down_consumers().count(), 3);
    }

    #[test]
    fn test_stale_ticket_after_reset() {
        let mut engine = engine();
        let ticket = engine.schedule_advance();
        engine.reset().unwrap();

        assert_eq!(engine.fire_advance(ticket), Ok(TurnAdvance::Stale));
        assert_eq!(engine.state().turn, 1);
    }

    #[test]
    fn test_ticket_fires_once() {
        let mut engine = engine();
        let ticket = engine.schedule_advance();
        assert_eq!(engine.pending_advances(), 1);

        assert!(matches!(engine.fire_advance(ticket), Ok(TurnAdvance::Advanced(_))));
        assert_eq!(engine.fire_advance(ticket), Ok(TurnAdvance::Stale));
        assert_eq!(engine.state().turn, 2);
        assert_eq!(engine.pending_advances(), 0);
    }
}
