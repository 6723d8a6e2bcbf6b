//! Randomised play against the standard catalog.
//!
//! Every accepted placement leaves the grid balanced, every rejected
//! operation leaves the game untouched, and a won game stays won.

use grid_balance::{
    CardCatalog, Engine, EngineError, PendingAdvance, Phase, RulesConfig, SlotRef, TurnAdvance,
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Step {
    Place { offer: usize, generator: bool, index: usize },
    Incentive { offer: usize },
    Advance,
    Fire { ticket: usize },
    Reset,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => (any::<usize>(), any::<bool>(), 0usize..9)
            .prop_map(|(offer, generator, index)| Step::Place { offer, generator, index }),
        2 => any::<usize>().prop_map(|offer| Step::Incentive { offer }),
        1 => Just(Step::Advance),
        2 => any::<usize>().prop_map(|ticket| Step::Fire { ticket }),
        1 => Just(Step::Reset),
    ]
}

fn nth_offer(engine: &Engine, n: usize) -> Option<grid_balance::InstanceId> {
    let shop = &engine.state().shop;
    if shop.is_empty() {
        return None;
    }
    shop.iter().nth(n % shop.len()).map(|card| card.id)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_play_keeps_invariants(seed in any::<u64>(), steps in prop::collection::vec(step(), 1..40)) {
        let mut engine = Engine::new(RulesConfig::default(), CardCatalog::standard(), seed).unwrap();
        engine.reset().unwrap();
        let mut tickets: Vec<PendingAdvance> = Vec::new();

        for step in steps {
            let before = engine.snapshot();
            let was_won = before.phase == Phase::Won;

            match step {
                Step::Place { offer, generator, index } => {
                    let Some(id) = nth_offer(&engine, offer) else { continue };
                    let slot = if generator { SlotRef::generator(index) } else { SlotRef::consumer(index) };
                    let predicted = engine.can_place(id, slot);
                    prop_assert_eq!(engine.snapshot(), before.clone());

                    match engine.place_card(id, slot) {
                        Ok(placed) => {
                            prop_assert!(predicted);
                            prop_assert!(engine.totals().is_balanced());
                            if let Some(ticket) = placed.pending() {
                                tickets.push(ticket);
                            }
                        }
                        Err(err) => {
                            prop_assert!(!predicted || was_won, "{err}");
                            prop_assert_eq!(engine.snapshot(), before.clone());
                        }
                    }
                }
                Step::Incentive { offer } => {
                    let Some(id) = nth_offer(&engine, offer) else { continue };
                    match engine.play_incentive(id) {
                        Ok(placed) => {
                            prop_assert!(engine.totals().is_balanced());
                            if let Some(ticket) = placed.pending() {
                                tickets.push(ticket);
                            }
                        }
                        Err(_) => {
                            prop_assert_eq!(engine.snapshot(), before.clone());
                        }
                    }
                }
                Step::Advance => match engine.advance_turn() {
                    Ok(report) => {
                        prop_assert_eq!(report.turn, before.turn + 1);
                    }
                    Err(err) => {
                        prop_assert_eq!(err, EngineError::GameAlreadyWon);
                        prop_assert_eq!(engine.snapshot(), before.clone());
                    }
                },
                Step::Fire { ticket } => {
                    if tickets.is_empty() {
                        continue;
                    }
                    let ticket = tickets[ticket % tickets.len()];
                    if engine.fire_advance(ticket).unwrap() == TurnAdvance::Stale {
                        prop_assert_eq!(engine.snapshot(), before.clone());
                    }
                }
                Step::Reset => {
                    engine.reset().unwrap();
                    prop_assert_eq!(engine.state().phase, Phase::Playing);
                    continue;
                }
            }

            let state = engine.state();
            prop_assert!(state.turn >= before.turn);
            if was_won {
                prop_assert_eq!(state.phase, Phase::Won);
            }
            prop_assert_eq!(state.fossils_remaining() == 0, state.phase == Phase::Won);
        }
    }
}
