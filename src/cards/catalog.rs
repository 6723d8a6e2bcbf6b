//! Card catalog: every card definition plus the incentive mapping.
//!
//! The catalog is read-only once built. The built-in set is available via
//! [`CardCatalog::standard`]; custom sets are assembled with
//! [`CardCatalog::register`] and [`CardCatalog::link_incentive`] and checked
//! with [`CardCatalog::validate`].

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{CardCategory, CardDefinition, CardId, FOSSIL};
use super::stats::Stats;
use crate::core::error::CatalogError;

const STANDARD_CARDS: &[(&str, CardCategory, Stats)] = &[
    ("Solar", CardCategory::Generator, Stats::new(1, 4, 1, -1)),
    ("Wind", CardCategory::Generator, Stats::new(2, 1, 3, -1)),
    ("Tidal", CardCategory::Generator, Stats::new(3, 0, 3, 0)),
    (FOSSIL, CardCategory::Generator, Stats::new(2, 2, 2, 1)),
    ("Hydro", CardCategory::BigGenerator, Stats::new(2, 2, 2, 2)),
    ("Nuclear", CardCategory::BigGenerator, Stats::new(3, 3, 3, 0)),
    ("AC", CardCategory::Consumer, Stats::new(0, -2, -1, 0)),
    ("Industry", CardCategory::Consumer, Stats::new(0, -3, -2, -2)),
    ("EVs", CardCategory::Consumer, Stats::new(-1, 0, -1, 0)),
    ("Appliances", CardCategory::Consumer, Stats::new(0, -1, -3, 0)),
    ("Lights", CardCategory::Consumer, Stats::new(-1, -1, -2, 0)),
    ("Heating", CardCategory::Consumer, Stats::new(-1, 0, -2, 0)),
    ("Infrastructure", CardCategory::Consumer, Stats::new(-1, -1, -2, 0)),
    ("Data Centre", CardCategory::Consumer, Stats::new(-1, -2, -2, 0)),
    ("Adaptive Servers", CardCategory::Incentive, Stats::new(-2, -2, -1, 1)),
    ("Smart Grid", CardCategory::Incentive, Stats::new(-1, 0, 0, 1)),
    ("Smart Appliances", CardCategory::Incentive, Stats::new(-1, -1, -1, 0)),
    ("Smart Industry", CardCategory::Incentive, Stats::new(-2, -2, -1, -2)),
    ("Smart EVs", CardCategory::Incentive, Stats::new(-2, 0, 0, 1)),
    ("LED Lights", CardCategory::Incentive, Stats::new(-1, 0, -1, 0)),
    ("Heat Pumps", CardCategory::Incentive, Stats::new(-1, 0, -1, 1)),
    ("Passive Cooling", CardCategory::Incentive, Stats::new(0, -1, -1, 0)),
];

const STANDARD_INCENTIVES: &[(&str, &str)] = &[
    ("Adaptive Servers", "Data Centre"),
    ("Smart Grid", "Infrastructure"),
    ("Smart Appliances", "Appliances"),
    ("Smart Industry", "Industry"),
    ("Smart EVs", "EVs"),
    ("LED Lights", "Lights"),
    ("Heat Pumps", "Heating"),
    ("Passive Cooling", "AC"),
];

/// Most cards a catalog can hold. Shop offers carry the catalog index as `u16`.
pub const MAX_CARDS: usize = u16::MAX as usize + 1;

/// Catalog of card definitions.
///
/// Cards keep their registration order; a card's [`CardId`] is its index.
///
/// ## Example
///
/// ```
/// use grid_balance::cards::{CardCatalog, CardCategory};
///
/// let catalog = CardCatalog::standard();
///
/// assert_eq!(catalog.matching_consumer_for("LED Lights"), Some("Lights"));
/// assert_eq!(catalog.cards_by_category(CardCategory::Consumer).count(), 8);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "CatalogData", into = "CatalogData")]
pub struct CardCatalog {
    cards: Vec<CardDefinition>,
    by_name: FxHashMap<String, CardId>,
    /// Incentive name -> consumer name.
    incentives: FxHashMap<String, String>,
}

/// Serialized form: the card list and the mapping, in order.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct CatalogData {
    cards: Vec<(String, CardCategory, Stats)>,
    incentives: Vec<(String, String)>,
}

impl TryFrom<CatalogData> for CardCatalog {
    type Error = CatalogError;

    fn try_from(data: CatalogData) -> Result<Self, Self::Error> {
        let mut catalog = CardCatalog::new();
        for (name, category, stats) in data.cards {
            catalog.register(name, category, stats)?;
        }
        for (incentive, consumer) in data.incentives {
            catalog.link_incentive(&incentive, &consumer)?;
        }
        Ok(catalog)
    }
}

impl From<CardCatalog> for CatalogData {
    fn from(catalog: CardCatalog) -> Self {
        let mut incentives: Vec<_> = catalog.incentives.into_iter().collect();
        incentives.sort();
        Self {
            cards: catalog
                .cards
                .into_iter()
                .map(|c| (c.name, c.category, c.stats))
                .collect(),
            incentives,
        }
    }
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in 22-card set.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for &(name, category, stats) in STANDARD_CARDS {
            catalog.cards.push(
                CardDefinition::new(CardId::new(catalog.cards.len() as u32), name, category)
                    .with_stats(stats),
            );
        }
        catalog.by_name = catalog
            .cards
            .iter()
            .map(|c| (c.name.clone(), c.id))
            .collect();
        catalog.incentives = STANDARD_INCENTIVES
            .iter()
            .map(|&(i, c)| (i.to_string(), c.to_string()))
            .collect();
        catalog
    }

    /// Register a card with the next free ID.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        category: CardCategory,
        stats: Stats,
    ) -> Result<CardId, CatalogError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(CatalogError::DuplicateName(name));
        }
        if self.cards.len() >= MAX_CARDS {
            return Err(CatalogError::Full { max: MAX_CARDS });
        }
        let id = CardId::new(self.cards.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.cards
            .push(CardDefinition::new(id, name, category).with_stats(stats));
        Ok(id)
    }

    /// Map an incentive onto the consumer it upgrades.
    ///
    /// Both cards must already be registered with the right categories, and
    /// neither may be mapped yet.
    pub fn link_incentive(&mut self, incentive: &str, consumer: &str) -> Result<(), CatalogError> {
        self.expect_category(incentive, CardCategory::Incentive)?;
        self.expect_category(consumer, CardCategory::Consumer)?;
        if self.incentives.contains_key(incentive) {
            return Err(CatalogError::DuplicateMapping(incentive.to_string()));
        }
        if self.incentives.values().any(|c| c == consumer) {
            return Err(CatalogError::DuplicateMapping(consumer.to_string()));
        }
        self.incentives
            .insert(incentive.to_string(), consumer.to_string());
        Ok(())
    }

    fn expect_category(&self, name: &str, category: CardCategory) -> Result<(), CatalogError> {
        let card = self
            .find_by_name(name)
            .ok_or_else(|| CatalogError::UnknownCard(name.to_string()))?;
        if card.category != category {
            return Err(CatalogError::WrongCategory {
                name: name.to_string(),
                expected: category,
                found: card.category,
            });
        }
        Ok(())
    }

    /// Check the catalog can drive a game.
    ///
    /// Requires a Fossil generator, and a one-to-one mapping covering every
    /// incentive and pointing only at consumers.
    pub fn validate(&self) -> Result<(), CatalogError> {
        match self.find_by_name(FOSSIL) {
            Some(card) if card.is_generator() => {}
            _ => return Err(CatalogError::MissingFossil),
        }

        for (incentive, consumer) in &self.incentives {
            self.expect_category(incentive, CardCategory::Incentive)?;
            self.expect_category(consumer, CardCategory::Consumer)?;
        }

        for card in self.cards_by_category(CardCategory::Incentive) {
            if !self.incentives.contains_key(&card.name) {
                return Err(CatalogError::UnmappedIncentive(card.name.clone()));
            }
        }

        let mut targets: Vec<&String> = self.incentives.values().collect();
        targets.sort();
        if let Some(pair) = targets.windows(2).find(|w| w[0] == w[1]) {
            return Err(CatalogError::DuplicateMapping(pair[0].clone()));
        }

        Ok(())
    }

    /// All definitions in catalog order.
    #[must_use]
    pub fn all_cards(&self) -> &[CardDefinition] {
        &self.cards
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(id.index())
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.by_name.get(name).and_then(|&id| self.get(id))
    }

    /// The consumer an incentive upgrades.
    #[must_use]
    pub fn matching_consumer_for(&self, incentive: &str) -> Option<&str> {
        self.incentives.get(incentive).map(String::as_str)
    }

    /// The incentive that upgrades a consumer.
    #[must_use]
    pub fn incentive_for_consumer(&self, consumer: &str) -> Option<&CardDefinition> {
        self.incentives
            .iter()
            .find(|(_, c)| c.as_str() == consumer)
            .and_then(|(i, _)| self.find_by_name(i))
    }

    /// Cards of one category, in catalog order.
    pub fn cards_by_category(
        &self,
        category: CardCategory,
    ) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter().filter(move |c| c.category == category)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = CardCatalog::standard();
        assert_eq!(catalog.len(), 22);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_standard_catalog_order() {
        let catalog = CardCatalog::standard();
        let fossil = catalog.find_by_name(FOSSIL).unwrap();
        assert_eq!(fossil.id, CardId::new(3));
        assert_eq!(fossil.stats, Stats::new(2, 2, 2, 1));

        for (i, card) in catalog.all_cards().iter().enumerate() {
            assert_eq!(card.id.index(), i);
        }
    }

    #[test]
    fn test_cards_by_category() {
        let catalog = CardCatalog::standard();
        assert_eq!(catalog.cards_by_category(CardCategory::Generator).count(), 4);
        assert_eq!(catalog.cards_by_category(CardCategory::BigGenerator).count(), 2);
        assert_eq!(catalog.cards_by_category(CardCategory::Consumer).count(), 8);
        assert_eq!(catalog.cards_by_category(CardCategory::Incentive).count(), 8);
    }

    #[test]
    fn test_incentive_mapping_both_ways() {
        let catalog = CardCatalog::standard();
        assert_eq!(catalog.matching_consumer_for("Passive Cooling"), Some("AC"));
        assert_eq!(catalog.matching_consumer_for("Solar"), None);
        assert_eq!(catalog.matching_consumer_for("Nope"), None);

        let heat_pumps = catalog.incentive_for_consumer("Heating").unwrap();
        assert_eq!(heat_pumps.name, "Heat Pumps");
        assert!(catalog.incentive_for_consumer("Solar").is_none());
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut catalog = CardCatalog::new();
        let id = catalog
            .register("Solar", CardCategory::Generator, Stats::ZERO)
            .unwrap();
        assert_eq!(id, CardId::new(0));

        let err = catalog
            .register("Solar", CardCategory::Generator, Stats::ZERO)
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateName("Solar".into()));
    }

    #[test]
    fn test_register_stops_at_capacity() {
        let mut catalog = CardCatalog::new();
        for i in 0..MAX_CARDS {
            catalog
                .register(format!("Plant {i}"), CardCategory::Generator, Stats::ZERO)
                .unwrap();
        }
        assert_eq!(catalog.all_cards().last().unwrap().id.index(), MAX_CARDS - 1);
        assert_eq!(
            catalog.register("One More", CardCategory::Generator, Stats::ZERO),
            Err(CatalogError::Full { max: MAX_CARDS })
        );
    }

    #[test]
    fn test_link_incentive_checks_categories() {
        let mut catalog = CardCatalog::new();
        catalog.register(FOSSIL, CardCategory::Generator, Stats::ZERO).unwrap();
        catalog.register("Lights", CardCategory::Consumer, Stats::ZERO).unwrap();
        catalog.register("LED Lights", CardCategory::Incentive, Stats::ZERO).unwrap();

        assert!(matches!(
            catalog.link_incentive("Lights", "LED Lights"),
            Err(CatalogError::WrongCategory { .. })
        ));
        assert!(matches!(
            catalog.link_incentive("LED Lights", "Street Lamps"),
            Err(CatalogError::UnknownCard(_))
        ));

        catalog.link_incentive("LED Lights", "Lights").unwrap();
        assert_eq!(
            catalog.link_incentive("LED Lights", "Lights"),
            Err(CatalogError::DuplicateMapping("LED Lights".into()))
        );
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_validate_failures() {
        let mut catalog = CardCatalog::new();
        assert_eq!(catalog.validate(), Err(CatalogError::MissingFossil));

        catalog.register(FOSSIL, CardCategory::Generator, Stats::ZERO).unwrap();
        catalog.register("Smart Grid", CardCategory::Incentive, Stats::ZERO).unwrap();
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::UnmappedIncentive("Smart Grid".into()))
        );
    }

    #[test]
    fn test_catalog_serde() {
        let catalog = CardCatalog::standard();
        let json = serde_json::to_string(&catalog).unwrap();
        let restored: CardCatalog = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.all_cards(), catalog.all_cards());
        assert_eq!(restored.matching_consumer_for("Smart EVs"), Some("EVs"));
        assert!(restored.validate().is_ok());
    }

    #[test]
    fn test_deserialize_rejects_duplicate_names() {
        let json = r#"{
            "cards": [
                ["Fossil", "Generator", {"night": 2, "day": 2, "eve": 2, "flex": 1}],
                ["Solar", "Generator", {"night": 1, "day": 4, "eve": 1, "flex": -1}],
                ["Solar", "Generator", {"night": 3, "day": 3, "eve": 3, "flex": 3}]
            ],
            "incentives": []
        }"#;

        let err = serde_json::from_str::<CardCatalog>(json).unwrap_err();
        assert!(err.to_string().contains("Solar"), "{err}");
    }

    #[test]
    fn test_deserialize_rejects_bad_mapping() {
        let json = r#"{
            "cards": [
                ["Fossil", "Generator", {"night": 2, "day": 2, "eve": 2, "flex": 1}],
                ["Lights", "Consumer", {"night": -1, "day": -1, "eve": -2, "flex": 0}]
            ],
            "incentives": [["LED Lights", "Lights"]]
        }"#;

        assert!(serde_json::from_str::<CardCatalog>(json).is_err());
    }
}
