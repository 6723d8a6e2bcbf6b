//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card type.
//! For example, "Solar" is a Generator yielding +4 during the day but
//! costing one unit of flex - these are part of the definition.
//!
//! Instance-specific data (instance id, face-down) is stored separately
//! in `CardInstance`.

use serde::{Deserialize, Serialize};

use super::stats::Stats;

/// Name of the starting generator the player must retire.
pub const FOSSIL: &str = "Fossil";

/// Identifier for a card definition: its index in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Catalog index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    /// Ordinary generator, contributes the turn it is placed.
    Generator,
    /// Generator that enters face-down and contributes from the next turn.
    BigGenerator,
    /// Demand card dealt onto the consumer row at game start.
    Consumer,
    /// Upgrade that replaces one specific consumer in place.
    Incentive,
}

impl CardCategory {
    /// Generator or Big Generator.
    #[must_use]
    pub const fn is_generator(self) -> bool {
        matches!(self, CardCategory::Generator | CardCategory::BigGenerator)
    }

    /// Whether cards of this category are ever offered in the shop.
    #[must_use]
    pub const fn is_purchasable(self) -> bool {
        !matches!(self, CardCategory::Consumer)
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            CardCategory::Generator => "Generator",
            CardCategory::BigGenerator => "Big Generator",
            CardCategory::Consumer => "Consumer",
            CardCategory::Incentive => "Incentive",
        }
    }
}

impl std::fmt::Display for CardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use grid_balance::cards::{CardCategory, CardDefinition, CardId, Stats};
///
/// let solar = CardDefinition::new(CardId::new(0), "Solar", CardCategory::Generator)
///     .with_stats(Stats::new(1, 4, 1, -1));
///
/// assert!(solar.is_generator());
/// assert_eq!(solar.stats.day, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Catalog index.
    pub id: CardId,

    /// Card name. Unique within a catalog.
    pub name: String,

    pub category: CardCategory,

    /// Pre-signed contribution (consumers are negative).
    pub stats: Stats,
}

impl CardDefinition {
    /// Create a new card definition with zero stats.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, category: CardCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            stats: Stats::ZERO,
        }
    }

    /// Set the stats (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }

    #[must_use]
    pub fn is_generator(&self) -> bool {
        self.category.is_generator()
    }

    #[must_use]
    pub fn is_fossil(&self) -> bool {
        self.name == FOSSIL
    }

    /// Big Generators enter the grid face-down.
    #[must_use]
    pub fn enters_face_down(&self) -> bool {
        self.category == CardCategory::BigGenerator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id.index(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_category_predicates() {
        assert!(CardCategory::Generator.is_generator());
        assert!(CardCategory::BigGenerator.is_generator());
        assert!(!CardCategory::Incentive.is_generator());
        assert!(!CardCategory::Consumer.is_purchasable());
        assert!(CardCategory::Incentive.is_purchasable());
        assert_eq!(CardCategory::BigGenerator.to_string(), "Big Generator");
    }

    #[test]
    fn test_card_definition_builder() {
        let hydro = CardDefinition::new(CardId::new(4), "Hydro", CardCategory::BigGenerator)
            .with_stats(Stats::new(2, 2, 2, 2));

        assert_eq!(hydro.name, "Hydro");
        assert!(hydro.enters_face_down());
        assert!(!hydro.is_fossil());
        assert_eq!(hydro.stats, Stats::new(2, 2, 2, 2));
    }

    #[test]
    fn test_card_definition_serialization() {
        let card = CardDefinition::new(CardId::new(3), FOSSIL, CardCategory::Generator)
            .with_stats(Stats::new(2, 2, 2, 1));

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardDefinition = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
        assert!(deserialized.is_fossil());
    }
}
