//! Rules configuration.
//!
//! `RulesConfig` fixes the grid dimensions and the opening position:
//! - how many slots each row has
//! - how many Fossil generators the game starts with
//! - how many consumers start face-up
//! - how a successful placement advances the turn

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Largest supported row length. Slot indices are carried as `u16`.
pub const MAX_GRID_SIZE: usize = u16::MAX as usize + 1;

/// How the turn advances after a successful placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoAdvance {
    /// Hand back a ticket; the caller fires it after `auto_advance_delay`.
    #[default]
    Deferred,
    /// Advance inside the placement call.
    Immediate,
}

/// Complete rules configuration.
///
/// ## Example
///
/// ```
/// use grid_balance::core::{AutoAdvance, RulesConfig};
///
/// let config = RulesConfig::default()
///     .with_initial_fossils(3)
///     .with_auto_advance(AutoAdvance::Immediate);
///
/// assert_eq!(config.grid_size, 8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Slots per row (generators and consumers alike).
    pub grid_size: usize,

    /// Fossils dealt into the first generator slots.
    pub initial_fossil_count: usize,

    /// Consumers dealt face-up; the rest start face-down.
    pub initial_revealed_consumers: usize,

    pub auto_advance: AutoAdvance,

    /// Delay the presentation layer waits before firing a deferred advance.
    #[serde(with = "millis")]
    pub auto_advance_delay: Duration,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            grid_size: 8,
            initial_fossil_count: 4,
            initial_revealed_consumers: 4,
            auto_advance: AutoAdvance::Deferred,
            auto_advance_delay: Duration::from_millis(1000),
        }
    }
}

impl RulesConfig {
    /// Set the slots per row.
    #[must_use]
    pub fn with_grid_size(mut self, size: usize) -> Self {
        self.grid_size = size;
        self
    }

    /// Set the number of starting Fossils.
    #[must_use]
    pub fn with_initial_fossils(mut self, count: usize) -> Self {
        self.initial_fossil_count = count;
        self
    }

    /// Set the number of consumers dealt face-up.
    #[must_use]
    pub fn with_revealed_consumers(mut self, count: usize) -> Self {
        self.initial_revealed_consumers = count;
        self
    }

    #[must_use]
    pub fn with_auto_advance(mut self, mode: AutoAdvance) -> Self {
        self.auto_advance = mode;
        self
    }

    #[must_use]
    pub fn with_auto_advance_delay(mut self, delay: Duration) -> Self {
        self.auto_advance_delay = delay;
        self
    }

    /// Check the configuration describes a playable grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                grid_size: self.grid_size,
                max: MAX_GRID_SIZE,
            });
        }
        for (field, value) in [
            ("initial_fossil_count", self.initial_fossil_count),
            ("initial_revealed_consumers", self.initial_revealed_consumers),
        ] {
            if value > self.grid_size {
                return Err(ConfigError::ExceedsGrid {
                    field,
                    value,
                    grid_size: self.grid_size,
                });
            }
        }
        Ok(())
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(delay: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(delay.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
