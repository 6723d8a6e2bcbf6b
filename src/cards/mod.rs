//! Card system: stats, definitions, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `Stats`: Four-window contribution (night, day, eve, flex)
//! - `CardDefinition`: Static card data
//! - `CardInstance`: A definition on the grid or in the shop
//! - `CardCatalog`: All definitions plus the incentive mapping

pub mod catalog;
pub mod definition;
pub mod instance;
pub mod stats;

pub use catalog::{CardCatalog, MAX_CARDS};
pub use definition::{CardCategory, CardDefinition, CardId, FOSSIL};
pub use instance::{CardInstance, InstanceId};
pub use stats::{StatKind, Stats};
