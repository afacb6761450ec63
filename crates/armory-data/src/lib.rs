//! Data-driven setup for the armory simulator: loads the item catalog and
//! simulator configuration from RON, TOML or JSON files.

pub mod loader;
pub mod schema;

pub use loader::{load_armory_data, ArmoryData, DataLoadError};
