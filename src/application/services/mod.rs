//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (KeyValueStore, IdSource)
//! but are themselves concrete structs, not traits.

mod config_manager;
mod session;

pub use config_manager::{
    validate, ConfigManager, DEFAULT_STORAGE_KEY, DEFAULT_TAB_ICON, DEFAULT_TAB_ID,
};
pub use session::{CommandReport, Outcome, Session};
