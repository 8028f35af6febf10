//! Configuration management for ccrun

mod settings;
pub mod store;

// Re-export main types
pub use settings::{CompilerProfile, Settings, SettingsLayer};
pub use store::{JsonConfigStore, LOCAL_CONFIG_FILE};
