pub mod action;
pub mod config;
pub mod init;

pub use action::action_command;
pub use config::config_command;
pub use init::init_command;

use ccrun_core::JsonConfigStore;
use std::path::Path;

/// Settings store, optionally pointed at a different global file
pub(crate) fn config_store(global_config: Option<&Path>) -> JsonConfigStore {
    match global_config {
        Some(path) => JsonConfigStore::with_global_path(path),
        None => JsonConfigStore::new(),
    }
}
