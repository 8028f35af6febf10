//! Default collaborator implementations for a command-line host

pub mod console_editor;
pub mod system;
pub mod terminal;
pub mod tokio_process;

pub use console_editor::ConsoleEditor;
pub use system::{StdFileSystem, WhichProbe};
pub use terminal::{InlineTerminal, ShellLauncher};
pub use tokio_process::TokioProcess;
