//! Collaborator interfaces.
//!
//! The dispatchers never talk to the editor, the settings store, the
//! filesystem or the OS directly. Everything they need goes through these
//! traits, so a host (the CLI, an editor plugin, a test) decides what a
//! prompt or a terminal actually is.

pub mod process;

use std::path::{Path, PathBuf};

use crate::{config::Settings, error::Result, shell::ShellKind, types::Language};

pub use process::CompilerProcess;

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// An input box: a label, an optional greyed-out hint and a prefilled value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRequest {
    pub prompt: String,
    pub placeholder: Option<String>,
    pub value: Option<String>,
}

impl InputRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// The editor-side surface: the active document, prompts, notifications
/// and the compiler output panel.
pub trait Editor {
    /// Persist unsaved edits of the active document
    fn save_active(&self) -> Result<()>;

    /// Ask for a line of text. `None` means the prompt was dismissed.
    fn prompt(&self, request: &InputRequest) -> Option<String>;

    fn notify(&self, notification: Notification);

    /// Show `message` with a single action button; true if it was chosen
    fn confirm(&self, level: Level, message: &str, action: &str) -> bool;

    /// Append a chunk of compiler output, tagged with the source name
    fn append_output(&self, source: &str, chunk: &str);

    /// Bring the output panel into view
    fn show_output(&self);
}

/// Settings storage
pub trait ConfigStore {
    /// Effective settings for a file in `start_dir`
    fn load(&self, start_dir: &Path) -> Result<Settings>;

    /// Remember a corrected compiler path in the global configuration
    fn persist_compiler_path(&self, language: Language, path: &str) -> Result<()>;
}

pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> Result<()>;
}

/// PATH lookup for programs
pub trait BinaryProbe {
    fn resolve(&self, program: &str) -> Option<PathBuf>;
}

/// Fire-and-forget execution of a shell command line, used to open
/// external terminal windows.
pub trait CommandLauncher {
    fn exec(&self, command: &str, working_dir: &Path) -> Result<()>;
}

/// What to run in the embedded terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalRequest {
    /// Name of the terminal panel
    pub name: String,
    pub command: String,
    pub working_dir: PathBuf,
    pub shell: ShellKind,
    /// Clear the panel before running
    pub clear: bool,
}

/// The editor's own terminal. Exit status is not observed.
pub trait EmbeddedTerminal {
    fn run(&self, request: &TerminalRequest) -> Result<()>;
}

/// Borrowed set of collaborators handed to the dispatchers
#[derive(Clone, Copy)]
pub struct Host<'a> {
    pub editor: &'a dyn Editor,
    pub config: &'a dyn ConfigStore,
    pub fs: &'a dyn FileSystem,
    pub probe: &'a dyn BinaryProbe,
    pub launcher: &'a dyn CommandLauncher,
    pub terminal: &'a dyn EmbeddedTerminal,
}
