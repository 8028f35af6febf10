//! ccrun - compile and run single C/C++ source files
//!
//! This crate provides functionality to:
//! - Describe a source file and where its executable goes
//! - Pick and invoke the right compiler, streaming its output
//! - Build a shell-correct run command for the detected shell
//! - Launch it in an embedded or an external terminal window
pub mod command;
pub mod compile_run;
pub mod compiler;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod runner;
pub mod services;
pub mod shell;
pub mod terminal;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use command::{CompileInvocation, RunCommand};
pub use compile_run::{Action, CompileRun, Plan, Request};
pub use compiler::{CompileOptions, Compiler};
pub use config::{JsonConfigStore, Settings, SettingsLayer};
pub use interfaces::Host;
pub use runner::{RunOptions, RunPlan, Runner};
pub use shell::ShellKind;
pub use terminal::{ExternalTerminal, TerminalTarget};
