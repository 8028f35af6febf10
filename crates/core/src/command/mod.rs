//! Command generation for the compiler and the run step

pub mod compile_invocation;
pub mod run_command;

// Re-export commonly used types
pub use compile_invocation::CompileInvocation;
pub use run_command::{Executable, RunCommand};
