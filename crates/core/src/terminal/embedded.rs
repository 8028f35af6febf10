use std::path::Path;

use crate::{
    error::Result,
    interfaces::{EmbeddedTerminal, TerminalRequest},
    shell::ShellKind,
};

/// Name of the terminal panel runs are sent to
pub const EMBEDDED_TERMINAL_NAME: &str = "C/C++ Compile Run";

/// Clear the named panel and run `command` in `working_dir`
pub fn launch_embedded(
    terminal: &dyn EmbeddedTerminal,
    command: &str,
    working_dir: &Path,
    shell: ShellKind,
) -> Result<()> {
    terminal.run(&TerminalRequest {
        name: EMBEDDED_TERMINAL_NAME.to_string(),
        command: command.to_string(),
        working_dir: working_dir.to_path_buf(),
        shell,
        clear: true,
    })
}
