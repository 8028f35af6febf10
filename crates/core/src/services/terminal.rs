//! Process-backed launchers for the external and embedded terminals

use std::io::IsTerminal;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info};

use crate::{
    error::Result,
    interfaces::{CommandLauncher, EmbeddedTerminal, TerminalRequest},
    shell::ShellKind,
    types::Platform,
};

/// Hands a command line to the platform shell without waiting for it
#[derive(Debug, Clone, Copy)]
pub struct ShellLauncher {
    platform: Platform,
}

impl ShellLauncher {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl CommandLauncher for ShellLauncher {
    fn exec(&self, command: &str, working_dir: &Path) -> Result<()> {
        info!("Launching: {}", command);
        let mut cmd = match self.platform {
            Platform::Windows => cmd_command(command),
            _ => {
                let mut cmd = Command::new("sh");
                cmd.args(["-c", command]);
                cmd
            }
        };

        let child = cmd
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        debug!("Launcher pid {}", child.id());
        Ok(())
    }
}

/// `cmd /C <command>`, with the command line passed through unescaped on
/// Windows so cmd sees the quotes we wrote.
fn cmd_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        cmd.arg("/C").raw_arg(command);
    }
    #[cfg(not(windows))]
    cmd.args(["/C", command]);
    cmd
}

/// Runs the command in the terminal ccrun itself was started from
#[derive(Debug, Clone, Default)]
pub struct InlineTerminal {
    /// Program used for POSIX and unknown shells, `sh` when unset
    shell_program: Option<String>,
}

impl InlineTerminal {
    pub fn new(shell_program: Option<String>) -> Self {
        Self { shell_program }
    }

    /// Program and leading arguments that make `shell` execute a command line
    pub fn shell_invocation(&self, shell: ShellKind) -> (String, Vec<&'static str>) {
        match shell {
            ShellKind::Cmd => ("cmd".to_string(), vec!["/C"]),
            ShellKind::PowerShell => (
                self.shell_program
                    .clone()
                    .filter(|p| crate::shell::parse_shell(p) == ShellKind::PowerShell)
                    .unwrap_or_else(|| "powershell".to_string()),
                vec!["-NoProfile", "-Command"],
            ),
            ShellKind::Posix | ShellKind::Other => (
                self.shell_program
                    .clone()
                    .filter(|p| !crate::shell::parse_shell(p).is_windows())
                    .unwrap_or_else(|| "sh".to_string()),
                vec!["-c"],
            ),
        }
    }
}

impl EmbeddedTerminal for InlineTerminal {
    fn run(&self, request: &TerminalRequest) -> Result<()> {
        if request.clear && std::io::stdout().is_terminal() {
            print!("\x1b[2J\x1b[H");
        }

        info!("[{}] {}", request.name, request.command);
        let mut cmd = if request.shell == ShellKind::Cmd {
            cmd_command(&request.command)
        } else {
            let (program, leading) = self.shell_invocation(request.shell);
            let mut cmd = Command::new(program);
            cmd.args(leading).arg(&request.command);
            cmd
        };
        let status = cmd.current_dir(&request.working_dir).status()?;
        debug!("Program finished with {}", status);
        Ok(())
    }
}
