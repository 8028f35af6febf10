use std::path::Path;
use tracing::{debug, info};

use super::ExternalTerminal;
use crate::{
    config::Settings,
    error::{Error, Result},
    interfaces::{BinaryProbe, CommandLauncher},
    shell::ShellKind,
    types::{HostEnv, Platform},
};

const LINUX_TERMINAL_KEY: &str = "linux_terminal";
const SUGGESTED_TERMINALS: &str = "gnome-terminal, xterm, konsole";

/// Opens a separate terminal window for a run command
pub struct ExternalLauncher<'a> {
    env: &'a HostEnv,
    probe: &'a dyn BinaryProbe,
    launcher: &'a dyn CommandLauncher,
}

impl<'a> ExternalLauncher<'a> {
    pub fn new(
        env: &'a HostEnv,
        probe: &'a dyn BinaryProbe,
        launcher: &'a dyn CommandLauncher,
    ) -> Self {
        Self {
            env,
            probe,
            launcher,
        }
    }

    /// Pick the emulator for this platform. On Linux the configured program
    /// must be on PATH and one we know how to drive.
    pub fn resolve(&self, settings: &Settings) -> Result<ExternalTerminal> {
        match self.env.platform {
            Platform::Windows => Ok(ExternalTerminal::WindowsConsole),
            Platform::MacOs => Ok(ExternalTerminal::MacTerminal),
            Platform::Linux => {
                let Some(name) = settings.linux_terminal.as_deref().map(str::trim) else {
                    return Err(Error::UnsupportedTerminal(format!(
                        "No external terminal configured! Set '{LINUX_TERMINAL_KEY}' in settings! ({SUGGESTED_TERMINALS})"
                    )));
                };
                if self.probe.resolve(name).is_none() {
                    return Err(Error::UnsupportedTerminal(format!(
                        "{name} not found! Try to enter a valid terminal in '{LINUX_TERMINAL_KEY}' settings! ({SUGGESTED_TERMINALS})"
                    )));
                }
                ExternalTerminal::from_linux_name(name).ok_or_else(|| {
                    Error::UnsupportedTerminal(format!(
                        "{name} isn't supported! Try to enter a supported terminal in '{LINUX_TERMINAL_KEY}' settings! ({SUGGESTED_TERMINALS})"
                    ))
                })
            }
            Platform::Other => Err(Error::UnsupportedTerminal(
                "External terminals are not supported on this platform!".to_string(),
            )),
        }
    }

    /// The command line that would open the window, without running it
    pub fn command(
        &self,
        settings: &Settings,
        command: &str,
        title: &str,
        working_dir: &Path,
        shell: ShellKind,
    ) -> Result<(ExternalTerminal, String)> {
        let terminal = self.resolve(settings)?;
        let program = match (self.env.platform, settings.linux_terminal.as_deref()) {
            (Platform::Linux, Some(configured)) => configured.trim(),
            _ => terminal.program(),
        };
        let launch = terminal.launch_command_with(program, command, title, working_dir, shell);
        debug!("External launch via {}: {}", terminal, launch);
        Ok((terminal, launch))
    }

    /// Open the window. Any error means the caller should fall back to the
    /// embedded terminal.
    pub fn launch(
        &self,
        settings: &Settings,
        command: &str,
        title: &str,
        working_dir: &Path,
        shell: ShellKind,
    ) -> Result<ExternalTerminal> {
        let (terminal, launch) = self.command(settings, command, title, working_dir, shell)?;
        self.launcher.exec(&launch, working_dir)?;
        info!("Opened {} for {}", terminal, title);
        Ok(terminal)
    }
}
