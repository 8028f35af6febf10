//! Run dispatcher: turns a compiled executable into a terminal launch

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::{
    command::{Executable, RunCommand},
    config::Settings,
    error::{Error, Result},
    interfaces::{Host, InputRequest, Notification},
    shell::{self, ShellKind},
    terminal::{ExternalLauncher, TerminalTarget, launch_embedded},
    types::{HostEnv, Platform, SourceFile},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Ask for the program arguments instead of using the configured ones
    pub prompt_args: bool,
    /// Open a separate terminal window
    pub external: bool,
}

/// Everything decided about a run before anything is launched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub command: String,
    pub working_dir: PathBuf,
    pub shell: ShellKind,
    pub external: bool,
}

pub struct Runner<'a> {
    host: Host<'a>,
    env: &'a HostEnv,
}

impl<'a> Runner<'a> {
    pub fn new(host: Host<'a>, env: &'a HostEnv) -> Self {
        Self { host, env }
    }

    pub fn external_launcher(&self) -> ExternalLauncher<'a> {
        ExternalLauncher::new(self.env, self.host.probe, self.host.launcher)
    }

    pub fn run(
        &self,
        file: &SourceFile,
        settings: &Settings,
        options: RunOptions,
    ) -> Result<TerminalTarget> {
        if !self.host.fs.exists(file.executable()) {
            return Err(Error::ExecutableMissing(file.executable().to_path_buf()));
        }

        let args = if options.prompt_args {
            self.host
                .editor
                .prompt(&InputRequest::new("Arguments").with_value(&settings.run_args))
                .ok_or(Error::Cancelled)?
        } else {
            settings.run_args.clone()
        };

        let mut external = options.external;
        if external && self.env.is_wsl {
            warn!("External terminal requested under WSL");
            self.host
                .editor
                .notify(Notification::warning("WSL detected, running in embedded terminal!"));
            external = false;
        }

        let plan = self.plan(file, settings, &args, external);
        if !self.host.fs.exists(&plan.working_dir) {
            self.host.fs.create_dir_all(&plan.working_dir)?;
        }

        self.dispatch(&plan, file.title(), settings)
    }

    /// Build the command for `args` without touching the filesystem
    pub fn plan(
        &self,
        file: &SourceFile,
        settings: &Settings,
        args: &str,
        external: bool,
    ) -> RunPlan {
        let working_dir = settings.run_directory(file.directory());
        let shell = self.shell_for(settings, external);
        let command = RunCommand::new(
            shell,
            self.env.platform,
            executable_ref(file.executable(), &working_dir),
        )
        .with_args(args)
        .with_custom_prefix(settings.custom_run_prefix.clone())
        .with_execution_time(settings.show_execution_time)
        .build();

        debug!("Run plan: {} (cwd {}, {})", command, working_dir.display(), shell);
        RunPlan {
            command,
            working_dir,
            shell,
            external,
        }
    }

    /// Dialect the command is written in. External windows on Windows run
    /// the configured console; elsewhere they run bash through the emulator.
    pub fn shell_for(&self, settings: &Settings, external: bool) -> ShellKind {
        run_shell(self.env, settings, external)
    }

    fn dispatch(&self, plan: &RunPlan, title: &str, settings: &Settings) -> Result<TerminalTarget> {
        if plan.external {
            match self.external_launcher().launch(
                settings,
                &plan.command,
                title,
                &plan.working_dir,
                plan.shell,
            ) {
                Ok(terminal) => return Ok(TerminalTarget::External(terminal)),
                Err(err) => {
                    warn!("External terminal failed: {}", err);
                    self.host.editor.notify(Notification::error(err.to_string()));
                    self.host
                        .editor
                        .notify(Notification::info("Running in embedded terminal"));
                }
            }
        }

        info!("Running: {}", plan.command);
        launch_embedded(self.host.terminal, &plan.command, &plan.working_dir, plan.shell)?;
        Ok(TerminalTarget::Embedded)
    }
}

fn run_shell(env: &HostEnv, settings: &Settings, external: bool) -> ShellKind {
    if !external {
        return env.shell;
    }
    match env.platform {
        Platform::Windows => match shell::parse_shell(&settings.windows_terminal) {
            ShellKind::PowerShell => ShellKind::PowerShell,
            _ => ShellKind::Cmd,
        },
        _ => ShellKind::Other,
    }
}

/// Bare file name when the program sits in the run directory, full path
/// otherwise
fn executable_ref(executable: &Path, working_dir: &Path) -> Executable {
    match (executable.parent(), executable.file_name()) {
        (Some(parent), Some(name)) if parent == working_dir => {
            Executable::Bare(name.to_string_lossy().into_owned())
        }
        _ => Executable::Path(executable.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windows_console(program: &str) -> Settings {
        Settings {
            windows_terminal: program.to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_windows_external_shell_follows_console() {
        let env = HostEnv::new(Platform::Windows, ShellKind::Cmd);
        let cases = [
            ("powershell.exe", ShellKind::PowerShell),
            ("pwsh", ShellKind::PowerShell),
            ("wt.exe", ShellKind::Cmd),
            ("cmd.exe", ShellKind::Cmd),
        ];
        for (program, expected) in cases {
            assert_eq!(
                run_shell(&env, &windows_console(program), true),
                expected,
                "{program}"
            );
        }
        assert_eq!(run_shell(&env, &Settings::default(), true), ShellKind::Cmd);
    }

    #[test]
    fn test_unix_external_shell_is_bash() {
        for platform in [Platform::Linux, Platform::MacOs] {
            let env = HostEnv::new(platform, ShellKind::Posix);
            assert_eq!(run_shell(&env, &Settings::default(), true), ShellKind::Other);
        }
    }

    #[test]
    fn test_embedded_run_uses_host_shell() {
        let env = HostEnv::new(Platform::Windows, ShellKind::Posix);
        assert_eq!(
            run_shell(&env, &windows_console("powershell.exe"), false),
            ShellKind::Posix
        );
        let env = HostEnv::new(Platform::Linux, ShellKind::PowerShell);
        assert_eq!(run_shell(&env, &Settings::default(), false), ShellKind::PowerShell);
    }

    #[test]
    fn test_executable_ref() {
        assert_eq!(
            executable_ref(Path::new("/tmp/output/a"), Path::new("/tmp/output")),
            Executable::Bare("a".to_string())
        );
        assert_eq!(
            executable_ref(Path::new("/tmp/a"), Path::new("/tmp/output")),
            Executable::Path(PathBuf::from("/tmp/a"))
        );
    }
}
