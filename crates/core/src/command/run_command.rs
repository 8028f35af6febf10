use std::path::PathBuf;

use crate::{
    shell::{self, ShellKind},
    types::Platform,
};

/// How the run command refers to the executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Executable {
    /// File name relative to the working directory; gets the shell's run prefix
    Bare(String),
    /// Full path, quoted for the shell
    Path(PathBuf),
}

/// Command string a terminal executes to launch the compiled program
#[derive(Debug, Clone)]
pub struct RunCommand {
    shell: ShellKind,
    platform: Platform,
    executable: Executable,
    args: String,
    custom_prefix: Option<String>,
    show_execution_time: bool,
}

impl RunCommand {
    pub fn new(shell: ShellKind, platform: Platform, executable: Executable) -> Self {
        Self {
            shell,
            platform,
            executable,
            args: String::new(),
            custom_prefix: None,
            show_execution_time: false,
        }
    }

    pub fn with_args(mut self, args: impl Into<String>) -> Self {
        self.args = args.into();
        self
    }

    pub fn with_custom_prefix(mut self, prefix: Option<String>) -> Self {
        self.custom_prefix = prefix.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn with_execution_time(mut self, show: bool) -> Self {
        self.show_execution_time = show;
        self
    }

    pub fn shell(&self) -> ShellKind {
        self.shell
    }

    pub fn build(&self) -> String {
        let executable = match &self.executable {
            Executable::Bare(name) => format!(
                "{}{}",
                self.shell.run_prefix(true),
                shell::quote(self.shell, name)
            ),
            Executable::Path(path) => format!(
                "{}{}",
                self.shell.run_prefix(false),
                shell::quote(self.shell, &path.to_string_lossy())
            ),
        };

        let mut command = format!("{} {}", executable, self.args).trim().to_string();
        if let Some(prefix) = &self.custom_prefix {
            command = format!("{} {}", prefix.trim(), command);
        }

        if !self.show_execution_time {
            return command;
        }

        match (self.platform, self.shell) {
            (platform, _) if platform.is_posix() => {
                format!("TIMEFMT='%J (elapsed time: %E)';time {command}")
            }
            (Platform::Windows, ShellKind::PowerShell) => format!(
                "Measure-Command {{{command}}} | select @{{n='Execution time:';e={{$_.Minutes,'Minutes',$_.Seconds,'Seconds',$_.Milliseconds,'Milliseconds' -join ' '}}}}"
            ),
            _ => command,
        }
    }
}

impl std::fmt::Display for RunCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.build())
    }
}
