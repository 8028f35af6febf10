//! Shell dialects and the syntax differences between them

pub mod quote;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::Platform;

pub use quote::{applescript_string, quote, single_quote};

/// Shell dialect a run command is written for. Exactly one is chosen per run
/// before the command string is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellKind {
    /// sh, bash, zsh and friends
    Posix,
    /// Windows `cmd.exe`
    Cmd,
    /// Windows PowerShell or `pwsh`
    PowerShell,
    /// Anything else, including commands handed to an external terminal
    Other,
}

impl ShellKind {
    pub const ALL: [ShellKind; 4] = [
        ShellKind::Posix,
        ShellKind::Cmd,
        ShellKind::PowerShell,
        ShellKind::Other,
    ];

    /// Text placed in front of the executable so the shell will launch it.
    ///
    /// `bare` is true when the executable is referenced by file name relative
    /// to the working directory.
    pub fn run_prefix(self, bare: bool) -> &'static str {
        match (self, bare) {
            (ShellKind::Posix, true) => "./",
            (ShellKind::Other, true) => "./",
            (ShellKind::Cmd, true) => ".\\",
            (ShellKind::PowerShell, true) => "& .\\",
            (ShellKind::PowerShell, false) => "& ",
            (ShellKind::Posix | ShellKind::Cmd | ShellKind::Other, false) => "",
        }
    }

    pub fn is_windows(self) -> bool {
        matches!(self, ShellKind::Cmd | ShellKind::PowerShell)
    }
}

impl std::fmt::Display for ShellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShellKind::Posix => "posix",
            ShellKind::Cmd => "cmd",
            ShellKind::PowerShell => "powershell",
            ShellKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Classify a shell by program name or path, e.g. `/usr/bin/zsh`,
/// `C:\Windows\System32\cmd.exe` or `pwsh`.
pub fn parse_shell(program: &str) -> ShellKind {
    let name = program
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(program)
        .to_lowercase();
    let name = name.strip_suffix(".exe").unwrap_or(&name);

    match name {
        "cmd" => ShellKind::Cmd,
        "powershell" | "pwsh" => ShellKind::PowerShell,
        "sh" | "bash" | "zsh" | "dash" | "ksh" | "mksh" | "ash" => ShellKind::Posix,
        _ => ShellKind::Other,
    }
}

/// Work out which shell the embedded terminal uses. A configured shell wins,
/// then `ComSpec` on Windows or `SHELL` elsewhere.
pub fn detect_shell(
    platform: Platform,
    configured: Option<&str>,
    var: impl Fn(&str) -> Option<String>,
) -> (ShellKind, Option<String>) {
    if let Some(program) = configured.filter(|s| !s.trim().is_empty()) {
        return (parse_shell(program), Some(program.to_string()));
    }

    let (key, fallback) = match platform {
        Platform::Windows => ("ComSpec", ShellKind::Cmd),
        _ => ("SHELL", ShellKind::Posix),
    };

    match var(key).filter(|s| !s.is_empty()) {
        Some(program) => (parse_shell(&program), Some(program)),
        None => (fallback, None),
    }
}

/// Name of a program as it should be compared against known terminals.
pub fn program_name(program: &str) -> &str {
    Path::new(program)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_prefix_is_total() {
        for shell in ShellKind::ALL {
            // Every shell has an answer for both bare names and full paths
            let _ = shell.run_prefix(true);
            let _ = shell.run_prefix(false);
        }
        assert_eq!(ShellKind::Posix.run_prefix(true), "./");
        assert_eq!(ShellKind::Posix.run_prefix(false), "");
        assert_eq!(ShellKind::Cmd.run_prefix(true), ".\\");
        assert_eq!(ShellKind::PowerShell.run_prefix(false), "& ");
        assert_eq!(ShellKind::Other.run_prefix(false), "");
    }

    #[test]
    fn test_parse_shell() {
        assert_eq!(parse_shell("/bin/bash"), ShellKind::Posix);
        assert_eq!(parse_shell("/usr/bin/zsh"), ShellKind::Posix);
        assert_eq!(parse_shell("C:\\Windows\\System32\\cmd.exe"), ShellKind::Cmd);
        assert_eq!(parse_shell("PowerShell.exe"), ShellKind::PowerShell);
        assert_eq!(parse_shell("pwsh"), ShellKind::PowerShell);
        assert_eq!(parse_shell("/usr/bin/fish"), ShellKind::Other);
        assert_eq!(parse_shell(""), ShellKind::Other);
    }

    #[test]
    fn test_detect_shell_prefers_configuration() {
        let (shell, program) = detect_shell(Platform::Linux, Some("pwsh"), |_| {
            Some("/bin/bash".to_string())
        });
        assert_eq!(shell, ShellKind::PowerShell);
        assert_eq!(program.as_deref(), Some("pwsh"));
    }

    #[test]
    fn test_detect_shell_from_environment() {
        let (shell, program) = detect_shell(Platform::Linux, None, |key| {
            (key == "SHELL").then(|| "/bin/zsh".to_string())
        });
        assert_eq!(shell, ShellKind::Posix);
        assert_eq!(program.as_deref(), Some("/bin/zsh"));

        let (shell, _) = detect_shell(Platform::Windows, None, |key| {
            (key == "ComSpec").then(|| "C:\\Windows\\system32\\cmd.exe".to_string())
        });
        assert_eq!(shell, ShellKind::Cmd);
    }

    #[test]
    fn test_detect_shell_fallbacks() {
        assert_eq!(
            detect_shell(Platform::MacOs, None, |_| None),
            (ShellKind::Posix, None)
        );
        assert_eq!(
            detect_shell(Platform::Windows, Some("  "), |_| None),
            (ShellKind::Cmd, None)
        );
    }
}
