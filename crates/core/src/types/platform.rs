use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::shell::{self, ShellKind};

/// Operating systems with distinct terminal and shell conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => Platform::Linux,
            "macos" => Platform::MacOs,
            "windows" => Platform::Windows,
            _ => Platform::Other,
        }
    }

    /// Platforms whose shells understand `time` and `TIMEFMT`
    pub fn is_posix(self) -> bool {
        matches!(self, Platform::Linux | Platform::MacOs)
    }

    pub fn executable_suffix(self) -> &'static str {
        match self {
            Platform::Windows => ".exe",
            _ => "",
        }
    }
}

/// Everything about the host that shapes how commands are built.
///
/// Detected once at startup and passed down by reference; the dispatchers
/// never query the environment themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnv {
    pub platform: Platform,
    /// Running under the Windows Subsystem for Linux
    pub is_wsl: bool,
    /// Dialect of the shell the embedded terminal runs
    pub shell: ShellKind,
    /// Program behind `shell`, when known (e.g. `/bin/zsh`)
    pub shell_program: Option<String>,
}

impl HostEnv {
    pub fn detect(configured_shell: Option<&str>) -> Self {
        let platform = Platform::current();
        let (shell, shell_program) =
            shell::detect_shell(platform, configured_shell, |key| std::env::var(key).ok());
        Self {
            platform,
            is_wsl: platform == Platform::Linux && detect_wsl(),
            shell,
            shell_program,
        }
    }

    pub fn new(platform: Platform, shell: ShellKind) -> Self {
        Self {
            platform,
            is_wsl: false,
            shell,
            shell_program: None,
        }
    }

    pub fn with_wsl(mut self, is_wsl: bool) -> Self {
        self.is_wsl = is_wsl;
        self
    }
}

fn detect_wsl() -> bool {
    if std::env::var_os("WSL_DISTRO_NAME").is_some() {
        return true;
    }
    std::fs::read_to_string(Path::new("/proc/sys/kernel/osrelease"))
        .map(|release| release.to_lowercase().contains("microsoft"))
        .unwrap_or(false)
}
