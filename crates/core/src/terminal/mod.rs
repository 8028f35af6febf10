//! Where a compiled program runs: the embedded terminal or a separate
//! terminal window, and the invocation syntax for each known emulator.

pub mod embedded;
pub mod external;

use std::path::Path;

use crate::shell::{self, ShellKind};

pub use embedded::{EMBEDDED_TERMINAL_NAME, launch_embedded};
pub use external::ExternalLauncher;

/// Keeps the window open after the program exits
const PAUSE: &str = r#"read -n1 -p "Press any key to continue...""#;

/// Terminal emulators that can be opened around a run command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalTerminal {
    /// A new console window via `start`, running cmd or PowerShell
    WindowsConsole,
    /// macOS Terminal.app, driven through AppleScript
    MacTerminal,
    Xterm,
    GnomeTerminal,
    Tilix,
    MateTerminal,
    Xfce4Terminal,
    Konsole,
    ElementaryTerminal,
}

/// Final destination of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalTarget {
    Embedded,
    External(ExternalTerminal),
}

impl ExternalTerminal {
    /// Emulators accepted for `linux_terminal`
    pub const LINUX: [ExternalTerminal; 7] = [
        ExternalTerminal::Xterm,
        ExternalTerminal::GnomeTerminal,
        ExternalTerminal::Tilix,
        ExternalTerminal::MateTerminal,
        ExternalTerminal::Xfce4Terminal,
        ExternalTerminal::Konsole,
        ExternalTerminal::ElementaryTerminal,
    ];

    pub fn from_linux_name(name: &str) -> Option<Self> {
        let name = shell::program_name(name);
        Self::LINUX.into_iter().find(|t| t.program() == name)
    }

    pub fn program(self) -> &'static str {
        match self {
            ExternalTerminal::WindowsConsole => "start",
            ExternalTerminal::MacTerminal => "osascript",
            ExternalTerminal::Xterm => "xterm",
            ExternalTerminal::GnomeTerminal => "gnome-terminal",
            ExternalTerminal::Tilix => "tilix",
            ExternalTerminal::MateTerminal => "mate-terminal",
            ExternalTerminal::Xfce4Terminal => "xfce4-terminal",
            ExternalTerminal::Konsole => "konsole",
            ExternalTerminal::ElementaryTerminal => "io.elementary.terminal",
        }
    }

    /// Command line that opens a window titled `title`, runs `command` in
    /// `working_dir` and waits for a key before closing.
    pub fn launch_command(
        self,
        command: &str,
        title: &str,
        working_dir: &Path,
        shell: ShellKind,
    ) -> String {
        self.launch_command_with(self.program(), command, title, working_dir, shell)
    }

    /// Like [`launch_command`](Self::launch_command), invoking a Linux
    /// emulator as `program` (a bare name or a full path). The Windows and
    /// macOS launchers are fixed and ignore it.
    pub fn launch_command_with(
        self,
        program: &str,
        command: &str,
        title: &str,
        working_dir: &Path,
        shell: ShellKind,
    ) -> String {
        let program = shell::quote(ShellKind::Posix, program);
        let bash = || {
            let script = format!("{command}; echo; {PAUSE}");
            format!("bash -c {}", shell::single_quote(&script))
        };
        let title_arg = shell::quote(ShellKind::Posix, title);

        match self {
            ExternalTerminal::WindowsConsole => {
                let title = title.replace('"', "");
                if shell == ShellKind::PowerShell {
                    format!(
                        "start \"{title}\" powershell -NoProfile -Command \"{command}; Write-Host; Read-Host 'Press Enter to continue...'\""
                    )
                } else {
                    format!("start \"{title}\" cmd /c \"{command} & echo. & pause\"")
                }
            }
            ExternalTerminal::MacTerminal => {
                let script = format!(
                    "cd {}; {command}; echo; {PAUSE}",
                    shell::quote(ShellKind::Posix, &working_dir.to_string_lossy())
                );
                let apple = format!(
                    "tell application \"Terminal\" to do script \"{}\"",
                    shell::applescript_string(&script)
                );
                format!(
                    "osascript -e {} -e {}",
                    shell::single_quote(&apple),
                    shell::single_quote("tell application \"Terminal\" to activate")
                )
            }
            ExternalTerminal::Xterm => format!("{program} -T {title_arg} -e {}", bash()),
            ExternalTerminal::GnomeTerminal
            | ExternalTerminal::Tilix
            | ExternalTerminal::MateTerminal => {
                format!("{program} -t {title_arg} -x {}", bash())
            }
            ExternalTerminal::Xfce4Terminal => {
                format!("{program} --title {title_arg} -x {}", bash())
            }
            ExternalTerminal::Konsole => {
                format!("{program} -p tabtitle={title_arg} --noclose -e {}", bash())
            }
            ExternalTerminal::ElementaryTerminal => {
                format!("{program} -e {}", shell::single_quote(&bash()))
            }
        }
    }
}

impl std::fmt::Display for ExternalTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExternalTerminal::WindowsConsole => f.write_str("Windows console"),
            ExternalTerminal::MacTerminal => f.write_str("Terminal.app"),
            other => f.write_str(other.program()),
        }
    }
}
