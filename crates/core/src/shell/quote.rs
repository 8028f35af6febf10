//! Quoting for values interpolated into command strings.
//!
//! Paths, titles and directories are quoted for the shell that will parse
//! them. Run arguments and custom prefixes are shell text written by the
//! user and never pass through here.

use std::borrow::Cow;

use super::ShellKind;

fn is_posix_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_./:@%+=,-".contains(c)
}

fn is_windows_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_./:\\@%+=,-".contains(c)
}

/// Quote `value` for `shell`, leaving it untouched when every character is
/// safe.
pub fn quote(shell: ShellKind, value: &str) -> Cow<'_, str> {
    match shell {
        ShellKind::Posix | ShellKind::Other => {
            if !value.is_empty() && value.chars().all(is_posix_safe) {
                Cow::Borrowed(value)
            } else {
                Cow::Owned(single_quote(value))
            }
        }
        ShellKind::PowerShell => {
            if !value.is_empty() && value.chars().all(is_windows_safe) {
                Cow::Borrowed(value)
            } else {
                Cow::Owned(format!("'{}'", value.replace('\'', "''")))
            }
        }
        ShellKind::Cmd => {
            if !value.is_empty() && value.chars().all(is_windows_safe) {
                Cow::Borrowed(value)
            } else {
                Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
            }
        }
    }
}

/// POSIX single-quoted string, always quoted. Used when a whole command is
/// nested inside `bash -c`.
pub fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Body of an AppleScript string literal
pub fn applescript_string(value: &str) -> String {
    value.replace('\\', r"\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_values_are_untouched() {
        assert_eq!(quote(ShellKind::Posix, "/tmp/a"), "/tmp/a");
        assert_eq!(quote(ShellKind::Cmd, "C:\\work\\a.exe"), "C:\\work\\a.exe");
        assert_eq!(quote(ShellKind::PowerShell, "a.exe"), "a.exe");
    }

    #[test]
    fn test_posix_quoting() {
        assert_eq!(quote(ShellKind::Posix, "/tmp/my dir/a"), "'/tmp/my dir/a'");
        assert_eq!(quote(ShellKind::Other, "it's"), r"'it'\''s'");
        assert_eq!(quote(ShellKind::Posix, ""), "''");
        assert_eq!(quote(ShellKind::Posix, "$(rm -rf ~)"), "'$(rm -rf ~)'");
    }

    #[test]
    fn test_windows_quoting() {
        assert_eq!(
            quote(ShellKind::Cmd, "C:\\My Files\\a.exe"),
            "\"C:\\My Files\\a.exe\""
        );
        assert_eq!(
            quote(ShellKind::PowerShell, "C:\\Bob's\\a.exe"),
            "'C:\\Bob''s\\a.exe'"
        );
    }

    #[test]
    fn test_applescript_string() {
        assert_eq!(
            applescript_string(r#"read -p "go""#),
            r#"read -p \"go\""#
        );
    }
}
