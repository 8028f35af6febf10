//! Editor role played by a terminal session: prompts read lines from
//! stdin, notifications and compiler output go to stderr.
//!
//! At a prompt, an empty line keeps the prefilled value and a lone `-`
//! answers with an empty string.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info, warn};

use crate::{
    error::Result,
    interfaces::{Editor, InputRequest, Level, Notification},
};

/// Typed at a prompt to clear a prefilled value
const CLEAR_ANSWER: &str = "-";

pub struct ConsoleEditor {
    input: RefCell<Box<dyn BufRead>>,
    output: RefCell<Box<dyn Write>>,
}

impl ConsoleEditor {
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stderr())
    }

    pub fn new(input: impl BufRead + 'static, output: impl Write + 'static) -> Self {
        Self {
            input: RefCell::new(Box::new(input)),
            output: RefCell::new(Box::new(output)),
        }
    }

    fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        match self.input.borrow_mut().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn write(&self, text: &str) {
        let mut output = self.output.borrow_mut();
        // Nothing useful to do if stderr is gone
        let _ = output.write_all(text.as_bytes());
        let _ = output.flush();
    }
}

impl Editor for ConsoleEditor {
    fn save_active(&self) -> Result<()> {
        debug!("Source is read from disk, nothing to save");
        Ok(())
    }

    fn prompt(&self, request: &InputRequest) -> Option<String> {
        let mut label = request.prompt.clone();
        match (&request.value, &request.placeholder) {
            (Some(value), _) if !value.is_empty() => label.push_str(&format!(" [{value}]")),
            (_, Some(placeholder)) => label.push_str(&format!(" (e.g. {placeholder})")),
            _ => {}
        }
        self.write(&format!("{label}: "));

        let line = self.read_line()?;
        match line.trim() {
            "" => Some(request.value.clone().unwrap_or_default()),
            CLEAR_ANSWER => Some(String::new()),
            _ => Some(line),
        }
    }

    fn notify(&self, notification: Notification) {
        let icon = match notification.level {
            Level::Info => {
                info!("{}", notification.message);
                "✅"
            }
            Level::Warning => {
                warn!("{}", notification.message);
                "⚠️ "
            }
            Level::Error => {
                error!("{}", notification.message);
                "❌"
            }
        };
        self.write(&format!("{icon} {}\n", notification.message));
    }

    fn confirm(&self, level: Level, message: &str, action: &str) -> bool {
        self.notify(Notification {
            level,
            message: message.to_string(),
        });
        self.write(&format!("{action}? [y/N]: "));
        matches!(
            self.read_line().map(|l| l.trim().to_lowercase()).as_deref(),
            Some("y") | Some("yes")
        )
    }

    fn append_output(&self, _source: &str, chunk: &str) {
        self.write(chunk);
    }

    fn show_output(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::rc::Rc;

    /// Writer that keeps what was written for later inspection
    #[derive(Clone, Default)]
    struct Captured(Rc<RefCell<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    fn editor(input: &str) -> (ConsoleEditor, Captured) {
        let captured = Captured::default();
        let editor = ConsoleEditor::new(Cursor::new(input.to_string()), captured.clone());
        (editor, captured)
    }

    #[test]
    fn test_prompt_returns_typed_value() {
        let (editor, out) = editor("-O2 -g\n");
        let answer = editor.prompt(&InputRequest::new("Flags").with_value("-Wall"));
        assert_eq!(answer.as_deref(), Some("-O2 -g"));
        assert_eq!(out.text(), "Flags [-Wall]: ");
    }

    #[test]
    fn test_prompt_enter_keeps_default() {
        let (editor, _) = editor("\n");
        let answer = editor.prompt(&InputRequest::new("Arguments").with_value("1 2 3"));
        assert_eq!(answer.as_deref(), Some("1 2 3"));
    }

    #[test]
    fn test_prompt_dash_clears_default() {
        let (ed, _) = editor("-\n");
        let answer = ed.prompt(&InputRequest::new("Flags").with_value("-Wall -Wextra"));
        assert_eq!(answer.as_deref(), Some(""));

        // A real flag starting with a dash is kept
        let (editor2, _) = editor("-O2\n");
        let answer = editor2.prompt(&InputRequest::new("Flags").with_value("-Wall"));
        assert_eq!(answer.as_deref(), Some("-O2"));
    }

    #[test]
    fn test_prompt_eof_cancels() {
        let (editor, _) = editor("");
        assert_eq!(editor.prompt(&InputRequest::new("Path")), None);
    }

    #[test]
    fn test_prompt_shows_placeholder() {
        let (editor, out) = editor("/usr/bin/gcc\n");
        editor.prompt(&InputRequest::new("Path").with_placeholder("/usr/bin/gcc"));
        assert_eq!(out.text(), "Path (e.g. /usr/bin/gcc): ");
    }

    #[test]
    fn test_confirm() {
        let (ed, out) = editor("y\n");
        assert!(ed.confirm(Level::Error, "Compiler not found", "Change path"));
        assert!(out.text().contains("❌ Compiler not found\n"));
        assert!(out.text().ends_with("Change path? [y/N]: "));

        let (editor2, _) = editor("\n");
        assert!(!editor2.confirm(Level::Error, "Compiler not found", "Change path"));
    }
}
