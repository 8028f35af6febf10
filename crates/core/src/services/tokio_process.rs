use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    command::CompileInvocation,
    error::{Error, Result},
    interfaces::CompilerProcess,
};

const CHUNK_SIZE: usize = 4096;

/// Decodes a byte stream read in arbitrary chunks. A UTF-8 sequence cut off
/// at the end of a chunk is held back until the rest of it arrives.
#[derive(Debug, Default)]
struct Utf8Stream {
    pending: Vec<u8>,
}

impl Utf8Stream {
    fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let split = self.pending.len() - incomplete_tail(&self.pending);
        let text = String::from_utf8_lossy(&self.pending[..split]).into_owned();
        self.pending.drain(..split);
        text
    }

    /// Whatever is left at end of stream, invalid bytes replaced
    fn finish(&mut self) -> String {
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        text
    }
}

/// Length of a truncated multi-byte sequence at the end of `bytes`
fn incomplete_tail(bytes: &[u8]) -> usize {
    for back in 1..=bytes.len().min(3) {
        let byte = bytes[bytes.len() - back];
        if byte & 0b1100_0000 == 0b1000_0000 {
            continue;
        }
        let width = match byte {
            0b1100_0000..=0b1101_1111 => 2,
            0b1110_0000..=0b1110_1111 => 3,
            0b1111_0000..=0b1111_0111 => 4,
            _ => 1,
        };
        return if width > back { back } else { 0 };
    }
    0
}

/// Runs the compiler as a tokio child process, streaming both pipes
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcess;

impl CompilerProcess for TokioProcess {
    async fn run(
        &self,
        invocation: &CompileInvocation,
        on_output: &mut dyn FnMut(&str),
        cancel: &CancellationToken,
    ) -> Result<Option<i32>> {
        debug!("Spawning: {}", invocation.to_shell_command());

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let (Some(mut stdout), Some(mut stderr)) = (child.stdout.take(), child.stderr.take())
        else {
            return Err(Error::IoError(std::io::Error::other(
                "compiler pipes were not captured",
            )));
        };

        let mut out_buf = [0u8; CHUNK_SIZE];
        let mut err_buf = [0u8; CHUNK_SIZE];
        let (mut out_text, mut err_text) = (Utf8Stream::default(), Utf8Stream::default());
        let (mut out_open, mut err_open) = (true, true);

        while out_open || err_open {
            tokio::select! {
                _ = cancel.cancelled() => {
                    warn!("Compilation cancelled, killing {}", invocation.program);
                    child.kill().await?;
                    return Err(Error::Cancelled);
                }
                read = stdout.read(&mut out_buf), if out_open => {
                    let text = match read? {
                        0 => {
                            out_open = false;
                            out_text.finish()
                        }
                        n => out_text.decode(&out_buf[..n]),
                    };
                    if !text.is_empty() {
                        on_output(&text);
                    }
                }
                read = stderr.read(&mut err_buf), if err_open => {
                    let text = match read? {
                        0 => {
                            err_open = false;
                            err_text.finish()
                        }
                        n => err_text.decode(&err_buf[..n]),
                    };
                    if !text.is_empty() {
                        on_output(&text);
                    }
                }
            }
        }

        let status = tokio::select! {
            _ = cancel.cancelled() => {
                child.kill().await?;
                return Err(Error::Cancelled);
            }
            status = child.wait() => status?,
        };
        debug!("Compiler exited with {}", status);
        Ok(status.code())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sh(script: &str) -> CompileInvocation {
        CompileInvocation {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            working_dir: PathBuf::from("/"),
        }
    }

    #[tokio::test]
    async fn test_streams_both_pipes() {
        let mut output = String::new();
        let code = TokioProcess
            .run(
                &sh("echo out; echo err >&2"),
                &mut |chunk: &str| output.push_str(chunk),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(code, Some(0));
        assert!(output.contains("out\n"));
        assert!(output.contains("err\n"));
    }

    #[tokio::test]
    async fn test_multibyte_char_across_read_boundary() {
        // One write: 4095 ASCII bytes, then a 3-byte quote straddling the
        // first 4096-byte read
        let script = r#"printf "$(printf '%4095s' '' | tr ' ' a)\342\200\230x\n""#;
        let mut output = String::new();
        TokioProcess
            .run(
                &sh(script),
                &mut |chunk: &str| output.push_str(chunk),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert!(!output.contains('\u{FFFD}'));
        assert!(output.ends_with("a\u{2018}x\n"));
        assert_eq!(output.chars().filter(|c| *c == 'a').count(), 4095);
    }

    #[test]
    fn test_utf8_stream_holds_back_split_sequence() {
        let quote = "\u{2018}".as_bytes();
        let mut stream = Utf8Stream::default();

        assert_eq!(stream.decode(&[b'a', quote[0]]), "a");
        assert_eq!(stream.decode(&quote[1..2]), "");
        assert_eq!(stream.decode(&[quote[2], b'x']), "\u{2018}x");
        assert_eq!(stream.finish(), "");
    }

    #[test]
    fn test_utf8_stream_invalid_bytes() {
        let mut stream = Utf8Stream::default();
        assert_eq!(stream.decode(&[b'a', 0xFF, b'b']), "a\u{FFFD}b");

        // A truncated sequence at end of stream is replaced, not dropped
        assert_eq!(stream.decode(&[0xE2, 0x80]), "");
        assert_eq!(stream.finish(), "\u{FFFD}");
    }

    #[tokio::test]
    async fn test_nonzero_exit_code() {
        let code = TokioProcess
            .run(&sh("exit 3"), &mut |_: &str| {}, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(code, Some(3));
    }

    #[tokio::test]
    async fn test_cancelled_before_exit() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = TokioProcess.run(&sh("sleep 5"), &mut |_: &str| {}, &cancel).await;
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let invocation = CompileInvocation {
            program: "definitely-not-a-real-compiler-xyz".to_string(),
            args: Vec::new(),
            working_dir: PathBuf::from("/"),
        };
        let result = TokioProcess
            .run(&invocation, &mut |_: &str| {}, &CancellationToken::new())
            .await;
        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
