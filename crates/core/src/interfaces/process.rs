use tokio_util::sync::CancellationToken;

use crate::{command::CompileInvocation, error::Result};

/// Spawns the compiler and reports its output as it arrives.
///
/// Output chunks from stdout and stderr are handed to `on_output` in the
/// order they are read. Resolves to the exit code, `None` when the process
/// was terminated by a signal. When `cancel` fires the child is killed and
/// the call fails with `Error::Cancelled`.
#[allow(async_fn_in_trait)]
pub trait CompilerProcess {
    async fn run(
        &self,
        invocation: &CompileInvocation,
        on_output: &mut dyn FnMut(&str),
        cancel: &CancellationToken,
    ) -> Result<Option<i32>>;
}
