//! Single entry point for the compile and run actions.
//!
//! `CompileRun` resolves the file and its settings, chains the compiler and
//! run dispatchers, and turns any failure into exactly one notification.
//! Callers get the `Result` back only to decide an exit status; they never
//! need to report it again.

use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    command::CompileInvocation,
    compiler::{CompileOptions, Compiler},
    config::Settings,
    error::{Error, Result},
    interfaces::{CompilerProcess, Host, Notification},
    runner::{RunOptions, RunPlan, Runner},
    terminal::TerminalTarget,
    types::{HostEnv, SourceFile},
};

/// User-facing actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Compile,
    Run,
    CompileRun,
    CompileWithFlags,
    RunWithArguments,
}

/// Which steps to perform, and how
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Request {
    pub compile: Option<CompileOptions>,
    pub run: Option<RunOptions>,
}

impl Action {
    pub fn request(self, external: bool) -> Request {
        let run = |prompt_args| RunOptions {
            prompt_args,
            external,
        };
        match self {
            Action::Compile => Request {
                compile: Some(CompileOptions::default()),
                run: None,
            },
            Action::Run => Request {
                compile: None,
                run: Some(run(false)),
            },
            Action::CompileRun => Request {
                compile: Some(CompileOptions::default()),
                run: Some(run(false)),
            },
            Action::CompileWithFlags => Request {
                compile: Some(CompileOptions { prompt_flags: true }),
                run: None,
            },
            Action::RunWithArguments => Request {
                compile: None,
                run: Some(run(true)),
            },
        }
    }
}

/// What a request would do, computed without prompting or launching
#[derive(Debug, Clone)]
pub struct Plan {
    pub file: SourceFile,
    pub settings: Settings,
    pub compile: Option<CompileInvocation>,
    pub run: Option<RunPlan>,
}

pub struct CompileRun<'a, P> {
    host: Host<'a>,
    env: HostEnv,
    process: P,
}

impl<'a, P: CompilerProcess> CompileRun<'a, P> {
    pub fn new(host: Host<'a>, env: HostEnv, process: P) -> Self {
        Self { host, env, process }
    }

    pub fn env(&self) -> &HostEnv {
        &self.env
    }

    /// Perform `request` for the source at `path`. Errors have already been
    /// shown to the user when this returns.
    pub async fn execute(
        &self,
        path: &Path,
        request: Request,
        cancel: &CancellationToken,
    ) -> Result<Option<TerminalTarget>> {
        let result = self.try_execute(path, request, cancel).await;
        if let Err(err) = &result {
            self.report(err);
        }
        result
    }

    pub async fn perform(
        &self,
        path: &Path,
        action: Action,
        cancel: &CancellationToken,
    ) -> Result<Option<TerminalTarget>> {
        self.execute(path, action.request(false), cancel).await
    }

    async fn try_execute(
        &self,
        path: &Path,
        request: Request,
        cancel: &CancellationToken,
    ) -> Result<Option<TerminalTarget>> {
        let (file, settings) = self.resolve(path)?;

        if let Some(options) = request.compile {
            Compiler::new(self.host, &self.process)
                .compile(&file, &settings, options, cancel)
                .await?;
        }

        let Some(options) = request.run else {
            return Ok(None);
        };
        let options = RunOptions {
            external: options.external || settings.run_in_external_terminal,
            ..options
        };
        Runner::new(self.host, &self.env)
            .run(&file, &settings, options)
            .map(Some)
    }

    /// Describe `request` without running anything. Prompts are skipped and
    /// the configured flags and arguments are used.
    pub fn plan(&self, path: &Path, request: Request) -> Result<Plan> {
        let (file, settings) = self.resolve(path)?;

        let compile = match request.compile {
            Some(_) => Some(Compiler::<P>::plan(&file, &settings)?),
            None => None,
        };
        let run = request.run.map(|options| {
            let external =
                (options.external || settings.run_in_external_terminal) && !self.env.is_wsl;
            Runner::new(self.host, &self.env).plan(&file, &settings, &settings.run_args, external)
        });

        Ok(Plan {
            file,
            settings,
            compile,
            run,
        })
    }

    /// Load settings for the file's directory and build the file descriptor
    pub fn resolve(&self, path: &Path) -> Result<(SourceFile, Settings)> {
        let path = std::path::absolute(path)?;
        if !self.host.fs.exists(&path) {
            return Err(Error::SourceMissing(path));
        }

        let directory = path.parent().unwrap_or(Path::new("/"));
        let settings = self.host.config.load(directory)?;
        let file = SourceFile::new(&path, settings.output_location.as_deref(), self.env.platform)?;
        debug!("Resolved {:?}", file);
        Ok((file, settings))
    }

    pub fn runner(&self) -> Runner<'_> {
        Runner::new(self.host, &self.env)
    }

    fn report(&self, err: &Error) {
        match err.level() {
            Some(level) => self.host.editor.notify(Notification {
                level,
                message: err.to_string(),
            }),
            None => debug!("Silently aborted: {}", err),
        }
    }
}
