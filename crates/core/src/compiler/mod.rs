//! Compiler dispatcher: picks the compiler for a source file, makes sure it
//! exists and runs it with streamed output.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    command::CompileInvocation,
    config::{CompilerProfile, Settings},
    error::{Error, Result},
    interfaces::{CompilerProcess, Host, InputRequest, Level, Notification},
    types::{Language, SourceFile},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Ask for the compiler flags instead of using the configured ones
    pub prompt_flags: bool,
}

pub struct Compiler<'a, P> {
    host: Host<'a>,
    process: &'a P,
}

impl<'a, P: CompilerProcess> Compiler<'a, P> {
    pub fn new(host: Host<'a>, process: &'a P) -> Self {
        Self { host, process }
    }

    /// The call that would be made for `file` with the configured flags
    pub fn plan(file: &SourceFile, settings: &Settings) -> Result<CompileInvocation> {
        let profile = settings.profile(file.language()?);
        Ok(CompileInvocation::new(file, &profile.path, &profile.flags))
    }

    pub async fn compile(
        &self,
        file: &SourceFile,
        settings: &Settings,
        options: CompileOptions,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if settings.save_before_compile {
            self.host.editor.save_active()?;
        }

        let language = file.language()?;
        let mut profile = settings.profile(language);
        self.ensure_compiler(language, &mut profile)?;

        let flags = if options.prompt_flags {
            self.host
                .editor
                .prompt(
                    &InputRequest::new("Flags")
                        .with_placeholder("-Wall -Wextra")
                        .with_value(&profile.flags),
                )
                .ok_or(Error::Cancelled)?
        } else {
            profile.flags.clone()
        };

        let invocation = CompileInvocation::new(file, &profile.path, &flags);
        if let Some(dir) = file.executable().parent() {
            if !self.host.fs.exists(dir) {
                self.host.fs.create_dir_all(dir)?;
            }
        }

        info!("Compiling: {}", invocation.to_shell_command());
        let editor = self.host.editor;
        let name = file.name();
        let code = self
            .process
            .run(
                &invocation,
                &mut |chunk: &str| {
                    editor.append_output(&name, chunk);
                    editor.show_output();
                },
                cancel,
            )
            .await?;

        if code == Some(0) {
            editor.notify(Notification::info("Compiled successfully!"));
            Ok(())
        } else {
            debug!("Compiler exit code: {:?}", code);
            Err(Error::CompileFailed { code })
        }
    }

    /// Make sure the compiler can be found, offering one chance to point at
    /// a different binary. A new path is saved globally.
    fn ensure_compiler(&self, language: Language, profile: &mut CompilerProfile) -> Result<()> {
        if let Some(found) = self.host.probe.resolve(&profile.path) {
            debug!("Using {} compiler at {}", language, found.display());
            return Ok(());
        }

        let change = self.host.editor.confirm(
            Level::Error,
            "Compiler not found, try to change path in settings!",
            "Change path",
        );
        if !change {
            return Err(Error::Cancelled);
        }

        let path = self
            .host
            .editor
            .prompt(&InputRequest::new("Path").with_placeholder("/usr/bin/gcc"))
            .filter(|p| !p.trim().is_empty())
            .ok_or(Error::Cancelled)?;
        self.host.config.persist_compiler_path(language, path.trim())?;
        profile.path = path.trim().to_string();

        if self.host.probe.resolve(&profile.path).is_none() {
            return Err(Error::CompilerNotFound {
                compiler: profile.path.clone(),
            });
        }
        Ok(())
    }
}
