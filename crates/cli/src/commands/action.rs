use anyhow::{Context, Result};
use ccrun_core::{
    CompileRun, HostEnv, Plan, Request,
    interfaces::{ConfigStore, Host},
    services::{ConsoleEditor, InlineTerminal, ShellLauncher, StdFileSystem, TokioProcess, WhichProbe},
};
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::config_store;
use crate::display::{ExternalPreview, format_plan};

pub async fn action_command(
    file: &Path,
    request: Request,
    dry_run: bool,
    global_config: Option<&Path>,
) -> Result<()> {
    let file = std::path::absolute(file)
        .with_context(|| format!("Failed to resolve {}", file.display()))?;
    let store = config_store(global_config);

    // The shell setting decides how commands are written, so it is read
    // before the host is detected.
    let start_dir = file.parent().unwrap_or(Path::new("/"));
    let configured_shell = store.load(start_dir)?.shell;
    let env = HostEnv::detect(configured_shell.as_deref());
    debug!("Host: {:?}", env);

    let editor = ConsoleEditor::stdio();
    let fs = StdFileSystem;
    let probe = WhichProbe;
    let launcher = ShellLauncher::new(env.platform);
    let terminal = InlineTerminal::new(env.shell_program.clone());
    let host = Host {
        editor: &editor,
        config: &store,
        fs: &fs,
        probe: &probe,
        launcher: &launcher,
        terminal: &terminal,
    };
    let app = CompileRun::new(host, env, TokioProcess);

    if dry_run {
        let plan = app.plan(&file, request)?;
        let external = preview_external(&app, &plan);
        print!("{}", format_plan(&plan, external.as_ref()));
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted");
            on_interrupt.cancel();
        }
    });

    // Failures have already been shown by the time execute returns
    if let Err(err) = app.execute(&file, request, &cancel).await {
        debug!("Action failed: {:?}", err);
        std::process::exit(1);
    }
    Ok(())
}

fn preview_external<P>(app: &CompileRun<'_, P>, plan: &Plan) -> Option<ExternalPreview>
where
    P: ccrun_core::interfaces::CompilerProcess,
{
    let run = plan.run.as_ref().filter(|run| run.external)?;
    let preview = match app.runner().external_launcher().command(
        &plan.settings,
        &run.command,
        plan.file.title(),
        &run.working_dir,
        run.shell,
    ) {
        Ok((terminal, command)) => ExternalPreview::Launch { terminal, command },
        Err(err) => ExternalPreview::Fallback(err.to_string()),
    };
    Some(preview)
}
