use anyhow::Result;
use ccrun_core::{Action, Request, RunOptions};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{action_command, config_command, init_command};

#[derive(Parser, Debug)]
#[command(name = "ccrun")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    /// Use this file instead of the per-user settings.json
    #[arg(long, global = true, value_name = "PATH")]
    pub global_config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a C or C++ source file
    #[command(visible_alias = "c")]
    Compile {
        /// Path to the source file (e.g., src/main.cpp)
        file: PathBuf,

        /// Ask for the compiler flags
        #[arg(short = 'f', long)]
        with_flags: bool,

        /// Print the compiler call without executing it
        #[arg(short, long)]
        dry_run: bool,
    },
    /// Run the executable built from a source file
    #[command(visible_alias = "r")]
    Run {
        /// Path to the source file (e.g., src/main.cpp)
        file: PathBuf,

        /// Ask for the program arguments
        #[arg(short = 'a', long)]
        with_args: bool,

        /// Open a separate terminal window
        #[arg(short, long)]
        external: bool,

        /// Print the run command without executing it
        #[arg(short, long)]
        dry_run: bool,
    },
    /// Compile a source file, then run it
    #[command(visible_alias = "cr")]
    CompileRun {
        /// Path to the source file (e.g., src/main.cpp)
        file: PathBuf,

        /// Ask for the compiler flags
        #[arg(short = 'f', long)]
        with_flags: bool,

        /// Ask for the program arguments
        #[arg(short = 'a', long)]
        with_args: bool,

        /// Open a separate terminal window
        #[arg(short, long)]
        external: bool,

        /// Print both commands without executing them
        #[arg(short, long)]
        dry_run: bool,
    },
    /// Write a .ccrun.json with every setting spelled out
    Init {
        /// Directory to write the config to (defaults to current directory)
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
    /// Show the effective settings for a source file
    Config {
        /// Path to the source file
        file: PathBuf,
    },
}

impl Commands {
    /// The compile/run request behind an action subcommand
    pub fn request(&self) -> Option<Request> {
        match *self {
            Commands::Compile { with_flags, .. } => {
                let action = if with_flags {
                    Action::CompileWithFlags
                } else {
                    Action::Compile
                };
                Some(action.request(false))
            }
            Commands::Run {
                with_args,
                external,
                ..
            } => {
                let action = if with_args {
                    Action::RunWithArguments
                } else {
                    Action::Run
                };
                Some(action.request(external))
            }
            Commands::CompileRun {
                with_flags,
                with_args,
                external,
                ..
            } => {
                let mut request = Action::CompileRun.request(external);
                if let Some(compile) = request.compile.as_mut() {
                    compile.prompt_flags = with_flags;
                }
                request.run = Some(RunOptions {
                    prompt_args: with_args,
                    external,
                });
                Some(request)
            }
            Commands::Init { .. } | Commands::Config { .. } => None,
        }
    }

    /// Execute the command
    pub async fn execute(self, global_config: Option<PathBuf>) -> Result<()> {
        let request = self.request();
        match self {
            Commands::Compile { file, dry_run, .. }
            | Commands::Run { file, dry_run, .. }
            | Commands::CompileRun { file, dry_run, .. } => {
                let request = request.unwrap_or_default();
                action_command(&file, request, dry_run, global_config.as_deref()).await
            }
            Commands::Init { cwd, force } => init_command(cwd.as_deref(), force),
            Commands::Config { file } => config_command(&file, global_config.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccrun_core::CompileOptions;

    #[test]
    fn test_compile_run_combines_prompts() {
        let cli = Cli::parse_from(["ccrun", "cr", "a.cpp", "-f", "-a", "-e"]);
        assert_eq!(
            cli.command.request(),
            Some(Request {
                compile: Some(CompileOptions { prompt_flags: true }),
                run: Some(RunOptions {
                    prompt_args: true,
                    external: true,
                }),
            })
        );
    }

    #[test]
    fn test_plain_run() {
        let cli = Cli::parse_from(["ccrun", "run", "a.c"]);
        assert_eq!(cli.command.request(), Some(Action::Run.request(false)));
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["ccrun", "config", "a.c", "--global-config", "/tmp/g.json"]);
        assert_eq!(cli.global_config, Some(PathBuf::from("/tmp/g.json")));
        assert!(cli.command.request().is_none());
    }
}
