use ccrun_core::{ExternalTerminal, Plan};

/// How a run in a separate window would be opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalPreview {
    Launch {
        terminal: ExternalTerminal,
        command: String,
    },
    /// The launch would fail and the run would land in the embedded
    /// terminal instead
    Fallback(String),
}

pub fn format_plan(plan: &Plan, external: Option<&ExternalPreview>) -> String {
    let mut out = format!("📄 Source: {}\n", plan.file.path().display());

    if let Some(compile) = &plan.compile {
        out.push_str(&format!("🔨 Compile: {}\n", compile.to_shell_command()));
        out.push_str(&format!(
            "   📂 Working directory: {}\n",
            compile.working_dir().display()
        ));
    }

    if let Some(run) = &plan.run {
        out.push_str(&format!("🚀 Run: {}\n", run.command));
        out.push_str(&format!(
            "   📂 Working directory: {}\n",
            run.working_dir.display()
        ));
        out.push_str(&format!("   🐚 Shell: {}\n", run.shell));
        match external {
            None => out.push_str("   🖥️  Terminal: embedded\n"),
            Some(ExternalPreview::Launch { terminal, command }) => {
                out.push_str(&format!("   🖥️  Terminal: {terminal}\n"));
                out.push_str(&format!("   🔧 Launch: {command}\n"));
            }
            Some(ExternalPreview::Fallback(reason)) => {
                out.push_str(&format!("   🖥️  Terminal: embedded ({reason})\n"));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccrun_core::{
        CompileInvocation, Platform, RunPlan, Settings, ShellKind, SourceFile,
    };
    use std::path::{Path, PathBuf};

    fn plan(compile: bool) -> Plan {
        let file = SourceFile::new(Path::new("/work/a.cpp"), None, Platform::Linux).unwrap();
        Plan {
            compile: compile.then(|| CompileInvocation::new(&file, "g++", "-Wall")),
            run: Some(RunPlan {
                command: "/work/a".to_string(),
                working_dir: PathBuf::from("/work/output"),
                shell: ShellKind::Posix,
                external: false,
            }),
            file,
            settings: Settings::default(),
        }
    }

    #[test]
    fn test_compile_and_run_lines() {
        let text = format_plan(&plan(true), None);
        assert!(text.contains("🔨 Compile: g++ /work/a.cpp -o /work/a -Wall\n"));
        assert!(text.contains("🚀 Run: /work/a\n"));
        assert!(text.contains("📂 Working directory: /work/output\n"));
        assert!(text.contains("Terminal: embedded\n"));
    }

    #[test]
    fn test_run_only_has_no_compile_line() {
        let text = format_plan(&plan(false), None);
        assert!(!text.contains("Compile:"));
    }

    #[test]
    fn test_external_preview() {
        let launch = ExternalPreview::Launch {
            terminal: ExternalTerminal::Xterm,
            command: "xterm -T a -e bash -c '/work/a'".to_string(),
        };
        let text = format_plan(&plan(false), Some(&launch));
        assert!(text.contains("Terminal: xterm\n"));
        assert!(text.contains("🔧 Launch: xterm -T a"));

        let fallback = ExternalPreview::Fallback("xterm not found!".to_string());
        let text = format_plan(&plan(false), Some(&fallback));
        assert!(text.contains("Terminal: embedded (xterm not found!)"));
    }
}
