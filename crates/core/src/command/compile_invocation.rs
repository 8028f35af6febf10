use std::path::{Path, PathBuf};

use crate::{
    shell::{self, ShellKind},
    types::SourceFile,
};

/// A compiler call: program, argument vector and working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl CompileInvocation {
    /// `<compiler> <source> -o <executable> <flags...>`, run from the source
    /// directory. Flags are split on whitespace.
    pub fn new(file: &SourceFile, compiler: &str, flags: &str) -> Self {
        let mut args = vec![
            file.path().to_string_lossy().into_owned(),
            "-o".to_string(),
            file.executable().to_string_lossy().into_owned(),
        ];
        args.extend(flags.split_whitespace().map(str::to_string));

        Self {
            program: compiler.to_string(),
            args,
            working_dir: file.directory().to_path_buf(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Printable form of the call, quoted for a POSIX shell
    pub fn to_shell_command(&self) -> String {
        let mut cmd = shell::quote(ShellKind::Posix, &self.program).into_owned();
        for arg in &self.args {
            cmd.push(' ');
            cmd.push_str(&shell::quote(ShellKind::Posix, arg));
        }
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Platform;

    #[test]
    fn test_compile_arguments() {
        let file = SourceFile::new(Path::new("/tmp/a.cpp"), None, Platform::Linux).unwrap();
        let invocation = CompileInvocation::new(&file, "g++", "-Wall");

        assert_eq!(invocation.program, "g++");
        assert_eq!(invocation.args, vec!["/tmp/a.cpp", "-o", "/tmp/a", "-Wall"]);
        assert_eq!(invocation.working_dir(), Path::new("/tmp"));
    }

    #[test]
    fn test_empty_flags_add_nothing() {
        let file = SourceFile::new(Path::new("/tmp/a.c"), None, Platform::Linux).unwrap();
        let invocation = CompileInvocation::new(&file, "gcc", "   ");
        assert_eq!(invocation.args, vec!["/tmp/a.c", "-o", "/tmp/a"]);
    }

    #[test]
    fn test_flags_split_on_any_whitespace() {
        let file = SourceFile::new(Path::new("/tmp/a.c"), None, Platform::Linux).unwrap();
        let invocation = CompileInvocation::new(&file, "gcc", " -O2\t-g  -lm ");
        assert_eq!(&invocation.args[3..], ["-O2", "-g", "-lm"]);
    }

    #[test]
    fn test_to_shell_command() {
        let file = SourceFile::new(Path::new("/tmp/my dir/a.c"), None, Platform::Linux).unwrap();
        let invocation = CompileInvocation::new(&file, "gcc", "-Wall");
        assert_eq!(
            invocation.to_shell_command(),
            "gcc '/tmp/my dir/a.c' -o '/tmp/my dir/a' -Wall"
        );
    }
}
