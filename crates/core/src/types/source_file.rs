use std::path::{Path, PathBuf};

use super::{Language, Platform};
use crate::error::Result;

/// The file being compiled or run, resolved once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    directory: PathBuf,
    extension: String,
    title: String,
    executable: PathBuf,
}

impl SourceFile {
    /// Resolve `path` against the current directory and derive the
    /// executable location. The executable goes into `output_dir` when one is
    /// given, next to the source otherwise.
    pub fn new(path: &Path, output_dir: Option<&Path>, platform: Platform) -> Result<Self> {
        let path = std::path::absolute(path)?;
        let directory = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string();
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("a")
            .to_string();

        let executable_dir = match output_dir {
            Some(dir) if dir.is_absolute() => dir.to_path_buf(),
            Some(dir) => directory.join(dir),
            None => directory.clone(),
        };
        let executable =
            executable_dir.join(format!("{}{}", title, platform.executable_suffix()));

        Ok(Self {
            path,
            directory,
            extension,
            title,
            executable,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File name without extension, also used as the terminal window title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// File name with extension, used to tag compiler output
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn language(&self) -> Result<Language> {
        Language::from_extension(&self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_executable_next_to_source() {
        let file = SourceFile::new(Path::new("/tmp/a.cpp"), None, Platform::Linux).unwrap();
        assert_eq!(file.path(), Path::new("/tmp/a.cpp"));
        assert_eq!(file.directory(), Path::new("/tmp"));
        assert_eq!(file.extension(), "cpp");
        assert_eq!(file.title(), "a");
        assert_eq!(file.name(), "a.cpp");
        assert_eq!(file.executable(), Path::new("/tmp/a"));
        assert_eq!(file.language().unwrap(), Language::Cpp);
    }

    #[test]
    fn test_windows_executable_suffix() {
        let file = SourceFile::new(Path::new("/src/main.c"), None, Platform::Windows).unwrap();
        assert_eq!(file.executable(), Path::new("/src/main.exe"));
    }

    #[test]
    fn test_relative_output_dir() {
        let file = SourceFile::new(
            Path::new("/work/hello.c"),
            Some(Path::new("build")),
            Platform::Linux,
        )
        .unwrap();
        assert_eq!(file.executable(), Path::new("/work/build/hello"));
    }

    #[test]
    fn test_absolute_output_dir() {
        let file = SourceFile::new(
            Path::new("/work/hello.c"),
            Some(Path::new("/var/out")),
            Platform::Linux,
        )
        .unwrap();
        assert_eq!(file.executable(), Path::new("/var/out/hello"));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = SourceFile::new(Path::new("/work/notes.txt"), None, Platform::Linux).unwrap();
        assert!(matches!(file.language(), Err(Error::UnsupportedExtension(_))));
    }
}
