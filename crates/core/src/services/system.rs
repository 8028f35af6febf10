//! Thin std/`which` implementations of the filesystem and PATH probes

use std::path::{Path, PathBuf};

use crate::{
    error::Result,
    interfaces::{BinaryProbe, FileSystem},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)?;
        Ok(())
    }
}

/// Resolves programs the way a shell would, through `PATH`. Paths with a
/// directory component are checked directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhichProbe;

impl BinaryProbe for WhichProbe {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        if program.trim().is_empty() {
            return None;
        }
        which::which(program).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_dir_all() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let fs = StdFileSystem;
        assert!(!fs.exists(&nested));
        fs.create_dir_all(&nested).unwrap();
        assert!(fs.exists(&nested));
    }

    #[test]
    fn test_probe_rejects_blank_and_unknown() {
        assert_eq!(WhichProbe.resolve(""), None);
        assert_eq!(WhichProbe.resolve("definitely-not-a-real-compiler-xyz"), None);
    }
}
