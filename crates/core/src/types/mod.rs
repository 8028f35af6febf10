pub mod platform;
pub mod source_file;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Source languages with a configured compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    C,
    Cpp,
}

impl Language {
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension {
            "c" => Ok(Language::C),
            "cpp" | "cc" | "cxx" | "c++" => Ok(Language::Cpp),
            other => Err(Error::UnsupportedExtension(other.to_string())),
        }
    }

    /// Settings key holding the compiler path for this language
    pub fn compiler_key(self) -> &'static str {
        match self {
            Language::C => "c_compiler",
            Language::Cpp => "cpp_compiler",
        }
    }

    pub fn flags_key(self) -> &'static str {
        match self {
            Language::C => "c_flags",
            Language::Cpp => "cpp_flags",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::C => write!(f, "C"),
            Language::Cpp => write!(f, "C++"),
        }
    }
}

// Re-export commonly used types
pub use platform::{HostEnv, Platform};
pub use source_file::SourceFile;
