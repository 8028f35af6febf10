use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{
    error::{Error, Result},
    types::Language,
};

/// Effective settings after all layers are merged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    pub c_compiler: String,
    pub c_flags: String,
    pub cpp_compiler: String,
    pub cpp_flags: String,
    pub run_args: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_location: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_run_prefix: Option<String>,
    pub run_in_external_terminal: bool,
    pub show_execution_time: bool,
    pub save_before_compile: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux_terminal: Option<String>,
    pub windows_terminal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            c_compiler: "gcc".to_string(),
            c_flags: "-Wall -Wextra -g3".to_string(),
            cpp_compiler: "g++".to_string(),
            cpp_flags: "-Wall -Wextra -g3".to_string(),
            run_args: String::new(),
            output_location: None,
            custom_run_prefix: None,
            run_in_external_terminal: false,
            show_execution_time: false,
            save_before_compile: true,
            linux_terminal: None,
            windows_terminal: "cmd.exe".to_string(),
            shell: None,
        }
    }
}

/// Compiler path and flags for one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerProfile {
    pub path: String,
    pub flags: String,
}

impl Settings {
    pub fn profile(&self, language: Language) -> CompilerProfile {
        match language {
            Language::C => CompilerProfile {
                path: self.c_compiler.clone(),
                flags: self.c_flags.clone(),
            },
            Language::Cpp => CompilerProfile {
                path: self.cpp_compiler.clone(),
                flags: self.cpp_flags.clone(),
            },
        }
    }

    /// Directory the program runs in: the configured output location
    /// (relative to the source directory) or `<source dir>/output`.
    pub fn run_directory(&self, source_dir: &Path) -> PathBuf {
        match &self.output_location {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => source_dir.join(dir),
            None => source_dir.join("output"),
        }
    }

    /// Apply one configuration layer on top of these settings
    pub fn merge(&mut self, layer: SettingsLayer) {
        if let Some(v) = layer.c_compiler {
            self.c_compiler = v;
        }
        if let Some(v) = layer.c_flags {
            self.c_flags = v;
        }
        if let Some(v) = layer.cpp_compiler {
            self.cpp_compiler = v;
        }
        if let Some(v) = layer.cpp_flags {
            self.cpp_flags = v;
        }
        if let Some(v) = layer.run_args {
            self.run_args = v;
        }
        if let Some(v) = layer.output_location {
            self.output_location = Some(v).filter(|p| !p.as_os_str().is_empty());
        }
        if let Some(v) = layer.custom_run_prefix {
            self.custom_run_prefix = Some(v).filter(|p| !p.trim().is_empty());
        }
        if let Some(v) = layer.run_in_external_terminal {
            self.run_in_external_terminal = v;
        }
        if let Some(v) = layer.show_execution_time {
            self.show_execution_time = v;
        }
        if let Some(v) = layer.save_before_compile {
            self.save_before_compile = v;
        }
        if let Some(v) = layer.linux_terminal {
            self.linux_terminal = Some(v).filter(|t| !t.trim().is_empty());
        }
        if let Some(v) = layer.windows_terminal {
            self.windows_terminal = v;
        }
        if let Some(v) = layer.shell {
            self.shell = Some(v).filter(|s| !s.trim().is_empty());
        }
    }
}

/// One configuration file. Every key is optional; absent keys leave the
/// lower layer's value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct SettingsLayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c_compiler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c_flags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpp_compiler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpp_flags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_args: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_location: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_run_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_in_external_terminal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_execution_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_before_compile: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux_terminal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows_terminal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
}

impl SettingsLayer {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| {
            Error::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// A local layer that spells out every default, for `ccrun init`
    pub fn template() -> Self {
        let defaults = Settings::default();
        Self {
            c_compiler: Some(defaults.c_compiler),
            c_flags: Some(defaults.c_flags),
            cpp_compiler: Some(defaults.cpp_compiler),
            cpp_flags: Some(defaults.cpp_flags),
            run_args: Some(defaults.run_args),
            output_location: None,
            custom_run_prefix: None,
            run_in_external_terminal: Some(defaults.run_in_external_terminal),
            show_execution_time: Some(defaults.show_execution_time),
            save_before_compile: Some(defaults.save_before_compile),
            linux_terminal: None,
            windows_terminal: None,
            shell: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(
            settings.profile(Language::Cpp),
            CompilerProfile {
                path: "g++".to_string(),
                flags: "-Wall -Wextra -g3".to_string(),
            }
        );
        assert_eq!(settings.profile(Language::C).path, "gcc");
        assert!(settings.save_before_compile);
        assert!(!settings.run_in_external_terminal);
    }

    #[test]
    fn test_merge_only_overrides_present_keys() {
        let mut settings = Settings::default();
        let layer: SettingsLayer = serde_json::from_str(
            r#"{ "cpp_compiler": "clang++", "show_execution_time": true, "run_args": "1 2" }"#,
        )
        .unwrap();
        settings.merge(layer);

        assert_eq!(settings.cpp_compiler, "clang++");
        assert_eq!(settings.cpp_flags, "-Wall -Wextra -g3");
        assert_eq!(settings.c_compiler, "gcc");
        assert_eq!(settings.run_args, "1 2");
        assert!(settings.show_execution_time);
    }

    #[test]
    fn test_blank_optional_values_clear_the_setting() {
        let mut settings = Settings {
            custom_run_prefix: Some("valgrind".to_string()),
            ..Default::default()
        };
        settings.merge(SettingsLayer {
            custom_run_prefix: Some(String::new()),
            linux_terminal: Some(" ".to_string()),
            ..Default::default()
        });
        assert_eq!(settings.custom_run_prefix, None);
        assert_eq!(settings.linux_terminal, None);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result: std::result::Result<SettingsLayer, _> =
            serde_json::from_str(r#"{ "cpp_compilr": "clang++" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_directory() {
        let mut settings = Settings::default();
        assert_eq!(
            settings.run_directory(Path::new("/src")),
            PathBuf::from("/src/output")
        );

        settings.output_location = Some(PathBuf::from("bin"));
        assert_eq!(
            settings.run_directory(Path::new("/src")),
            PathBuf::from("/src/bin")
        );

        settings.output_location = Some(PathBuf::from("/opt/out"));
        assert_eq!(
            settings.run_directory(Path::new("/src")),
            PathBuf::from("/opt/out")
        );
    }
}
