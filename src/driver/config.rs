use std::{io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A package config file. Namely Fun.toml
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub package: Package,
    #[serde(default)]
    pub dump: DumpConfig,
}

/// Meta information about the package.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Package {
    /// The name of the package.
    pub name: String,
    /// The SEMVER compatible version of the package.
    pub version: String,
}

/// What the driver prints after parsing.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpConfig {
    /// Print the parsed IR.
    pub ir: bool,
    /// Print the lowered signatures and locals.
    pub lowered: bool,
    /// Color the headings.
    pub color: bool,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            ir: false,
            lowered: false,
            color: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Config {
    pub const FILE_NAME: &'static str = "Fun.toml";

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{Config, ConfigError};

    #[test]
    fn load_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[package]
name = "hello"
version = "0.1.0"

[dump]
ir = true
color = false
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.package.name, "hello");
        assert!(config.dump.ir);
        assert!(!config.dump.lowered);
        assert!(!config.dump.color);
    }

    #[test]
    fn dump_section_is_optional() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[package]\nname = \"a\"\nversion = \"1.0.0\"\n").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(!config.dump.ir);
        assert!(config.dump.color);
    }

    #[test]
    fn invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[dump]\nir = 1\n").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Toml(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load(&dir.path().join(Config::FILE_NAME)),
            Err(ConfigError::Io(_))
        ));
    }
}
