//! Configuration for cs2mako.
//!
//! The documented defaults in `defaults/cs2mako.default.toml` are compiled in. A
//! project `cs2mako.toml`, an explicit file and individual `[convert]` overrides are
//! stacked on top of them by [`Loader`], in that order.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use cs2mako::ConvertOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/cs2mako.default.toml");

/// Name of the per-project configuration file picked up from the working directory.
pub const USER_CONFIG_FILE: &str = "cs2mako.toml";

/// Top-level configuration consumed by cs2mako applications.
#[derive(Debug, Clone, Deserialize)]
pub struct Cs2MakoConfig {
    pub convert: ConvertConfig,
    pub output: OutputConfig,
}

/// Mirrors [`ConvertOptions`].
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub setter: String,
    pub include_root: String,
    pub indent: String,
}

impl From<&ConvertConfig> for ConvertOptions {
    fn from(config: &ConvertConfig) -> Self {
        ConvertOptions {
            setter: config.setter.clone(),
            include_root: config.include_root.clone(),
            indent: config.indent.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Extension (without the dot) of files written next to their input.
    pub extension: String,
}

impl Cs2MakoConfig {
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions::from(&self.convert)
    }
}

/// Stacks configuration sources over the embedded defaults; later layers win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Loader {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Layer [`USER_CONFIG_FILE`] from `dir`, if there is one.
    pub fn with_project_file(self, dir: impl AsRef<Path>) -> Self {
        self.layer(&dir.as_ref().join(USER_CONFIG_FILE), false)
    }

    /// Layer a file the user asked for explicitly; building fails if it is missing.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }

    /// Replace one `[convert]` key, e.g. `setter`, on top of every file.
    pub fn with_convert_override(mut self, key: &str, value: &str) -> Result<Self, ConfigError> {
        self.builder = self.builder.set_override(format!("convert.{}", key), value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<Cs2MakoConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}
