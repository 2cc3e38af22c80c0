//! Configuration management for matgroups
use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use serde::Deserialize;
use std::path::Path;
use std::path::PathBuf;

use crate::sets::SetKind;

mod error;

pub use error::ConfigValidationError;

/// The built-in defaults, applied before any file or environment source.
pub const DEFAULT_CONFIG: &str = include_str!("default.toml");

/// Trait for validating configuration values.
trait Validatable {
    /// Validate the configuration values.
    fn validate(&self, cfg: &Settings) -> Result<(), ConfigError>;
}

/// Top-level configuration
#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    /// Export configuration
    pub export: ExportConfig,
}

/// Controls which instances are exported and where the files go.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportConfig {
    /// Whether the labels are element or node labels.
    #[serde(default)]
    pub set_kind: SetKind,
    /// Only export the instance with this name. `None` exports all of them.
    #[serde(default)]
    pub instance: Option<String>,
    /// Directory for the written files. `None` writes next to each model.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl ExportConfig {
    /// Applies command line overrides on top of the loaded values.
    pub fn with_overrides(mut self, instance: Option<String>, output_dir: Option<PathBuf>) -> Self {
        if instance.is_some() {
            self.instance = instance;
        }
        if output_dir.is_some() {
            self.output_dir = output_dir;
        }
        self.normalized()
    }

    /// An empty instance name means "all instances".
    fn normalized(mut self) -> Self {
        if self.instance.as_deref().is_some_and(str::is_empty) {
            self.instance = None;
        }
        self
    }
}

impl Validatable for ExportConfig {
    fn validate(&self, _: &Settings) -> Result<(), ConfigError> {
        if let Some(dir) = &self.output_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(ConfigError::Message(
                    ConfigValidationError::OutputDirNotADirectory(dir.display().to_string())
                        .to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl Settings {
    /// Initializing the config first with the built-in default values, then
    /// with the optional config file, and finally with environment variables.
    ///
    /// The environment variables are prefixed with `MATGROUPS_` and the
    /// nested fields are separated with double underscores, so the path
    /// `export.set_kind` is read from `MATGROUPS_EXPORT__SET_KIND`.
    pub fn new(config_path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        let env = Environment::with_prefix("MATGROUPS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);

        let mut cfg_builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(path) = config_path {
            cfg_builder = cfg_builder.add_source(File::from(path.as_ref()));
        }
        cfg_builder = cfg_builder.add_source(env);

        let cfg = cfg_builder.build()?;

        let mut settings: Settings = cfg.try_deserialize()?;
        settings.export = settings.export.normalized();

        settings.validate()?;

        Ok(settings)
    }

    /// Perform validation on the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.export.validate(self)?;

        Ok(())
    }
}
