mod notify;

use std::path::Path;
use std::path::PathBuf;

use config::Config;
use config::ConfigError as ExternalConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

pub use crate::notify::NotifySettings;
pub use crate::notify::DEFAULT_MAILGUN_DOMAIN;

const CONFIG_FILE: &str = "pdm.toml";
const HIDDEN_CONFIG_FILE: &str = ".pdm.toml";
const ENV_PREFIX: &str = "PDM";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration build/deserialize error")]
    Config(#[from] ExternalConfigError),
}

#[must_use]
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "pdm", "pdm")
}

/// Size limits applied to new comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommentLimits {
    pub max_content_chars: usize,
    pub max_author_chars: usize,
}

impl Default for CommentLimits {
    fn default() -> Self {
        Self {
            max_content_chars: 5000,
            max_author_chars: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub debug: bool,
    /// Public page the discussion lives on, used for share links.
    pub site_url: Option<String>,
    pub limits: CommentLimits,
    pub notify: NotifySettings,
}

impl Settings {
    /// Load settings, lowest priority first: user config, `.pdm.toml`,
    /// `pdm.toml`, then `PDM_*` environment variables.
    pub fn new(project_root: &Path) -> Result<Self, ConfigError> {
        let user_config_file = user_config_file();
        Self::load_from_paths(project_root, user_config_file.as_deref(), None)
    }

    fn load_from_paths(
        project_root: &Path,
        user_config_path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user_config_path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        builder = builder.add_source(
            File::from(project_root.join(HIDDEN_CONFIG_FILE))
                .format(FileFormat::Toml)
                .required(false),
        );

        builder = builder.add_source(
            File::from(project_root.join(CONFIG_FILE))
                .format(FileFormat::Toml)
                .required(false),
        );

        // PDM_NOTIFY__MAILGUN_API_KEY -> notify.mailgun_api_key
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );

        let config = builder.build()?;
        let settings: Settings = config.try_deserialize()?;
        tracing::debug!(
            debug = settings.debug,
            notify_configured = settings.notify.api_key().is_some(),
            "loaded settings"
        );
        Ok(settings)
    }
}

fn user_config_file() -> Option<PathBuf> {
    project_dirs().map(|proj_dirs| proj_dirs.config_dir().join(CONFIG_FILE))
}
