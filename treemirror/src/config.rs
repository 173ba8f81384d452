use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::loc::Platform;

/// Listing URL used when neither the command line nor the config file names one
pub const DEFAULT_ROOT_URL: &str =
    "https://api.github.com/repos/devformed/minecraft-server/contents/client/downloads";

/// Nesting limit of the remote tree
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Settings read from the JSON config file.
/// Every field is optional and falls back to a built-in default.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub root_url: Option<String>,
    pub app_folder: Option<String>,
    pub target_dir: Option<Utf8PathBuf>,
    pub user_agent: Option<String>,
    pub max_depth: Option<usize>,
}

impl Config {
    pub async fn load_from_file(path: &Utf8Path) -> crate::Result<Self> {
        let config_json = tokio::fs::read(&path)
            .await
            .map_err(|err| crate::config_error!("Failed to read config from {path}: {err}"))?;
        serde_json::from_slice(&config_json)
            .map_err(|err| crate::config_error!("Invalid config file {path}: {err}"))
    }

    /// Loads the file if it exists, otherwise returns the defaults.
    pub async fn load_if_exists(path: &Utf8Path) -> crate::Result<Self> {
        if path.exists() {
            log::info!("Found config file: {path}");
            Self::load_from_file(path).await
        } else {
            log::debug!("No config file at {path}");
            Ok(Self::default())
        }
    }

    /// Overlays `other` on top of `self`: fields set in `other` win.
    pub fn merge(self, other: Config) -> Config {
        Config {
            root_url: other.root_url.or(self.root_url),
            app_folder: other.app_folder.or(self.app_folder),
            target_dir: other.target_dir.or(self.target_dir),
            user_agent: other.user_agent.or(self.user_agent),
            max_depth: other.max_depth.or(self.max_depth),
        }
    }

    pub fn root_url(&self) -> &str {
        self.root_url.as_deref().unwrap_or(DEFAULT_ROOT_URL)
    }

    pub fn app_folder(&self) -> &str {
        self.app_folder
            .as_deref()
            .unwrap_or_else(|| Platform::current().default_app_folder())
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("mirrorsync/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    /// The local root: `target_dir` when set, the platform folder otherwise.
    /// The directory is created if absent.
    pub async fn local_root(&self) -> crate::Result<Utf8PathBuf> {
        match &self.target_dir {
            Some(dir) => {
                crate::loc::ensure_dir(dir).await?;
                Ok(dir.clone())
            }
            None => crate::loc::resolve_root(self.app_folder()).await,
        }
    }
}
