//! Locations module

use std::ffi::OsString;

use camino::{Utf8Path, Utf8PathBuf};

/// Host platform families with distinct application folder rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Unix,
}

impl Platform {
    #[cfg(target_os = "macos")]
    pub const fn current() -> Self {
        Platform::MacOs
    }

    #[cfg(target_os = "windows")]
    pub const fn current() -> Self {
        Platform::Windows
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    pub const fn current() -> Self {
        Platform::Unix
    }

    /// Name of the application folder when none is configured
    pub fn default_app_folder(&self) -> &'static str {
        match self {
            Platform::MacOs => "minecraft",
            Platform::Windows | Platform::Unix => ".minecraft",
        }
    }
}

/// Locations for the user
pub mod user {
    use camino::Utf8PathBuf;

    pub fn home_dir() -> crate::Result<Utf8PathBuf> {
        let dir = dirs::home_dir().ok_or_else(|| crate::config_error!("Can't get HOME directory"))?;
        Ok(Utf8PathBuf::try_from(dir)?)
    }

    pub fn config_dir() -> crate::Result<Utf8PathBuf> {
        let dir =
            dirs::config_dir().ok_or_else(|| crate::config_error!("Can't get config directory"))?;
        let dir = Utf8PathBuf::try_from(dir)?;
        Ok(dir.join("mirrorsync"))
    }

    pub fn config_file() -> crate::Result<Utf8PathBuf> {
        Ok(config_dir()?.join("config.json"))
    }
}

/// Computes the application root for `platform` without touching the filesystem.
///
/// `home` is only consulted on macOS and Unix, `appdata` only on Windows.
pub fn root_dir_for<H>(
    platform: Platform,
    app_folder: &str,
    home: H,
    appdata: Option<OsString>,
) -> crate::Result<Utf8PathBuf>
where
    H: FnOnce() -> crate::Result<Utf8PathBuf>,
{
    let root = match platform {
        Platform::MacOs => home()?
            .join("Library")
            .join("Application Support")
            .join(app_folder),
        Platform::Windows => {
            let appdata = appdata
                .filter(|v| !v.is_empty())
                .ok_or_else(|| crate::config_error!("Could not locate APPDATA env"))?;
            Utf8PathBuf::try_from(std::path::PathBuf::from(appdata))?.join(app_folder)
        }
        Platform::Unix => home()?.join(app_folder),
    };
    Ok(root)
}

/// Platform root for the host, from the home directory or `APPDATA`.
pub fn root_dir(app_folder: &str) -> crate::Result<Utf8PathBuf> {
    let platform = Platform::current();
    let appdata = match platform {
        Platform::Windows => std::env::var_os("APPDATA"),
        _ => None,
    };
    root_dir_for(platform, app_folder, user::home_dir, appdata)
}

/// Creates `dir` and its parents if needed.
pub async fn ensure_dir(dir: &Utf8Path) -> crate::Result<()> {
    log::trace!("mkdir -p {dir}");
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|err| crate::io_error!("Can't create {dir}: {err}"))
}

/// Resolves the platform root and guarantees it exists.
pub async fn resolve_root(app_folder: &str) -> crate::Result<Utf8PathBuf> {
    let root = root_dir(app_folder)?;
    ensure_dir(&root).await?;
    Ok(root)
}
