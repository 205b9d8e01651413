use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_DATABASE: &str = "todo";
pub const DEFAULT_LOG: &str = "warn";

/// Runtime settings.
///
/// Sources, lowest precedence first: built-in defaults, the config file,
/// `TODO_*` environment variables, then the `--db` flag.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Connection string of the document store.
    pub uri: String,
    /// Database namespace holding the `task` and `user` collections.
    pub database: String,
    /// Log filter, e.g. `warn` or `todo=debug`.
    pub log: String,
}

impl Settings {
    /// Loads settings from the default config file location.
    pub fn load(uri_override: Option<String>) -> Result<Self> {
        Self::load_from(config_path(), uri_override)
    }

    /// Loads settings using `path` as the config file. A missing file is
    /// not an error.
    pub fn load_from(path: Option<PathBuf>, uri_override: Option<String>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("uri", default_uri())?
            .set_default("database", DEFAULT_DATABASE)?
            .set_default("log", DEFAULT_LOG)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("TODO"))
            .set_override_option("uri", uri_override)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// Returns the path to the config file (`config.toml`).
///
/// The path is determined in the following order:
/// 1. `TODO_CONFIG` environment variable.
/// 2. `~/.config/todo/config.toml` (on Linux).
pub fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("TODO_CONFIG") {
        return Some(PathBuf::from(p));
    }
    dirs::config_dir().map(|mut p| {
        p.push("todo");
        p.push("config.toml");
        p
    })
}

/// `file://` URI of the local data directory, e.g.
/// `~/.local/share/todo` on Linux.
fn default_uri() -> String {
    let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    p.push("todo");
    format!("file://{}", p.display())
}
