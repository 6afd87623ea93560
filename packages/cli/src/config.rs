//! Where the store lives and which namespace to use.
//!
//! Each setting comes from the command line first, then the environment,
//! then a default.

use std::path::PathBuf;

use jsondb_core::{Mode, DELIMITER};

use crate::commands::Args;

pub const STORE_ENV: &str = "JSONDB_STORE";
pub const NAMESPACE_ENV: &str = "JSONDB_NAMESPACE";
pub const DEFAULT_NAMESPACE: &str = "root";
const DEFAULT_STORE_FILE: &str = "store.json";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("No store file given and no data directory could be determined; pass --store or set {STORE_ENV}")]
    NoStoreLocation,

    #[error("Could not create store directory {path}: {error}")]
    StoreDirectory {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Invalid namespace {namespace:?}: {message}")]
    InvalidNamespace { namespace: String, message: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
    pub namespace: String,
    pub mode: Mode,
}

impl Config {
    /// Resolve against the process environment and the user's data directory.
    pub fn resolve(args: &Args) -> Result<Config, ConfigError> {
        let config = Self::resolve_with(args, |key| std::env::var(key).ok(), dirs::data_dir())?;

        if args.store.is_none() && std::env::var_os(STORE_ENV).is_none() {
            if let Some(parent) = config.store_path.parent() {
                std::fs::create_dir_all(parent).map_err(|error| ConfigError::StoreDirectory {
                    path: parent.to_path_buf(),
                    error,
                })?;
            }
        }

        Ok(config)
    }

    /// Resolve with an explicit environment lookup and data directory.
    pub fn resolve_with(
        args: &Args,
        env: impl Fn(&str) -> Option<String>,
        data_dir: Option<PathBuf>,
    ) -> Result<Config, ConfigError> {
        let store_path = match (&args.store, env(STORE_ENV)) {
            (Some(path), _) => path.clone(),
            (None, Some(path)) if !path.is_empty() => PathBuf::from(path),
            _ => data_dir
                .map(|dir| dir.join("jsondb").join(DEFAULT_STORE_FILE))
                .ok_or(ConfigError::NoStoreLocation)?,
        };

        let namespace = match (&args.namespace, env(NAMESPACE_ENV)) {
            (Some(ns), _) => ns.clone(),
            (None, Some(ns)) if !ns.is_empty() => ns,
            _ => DEFAULT_NAMESPACE.to_string(),
        };
        if namespace.is_empty() {
            return Err(ConfigError::InvalidNamespace {
                namespace,
                message: "namespace must not be empty".to_string(),
            });
        }
        if namespace.contains(DELIMITER) {
            return Err(ConfigError::InvalidNamespace {
                namespace,
                message: format!("namespace must not contain {:?}", DELIMITER),
            });
        }

        let mode = if args.read_only { Mode::R } else { Mode::WR };

        Ok(Config {
            store_path,
            namespace,
            mode,
        })
    }
}
