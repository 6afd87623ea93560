//! Command-line arguments and the commands they run.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value as JsonValue;

use jsondb_core::{Document, JsonDb, Kind};
use jsondb_flat_store::{FlatStoreError, JsonFileFlatStore};

use crate::config::Config;

/// jsondb - store JSON documents as flat key/value entries
#[derive(Parser, Debug)]
#[command(name = "jsondb")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Store file (default: $JSONDB_STORE, then <data dir>/jsondb/store.json)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Namespace root (default: $JSONDB_NAMESPACE, then "root")
    #[arg(long, global = true)]
    pub namespace: Option<String>,

    /// Refuse to run commands that write
    #[arg(long, global = true)]
    pub read_only: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the whole namespace as JSON
    Root,

    /// Print the document at PATH
    Get {
        /// Path relative to the namespace, segments separated by '\'
        path: String,

        /// Print what is stored at PATH (dir, obj or null) instead of its value
        #[arg(long)]
        kind: bool,
    },

    /// Write a JSON document under KEY, merging into what is there
    Put {
        key: String,

        /// The document, as JSON text
        json: String,
    },

    /// Delete the entry at PATH and any ancestors it leaves empty
    Del { path: String },

    /// Delete the namespace root entry
    Clear,

    /// List every raw key in the store file
    Keys,
}

impl Command {
    fn writes(&self) -> bool {
        matches!(
            self,
            Command::Put { .. } | Command::Del { .. } | Command::Clear
        )
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("Database error: {0}")]
    Db(#[from] jsondb_core::Error),

    #[error("Store error: {0}")]
    Store(#[from] FlatStoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store is open read-only; '{0}' writes")]
    ReadOnly(String),
}

fn kind_name(kind: Kind) -> &'static str {
    match kind {
        Kind::Null => "null",
        Kind::Dir => "dir",
        Kind::Obj => "obj",
    }
}

fn pretty(document: &Document) -> Result<String, CommandError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Run one command against the configured store, returning what to print.
pub fn run(config: &Config, command: &Command) -> Result<String, CommandError> {
    if command.writes() && !config.mode.can_write() {
        let name = match command {
            Command::Put { .. } => "put",
            Command::Del { .. } => "del",
            _ => "clear",
        };
        return Err(CommandError::ReadOnly(name.to_string()));
    }

    let store = JsonFileFlatStore::open(config.store_path.clone())?;
    let mut db = JsonDb::new(config.namespace.clone(), config.mode, store);
    log::debug!(
        "Opened {} at {}",
        db.namespace(),
        config.store_path.display()
    );

    match command {
        Command::Root => pretty(&db.root()?),
        Command::Get { path, kind: true } => Ok(kind_name(db.kind_of(path)?).to_string()),
        Command::Get { path, kind: false } => pretty(&db.get(path)?),
        Command::Put { key, json } => {
            let value: JsonValue = serde_json::from_str(json)?;
            db.put_json(key, &value)?;
            Ok(String::new())
        }
        Command::Del { path } => {
            db.del(path)?;
            Ok(String::new())
        }
        Command::Clear => {
            db.clear()?;
            Ok(String::new())
        }
        Command::Keys => {
            let store = db.into_store();
            let keys: Vec<&str> = store.keys().collect();
            Ok(keys.join("\n"))
        }
    }
}
