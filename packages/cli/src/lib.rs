//! # jsondb-cli
//!
//! Command-line access to a jsondb namespace kept in a single JSON file.
//!
//! ## Usage
//!
//! ```bash
//! # Write a document, read it back, inspect the flat layout
//! jsondb put player '{"name": "Alice", "items": ["sword"]}'
//! jsondb get player
//! jsondb get 'player\items' --kind
//! jsondb keys
//!
//! # Use another file or namespace
//! jsondb --store ./prefs.json --namespace save1 root
//! JSONDB_STORE=./prefs.json jsondb del 'player\name'
//! ```

pub mod commands;
pub mod config;

pub use commands::{run, Args, Command, CommandError};
pub use config::{Config, ConfigError};
