use std::collections::BTreeMap;
use std::{fs, io, path};

use crate::{FlatStore, FlatStoreError};

/// A flat store persisted as a single JSON object of string keys to string values.
///
/// The whole file is loaded on `open` and every mutation stays in memory until
/// `save()`, which writes a sibling temp file and renames it over the target.
pub struct JsonFileFlatStore {
    file_path: path::PathBuf,
    data: BTreeMap<String, String>,
    dirty: bool,
}

impl JsonFileFlatStore {
    /// Open (or prepare to create) the store at `file_path`.
    ///
    /// A missing file is an empty store; its parent directory must exist.
    pub fn open(file_path: path::PathBuf) -> Result<JsonFileFlatStore, FlatStoreError> {
        let parent = match file_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => path::PathBuf::from("."),
        };

        let attr = fs::metadata(&parent).map_err(|err| FlatStoreError::LocationInvalid {
            path: file_path.clone(),
            message: format!("parent directory could not be accessed: {}", err),
        })?;
        if !attr.is_dir() {
            return Err(FlatStoreError::LocationInvalid {
                path: file_path,
                message: "parent path must be a directory".to_string(),
            });
        }

        if file_path.is_dir() {
            return Err(FlatStoreError::LocationInvalid {
                path: file_path,
                message: "store path is a directory".to_string(),
            });
        }

        let data = if file_path.exists() {
            log::debug!("Loading {}...", file_path.display());
            let file = fs::File::open(&file_path)?;
            let reader = io::BufReader::new(file);
            serde_json::from_reader(reader)?
        } else {
            BTreeMap::new()
        };

        Ok(JsonFileFlatStore {
            file_path,
            data,
            dirty: false,
        })
    }

    pub fn file_path(&self) -> &path::Path {
        &self.file_path
    }

    /// All keys currently held, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    fn temp_path(&self) -> path::PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}

impl FlatStore for JsonFileFlatStore {
    fn get_string(&mut self, key: &str) -> Result<Option<String>, FlatStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), FlatStoreError> {
        self.data.insert(key.to_string(), value.to_string());
        self.dirty = true;
        Ok(())
    }

    fn delete_key(&mut self, key: &str) -> Result<(), FlatStoreError> {
        if self.data.remove(key).is_some() {
            self.dirty = true;
        }
        Ok(())
    }

    fn save(&mut self) -> Result<(), FlatStoreError> {
        use io::Write;

        if !self.dirty {
            return Ok(());
        }

        let temp_path = self.temp_path();
        log::debug!("Writing {}...", self.file_path.display());
        {
            let file = fs::File::create(&temp_path)?;
            let mut writer = io::BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &self.data)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&temp_path, &self.file_path)?;

        self.dirty = false;
        Ok(())
    }
}
