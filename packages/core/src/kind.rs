//! Per-path KindTags: is the entry at a path a Directory or a Leaf?
//!
//! Tags live beside the data under `"TYPE:" + path` and hold an integer code.

use jsondb_flat_store::FlatStore;

use crate::directory::DirBatch;
use crate::Error;

/// What is physically stored at a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Nothing is tagged at the path.
    Null,
    /// A Directory listing of child paths.
    Dir,
    /// A Leaf holding one scalar.
    Obj,
}

const DIR_CODE: i64 = b'd' as i64;
const OBJ_CODE: i64 = b'o' as i64;

impl Kind {
    /// The integer stored in the tag entry, or `None` for `Kind::Null`.
    pub fn code(self) -> Option<i64> {
        match self {
            Kind::Null => None,
            Kind::Dir => Some(DIR_CODE),
            Kind::Obj => Some(OBJ_CODE),
        }
    }

    pub fn from_code(code: i64) -> Kind {
        match code {
            DIR_CODE => Kind::Dir,
            OBJ_CODE => Kind::Obj,
            _ => Kind::Null,
        }
    }
}

/// Side properties tagged on a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    /// The KindTag.
    Type,
}

impl Property {
    pub fn prefix(self) -> &'static str {
        match self {
            Property::Type => "TYPE:",
        }
    }

    /// The flat key holding this property for `path`.
    pub fn key_for(self, path: &str) -> String {
        format!("{}{}", self.prefix(), path)
    }
}

/// Report what is stored at `path`.
///
/// A path waiting in `batch` is a Directory even though nothing has been
/// written for it yet.
pub fn kind_of<S: FlatStore + ?Sized>(
    store: &mut S,
    batch: Option<&DirBatch>,
    path: &str,
) -> Result<Kind, Error> {
    if batch.is_some_and(|b| b.contains(path)) {
        return Ok(Kind::Dir);
    }

    let raw = match store.get_string(&Property::Type.key_for(path))? {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(Kind::Null),
    };

    match raw.trim().parse::<i64>() {
        Ok(code) => {
            let kind = Kind::from_code(code);
            if kind == Kind::Null {
                log::warn!("Unknown kind code {} tagged on {}", code, path);
            }
            Ok(kind)
        }
        Err(_) => {
            log::warn!("Unreadable kind tag {:?} on {}", raw, path);
            Ok(Kind::Null)
        }
    }
}

/// Record `kind` for `path`.
pub(crate) fn tag<S: FlatStore + ?Sized>(store: &mut S, path: &str, kind: Kind) -> Result<(), Error> {
    let key = Property::Type.key_for(path);
    match kind.code() {
        Some(code) => store.set_string(&key, &code.to_string())?,
        None => store.delete_key(&key)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsondb_flat_store::InMemoryFlatStore;

    #[test]
    fn codes_match_reserved_characters() {
        assert_eq!(Kind::Dir.code(), Some(100));
        assert_eq!(Kind::Obj.code(), Some(111));
        assert_eq!(Kind::Null.code(), None);

        assert_eq!(Kind::from_code(100), Kind::Dir);
        assert_eq!(Kind::from_code(111), Kind::Obj);
        assert_eq!(Kind::from_code(0), Kind::Null);
    }

    #[test]
    fn property_key_is_prefixed() {
        assert_eq!(Property::Type.key_for("root\\a"), "TYPE:root\\a");
    }

    #[test]
    fn tag_then_read() {
        let mut store = InMemoryFlatStore::new();

        tag(&mut store, "root\\a", Kind::Obj).unwrap();
        assert_eq!(kind_of(&mut store, None, "root\\a").unwrap(), Kind::Obj);
        assert_eq!(
            store.entries().get("TYPE:root\\a").map(String::as_str),
            Some("111")
        );

        tag(&mut store, "root\\a", Kind::Null).unwrap();
        assert_eq!(kind_of(&mut store, None, "root\\a").unwrap(), Kind::Null);
        assert!(store.is_empty());
    }

    #[test]
    fn untagged_path_is_null() {
        let mut store = InMemoryFlatStore::new();
        assert_eq!(kind_of(&mut store, None, "root\\missing").unwrap(), Kind::Null);
    }

    #[test]
    fn garbage_tag_is_null() {
        let mut store = InMemoryFlatStore::new();
        store.set_string("TYPE:root\\a", "\"what\"").unwrap();
        assert_eq!(kind_of(&mut store, None, "root\\a").unwrap(), Kind::Null);
    }

    #[test]
    fn pending_directory_reads_as_dir() {
        let mut store = InMemoryFlatStore::new();
        let mut batch = DirBatch::new();
        batch.register(&mut store, "root", "root\\a").unwrap();

        assert_eq!(kind_of(&mut store, Some(&batch), "root").unwrap(), Kind::Dir);
        assert_eq!(kind_of(&mut store, None, "root").unwrap(), Kind::Null);
    }
}
