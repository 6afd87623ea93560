//! Decomposing a document into Leaf and Directory entries.

use jsondb_flat_store::FlatStore;

use crate::directory::DirBatch;
use crate::document::{format_date, Document};
use crate::eraser;
use crate::kind::{self, Kind};
use crate::path::{make_array, make_path};
use crate::Error;

/// Write `document` at `path`, registering every child path in `batch`.
///
/// Leaves are written straight away; Directory listings wait in `batch` for
/// the caller to flush. An empty array becomes an empty Directory and an
/// empty object the `{}` leaf, so neither reads back as null.
pub(crate) fn put_document<S: FlatStore + ?Sized>(
    store: &mut S,
    batch: &mut DirBatch,
    path: &str,
    document: &Document,
) -> Result<(), Error> {
    match document {
        Document::Object(fields) if !fields.is_empty() => {
            for (name, child) in fields {
                let child_path = make_path(path, name);
                batch.register(store, path, &child_path)?;
                put_document(store, batch, &child_path, child)?;
            }
        }
        Document::Array(items) if !items.is_empty() => {
            for (i, child) in items.iter().enumerate() {
                let child_path = make_array(path, i);
                batch.register(store, path, &child_path)?;
                put_document(store, batch, &child_path, child)?;
            }
        }
        Document::Array(_) => {
            batch.open(store, path);
        }
        _ => put_leaf(store, batch, path, document)?,
    }
    Ok(())
}

/// Replace whatever is at `path` with a single Leaf.
fn put_leaf<S: FlatStore + ?Sized>(
    store: &mut S,
    batch: &mut DirBatch,
    path: &str,
    document: &Document,
) -> Result<(), Error> {
    if kind::kind_of(store, Some(&*batch), path)? == Kind::Dir {
        log::debug!("Replacing directory {} with a leaf", path);
        batch.forget(path);
        eraser::remove(store, path)?;
    }

    let literal = encode_leaf(path, document)?;
    log::debug!("Writing leaf {}", path);
    store.set_string(path, &literal)?;
    kind::tag(store, path, Kind::Obj)
}

/// The stored literal for a scalar: strings and dates quoted, everything else
/// in its plain JSON form.
pub(crate) fn encode_leaf(path: &str, document: &Document) -> Result<String, Error> {
    let encoded = match document {
        Document::Null => Ok("null".to_string()),
        Document::Bool(b) => Ok(b.to_string()),
        Document::Number(n) => Ok(n.to_string()),
        Document::String(s) => serde_json::to_string(s),
        Document::Date(d) => serde_json::to_string(&format_date(d)),
        Document::Object(fields) if fields.is_empty() => Ok("{}".to_string()),
        Document::Array(_) | Document::Object(_) => {
            return Err(Error::Encode {
                path: path.to_string(),
                message: "containers are stored as directories, not leaves".to_string(),
            })
        }
    };

    encoded.map_err(|err| Error::Encode {
        path: path.to_string(),
        message: err.to_string(),
    })
}
