//! Rebuilding a document from flat entries.

use jsondb_flat_store::FlatStore;
use serde_json::Value as JsonValue;

use crate::document::Document;
use crate::path::{is_array_index_name, is_descendant, leaf_name};
use crate::Error;

/// Read the document rooted at `path`.
///
/// A missing path reads as `Null`. A stored array is a Directory listing and
/// is resolved child by child; anything else is a Leaf.
///
/// Whether a Directory comes back as an array or an object is decided from
/// its children's trailing names, in listing order: as long as every name is
/// `[0]`..`[9]` it is an array of the child values. The first name that is
/// not turns the whole node into an object keyed by trailing name, including
/// the children already seen.
pub(crate) fn get_document<S: FlatStore + ?Sized>(
    store: &mut S,
    path: &str,
) -> Result<Document, Error> {
    let raw = match store.get_string(path)? {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(Document::Null),
    };

    let listing = match serde_json::from_str::<JsonValue>(&raw) {
        Ok(JsonValue::Array(listing)) => listing,
        Ok(leaf) => return Ok(Document::from_json_detecting_dates(leaf)),
        Err(err) => {
            log::warn!("Leaf at {} is unreadable: {}", path, err);
            return Ok(Document::Null);
        }
    };

    let mut array_mode = true;
    let mut children = Vec::with_capacity(listing.len());
    for entry in listing {
        let child = match entry {
            JsonValue::String(child) if is_descendant(path, &child) => child,
            other => {
                log::warn!("Skipping bad entry {} in listing of {}", other, path);
                continue;
            }
        };

        let name = leaf_name(&child).to_string();
        if array_mode && !is_array_index_name(&name) {
            array_mode = false;
        }

        let value = get_document(store, &child)?;
        children.push((name, value));
    }

    Ok(if array_mode {
        Document::Array(children.into_iter().map(|(_, value)| value).collect())
    } else {
        Document::Object(children.into_iter().collect())
    })
}
