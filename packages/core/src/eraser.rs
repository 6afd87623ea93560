//! Deleting a node and cleaning up the directories it leaves empty.

use jsondb_flat_store::FlatStore;

use crate::directory::{read_listing, write_listing};
use crate::kind::Property;
use crate::path::parent_of;
use crate::Error;

/// Delete the value and KindTag stored at `path` itself.
///
/// Descendants of a Directory are left where they are; they simply stop
/// being listed anywhere.
pub(crate) fn delete_header<S: FlatStore + ?Sized>(store: &mut S, path: &str) -> Result<(), Error> {
    store.delete_key(path)?;
    store.delete_key(&Property::Type.key_for(path))?;
    Ok(())
}

/// Delete `path`'s header, then unlist it from its parent.
///
/// A parent whose listing becomes empty loses its own header too, and the
/// walk repeats one level up. It stops at the first ancestor that still has
/// children, at an ancestor with no readable listing, or when there is no
/// delimiter left to strip. Listings are read from the store, never from a
/// pending batch. Returns the number of ancestors removed.
pub(crate) fn remove<S: FlatStore + ?Sized>(store: &mut S, path: &str) -> Result<usize, Error> {
    delete_header(store, path)?;

    let mut removed = 0;
    let mut current = path.to_string();
    while let Some(parent) = parent_of(&current) {
        let parent = parent.to_string();

        let mut listing = match read_listing(store, &parent)? {
            Some(listing) => listing,
            None => break,
        };

        match listing.iter().position(|child| *child == current) {
            Some(i) => {
                listing.remove(i);
            }
            None => {
                log::debug!("{} is not listed under {}, stopping", current, parent);
                break;
            }
        }

        if !listing.is_empty() {
            write_listing(store, &parent, &listing)?;
            break;
        }

        log::debug!("{} is now empty, removing it", parent);
        delete_header(store, &parent)?;
        removed += 1;
        current = parent;
    }

    Ok(removed)
}
