//! Applying an organize session or a numbering plan to a PDF
//!
//! Byte-level work is done by `lopdf`; this module only rewires the page
//! tree and appends content streams:
//! 1. Rebuild the page tree in finalized order with rotation deltas applied
//! 2. Stamp visible page labels onto the pages

mod io;
mod organize;
mod stamp;

pub use io::{load_pdf, page_count, save_pdf};
pub use organize::apply_organization;
pub use stamp::stamp_page_numbers;

use crate::editor::PageEntry;
use crate::numbering::PageNumberingPlan;
use crate::options::PageNumberOptions;
use crate::types::*;
use lopdf::{Document, Object, ObjectId};

/// Guard against malformed page trees whose `/Parent` links form a cycle
const MAX_TREE_DEPTH: usize = 64;

/// Rebuild `source` in the given order on a blocking thread
pub async fn organize(source: &Document, order: &[PageEntry]) -> Result<Document> {
    let source = source.clone();
    let order = order.to_vec();

    tokio::task::spawn_blocking(move || apply_organization(&source, &order)).await?
}

/// Stamp page numbers on a blocking thread. Returns the document and the
/// number of labels drawn.
pub async fn number_pages(
    mut doc: Document,
    options: &PageNumberOptions,
) -> Result<(Document, usize)> {
    options.validate()?;
    let options = options.clone();

    tokio::task::spawn_blocking(move || {
        let plan = PageNumberingPlan::new(page_count(&doc), &options);
        let stamped = stamp_page_numbers(&mut doc, &plan, &options)?;
        Ok::<_, OrganizeError>((doc, stamped))
    })
    .await?
}

/// Look up a page attribute on the page itself or, failing that, on its
/// nearest ancestor in the page tree.
pub(crate) fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut current = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = current.get(key) {
            return Some(value.clone());
        }
        let parent = current.get(b"Parent").and_then(Object::as_reference).ok()?;
        current = doc.get_dictionary(parent).ok()?;
    }
    None
}

/// Effective `/Rotate` of a page, normalized to 0..360
pub(crate) fn page_rotation(doc: &Document, page_id: ObjectId) -> i64 {
    inherited_attribute(doc, page_id, b"Rotate")
        .and_then(|value| resolve(doc, value).as_i64().ok())
        .unwrap_or(0)
        .rem_euclid(360)
}

/// Follow a single indirect reference
pub(crate) fn resolve(doc: &Document, object: Object) -> Object {
    match object {
        Object::Reference(id) => doc.get_object(id).cloned().unwrap_or(Object::Null),
        other => other,
    }
}

/// The root `/Pages` node of the document
pub(crate) fn root_pages_id(doc: &Document) -> Result<ObjectId> {
    let catalog_id = doc.trailer.get(b"Root")?.as_reference()?;
    let catalog = doc.get_dictionary(catalog_id)?;
    Ok(catalog.get(b"Pages")?.as_reference()?)
}
