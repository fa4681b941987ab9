//! Page tree rebuilding for the organize tool

use super::{inherited_attribute, page_rotation, root_pages_id};
use crate::constants::INHERITABLE_PAGE_KEYS;
use crate::editor::PageEntry;
use crate::types::*;
use lopdf::{Document, Object, ObjectId};
use std::collections::HashSet;

/// Copy pages of `source` into a new document in the order given.
///
/// Each page becomes a direct child of the root `/Pages` node, so attributes
/// it used to inherit from intermediate nodes are copied onto the page first.
/// `/Rotate` becomes `(existing + rotation_delta) mod 360`. Pages missing from
/// `order` are dropped along with any objects only they referenced.
pub fn apply_organization(source: &Document, order: &[PageEntry]) -> Result<Document> {
    if order.is_empty() {
        return Err(OrganizeError::EmptyResult);
    }

    let mut doc = source.clone();
    let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
    let pages_id = root_pages_id(&doc)?;

    let mut seen = HashSet::new();
    let mut kids = Vec::with_capacity(order.len());

    for entry in order {
        let page_id = *page_ids
            .get(entry.source_index)
            .ok_or(OrganizeError::NotFound(entry.source_index))?;
        if !seen.insert(entry.source_index) {
            return Err(OrganizeError::InvalidInput(format!(
                "page {} appears more than once in the output order",
                entry.source_index
            )));
        }

        let inherited: Vec<(&[u8], Object)> = INHERITABLE_PAGE_KEYS
            .into_iter()
            .filter_map(|key| inherited_attribute(&doc, page_id, key).map(|value| (key, value)))
            .collect();
        let rotation = (page_rotation(&doc, page_id) + i64::from(entry.rotation_delta)) % 360;

        let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
        for (key, value) in inherited {
            if !page.has(key) {
                page.set(key, value);
            }
        }
        page.set("Rotate", Object::Integer(rotation));
        page.set("Parent", Object::Reference(pages_id));

        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    let pages = doc.get_object_mut(pages_id)?.as_dict_mut()?;
    pages.set("Kids", Object::Array(kids));
    pages.set("Count", Object::Integer(count));

    let pruned = doc.prune_objects();
    log::debug!(
        "Rebuilt page tree with {} pages, pruned {} objects",
        count,
        pruned.len()
    );

    Ok(doc)
}
