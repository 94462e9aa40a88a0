//! Page tree manipulation.
//!
//! Both merge strategies operate on the root `Pages` node: appending the
//! kept pages of each input and rewriting the `Kids` array when pages are
//! dropped. Nested page trees are flattened by working from `get_pages`,
//! which resolves the tree to leaf pages in document order.

use lopdf::{Document, Object, ObjectId};

use crate::error::{PdfStitchError, Result};

/// Replace the root page tree's children with exactly `page_ids`.
pub fn replace_page_tree(doc: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let pages_id = root_pages_id(doc)?;

    let pages_obj = doc
        .get_object_mut(pages_id)
        .map_err(|e| PdfStitchError::merge_failed(format!("Failed to get pages object: {e}")))?;

    if let Object::Dictionary(dict) = pages_obj {
        let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
        dict.set("Kids", Object::Array(kids));
        dict.set("Count", Object::Integer(page_ids.len() as i64));
    } else {
        return Err(PdfStitchError::merge_failed(
            "Pages object is not a dictionary",
        ));
    }

    Ok(())
}

/// Append `page_ids` to the root page tree's children.
pub fn append_pages(doc: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
    let pages_id = root_pages_id(doc)?;

    let pages_obj = doc
        .get_object_mut(pages_id)
        .map_err(|e| PdfStitchError::merge_failed(format!("Failed to get pages object: {e}")))?;

    if let Object::Dictionary(dict) = pages_obj {
        let kids = dict
            .get_mut(b"Kids")
            .map_err(|_| PdfStitchError::merge_failed("Pages dictionary missing Kids array"))?;

        if let Object::Array(kids_array) = kids {
            for &page_id in page_ids {
                kids_array.push(Object::Reference(page_id));
            }
        } else {
            return Err(PdfStitchError::merge_failed("Kids is not an array"));
        }

        let current_count = dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
        dict.set("Count", Object::Integer(current_count + page_ids.len() as i64));
    } else {
        return Err(PdfStitchError::merge_failed(
            "Pages object is not a dictionary",
        ));
    }

    Ok(())
}

fn root_pages_id(doc: &mut Document) -> Result<ObjectId> {
    let catalog = doc
        .catalog_mut()
        .map_err(|e| PdfStitchError::merge_failed(format!("Failed to get catalog: {e}")))?;

    catalog
        .get(b"Pages")
        .and_then(|p| p.as_reference())
        .map_err(|e| PdfStitchError::merge_failed(format!("Failed to get pages reference: {e}")))
}
