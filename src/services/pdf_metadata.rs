//! Document information scrubbing.
//!
//! Blanks the classic `/Info` properties of a PDF and detaches the catalog's
//! XMP `/Metadata` stream, which viewers would otherwise fall back to.

use lopdf::{Dictionary, Document, Object};
use tracing::debug;

use crate::services::error::MetadataError;

pub const CLEARED_INFO_KEYS: [&str; 6] = [
    "Title", "Author", "Subject", "Keywords", "Producer", "Creator",
];

/// Returns `bytes` re-serialized with the document properties cleared.
pub fn strip_metadata(bytes: &[u8]) -> Result<Vec<u8>, MetadataError> {
    let mut doc = Document::load_mem(bytes).map_err(|e| MetadataError::Parse(e.to_string()))?;

    clear_info_dictionary(&mut doc)?;
    let removed_xmp = detach_xmp_metadata(&mut doc)?;
    debug!("Cleared document info (xmp removed: {})", removed_xmp);

    let mut output = Vec::with_capacity(bytes.len());
    doc.save_to(&mut output)
        .map_err(|e| MetadataError::Serialize(e.to_string()))?;
    Ok(output)
}

fn clear_info_dictionary(doc: &mut Document) -> Result<(), MetadataError> {
    let existing = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => Some(Some(*id)),
        Ok(Object::Dictionary(_)) => Some(None),
        Ok(_) => {
            return Err(MetadataError::Structure(
                "trailer /Info is neither a dictionary nor a reference".to_string(),
            ))
        }
        Err(_) => None,
    };

    // Inline dictionaries are edited in the trailer itself.
    let info_ref = match existing {
        Some(info_ref) => info_ref,
        None => {
            let id = doc.add_object(Dictionary::new());
            doc.trailer.set("Info", Object::Reference(id));
            Some(id)
        }
    };

    let info = match info_ref {
        Some(id) => doc
            .get_object_mut(id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| MetadataError::Structure(format!("/Info object: {}", e)))?,
        None => doc
            .trailer
            .get_mut(b"Info")
            .and_then(Object::as_dict_mut)
            .map_err(|e| MetadataError::Structure(format!("/Info dictionary: {}", e)))?,
    };

    for key in CLEARED_INFO_KEYS {
        info.set(key, Object::string_literal(""));
    }

    Ok(())
}

fn detach_xmp_metadata(doc: &mut Document) -> Result<bool, MetadataError> {
    let root_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|e| MetadataError::Structure(format!("/Root: {}", e)))?;

    let catalog = doc
        .get_object_mut(root_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| MetadataError::Structure(format!("catalog: {}", e)))?;

    let removed = catalog.remove(b"Metadata");
    if let Some(Object::Reference(stream_id)) = &removed {
        doc.objects.remove(stream_id);
    }

    Ok(removed.is_some())
}
