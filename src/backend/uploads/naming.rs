//! Stored file names.
//!
//! A stored name is `<unix-millis>-<uuid-simple><.ext>`: unique per upload,
//! sortable by time, and keeping the client's extension (lowercased) so the
//! static file server picks the right content type.

use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Lowercased extension of a client file name, if it has a plain one
pub fn extension_of(original_name: &str) -> Option<String> {
    let ext = Path::new(original_name).extension()?.to_str()?;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// jpg, jpeg, png or gif, in any case
pub fn is_allowed_image(original_name: &str) -> bool {
    extension_of(original_name).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Generate a fresh stored name for an upload
pub fn stored_name(original_name: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let unique = Uuid::new_v4().simple();
    match extension_of(original_name) {
        Some(ext) => format!("{millis}-{unique}.{ext}"),
        None => format!("{millis}-{unique}"),
    }
}

/// A stored name must be a bare file name inside the upload directory
pub fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
        && !name.contains('\0')
}
