//! File and folder naming
//!
//! Turns raw board titles and mime types into safe, deduplicated archive
//! entry names. The pure functions here are total (they never fail, for any
//! input); [`FileNamer`] carries the per-run collision state.

use std::collections::{HashMap, HashSet};

/// Characters that are illegal in archive entry names, replaced with `_`.
const ILLEGAL_NAME_CHARS: [char; 10] = ['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Name substituted when a title sanitizes down to nothing.
const EMPTY_NAME_FALLBACK: &str = "unnamed";

/// Extension used when the content type is absent or not an image type.
const DEFAULT_EXTENSION: &str = ".png";

/// Make a raw title safe for use as a file or folder name
///
/// Replaces path-illegal characters with `_` and trims surrounding
/// whitespace. Total and deterministic: any input, including the empty
/// string, yields a usable non-empty name.
///
/// # Examples
///
/// ```
/// use board_export::naming::sanitize_name;
///
/// assert_eq!(sanitize_name("Q3 / Roadmap?"), "Q3 _ Roadmap_");
/// assert_eq!(sanitize_name("   "), "unnamed");
/// ```
#[must_use]
pub fn sanitize_name(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| if ILLEGAL_NAME_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let trimmed = replaced.trim();
    if trimmed.is_empty() {
        EMPTY_NAME_FALLBACK.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Derive a file extension from a resolved content type
///
/// Returns `.png` when the content type is absent or does not start with
/// `image/`; otherwise `.` plus the lowercased subtype, except `jpeg`, which
/// maps to the conventional `.jpg`. The extension is always derived here,
/// never trusted from the item's title.
///
/// # Examples
///
/// ```
/// use board_export::naming::extension_for_mime;
///
/// assert_eq!(extension_for_mime(Some("image/jpeg")), ".jpg");
/// assert_eq!(extension_for_mime(Some("image/WebP")), ".webp");
/// assert_eq!(extension_for_mime(Some("application/pdf")), ".png");
/// assert_eq!(extension_for_mime(None), ".png");
/// ```
#[must_use]
pub fn extension_for_mime(mime: Option<&str>) -> String {
    let Some(mime) = mime else {
        return DEFAULT_EXTENSION.to_string();
    };
    let Some(subtype) = mime.strip_prefix("image/") else {
        return DEFAULT_EXTENSION.to_string();
    };
    let subtype = subtype.to_lowercase();
    if subtype == "jpeg" {
        ".jpg".to_string()
    } else {
        format!(".{subtype}")
    }
}

/// Per-run file name allocator
///
/// Uniqueness is scoped per folder: each folder carries its own
/// case-insensitive set of already-used names. Numeric names
/// (`image-NNN.ext`) bypass the set entirely: indices are contiguous per
/// folder, so they are unique by construction.
#[derive(Debug)]
pub struct FileNamer {
    use_item_titles: bool,
    used_by_folder: HashMap<String, HashSet<String>>,
}

impl FileNamer {
    /// Create an allocator for one export run
    #[must_use]
    pub fn new(use_item_titles: bool) -> Self {
        Self {
            use_item_titles,
            used_by_folder: HashMap::new(),
        }
    }

    /// Choose the file name for one archive entry
    ///
    /// # Arguments
    ///
    /// * `folder_name` - The uniqueness scope ("" = archive root)
    /// * `title` - The item's raw title, if any
    /// * `extension` - Extension from [`extension_for_mime`], dot included
    /// * `index_in_folder` - The item's 1-based rank within the folder
    ///
    /// With titles disabled, or when the title is empty after trimming, the
    /// name is `image-NNN.ext`. Otherwise the sanitized title is used,
    /// suffixed `-2`, `-3`, … before the extension until it is unused
    /// (case-insensitively) within the folder. Deterministic given the
    /// sequence of prior calls for the same scope.
    pub fn choose(
        &mut self,
        folder_name: &str,
        title: Option<&str>,
        extension: &str,
        index_in_folder: usize,
    ) -> String {
        if !self.use_item_titles {
            return numeric_name(index_in_folder, extension);
        }

        let base = match title.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => sanitize_name(t),
            None => return numeric_name(index_in_folder, extension),
        };

        let used = self.used_by_folder.entry(folder_name.to_string()).or_default();
        let mut candidate = format!("{base}{extension}");
        let mut n = 1usize;
        while used.contains(&candidate.to_lowercase()) {
            n += 1;
            candidate = format!("{base}-{n}{extension}");
        }
        used.insert(candidate.to_lowercase());
        candidate
    }
}

fn numeric_name(index_in_folder: usize, extension: &str) -> String {
    format!("image-{index_in_folder:03}{extension}")
}
