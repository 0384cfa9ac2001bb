/// File categorization by extension.
///
/// This module maps a file extension to one of six fixed categories using a
/// static lookup table. The table is process-wide, read-only data: there is no
/// way to add or change a mapping at runtime.
///
/// # Examples
///
/// ```
/// use dirsort::file_category::{Category, get_category};
///
/// assert_eq!(get_category(Some("pdf")), Category::Documents);
/// assert_eq!(get_category(Some(".JPG")), Category::Images);
/// assert_eq!(get_category(Some("xyz")), Category::Autres);
/// assert_eq!(get_category(None), Category::Autres);
/// ```
use serde::Serialize;
use std::fmt;

/// Extensions whose length in bytes, counting their leading dot, reaches
/// this limit are never looked up and fall into [`Category::Autres`].
pub const MAX_EXTENSION_LENGTH: usize = 32;

/// A destination category.
///
/// Each category is also the name of the subfolder files are moved into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    /// PDF, office and plain text documents
    Documents,
    /// Raster and vector images
    Images,
    /// Video containers
    Videos,
    /// Audio files
    Music,
    /// Compressed archives and disk images
    Archives,
    /// Everything else, including files without an extension
    Autres,
}

impl Category {
    /// Every category, in table order.
    pub const ALL: [Category; 6] = [
        Category::Documents,
        Category::Images,
        Category::Videos,
        Category::Music,
        Category::Archives,
        Category::Autres,
    ];

    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::file_category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "Images");
    /// assert_eq!(Category::Autres.dir_name(), "Autres");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Documents => "Documents",
            Category::Images => "Images",
            Category::Videos => "Videos",
            Category::Music => "Music",
            Category::Archives => "Archives",
            Category::Autres => "Autres",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// The extension table. Lookup is linear and the first match wins; no
/// extension appears twice.
static EXTENSION_MAP: &[(&str, Category)] = &[
    ("pdf", Category::Documents),
    ("docx", Category::Documents),
    ("txt", Category::Documents),
    ("xlsx", Category::Documents),
    ("pptx", Category::Documents),
    ("doc", Category::Documents),
    ("odt", Category::Documents),
    ("rtf", Category::Documents),
    ("jpg", Category::Images),
    ("jpeg", Category::Images),
    ("png", Category::Images),
    ("gif", Category::Images),
    ("bmp", Category::Images),
    ("svg", Category::Images),
    ("webp", Category::Images),
    ("ico", Category::Images),
    ("mp4", Category::Videos),
    ("mkv", Category::Videos),
    ("avi", Category::Videos),
    ("mov", Category::Videos),
    ("wmv", Category::Videos),
    ("flv", Category::Videos),
    ("webm", Category::Videos),
    ("m4v", Category::Videos),
    ("mp3", Category::Music),
    ("wav", Category::Music),
    ("flac", Category::Music),
    ("aac", Category::Music),
    ("ogg", Category::Music),
    ("wma", Category::Music),
    ("m4a", Category::Music),
    ("opus", Category::Music),
    ("zip", Category::Archives),
    ("tar", Category::Archives),
    ("gz", Category::Archives),
    ("rar", Category::Archives),
    ("7z", Category::Archives),
    ("bz2", Category::Archives),
    ("xz", Category::Archives),
    ("iso", Category::Archives),
];

/// Returns true if the bare extension `ext` is short enough to be
/// classified. The limit applies to the extension together with its dot,
/// so at most `MAX_EXTENSION_LENGTH - 2` bytes of `ext` are accepted.
pub fn is_extension_safe(ext: &str) -> bool {
    ext.len() + 1 < MAX_EXTENSION_LENGTH
}

/// Maps a file extension to its category.
///
/// The comparison ignores ASCII case and a single leading dot, so `"png"`,
/// `".PNG"` and `"Png"` all resolve to [`Category::Images`]. Absent, empty,
/// overlong and unknown extensions resolve to [`Category::Autres`].
pub fn get_category(extension: Option<&str>) -> Category {
    let Some(ext) = extension else {
        return Category::Autres;
    };
    let ext = ext.strip_prefix('.').unwrap_or(ext);
    if ext.is_empty() || !is_extension_safe(ext) {
        return Category::Autres;
    }

    EXTENSION_MAP
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|&(_, category)| category)
        .unwrap_or(Category::Autres)
}

/// Extracts the extension from a bare file name.
///
/// The extension is the text after the last dot. A name without a dot, or
/// whose only dot is the leading one, has no extension. A trailing dot gives
/// an empty extension.
///
/// # Examples
///
/// ```
/// use dirsort::file_category::extract_extension;
///
/// assert_eq!(extract_extension("report.final.PDF"), Some("PDF"));
/// assert_eq!(extract_extension("archive"), None);
/// assert_eq!(extract_extension("notes."), Some(""));
/// ```
pub fn extract_extension(name: &str) -> Option<&str> {
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&name[idx + 1..]),
    }
}
