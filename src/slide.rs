use std::path::PathBuf;

/// One unit of carousel content. The deck is fixed for the lifetime of the
/// controller; only which slide is active ever changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub id: String,
    pub title: String,
    pub source: PathBuf,
    pub tags: Vec<String>,
}

impl Slide {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        source: PathBuf,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            source,
            tags,
        }
    }

    /// Slide with id and title taken from the file stem, no tags.
    pub fn from_path(source: PathBuf) -> Self {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            id: stem.clone(),
            title: stem,
            source,
            tags: Vec::new(),
        }
    }
}
