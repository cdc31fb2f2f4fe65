use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::error::GalleryError;
use crate::slide::Slide;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Build the slide deck from `path`: a `.toml` manifest when given one,
/// otherwise a directory scanned for image files sorted by file name.
pub fn load_deck(path: &Path, shuffle: bool) -> Result<Vec<Slide>, GalleryError> {
    let mut slides = if path.extension().is_some_and(|e| e == "toml") {
        load_manifest(path)?
    } else {
        scan_directory(path)?
    };
    if slides.is_empty() {
        return Err(GalleryError::EmptyDeck(path.to_path_buf()));
    }
    if shuffle {
        slides.shuffle(&mut rand::rng());
    }
    Ok(slides)
}

/// Every recognized image file in `dir`, sorted by file name. Titles come
/// from the file stem.
fn scan_directory(dir: &Path) -> Result<Vec<Slide>, GalleryError> {
    let entries = fs::read_dir(dir).map_err(|source| GalleryError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| GalleryError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && is_image_file(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(paths.into_iter().map(Slide::from_path).collect())
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    slide: Vec<ManifestSlide>,
}

#[derive(Debug, Deserialize)]
struct ManifestSlide {
    id: Option<String>,
    title: String,
    path: PathBuf,
    #[serde(default)]
    tags: Vec<String>,
}

/// Slides declared in a TOML manifest. Relative image paths are resolved
/// against the manifest's directory.
fn load_manifest(path: &Path) -> Result<Vec<Slide>, GalleryError> {
    let text = fs::read_to_string(path).map_err(|source| GalleryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: Manifest = toml::from_str(&text).map_err(|source| GalleryError::Manifest {
        path: path.to_path_buf(),
        source,
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(manifest
        .slide
        .into_iter()
        .map(|s| manifest_slide(s, base))
        .collect())
}

fn manifest_slide(entry: ManifestSlide, base: &Path) -> Slide {
    let source = if entry.path.is_absolute() {
        entry.path
    } else {
        base.join(entry.path)
    };
    let id = entry.id.unwrap_or_else(|| {
        source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    Slide::new(id, entry.title, source, entry.tags)
}
