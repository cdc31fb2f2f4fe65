use std::fs;
use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use tracing::warn;

use crate::error::GalleryError;

/// Load an image file as a GPU texture, applying the EXIF orientation so
/// camera photos display upright.
pub fn load_texture_with_orientation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    path: &Path,
) -> Result<Texture2D, GalleryError> {
    let bytes = fs::read(path).map_err(|source| GalleryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut image = Image::load_image_from_mem(&(".".to_string() + &extension), &bytes).map_err(
        |e| GalleryError::Texture {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    )?;

    // EXIF is only expected in JPEG files; elsewhere orientation 1 applies.
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(&bytes, path)
    } else {
        1
    };

    // 1 = upright, 3 = 180 deg, 6 = 90 deg CW, 8 = 90 deg CCW.
    // Mirrored orientations (2, 4, 5, 7) are rare and left as-is.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }

    rl.load_texture_from_image(thread, &image)
        .map_err(|e| GalleryError::Texture {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

fn exif_orientation(bytes: &[u8], path: &Path) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            // Not fatal, the image just renders without rotation.
            warn!(path = %path.display(), error = %e, "could not read EXIF data");
            1
        }
    }
}
