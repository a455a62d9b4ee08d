use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use log::warn;
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};
use crate::loader::{ImageLoader, LoadError};

const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

// Tried in order when a bundle name has no extension
const IMPLICIT_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_error = |source| LoadError::Io { path: dir_path.to_path_buf(), source };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && is_supported_image(&path) {
            paths.push(path);
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        Err(LoadError::EmptyDirectory { path: dir_path.to_path_buf() })
    } else {
        Ok(paths)
    }
}

/// Finds the file behind an image name.
///
/// Absolute names and names with a directory part are paths and used as is.
/// Bare names live in `bundle_dir`; when they have no extension the common
/// ones are tried.
pub fn resolve_image_path(name: &str, bundle_dir: &Path) -> Option<PathBuf> {
    let as_path = Path::new(name);
    if as_path.is_absolute() || as_path.components().count() > 1 {
        return as_path.is_file().then(|| as_path.to_path_buf());
    }

    let candidate = bundle_dir.join(name);
    if candidate.is_file() {
        return Some(candidate);
    }
    if as_path.extension().is_some() {
        return None;
    }

    IMPLICIT_EXTENSIONS
        .iter()
        .map(|ext| candidate.with_extension(ext))
        .find(|path| path.is_file())
}

/// EXIF orientation of a JPEG, 1 (normal) when the tag is absent.
pub fn read_orientation(file_bytes: &[u8]) -> Result<u16, exif::Error> {
    let exif = Reader::new().read_from_container(&mut Cursor::new(file_bytes))?;
    let orientation = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| match &field.value {
            Value::Short(values) => values.first().copied(),
            _ => None,
        })
        .unwrap_or(1);
    Ok(orientation)
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D, LoadError> {
    if !is_supported_image(image_path) {
        return Err(LoadError::UnsupportedFormat { path: image_path.to_path_buf() });
    }

    let file_bytes = fs::read(image_path)
        .map_err(|source| LoadError::Io { path: image_path.to_path_buf(), source })?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();

    // EXIF is only read reliably from JPEG
    let mut orientation = 1;
    if extension == "jpg" || extension == "jpeg" {
        match read_orientation(&file_bytes) {
            Ok(value) => orientation = value,
            Err(e) => warn!("Could not read EXIF data for {:?}: {}", image_path, e),
        }
    }

    // Provide extension hint for loading from memory
    let mut image = Image::load_image_from_mem(&(".".to_string() + &extension), &file_bytes)
        .map_err(|e| LoadError::Decode { path: image_path.to_path_buf(), reason: e.to_string() })?;

    // 1 = normal, 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
    // Mirrored orientations are ignored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }

    let texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| LoadError::Texture { path: image_path.to_path_buf(), reason: e.to_string() })?;

    Ok(texture)
}

/// Loads slideshow images as GPU textures. Lives for a single frame since it
/// borrows the raylib handle.
pub struct TextureLoader<'a> {
    rl: &'a mut RaylibHandle,
    thread: &'a RaylibThread,
    bundle_dir: &'a Path,
}

impl<'a> TextureLoader<'a> {
    pub fn new(rl: &'a mut RaylibHandle, thread: &'a RaylibThread, bundle_dir: &'a Path) -> Self {
        Self { rl, thread, bundle_dir }
    }
}

impl ImageLoader for TextureLoader<'_> {
    type Image = Texture2D;

    fn load(&mut self, name: &str) -> Result<Texture2D, LoadError> {
        let path = resolve_image_path(name, self.bundle_dir)
            .ok_or_else(|| LoadError::NotFound { name: name.to_string() })?;
        load_texture_with_exif_rotation(self.rl, self.thread, &path)
    }
}
