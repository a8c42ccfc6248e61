// SPDX-License-Identifier: MPL-2.0
//! Image asset discovery and source resolution.
//!
//! Slides enter the gallery as already-resolved sources: local files found
//! by scanning a directory, or CDN delivery URLs built from a static
//! file-name mapping. The gallery core is agnostic to which one it gets.

pub mod transform;

pub use transform::{CropMode, DeliveryFormat, Gravity, ImageTransform, Quality};

use crate::error::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Supported gallery image extensions (case-insensitive).
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// A resolved slide reference, ready for display or fetching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlideSource {
    /// Image file on the local filesystem.
    Local(PathBuf),
    /// Image served from the configured CDN.
    Remote(String),
}

/// Checks if a file has a supported image extension.
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let lower = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&lower.as_str())
        })
}

/// Scans a directory for supported image files, sorted by file name.
///
/// Non-image entries are skipped silently; the resulting order is the
/// fixed slide order for the session.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn scan_images(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();

    for entry in std::fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() && is_supported_image(&path) {
            images.push(path);
        }
    }

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

/// Maps scanned file names to CDN delivery URLs.
///
/// The mapping table comes from configuration (uploads often get a random
/// suffix on the CDN); file names without an entry fall back to the bare
/// file name, matching the uploader's flat layout.
#[derive(Debug, Clone)]
pub struct CdnResolver {
    cloud_name: String,
    map: HashMap<String, String>,
    transform: ImageTransform,
}

impl CdnResolver {
    /// Creates a resolver for the given cloud name.
    #[must_use]
    pub fn new(
        cloud_name: String,
        map: HashMap<String, String>,
        transform: ImageTransform,
    ) -> Self {
        Self {
            cloud_name,
            map,
            transform,
        }
    }

    /// Returns the delivery URL for a scanned file name.
    #[must_use]
    pub fn resolve(&self, file_name: &str) -> String {
        let mapped = self
            .map
            .get(file_name)
            .map_or(file_name, String::as_str);
        transform::delivery_url(&self.cloud_name, mapped, &self.transform)
    }
}

/// Resolves scanned paths into slide sources.
///
/// With a resolver, every path becomes a CDN URL keyed by its file name;
/// without one, paths are served locally (the no-CDN fallback).
#[must_use]
pub fn resolve_sources(paths: Vec<PathBuf>, cdn: Option<&CdnResolver>) -> Vec<SlideSource> {
    match cdn {
        Some(resolver) => paths
            .into_iter()
            .map(|path| {
                let file_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default();
                SlideSource::Remote(resolver.resolve(file_name))
            })
            .collect(),
        None => paths.into_iter().map(SlideSource::Local).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;

    fn create_test_image(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).expect("failed to create test file");
        file.write_all(b"fake image data")
            .expect("failed to write test file");
        path
    }

    #[test]
    fn is_supported_image_recognizes_extensions() {
        assert!(is_supported_image(Path::new("a.jpg")));
        assert!(is_supported_image(Path::new("a.JPG")));
        assert!(is_supported_image(Path::new("a.jpeg")));
        assert!(is_supported_image(Path::new("a.png")));
        assert!(is_supported_image(Path::new("a.webp")));
        assert!(!is_supported_image(Path::new("a.txt")));
        assert!(!is_supported_image(Path::new("a.mp4")));
        assert!(!is_supported_image(Path::new("noext")));
    }

    #[test]
    fn scan_images_finds_and_sorts_images() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let img_c = create_test_image(temp_dir.path(), "c.jpg");
        let img_a = create_test_image(temp_dir.path(), "a.png");
        let img_b = create_test_image(temp_dir.path(), "b.webp");
        create_test_image(temp_dir.path(), "notes.txt");

        let images = scan_images(temp_dir.path()).expect("scan failed");

        assert_eq!(images, vec![img_a, img_b, img_c]);
    }

    #[test]
    fn scan_images_handles_empty_directory() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let images = scan_images(temp_dir.path()).expect("scan failed");
        assert!(images.is_empty());
    }

    #[test]
    fn scan_images_fails_on_missing_directory() {
        assert!(scan_images(Path::new("/nonexistent/gallery")).is_err());
    }

    #[test]
    fn resolve_sources_without_cdn_stays_local() {
        let paths = vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg")];
        let sources = resolve_sources(paths.clone(), None);

        assert_eq!(
            sources,
            vec![
                SlideSource::Local(paths[0].clone()),
                SlideSource::Local(paths[1].clone())
            ]
        );
    }

    #[test]
    fn resolve_sources_with_cdn_builds_urls() {
        let mut map = HashMap::new();
        map.insert("a.jpg".to_string(), "a_x7kq2p.jpg".to_string());

        let resolver = CdnResolver::new("demo".to_string(), map, ImageTransform::default());
        let sources = resolve_sources(
            vec![PathBuf::from("/photos/a.jpg"), PathBuf::from("/photos/b.jpg")],
            Some(&resolver),
        );

        assert_eq!(
            sources,
            vec![
                SlideSource::Remote(
                    "https://res.cloudinary.com/demo/image/upload/a_x7kq2p.jpg".to_string()
                ),
                // Unmapped names fall back to the bare file name
                SlideSource::Remote(
                    "https://res.cloudinary.com/demo/image/upload/b.jpg".to_string()
                ),
            ]
        );
    }
}
