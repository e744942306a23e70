// ABOUTME: Asset loading for the lesson-slides application
// ABOUTME: Reads code snippets and slide images from disk, caching them per deck

use crate::config::Config;
use crate::errors::{DeckError, Result};
use crate::slide::SlideImage;
use crate::utils;
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Where lesson scripts get their snippet text and images from.
pub trait AssetSource {
    /// Source text of a code snippet, by file name.
    fn snippet(&mut self, name: &str) -> Result<String>;

    /// A decoded image, by file name.
    fn image(&mut self, name: &str) -> Result<SlideImage>;
}

/// Assets read from a snippet directory and a media directory.
///
/// Each file is read at most once per instance; a lesson that shows the
/// same snippet on several slides shares the text.
#[derive(Debug)]
pub struct DiskAssets {
    snippets_dir: PathBuf,
    media_dir: PathBuf,
    snippets: HashMap<String, String>,
    images: HashMap<String, SlideImage>,
}

impl DiskAssets {
    pub fn new(snippets_dir: impl Into<PathBuf>, media_dir: impl Into<PathBuf>) -> Self {
        Self {
            snippets_dir: snippets_dir.into(),
            media_dir: media_dir.into(),
            snippets: HashMap::new(),
            images: HashMap::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.snippets_dir, &config.media_dir)
    }

    fn read(base: &Path, name: &str) -> Result<Vec<u8>> {
        let path = utils::resolve_asset_path(base, name)?;
        utils::validate_file_exists(&path)?;
        debug!("Reading asset {:?}", path);
        Ok(fs::read(&path)?)
    }
}

impl AssetSource for DiskAssets {
    fn snippet(&mut self, name: &str) -> Result<String> {
        if let Some(text) = self.snippets.get(name) {
            return Ok(text.clone());
        }
        let bytes = Self::read(&self.snippets_dir, name)?;
        let text = String::from_utf8(bytes).map_err(|e| {
            DeckError::ValidationError(format!("Snippet {} is not UTF-8: {}", name, e))
        })?;
        self.snippets.insert(name.to_string(), text.clone());
        Ok(text)
    }

    fn image(&mut self, name: &str) -> Result<SlideImage> {
        if let Some(image) = self.images.get(name) {
            return Ok(image.clone());
        }
        let bytes = Self::read(&self.media_dir, name)?;
        let image = SlideImage::decode(name, &bytes)?;
        self.images.insert(name.to_string(), image.clone());
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_reads_and_caches_snippets() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("hello.js");
        fs::write(&path, "console.log('hi');\n").expect("Failed to write snippet");

        let mut assets = DiskAssets::new(dir.path(), dir.path());
        assert_eq!(assets.snippet("hello.js").unwrap(), "console.log('hi');\n");

        // served from the cache once read
        fs::remove_file(&path).expect("Failed to remove snippet");
        assert!(assets.snippet("hello.js").is_ok());
    }

    #[test]
    fn test_missing_snippet_is_path_not_found() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut assets = DiskAssets::new(dir.path(), dir.path());
        assert!(matches!(
            assets.snippet("nope.js"),
            Err(DeckError::PathNotFoundError(_))
        ));
    }

    #[test]
    fn test_refuses_paths_outside_the_base() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut assets = DiskAssets::new(dir.path(), dir.path());
        assert!(matches!(
            assets.snippet("../etc/passwd"),
            Err(DeckError::ValidationError(_))
        ));
        assert!(assets.image("/etc/hosts").is_err());
    }

    #[test]
    fn test_decodes_images_once() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let img = ImageBuffer::from_fn(4, 3, |_, _| Rgb([10u8, 20u8, 30u8]));
        img.save(dir.path().join("dot.png"))
            .expect("Failed to save image");

        let mut assets = DiskAssets::new(dir.path(), dir.path());
        let first = assets.image("dot.png").unwrap();
        let second = assets.image("dot.png").unwrap();
        assert_eq!((first.width, first.height), (4, 3));
        assert_eq!(&first.pixels[..3], &[10, 20, 30]);
        assert!(Arc::ptr_eq(&first.pixels, &second.pixels));
    }

    #[test]
    fn test_undecodable_image_is_an_image_error() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(dir.path().join("broken.png"), b"not a png").expect("Failed to write file");
        let mut assets = DiskAssets::new(dir.path(), dir.path());
        assert!(matches!(
            assets.image("broken.png"),
            Err(DeckError::ImageError(_))
        ));
    }
}
