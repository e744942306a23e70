use image::{ImageBuffer, Rgb};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Images the week 1 lesson shows.
pub const WEEK_ONE_MEDIA: [&str; 7] = [
    "datacenter.jpg",
    "screenshot-facebook.png",
    "screenshot-flights.png",
    "screenshot-instagram-app.jpg",
    "generate-html.png",
    "generate-json.png",
    "generate-pdf.png",
];

pub fn snippets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("snippets")
}

/// A media directory holding a small generated picture for every week 1 image.
pub fn create_media_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (index, name) in WEEK_ONE_MEDIA.iter().enumerate() {
        let shade = (index * 30) as u8;
        let img = ImageBuffer::from_fn(64 + index as u32 * 8, 48, |x, y| {
            Rgb([shade, (x * 4) as u8, (y * 5) as u8])
        });
        img.save(dir.path().join(name))
            .expect("Failed to save test image");
    }
    dir
}

pub fn count(haystack: &[u8], needle: &str) -> usize {
    haystack
        .windows(needle.len())
        .filter(|window| *window == needle.as_bytes())
        .count()
}
