// ABOUTME: Library module for the lesson-slides program.
// ABOUTME: Contains the slide model, renderer, PDF output, lesson scripts and HTTP server.

// Reexport modules
pub mod assets;
pub mod config;
pub mod deck;
pub mod errors;
pub mod icons;
pub mod layout;
pub mod lesson;
pub mod pdf;
pub mod renderer;
pub mod server;
pub mod slide;
pub mod surface;
pub mod theme;
pub mod utils;

// Reexport common types and functions
pub use assets::{AssetSource, DiskAssets};
pub use config::Config;
pub use deck::{build_pdf, prepare, DeckRequest, PreparedDeck};
pub use errors::{DeckError, Result};
pub use lesson::{Lesson, LESSONS};
pub use pdf::{DocumentInfo, PdfSurface};
pub use renderer::{SlideDeckRenderer, PAGE_HEIGHT, PAGE_WIDTH};
pub use server::{serve, App, HttpServer, Reply};
pub use slide::{CodeOptions, HighlightSet, Slide, SlideImage};
pub use surface::{RecordedPage, RecordingSurface, Surface};
pub use theme::{Palette, Rgb, Theme};

#[cfg(test)]
mod tests;
