// ABOUTME: Deck assembly for the lesson-slides application
// ABOUTME: Turns a slide request into a fully gathered deck and renders it to a surface

use crate::assets::{AssetSource, DiskAssets};
use crate::config::Config;
use crate::errors::{DeckError, Result};
use crate::lesson::{self, Lesson};
use crate::pdf::{DocumentInfo, PdfSurface};
use crate::renderer::SlideDeckRenderer;
use crate::slide::Slide;
use crate::surface::{RecordedPage, RecordingSurface, Surface};
use crate::theme::{Palette, Theme};
use chrono::{Local, NaiveDate};
use log::info;

pub const DEFAULT_WEEK: u32 = 1;

/// Who a deck is for, in which colors, and which lesson it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckRequest {
    pub name: String,
    pub color: String,
    pub week: u32,
}

impl DeckRequest {
    pub fn new(name: impl Into<String>, color: impl Into<String>, week: u32) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            week,
        }
    }

    /// Read `name`, `color` and `week` from a URL query string.
    ///
    /// Missing or empty values fall back to the configured defaults. A week
    /// that is not a number is rejected.
    pub fn from_query(query: Option<&str>, config: &Config) -> Result<Self> {
        let mut request = Self::new(&config.default_name, &config.default_color, DEFAULT_WEEK);

        let pairs = query
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).collect::<Vec<_>>())
            .unwrap_or_default();
        for (key, value) in pairs {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "name" => request.name = value.into_owned(),
                "color" => request.color = value.into_owned(),
                "week" => {
                    request.week = value.trim().parse().map_err(|_| {
                        DeckError::InvalidRequest(format!("week must be a number, got {:?}", value))
                    })?
                }
                _ => {}
            }
        }

        Ok(request)
    }
}

/// Everything needed to draw a deck, collected before any output is produced.
#[derive(Debug)]
pub struct PreparedDeck {
    pub request: DeckRequest,
    pub lesson: &'static Lesson,
    pub theme: Theme,
    pub palette: Palette,
    pub slides: Vec<Slide>,
    pub generated_on: NaiveDate,
}

/// Resolve the theme and lesson of a request and gather all of its assets.
pub fn prepare(request: DeckRequest, assets: &mut dyn AssetSource) -> Result<PreparedDeck> {
    let theme = Theme::resolve(&request.color);
    let palette = theme.palette();
    let lesson = lesson::find(request.week)?;
    let slides = lesson.slides(&request.name, assets)?;

    Ok(PreparedDeck {
        request,
        lesson,
        theme,
        palette,
        slides,
        generated_on: Local::now().date_naive(),
    })
}

impl PreparedDeck {
    /// Draw every slide onto `surface` and finish it.
    pub fn render<S: Surface>(&self, surface: S) -> Result<S::Output> {
        let mut renderer = SlideDeckRenderer::new(&self.request.name, self.palette, surface)
            .with_date(self.generated_on);
        renderer.add_slides(&self.slides)?;
        info!(
            "Rendered week {} for {} ({} slides, {} pages, background {})",
            self.lesson.week,
            self.request.name,
            self.slides.len(),
            renderer.page_count(),
            self.theme.background
        );
        renderer.end()
    }

    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        self.render(PdfSurface::new(DocumentInfo {
            title: self.lesson.title.to_string(),
            author: self.request.name.clone(),
            created: Some(self.generated_on),
        }))
    }

    /// The deck's draw calls, page by page.
    pub fn outline(&self) -> Result<Vec<RecordedPage>> {
        self.render(RecordingSurface::new())
    }

    /// File name offered to browsers.
    pub fn filename(&self) -> String {
        format!("lesson-week{}.pdf", self.lesson.week)
    }
}

/// Build the PDF for a request from the configured snippet and media directories.
pub fn build_pdf(request: DeckRequest, config: &Config) -> Result<(PreparedDeck, Vec<u8>)> {
    let mut assets = DiskAssets::from_config(config);
    let deck = prepare(request, &mut assets)?;
    let bytes = deck.to_pdf()?;
    Ok((deck, bytes))
}
