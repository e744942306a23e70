// ABOUTME: Slide model for the lesson-slides application
// ABOUTME: Defines the slide variants, code-slide options and decoded slide images

use crate::errors::{DeckError, Result};
use crate::surface::{Face, Span};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Opacity of code lines outside a non-empty highlight set.
pub const DIMMED_OPACITY: f32 = 0.3;

/// Opacity of the line-number gutter, whatever the highlight state.
pub const GUTTER_OPACITY: f32 = 0.2;

/// One slide of a deck. Each variant is drawn on a page of its own.
#[derive(Debug, Clone)]
pub enum Slide {
    Title {
        title: String,
        subtitle: Option<String>,
        font_size: Option<f32>,
    },
    Intro {
        title: String,
        subtitle: String,
        font_size: Option<f32>,
    },
    Icon {
        title: String,
        icon: String,
        font_size: Option<f32>,
    },
    Text {
        title: String,
        body: String,
        font_size: Option<f32>,
    },
    Quote {
        title: String,
        body: String,
        citation: String,
        font_size: Option<f32>,
    },
    Image {
        image: SlideImage,
        attribution: String,
        font_size: Option<f32>,
    },
    Bullets {
        title: String,
        bullets: Vec<String>,
        font_size: Option<f32>,
    },
    Code {
        title: String,
        code: String,
        options: CodeOptions,
    },
}

impl Slide {
    pub fn title(title: impl Into<String>) -> Self {
        Slide::Title {
            title: title.into(),
            subtitle: None,
            font_size: None,
        }
    }

    pub fn subtitled(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Slide::Title {
            title: title.into(),
            subtitle: Some(subtitle.into()),
            font_size: None,
        }
    }

    pub fn intro(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Slide::Intro {
            title: title.into(),
            subtitle: subtitle.into(),
            font_size: None,
        }
    }

    pub fn icon(title: impl Into<String>, icon: impl Into<String>) -> Self {
        Slide::Icon {
            title: title.into(),
            icon: icon.into(),
            font_size: None,
        }
    }

    pub fn text(title: impl Into<String>, body: impl Into<String>) -> Self {
        Slide::Text {
            title: title.into(),
            body: body.into(),
            font_size: None,
        }
    }

    pub fn quote(
        title: impl Into<String>,
        body: impl Into<String>,
        citation: impl Into<String>,
    ) -> Self {
        Slide::Quote {
            title: title.into(),
            body: body.into(),
            citation: citation.into(),
            font_size: None,
        }
    }

    pub fn image(image: SlideImage, attribution: impl Into<String>) -> Self {
        Slide::Image {
            image,
            attribution: attribution.into(),
            font_size: None,
        }
    }

    pub fn bullets<I, T>(title: impl Into<String>, bullets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Slide::Bullets {
            title: title.into(),
            bullets: bullets.into_iter().map(Into::into).collect(),
            font_size: None,
        }
    }

    pub fn code(title: impl Into<String>, code: impl Into<String>) -> Self {
        Self::code_with(title, code, CodeOptions::default())
    }

    pub fn code_with(
        title: impl Into<String>,
        code: impl Into<String>,
        options: CodeOptions,
    ) -> Self {
        Slide::Code {
            title: title.into(),
            code: code.into(),
            options,
        }
    }

    /// Override the main text size of the slide.
    pub fn font_size(mut self, size: f32) -> Self {
        match &mut self {
            Slide::Title { font_size, .. }
            | Slide::Intro { font_size, .. }
            | Slide::Icon { font_size, .. }
            | Slide::Text { font_size, .. }
            | Slide::Quote { font_size, .. }
            | Slide::Image { font_size, .. }
            | Slide::Bullets { font_size, .. } => *font_size = Some(size),
            Slide::Code { options, .. } => options.font_size = Some(size),
        }
        self
    }

    /// Short name of the layout template, used in logs and outlines.
    pub fn kind(&self) -> &'static str {
        match self {
            Slide::Title { .. } => "title",
            Slide::Intro { .. } => "intro",
            Slide::Icon { .. } => "icon",
            Slide::Text { .. } => "text",
            Slide::Quote { .. } => "quote",
            Slide::Image { .. } => "image",
            Slide::Bullets { .. } => "bullets",
            Slide::Code { .. } => "code",
        }
    }
}

/// Extra inputs of a code slide.
#[derive(Debug, Clone, Default)]
pub struct CodeOptions {
    pub highlight: HighlightSet,
    pub comment: Option<String>,
    pub font_size: Option<f32>,
}

impl CodeOptions {
    pub fn highlight(mut self, lines: impl Into<HighlightSet>) -> Self {
        self.highlight = lines.into();
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// 1-based line numbers drawn at full opacity. Empty means nothing is dimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet(BTreeSet<usize>);

impl HighlightSet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, line: usize) -> bool {
        self.0.contains(&line)
    }

    pub fn opacity_for(&self, line: usize) -> f32 {
        if self.is_empty() || self.contains(line) {
            1.0
        } else {
            DIMMED_OPACITY
        }
    }
}

impl From<usize> for HighlightSet {
    fn from(line: usize) -> Self {
        Self(BTreeSet::from([line]))
    }
}

impl From<&[usize]> for HighlightSet {
    fn from(lines: &[usize]) -> Self {
        Self(lines.iter().copied().collect())
    }
}

impl<const N: usize> From<[usize; N]> for HighlightSet {
    fn from(lines: [usize; N]) -> Self {
        Self(BTreeSet::from(lines))
    }
}

impl FromIterator<usize> for HighlightSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Split code into displayable lines, dropping blank lines at either end.
/// Tabs are expanded to four spaces and trailing whitespace is removed.
pub fn code_lines(code: &str) -> Vec<String> {
    let lines: Vec<&str> = code.lines().collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last]
            .iter()
            .map(|l| l.trim_end().replace('\t', "    "))
            .collect(),
        _ => Vec::new(),
    }
}

/// Split an annotation on backticks: even pieces are prose, odd pieces are code.
pub fn annotation_spans(annotation: &str) -> Vec<Span> {
    annotation
        .split('`')
        .enumerate()
        .map(|(i, piece)| {
            let face = if i % 2 == 0 {
                Face::Regular
            } else {
                Face::MonoBold
            };
            Span::new(piece, face)
        })
        .collect()
}

/// A decoded raster image ready to be placed on a slide.
#[derive(Debug, Clone)]
pub struct SlideImage {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// 8-bit RGB samples, row-major.
    pub pixels: Arc<Vec<u8>>,
}

impl SlideImage {
    /// Decode an encoded image (PNG, JPEG, ...) into RGB samples.
    pub fn decode(name: &str, bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)?.to_rgb8();
        let (width, height) = decoded.dimensions();
        Self::from_rgb(name, width, height, decoded.into_raw())
    }

    pub fn from_rgb(name: &str, width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DeckError::ValidationError(format!(
                "Image {} has no pixels",
                name
            )));
        }
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(DeckError::ValidationError(format!(
                "Image {} has {} bytes of samples, expected {}",
                name,
                pixels.len(),
                expected
            )));
        }
        Ok(Self {
            name: name.to_string(),
            width,
            height,
            pixels: Arc::new(pixels),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_highlight_keeps_every_line_opaque() {
        let set = HighlightSet::none();
        assert!((1..=50).all(|line| set.opacity_for(line) == 1.0));
    }

    #[test]
    fn test_highlight_dims_other_lines() {
        let set = HighlightSet::from([5, 6, 7]);
        for line in 1..=12 {
            let expected = if (5..=7).contains(&line) { 1.0 } else { 0.3 };
            assert_eq!(set.opacity_for(line), expected, "line {line}");
        }
    }

    #[test]
    fn test_single_line_highlight() {
        let set = HighlightSet::from(2);
        assert_eq!(set.opacity_for(2), 1.0);
        assert_eq!(set.opacity_for(1), DIMMED_OPACITY);
    }

    #[test]
    fn test_code_lines_trims_blank_edges() {
        let lines = code_lines("\n\n  \nconst a = 1;\n\n  b();\n\n\n");
        assert_eq!(lines, vec!["const a = 1;", "", "  b();"]);
    }

    #[test]
    fn test_code_lines_of_blank_input() {
        assert!(code_lines("").is_empty());
        assert!(code_lines("\n   \n").is_empty());
    }

    #[test]
    fn test_code_lines_expand_tabs() {
        assert_eq!(code_lines("\tx();"), vec!["    x();"]);
    }

    #[test]
    fn test_annotation_alternates_faces() {
        let spans = annotation_spans("Run `npm install express` to install it.");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].face, Face::Regular);
        assert_eq!(spans[1].face, Face::MonoBold);
        assert_eq!(spans[1].text, "npm install express");
        assert_eq!(spans[2].face, Face::Regular);
    }

    #[test]
    fn test_annotation_span_count_follows_backticks() {
        for text in ["plain", "`a`", "a `b` c `d`", "``", "trailing `"] {
            let ticks = text.matches('`').count();
            assert_eq!(annotation_spans(text).len(), ticks + 1, "{text:?}");
        }
    }

    #[test]
    fn test_font_size_applies_to_every_variant() {
        let slide = Slide::code("t", "x").font_size(20.0);
        assert!(matches!(slide, Slide::Code { ref options, .. } if options.font_size == Some(20.0)));

        let slide = Slide::text("t", "body").font_size(24.0);
        assert!(matches!(slide, Slide::Text { font_size: Some(s), .. } if s == 24.0));
    }

    #[test]
    fn test_from_rgb_validates_sample_count() {
        assert!(SlideImage::from_rgb("ok", 2, 1, vec![0; 6]).is_ok());
        assert!(SlideImage::from_rgb("short", 2, 2, vec![0; 6]).is_err());
        assert!(SlideImage::from_rgb("empty", 0, 4, Vec::new()).is_err());
    }
}
