// ABOUTME: Drawing surface abstraction for the lesson-slides application
// ABOUTME: Defines the document container interface and a recording implementation

use crate::errors::Result;
use crate::icons::Glyph;
use crate::slide::SlideImage;
use crate::theme::Rgb;

/// The four text faces a deck is set in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Regular,
    Bold,
    Mono,
    MonoBold,
}

/// A run of text in a single face.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub face: Face,
}

impl Span {
    pub fn new(text: impl Into<String>, face: Face) -> Self {
        Self {
            text: text.into(),
            face,
        }
    }
}

/// How a text block is positioned relative to its origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextLayout {
    /// Drawn from the origin without wrapping; only hard line breaks start new lines.
    Line,
    /// Right edge aligned to `x + width`.
    RightAligned { width: f32 },
    /// Words flow across spans and wrap at `x + width`.
    Wrapped { width: f32 },
}

/// Text drawn at a top-left origin, in page units.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Rgb,
    pub opacity: f32,
    pub spans: Vec<Span>,
    pub layout: TextLayout,
}

impl TextBlock {
    /// A single-face line of text.
    pub fn line(x: f32, y: f32, text: impl Into<String>, face: Face, size: f32) -> Self {
        Self::spans(x, y, size, vec![Span::new(text, face)])
    }

    /// Several spans laid out as one continuous paragraph.
    pub fn spans(x: f32, y: f32, size: f32, spans: Vec<Span>) -> Self {
        Self {
            x,
            y,
            size,
            color: Rgb::BLACK,
            opacity: 1.0,
            spans,
            layout: TextLayout::Line,
        }
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn wrapped(mut self, width: f32) -> Self {
        self.layout = TextLayout::Wrapped { width };
        self
    }

    pub fn right_aligned(mut self, width: f32) -> Self {
        self.layout = TextLayout::RightAligned { width };
        self
    }

    /// The block's text with span boundaries removed.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A glyph of the icon font placed at a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconMark {
    pub glyph: Glyph,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
}

/// A rectangle in page units with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A document container that slides are drawn into.
///
/// Drawing calls apply to the page opened by the most recent `begin_page`;
/// calling them before any page exists is a programming error.
pub trait Surface {
    type Output;

    /// Open a new page painted entirely with `background`.
    fn begin_page(&mut self, width: f32, height: f32, background: Rgb);

    fn draw_text(&mut self, block: &TextBlock);

    fn draw_icon(&mut self, icon: &IconMark);

    fn draw_image(&mut self, image: &SlideImage, frame: Frame);

    /// Close the document and hand back its output.
    fn finish(self) -> Result<Self::Output>;
}

/// An image placement captured by `RecordingSurface`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedImage {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub frame: Frame,
}

/// Everything drawn on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPage {
    pub width: f32,
    pub height: f32,
    pub background: Rgb,
    pub texts: Vec<TextBlock>,
    pub icons: Vec<IconMark>,
    pub images: Vec<RecordedImage>,
}

impl RecordedPage {
    /// Text of every block on the page, in drawing order.
    pub fn text_lines(&self) -> Vec<String> {
        self.texts.iter().map(TextBlock::text).collect()
    }
}

/// A surface that keeps the draw calls instead of producing a file.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pages: Vec<RecordedPage>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn current(&mut self) -> &mut RecordedPage {
        self.pages
            .last_mut()
            .expect("draw call issued before begin_page")
    }
}

impl Surface for RecordingSurface {
    type Output = Vec<RecordedPage>;

    fn begin_page(&mut self, width: f32, height: f32, background: Rgb) {
        self.pages.push(RecordedPage {
            width,
            height,
            background,
            texts: Vec::new(),
            icons: Vec::new(),
            images: Vec::new(),
        });
    }

    fn draw_text(&mut self, block: &TextBlock) {
        self.current().texts.push(block.clone());
    }

    fn draw_icon(&mut self, icon: &IconMark) {
        self.current().icons.push(*icon);
    }

    fn draw_image(&mut self, image: &SlideImage, frame: Frame) {
        self.current().images.push(RecordedImage {
            name: image.name.clone(),
            width: image.width,
            height: image.height,
            frame,
        });
    }

    fn finish(self) -> Result<Self::Output> {
        Ok(self.pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons;

    #[test]
    fn test_records_pages_in_order() {
        let mut surface = RecordingSurface::new();
        surface.begin_page(800.0, 600.0, Rgb::WHITE);
        surface.draw_text(&TextBlock::line(50.0, 50.0, "first", Face::Bold, 36.0));
        surface.begin_page(800.0, 600.0, Rgb::BLACK);
        surface.draw_icon(&IconMark {
            glyph: icons::lookup("star").unwrap(),
            size: 80.0,
            x: 0.0,
            y: 0.0,
            color: Rgb::WHITE,
        });

        let pages = surface.finish().unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].text_lines(), vec!["first"]);
        assert_eq!(pages[1].background, Rgb::BLACK);
        assert_eq!(pages[1].icons.len(), 1);
    }

    #[test]
    #[should_panic(expected = "before begin_page")]
    fn test_drawing_without_a_page_panics() {
        let mut surface = RecordingSurface::new();
        surface.draw_text(&TextBlock::line(0.0, 0.0, "orphan", Face::Regular, 9.0));
    }

    #[test]
    fn test_block_text_joins_spans() {
        let block = TextBlock::spans(
            0.0,
            0.0,
            18.0,
            vec![Span::new("run ", Face::Regular), Span::new("npm", Face::MonoBold)],
        );
        assert_eq!(block.text(), "run npm");
    }
}
