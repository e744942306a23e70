// ABOUTME: Slide deck renderer for the lesson-slides application
// ABOUTME: Lays out title, text, image, bullet and code slides onto fixed-size pages

use crate::errors::Result;
use crate::icons::{self, Glyph};
use crate::layout;
use crate::slide::{annotation_spans, code_lines, CodeOptions, Slide, SlideImage, GUTTER_OPACITY};
use crate::surface::{Face, Frame, IconMark, Surface, TextBlock};
use crate::theme::{Palette, Rgb};
use chrono::{Local, NaiveDate};
use log::debug;

pub const PAGE_WIDTH: f32 = 800.0;
pub const PAGE_HEIGHT: f32 = 600.0;

const MARGIN: f32 = 50.0;
const TITLE_SIZE: f32 = 36.0;
const TITLE_Y: f32 = 200.0;
const SUBTITLE_Y: f32 = 250.0;
const HEADING_Y: f32 = 50.0;
const BODY_Y: f32 = 200.0;
const BODY_SIZE: f32 = 36.0;
const FOOTNOTE_SIZE: f32 = 9.0;

const ICON_SLIDE_TITLE_Y: f32 = 180.0;
const ICON_SIZE: f32 = 80.0;

const IMAGE_FRAME: Frame = Frame::new(
    MARGIN,
    80.0,
    PAGE_WIDTH - 2.0 * MARGIN,
    PAGE_HEIGHT - 160.0,
);

const BULLET_ICON: &str = "angle-right";
const BULLET_ICON_SIZE: f32 = 10.0;
const BULLET_ICON_X: f32 = 35.0;
const BULLET_ICON_DROP: f32 = 8.0;
const BULLET_SIZE: f32 = 18.0;
const BULLET_ADVANCE: f32 = 48.0;

const CODE_TOP: f32 = 120.0;
const CODE_SIZE: f32 = 14.0;
const CODE_LINE_ADVANCE: f32 = 18.0;
const GUTTER_X: f32 = 10.0;
const GUTTER_WIDTH: f32 = 20.0;
const GUTTER_DROP: f32 = 2.5;
const ANNOTATION_GAP: f32 = 24.0;
const ANNOTATION_SIZE: f32 = 18.0;

/// Current write position on a page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
}

/// Drawing access to the page opened by `SlideDeckRenderer::begin_page`.
///
/// Every primitive draws in the theme's foreground color.
pub struct Page<'a, S: Surface> {
    surface: &'a mut S,
    foreground: Rgb,
    cursor: Cursor,
}

impl<'a, S: Surface> Page<'a, S> {
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.cursor = Cursor { x, y };
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor.y += dy;
    }

    pub fn block(&mut self, block: TextBlock) {
        self.surface.draw_text(&block.color(self.foreground));
    }

    pub fn text(&mut self, x: f32, y: f32, text: &str, face: Face, size: f32) {
        self.block(TextBlock::line(x, y, text, face, size));
    }

    /// Bold slide heading in the top-left corner.
    pub fn heading(&mut self, title: &str) {
        self.text(MARGIN, HEADING_Y, title, Face::Bold, TITLE_SIZE);
    }

    pub fn glyph(&mut self, glyph: Glyph, size: f32, x: f32, y: f32) {
        self.surface.draw_icon(&IconMark {
            glyph,
            size,
            x,
            y,
            color: self.foreground,
        });
    }

    /// Draw a named icon; unknown names are a configuration error.
    pub fn icon(&mut self, name: &str, size: f32, x: f32, y: f32) -> Result<()> {
        let glyph = icons::lookup(name)?;
        self.glyph(glyph, size, x, y);
        Ok(())
    }

    pub fn image(&mut self, image: &SlideImage, frame: Frame) {
        self.surface.draw_image(image, frame);
    }
}

/// Draws a deck of slides for one attendee onto a surface.
pub struct SlideDeckRenderer<S: Surface> {
    name: String,
    palette: Palette,
    generated_on: NaiveDate,
    surface: S,
    pages: usize,
}

impl<S: Surface> SlideDeckRenderer<S> {
    pub fn new(name: impl Into<String>, palette: Palette, surface: S) -> Self {
        Self {
            name: name.into(),
            palette,
            generated_on: Local::now().date_naive(),
            surface,
            pages: 0,
        }
    }

    /// Replace the generation date shown in the intro footnote.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.generated_on = date;
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// Footnote of the intro slide, e.g. "Generated for Ada on Sun Oct 18 2026."
    pub fn footnote(&self) -> String {
        format!(
            "Generated for {} on {}.",
            self.name,
            self.generated_on.format("%a %b %d %Y")
        )
    }

    /// Start a new page filled with the background color.
    pub fn begin_page(&mut self) -> Page<'_, S> {
        self.surface
            .begin_page(PAGE_WIDTH, PAGE_HEIGHT, self.palette.background);
        self.pages += 1;
        Page {
            surface: &mut self.surface,
            foreground: self.palette.foreground,
            cursor: Cursor::default(),
        }
    }

    /// Draw one slide.
    pub fn add_slide(&mut self, slide: &Slide) -> Result<()> {
        debug!("Drawing {} slide on page {}", slide.kind(), self.pages + 1);
        match slide {
            Slide::Title {
                title,
                subtitle,
                font_size,
            } => self.add_title_slide(title, subtitle.as_deref(), *font_size),
            Slide::Intro {
                title,
                subtitle,
                font_size,
            } => self.add_intro_slide(title, subtitle, *font_size),
            Slide::Icon {
                title,
                icon,
                font_size,
            } => self.add_icon_slide(title, icon, *font_size),
            Slide::Text {
                title,
                body,
                font_size,
            } => self.add_text_slide(title, body, *font_size),
            Slide::Quote {
                title,
                body,
                citation,
                font_size,
            } => self.add_quote_slide(title, body, citation, *font_size),
            Slide::Image {
                image,
                attribution,
                font_size,
            } => self.add_image_slide(image, attribution, *font_size),
            Slide::Bullets {
                title,
                bullets,
                font_size,
            } => self.add_bullets_slide(title, bullets, *font_size),
            Slide::Code {
                title,
                code,
                options,
            } => self.add_code_slide(title, code, options),
        }
    }

    /// Draw every slide in order.
    pub fn add_slides(&mut self, slides: &[Slide]) -> Result<()> {
        slides.iter().try_for_each(|slide| self.add_slide(slide))
    }

    fn title_page(
        &mut self,
        title: &str,
        subtitle: Option<&str>,
        font_size: Option<f32>,
    ) -> Page<'_, S> {
        let size = font_size.unwrap_or(TITLE_SIZE);
        let mut page = self.begin_page();
        page.text(MARGIN, TITLE_Y, title, Face::Bold, size);
        if let Some(subtitle) = subtitle.filter(|s| !s.is_empty()) {
            page.text(MARGIN, SUBTITLE_Y, subtitle, Face::Regular, size / 2.0);
        }
        page
    }

    pub fn add_title_slide(
        &mut self,
        title: &str,
        subtitle: Option<&str>,
        font_size: Option<f32>,
    ) -> Result<()> {
        self.title_page(title, subtitle, font_size);
        Ok(())
    }

    /// A title slide with the "Generated for ..." footnote on the same page.
    pub fn add_intro_slide(
        &mut self,
        title: &str,
        subtitle: &str,
        font_size: Option<f32>,
    ) -> Result<()> {
        let footnote = self.footnote();
        let mut page = self.title_page(title, Some(subtitle), font_size);
        page.text(
            MARGIN,
            PAGE_HEIGHT - 30.0,
            &footnote,
            Face::Regular,
            FOOTNOTE_SIZE,
        );
        Ok(())
    }

    pub fn add_icon_slide(&mut self, title: &str, icon: &str, font_size: Option<f32>) -> Result<()> {
        // fail before a page is opened
        icons::lookup(icon)?;
        let size = font_size.unwrap_or(ICON_SIZE);
        let title_width = layout::text_width(title, Face::Bold, TITLE_SIZE);

        let mut page = self.begin_page();
        page.text(
            (PAGE_WIDTH - title_width) / 2.0,
            ICON_SLIDE_TITLE_Y,
            title,
            Face::Bold,
            TITLE_SIZE,
        );
        page.icon(
            icon,
            size,
            (PAGE_WIDTH - layout::icon_width(size)) / 2.0,
            (PAGE_HEIGHT - size) / 2.0,
        )
    }

    pub fn add_text_slide(&mut self, title: &str, body: &str, font_size: Option<f32>) -> Result<()> {
        let size = font_size.unwrap_or(BODY_SIZE);
        let mut page = self.begin_page();
        page.heading(title);
        page.block(
            TextBlock::line(MARGIN, BODY_Y, body, Face::Regular, size)
                .wrapped(PAGE_WIDTH - 2.0 * MARGIN),
        );
        Ok(())
    }

    pub fn add_quote_slide(
        &mut self,
        title: &str,
        body: &str,
        citation: &str,
        font_size: Option<f32>,
    ) -> Result<()> {
        let quoted = format!("\u{201C}{}\u{201D}\n\n    \u{2014} {}", body, citation);
        self.add_text_slide(title, &quoted, font_size)
    }

    pub fn add_image_slide(
        &mut self,
        image: &SlideImage,
        attribution: &str,
        font_size: Option<f32>,
    ) -> Result<()> {
        let frame = layout::fit(image.width as f32, image.height as f32, IMAGE_FRAME);
        let mut page = self.begin_page();
        page.image(image, frame);
        if !attribution.is_empty() {
            page.text(
                MARGIN,
                PAGE_HEIGHT - 50.0,
                attribution,
                Face::Regular,
                font_size.unwrap_or(FOOTNOTE_SIZE),
            );
        }
        Ok(())
    }

    pub fn add_bullets_slide(
        &mut self,
        title: &str,
        bullets: &[String],
        font_size: Option<f32>,
    ) -> Result<()> {
        let marker = icons::lookup(BULLET_ICON)?;
        let size = font_size.unwrap_or(BULLET_SIZE);

        let mut page = self.begin_page();
        page.heading(title);
        page.move_to(MARGIN, BODY_Y);
        for bullet in bullets {
            let y = page.cursor().y;
            page.glyph(marker, BULLET_ICON_SIZE, BULLET_ICON_X, y + BULLET_ICON_DROP);
            page.text(MARGIN, y, bullet, Face::Regular, size);
            page.advance(BULLET_ADVANCE);
        }
        Ok(())
    }

    /// Code listing with a line-number gutter. With a non-empty highlight
    /// set, lines outside it are dimmed. An optional comment follows the
    /// listing, with `backtick` spans set in bold monospace.
    pub fn add_code_slide(&mut self, title: &str, code: &str, options: &CodeOptions) -> Result<()> {
        let size = options.font_size.unwrap_or(CODE_SIZE);

        let mut page = self.begin_page();
        page.heading(title);
        page.move_to(MARGIN, CODE_TOP);
        for (index, line) in code_lines(code).iter().enumerate() {
            let number = index + 1;
            let y = page.cursor().y;
            page.block(
                TextBlock::line(GUTTER_X, y + GUTTER_DROP, number.to_string(), Face::Mono, size - 2.0)
                    .opacity(GUTTER_OPACITY)
                    .right_aligned(GUTTER_WIDTH),
            );
            page.block(
                TextBlock::line(MARGIN, y, line.as_str(), Face::Mono, size)
                    .opacity(options.highlight.opacity_for(number)),
            );
            page.advance(CODE_LINE_ADVANCE);
        }

        if let Some(comment) = options.comment.as_deref().filter(|c| !c.is_empty()) {
            page.advance(ANNOTATION_GAP);
            let y = page.cursor().y;
            page.block(
                TextBlock::spans(MARGIN, y, ANNOTATION_SIZE, annotation_spans(comment))
                    .wrapped(PAGE_WIDTH - 2.0 * MARGIN),
            );
        }
        Ok(())
    }

    /// Close the document. No pages can be added afterwards.
    pub fn end(self) -> Result<S::Output> {
        debug!("Finishing deck for {} with {} pages", self.name, self.pages);
        self.surface.finish()
    }
}
