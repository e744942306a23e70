// ABOUTME: PDF output for the lesson-slides application
// ABOUTME: Implements the drawing surface on top of pdf-writer using the standard PDF fonts

use crate::errors::{DeckError, Result};
use crate::layout;
use crate::slide::SlideImage;
use crate::surface::{Face, Frame, IconMark, Surface, TextBlock};
use crate::theme::Rgb;
use chrono::{Datelike, NaiveDate};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::debug;
use pdf_writer::{Content, Date, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;

const ICON_FONT: &[u8] = b"F5";

/// Resource names and base fonts of the five faces every document carries.
const FONTS: [(&[u8], &[u8]); 5] = [
    (b"F1", b"Helvetica"),
    (b"F2", b"Helvetica-Bold"),
    (b"F3", b"Courier"),
    (b"F4", b"Courier-Bold"),
    (ICON_FONT, b"ZapfDingbats"),
];

fn font_resource(face: Face) -> &'static [u8] {
    match face {
        Face::Regular => FONTS[0].0,
        Face::Bold => FONTS[1].0,
        Face::Mono => FONTS[2].0,
        Face::MonoBold => FONTS[3].0,
    }
}

/// Encode text for a WinAnsi font. Characters outside the encoding become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}

/// Descriptive metadata written to the document information dictionary.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub created: Option<NaiveDate>,
}

struct PdfPage {
    width: f32,
    height: f32,
    content: Content,
}

/// A surface that assembles a PDF document in memory.
pub struct PdfSurface {
    info: DocumentInfo,
    pages: Vec<PdfPage>,
    // alpha in thousandths -> graphics state resource name
    alphas: BTreeMap<u16, String>,
    images: Vec<SlideImage>,
}

impl Default for PdfSurface {
    fn default() -> Self {
        Self::new(DocumentInfo::default())
    }
}

impl PdfSurface {
    pub fn new(info: DocumentInfo) -> Self {
        Self {
            info,
            pages: Vec::new(),
            alphas: BTreeMap::new(),
            images: Vec::new(),
        }
    }

    fn current(&mut self) -> &mut PdfPage {
        self.pages
            .last_mut()
            .expect("draw call issued before begin_page")
    }

    /// Graphics state name for a fill opacity, or `None` when fully opaque.
    fn alpha_state(&mut self, opacity: f32) -> Option<String> {
        let key = (opacity.clamp(0.0, 1.0) * 1000.0).round() as u16;
        if key >= 1000 {
            return None;
        }
        let name = self
            .alphas
            .entry(key)
            .or_insert_with(|| format!("GA{}", key));
        Some(name.clone())
    }

    /// Resource name of an image, registering it on first use.
    fn image_resource(&mut self, image: &SlideImage) -> String {
        let index = match self
            .images
            .iter()
            .position(|known| Arc::ptr_eq(&known.pixels, &image.pixels))
        {
            Some(index) => index,
            None => {
                self.images.push(image.clone());
                self.images.len() - 1
            }
        };
        format!("Im{}", index + 1)
    }
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .and_then(|_| encoder.finish())
        .map_err(|e| DeckError::PdfError(format!("Failed to compress image data: {}", e)))
}

fn set_fill(content: &mut Content, color: Rgb) {
    content.set_fill_rgb(color.r, color.g, color.b);
}

impl Surface for PdfSurface {
    type Output = Vec<u8>;

    fn begin_page(&mut self, width: f32, height: f32, background: Rgb) {
        let mut content = Content::new();
        set_fill(&mut content, background);
        content.rect(0.0, 0.0, width, height);
        content.fill_nonzero();
        self.pages.push(PdfPage {
            width,
            height,
            content,
        });
    }

    fn draw_text(&mut self, block: &TextBlock) {
        let runs = layout::place(block);
        if runs.is_empty() {
            return;
        }
        let alpha = self.alpha_state(block.opacity);
        let page = self.current();
        let height = page.height;
        let content = &mut page.content;

        content.save_state();
        if let Some(name) = &alpha {
            content.set_parameters(Name(name.as_bytes()));
        }
        set_fill(content, block.color);
        content.begin_text();
        for run in runs {
            let encoded = encode_win_ansi(&run.text);
            content.set_font(Name(font_resource(run.face)), block.size);
            content.set_text_matrix([1.0, 0.0, 0.0, 1.0, run.x, height - run.baseline]);
            content.show(Str(&encoded));
        }
        content.end_text();
        content.restore_state();
    }

    fn draw_icon(&mut self, icon: &IconMark) {
        let page = self.current();
        let baseline = icon.y + layout::icon_ascent() * icon.size;
        let pdf_y = page.height - baseline;
        let content = &mut page.content;

        content.save_state();
        set_fill(content, icon.color);
        content.begin_text();
        content.set_font(Name(ICON_FONT), icon.size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, icon.x, pdf_y]);
        content.show(Str(&[icon.glyph.code]));
        content.end_text();
        content.restore_state();
    }

    fn draw_image(&mut self, image: &SlideImage, frame: Frame) {
        let name = self.image_resource(image);
        let page = self.current();
        let pdf_y = page.height - frame.y - frame.height;
        let content = &mut page.content;

        content.save_state();
        content.transform([frame.width, 0.0, 0.0, frame.height, frame.x, pdf_y]);
        content.x_object(Name(name.as_bytes()));
        content.restore_state();
    }

    fn finish(self) -> Result<Self::Output> {
        let mut next_id = 1;
        let mut alloc = || {
            let id = Ref::new(next_id);
            next_id += 1;
            id
        };

        let catalog_id = alloc();
        let tree_id = alloc();
        let info_id = alloc();
        let font_ids: Vec<(&[u8], Ref)> = FONTS.iter().map(|(name, _)| (*name, alloc())).collect();
        let alpha_ids: Vec<(u16, &String, Ref)> = self
            .alphas
            .iter()
            .map(|(key, name)| (*key, name, alloc()))
            .collect();
        let image_ids: Vec<Ref> = self.images.iter().map(|_| alloc()).collect();
        let page_ids: Vec<(Ref, Ref)> = self.pages.iter().map(|_| (alloc(), alloc())).collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(tree_id);
        pdf.pages(tree_id)
            .kids(page_ids.iter().map(|(page_id, _)| *page_id))
            .count(page_ids.len() as i32);

        let mut info = pdf.document_info(info_id);
        info.title(TextStr(&self.info.title));
        info.author(TextStr(&self.info.author));
        info.creator(TextStr("lesson-slides"));
        if let Some(created) = self.info.created {
            info.creation_date(
                Date::new(created.year() as u16)
                    .month(created.month() as u8)
                    .day(created.day() as u8),
            );
        }
        info.finish();

        for ((name, base_font), (_, id)) in FONTS.iter().zip(&font_ids) {
            let mut font = pdf.type1_font(*id);
            font.base_font(Name(*base_font));
            if *name != ICON_FONT {
                font.encoding_predefined(Name(b"WinAnsiEncoding"));
            }
        }

        for (key, _, id) in &alpha_ids {
            pdf.ext_graphics(*id)
                .non_stroking_alpha(f32::from(*key) / 1000.0);
        }

        for (image, id) in self.images.iter().zip(&image_ids) {
            let data = deflate(&image.pixels)?;
            let mut xobject = pdf.image_xobject(*id, &data);
            xobject.filter(Filter::FlateDecode);
            xobject.width(image.width as i32);
            xobject.height(image.height as i32);
            xobject.color_space().device_rgb();
            xobject.bits_per_component(8);
            xobject.finish();
        }

        let page_count = self.pages.len();
        for (page, (page_id, content_id)) in self.pages.into_iter().zip(&page_ids) {
            let mut writer = pdf.page(*page_id);
            writer.media_box(Rect::new(0.0, 0.0, page.width, page.height));
            writer.parent(tree_id);
            writer.contents(*content_id);

            let mut resources = writer.resources();
            let mut fonts = resources.fonts();
            for (name, id) in &font_ids {
                fonts.pair(Name(*name), *id);
            }
            fonts.finish();
            if !alpha_ids.is_empty() {
                let mut states = resources.ext_g_states();
                for (_, name, id) in &alpha_ids {
                    states.pair(Name(name.as_bytes()), *id);
                }
                states.finish();
            }
            if !image_ids.is_empty() {
                let mut xobjects = resources.x_objects();
                for (index, id) in image_ids.iter().enumerate() {
                    let name = format!("Im{}", index + 1);
                    xobjects.pair(Name(name.as_bytes()), *id);
                }
                xobjects.finish();
            }
            resources.finish();
            writer.finish();

            pdf.stream(*content_id, &page.content.finish());
        }

        debug!(
            "Assembled PDF with {} pages, {} images, {} opacity states",
            page_count,
            image_ids.len(),
            alpha_ids.len()
        );
        Ok(pdf.finish())
    }
}
