// ABOUTME: Text and image layout for the lesson-slides application
// ABOUTME: Measures text with standard font metrics, wraps paragraphs and fits images

use crate::surface::{Face, Frame, Span, TextBlock, TextLayout};

/// Distance between baselines of wrapped lines, as a multiple of the font size.
pub const LINE_HEIGHT: f32 = 1.2;

/// Advance width of icon glyphs, as a multiple of the font size.
const ICON_ADVANCE: f32 = 0.8;

// Advance widths (1/1000 em) of the printable ASCII range 0x20..=0x7E.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

const COURIER_ADVANCE: u16 = 600;

fn char_width(face: Face, c: char) -> u16 {
    let table = match face {
        Face::Regular => &HELVETICA,
        Face::Bold => &HELVETICA_BOLD,
        Face::Mono | Face::MonoBold => return COURIER_ADVANCE,
    };
    match c {
        ' '..='~' => table[c as usize - 0x20],
        '\u{2018}' | '\u{2019}' => 222,
        '\u{201C}' | '\u{201D}' => 333,
        '\u{2013}' => 556,
        '\u{2014}' => 1000,
        '\u{2022}' => 350,
        '\u{00A9}' => 737,
        _ => 556,
    }
}

/// Width of `text` set in `face` at `size`.
pub fn text_width(text: &str, face: Face, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(face, c))).sum();
    units as f32 * size / 1000.0
}

/// Width of one icon glyph at `size`.
pub fn icon_width(size: f32) -> f32 {
    size * ICON_ADVANCE
}

/// Height of the tallest glyphs above the baseline, as a multiple of the size.
pub fn ascent(face: Face) -> f32 {
    match face {
        Face::Regular | Face::Bold => 0.718,
        Face::Mono | Face::MonoBold => 0.629,
    }
}

/// Ascent of the icon font, as a multiple of the size.
pub fn icon_ascent() -> f32 {
    0.82
}

/// A piece of a laid out line in a single face.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub face: Face,
    pub text: String,
    /// Offset from the start of the line.
    pub x: f32,
    pub width: f32,
}

/// One line of a laid out paragraph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub fragments: Vec<Fragment>,
    pub width: f32,
}

impl Line {
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Word,
    Space,
    Newline,
}

fn tokenize(text: &str) -> Vec<(Token, &str)> {
    let mut tokens = Vec::new();
    let mut run: Option<(Token, usize)> = None;
    for (i, c) in text.char_indices() {
        let kind = match c {
            '\n' => Token::Newline,
            ' ' => Token::Space,
            _ => Token::Word,
        };
        match run {
            Some((current, _)) if current == kind && kind != Token::Newline => {}
            Some((current, start)) => {
                tokens.push((current, &text[start..i]));
                run = Some((kind, i));
            }
            None => run = Some((kind, i)),
        }
    }
    if let Some((current, start)) = run {
        tokens.push((current, &text[start..]));
    }
    tokens
}

struct LineBuilder {
    size: f32,
    line: Line,
    has_word: bool,
}

impl LineBuilder {
    fn new(size: f32) -> Self {
        Self {
            size,
            line: Line::default(),
            has_word: false,
        }
    }

    fn push(&mut self, face: Face, text: &str, width: f32) {
        match self.line.fragments.last_mut() {
            Some(last) if last.face == face => {
                last.text.push_str(text);
                last.width += width;
            }
            _ => self.line.fragments.push(Fragment {
                face,
                text: text.to_string(),
                x: self.line.width,
                width,
            }),
        }
        self.line.width += width;
    }

    /// Finish the line, dropping trailing spaces.
    fn finish(mut self) -> Line {
        while let Some(last) = self.line.fragments.last_mut() {
            let trimmed_len = last.text.trim_end_matches(' ').len();
            let removed = text_width(&last.text[trimmed_len..], last.face, self.size);
            last.text.truncate(trimmed_len);
            last.width -= removed;
            self.line.width -= removed;
            if last.text.is_empty() {
                self.line.fragments.pop();
            } else {
                break;
            }
        }
        self.line
    }
}

/// Lay out spans as one continuous paragraph.
///
/// Each span picks up where the previous one ended. Lines break at hard
/// newlines and before any word that would pass `max_width`; a word wider
/// than `max_width` sits on a line of its own. Trailing spaces are dropped,
/// indentation after a hard break is kept.
pub fn wrap(spans: &[Span], size: f32, max_width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut builder = LineBuilder::new(size);

    for span in spans {
        let text = span.text.replace('\r', "");
        for (token, piece) in tokenize(&text) {
            match token {
                Token::Newline => {
                    lines.push(std::mem::replace(&mut builder, LineBuilder::new(size)).finish());
                }
                Token::Space => {
                    builder.push(span.face, piece, text_width(piece, span.face, size));
                }
                Token::Word => {
                    let width = text_width(piece, span.face, size);
                    if builder.has_word && builder.line.width + width > max_width {
                        lines.push(std::mem::replace(&mut builder, LineBuilder::new(size)).finish());
                    }
                    builder.push(span.face, piece, width);
                    builder.has_word = true;
                }
            }
        }
    }

    lines.push(builder.finish());
    lines
}

/// A fragment of text placed on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRun {
    pub face: Face,
    pub text: String,
    pub x: f32,
    /// Baseline position measured from the top of the page.
    pub baseline: f32,
}

/// Position every fragment of a text block on the page.
pub fn place(block: &TextBlock) -> Vec<PlacedRun> {
    let max_width = match block.layout {
        TextLayout::Wrapped { width } => width,
        TextLayout::Line | TextLayout::RightAligned { .. } => f32::INFINITY,
    };
    let lead_face = block.spans.first().map_or(Face::Regular, |s| s.face);
    let ascent = ascent(lead_face) * block.size;
    let line_height = block.size * LINE_HEIGHT;

    let mut runs = Vec::new();
    for (i, line) in wrap(&block.spans, block.size, max_width).into_iter().enumerate() {
        let start = match block.layout {
            TextLayout::RightAligned { width } => block.x + width - line.width,
            TextLayout::Line | TextLayout::Wrapped { .. } => block.x,
        };
        let baseline = block.y + ascent + line_height * i as f32;
        for fragment in line.fragments {
            runs.push(PlacedRun {
                face: fragment.face,
                text: fragment.text,
                x: start + fragment.x,
                baseline,
            });
        }
    }
    runs
}

/// Scale an image to fit inside `frame`, keeping its aspect ratio, centred on both axes.
pub fn fit(width: f32, height: f32, frame: Frame) -> Frame {
    let scale = (frame.width / width).min(frame.height / height);
    let fitted_width = width * scale;
    let fitted_height = height * scale;
    Frame::new(
        frame.x + (frame.width - fitted_width) / 2.0,
        frame.y + (frame.height - fitted_height) / 2.0,
        fitted_width,
        fitted_height,
    )
}
