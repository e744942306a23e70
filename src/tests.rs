use super::*;
use crate::slide::{DIMMED_OPACITY, GUTTER_OPACITY};
use crate::surface::{Face, TextBlock};
use chrono::NaiveDate;

const HELLO_WORLD: &str = "const express = require('express');
const app = express();
const port = process.env.PORT || 3000;

app.get('/', (req, res) => {
  res.send('Hello World!');
});

app.listen(port, () => {
  console.log(`Example app listening on port ${port}!`);
});
";

fn render(background: &str, slides: &[Slide]) -> Result<Vec<RecordedPage>> {
    let palette = Theme::resolve(background).palette();
    let mut renderer = SlideDeckRenderer::new("Ada", palette, RecordingSurface::new())
        .with_date(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
    renderer.add_slides(slides)?;
    renderer.end()
}

fn render_one(slide: Slide) -> RecordedPage {
    let mut pages = render("#fff", &[slide]).expect("Failed to render slide");
    assert_eq!(pages.len(), 1);
    pages.remove(0)
}

/// Gutter and code blocks of a code page, paired per line.
fn code_rows(page: &RecordedPage) -> Vec<(&TextBlock, &TextBlock)> {
    let blocks: Vec<&TextBlock> = page
        .texts
        .iter()
        .skip(1)
        .filter(|block| block.spans.iter().all(|s| s.face == Face::Mono))
        .collect();
    blocks.chunks(2).map(|pair| (pair[0], pair[1])).collect()
}

#[test]
fn test_every_slide_starts_a_new_page() {
    let slides = vec![
        Slide::title("One"),
        Slide::text("Two", "body"),
        Slide::bullets("Three", ["a", "b"]),
        Slide::code("Four", "x();"),
        Slide::quote("Five", "said", "someone"),
    ];
    let pages = render("#162521", &slides).unwrap();
    assert_eq!(pages.len(), slides.len());
    for page in &pages {
        assert_eq!((page.width, page.height), (PAGE_WIDTH, PAGE_HEIGHT));
        assert_eq!(page.background, Rgb::parse_hex("#162521").unwrap());
        let foreground = Rgb::parse_hex("#eee").unwrap();
        assert!(page.texts.iter().all(|block| block.color == foreground));
    }
}

#[test]
fn test_code_without_highlight_is_fully_opaque() {
    let page = render_one(Slide::code("Basic server", HELLO_WORLD));
    let rows = code_rows(&page);
    assert_eq!(rows.len(), 11);
    assert!(rows.iter().all(|(_, code)| code.opacity == 1.0));
}

#[test]
fn test_highlight_dims_other_lines() {
    let options = CodeOptions::default().highlight([5, 6, 7]);
    let page = render_one(Slide::code_with("Basic server", HELLO_WORLD, options));
    for (index, (_, code)) in code_rows(&page).iter().enumerate() {
        let number = index + 1;
        let expected = if (5..=7).contains(&number) {
            1.0
        } else {
            DIMMED_OPACITY
        };
        assert_eq!(code.opacity, expected, "line {}", number);
    }
}

#[test]
fn test_gutter_is_always_faint() {
    for highlight in [HighlightSet::none(), HighlightSet::from(2)] {
        let options = CodeOptions::default().highlight(highlight);
        let page = render_one(Slide::code_with("t", HELLO_WORLD, options));
        assert!(code_rows(&page)
            .iter()
            .all(|(gutter, _)| gutter.opacity == GUTTER_OPACITY));
    }
}

#[test]
fn test_line_numbers_are_contiguous_after_trimming() {
    let code = format!("\n\n\n{}\n\n\n", HELLO_WORLD);
    let page = render_one(Slide::code("t", code));
    let numbers: Vec<String> = code_rows(&page)
        .iter()
        .map(|(gutter, _)| gutter.text())
        .collect();
    let expected: Vec<String> = (1..=11).map(|n| n.to_string()).collect();
    assert_eq!(numbers, expected);
    assert_eq!(code_rows(&page)[0].1.text(), "const express = require('express');");
}

#[test]
fn test_annotation_alternates_faces() {
    let options = CodeOptions::default()
        .highlight(1)
        .comment("Run `npm install express` first, then `node app.js`.");
    let page = render_one(Slide::code_with("t", "x();", options));
    let annotation = page.texts.last().unwrap();
    assert_eq!(annotation.spans.len(), 5);
    for (index, span) in annotation.spans.iter().enumerate() {
        let expected = if index % 2 == 0 {
            Face::Regular
        } else {
            Face::MonoBold
        };
        assert_eq!(span.face, expected);
    }
}

#[test]
fn test_intro_footnote_names_attendee() {
    let pages = render("#23967F", &[Slide::intro("Node.js", "JavaScript on the Server")]).unwrap();
    let page = &pages[0];
    assert_eq!(
        page.text_lines(),
        vec![
            "Node.js",
            "JavaScript on the Server",
            "Generated for Ada on Sun Oct 18 2026."
        ]
    );
    let footnote = page.texts.last().unwrap();
    assert_eq!(footnote.size, 9.0);
    assert_eq!(footnote.color, Rgb::parse_hex("#222").unwrap());
}

#[test]
fn test_unmatched_background_gets_default_foreground() {
    let pages = render("#000000", &[Slide::title("Dark")]).unwrap();
    assert_eq!(pages[0].background, Rgb::BLACK);
    assert_eq!(pages[0].texts[0].color, Rgb::WHITE);
}

#[test]
fn test_unknown_icon_is_a_configuration_error() {
    let err = render("#fff", &[Slide::icon("Nope", "does-not-exist")]).unwrap_err();
    assert!(matches!(err, DeckError::IconNotFound(ref name) if name == "does-not-exist"));
    assert_eq!(err.status_code(), 500);
    assert!(err.to_string().contains("does-not-exist"));
}

#[test]
fn test_bullets_advance_with_markers() {
    let page = render_one(Slide::bullets("Express", ["one", "two", "three"]));
    let ys: Vec<f32> = page.texts.iter().skip(1).map(|block| block.y).collect();
    assert_eq!(ys, vec![200.0, 248.0, 296.0]);
    assert_eq!(page.icons.len(), 3);
    assert!(page.icons.iter().all(|icon| icon.x == 35.0));
}

#[test]
fn test_icon_slide_centers_glyph() {
    let page = render_one(Slide::icon("Express", "server"));
    assert_eq!(page.texts[0].y, 180.0);
    let icon = page.icons[0];
    assert_eq!(icon.size, 80.0);
    assert!((icon.x + layout::icon_width(80.0) / 2.0 - PAGE_WIDTH / 2.0).abs() < 0.01);
}

#[test]
fn test_image_fits_inside_frame() {
    let image = SlideImage::from_rgb("wide.png", 400, 100, vec![0; 400 * 100 * 3]).unwrap();
    let page = render_one(Slide::image(image, "© Someone"));
    let frame = page.images[0].frame;
    assert!(frame.x >= 50.0 && frame.x + frame.width <= 750.0 + 0.01);
    assert!(frame.y >= 80.0 && frame.y + frame.height <= 520.0 + 0.01);
    assert!((frame.width / frame.height - 4.0).abs() < 0.01);
    assert_eq!(page.text_lines(), vec!["© Someone"]);
}

#[test]
fn test_quote_wraps_body_and_citation() {
    let page = render_one(Slide::quote("Web Server", "Serve pages.", "Wikipedia"));
    assert_eq!(page.texts[1].text(), "\u{201C}Serve pages.\u{201D}\n\n    \u{2014} Wikipedia");
    assert!(matches!(
        page.texts[1].layout,
        surface::TextLayout::Wrapped { .. }
    ));
}

#[test]
fn test_font_size_overrides_defaults() {
    let page = render_one(Slide::text("t", "body").font_size(24.0));
    assert_eq!(page.texts[1].size, 24.0);

    let page = render_one(Slide::subtitled("Big", "small").font_size(48.0));
    assert_eq!(page.texts[0].size, 48.0);
    assert_eq!(page.texts[1].size, 24.0);
}
