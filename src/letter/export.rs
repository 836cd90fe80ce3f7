// src/letter/export.rs
//! Paginated PDF export of a letter (A4, 12pt Helvetica)

use anyhow::{Context, Result};
use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

pub const DEFAULT_FILENAME: &str = "cover-letter.pdf";

/// Page geometry in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub left_margin: f32,
    pub top_offset: f32,
    pub bottom_margin: f32,
    pub wrap_width: f32,
    pub font_size: f32,
    pub line_height_factor: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_width: 595.28,
            page_height: 841.89,
            left_margin: 40.0,
            top_offset: 100.0,
            bottom_margin: 40.0,
            wrap_width: 500.0,
            font_size: 12.0,
            line_height_factor: 1.15,
        }
    }
}

impl PageLayout {
    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_height_factor
    }

    pub fn lines_per_page(&self) -> usize {
        let usable = self.page_height - self.top_offset - self.bottom_margin;
        // First baseline sits at top_offset, so one line always fits
        ((usable / self.line_height()).floor() as usize + 1).max(1)
    }
}

/// Helvetica advance widths (1/1000 em) for ASCII 0x20..=0x7E.
const HELVETICA_WIDTHS: [u16; 95] = [
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
const FALLBACK_WIDTH: u16 = 556;

fn char_width(c: char, font_size: f32) -> f32 {
    let code = c as usize;
    let units = if (0x20..=0x7E).contains(&code) {
        HELVETICA_WIDTHS[code - 0x20]
    } else {
        FALLBACK_WIDTH
    };
    units as f32 * font_size / 1000.0
}

pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(|c| char_width(c, font_size)).sum()
}

/// Word-wrap `text` to `max_width` points. Explicit newlines are kept; words
/// wider than a line are split by character.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let space = char_width(' ', font_size);

    for paragraph in text.replace("\r\n", "\n").split('\n') {
        let mut line = String::new();
        let mut line_width = 0.0;

        for word in paragraph.split_whitespace() {
            let word_width = text_width(word, font_size);

            if !line.is_empty() && line_width + space + word_width <= max_width {
                line.push(' ');
                line.push_str(word);
                line_width += space + word_width;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0.0;
            }

            if word_width <= max_width {
                line.push_str(word);
                line_width = word_width;
                continue;
            }

            for c in word.chars() {
                let w = char_width(c, font_size);
                if !line.is_empty() && line_width + w > max_width {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0.0;
                }
                line.push(c);
                line_width += w;
            }
        }

        lines.push(line);
    }

    lines
}

/// Map text to WinAnsiEncoding bytes; unmappable characters become '?'.
fn win_ansi_bytes(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

/// Render `text` as a PDF document and return its bytes.
pub fn export_pdf(text: &str, layout: &PageLayout) -> Result<Vec<u8>> {
    let lines = wrap_text(text, layout.wrap_width, layout.font_size);
    let per_page = layout.lines_per_page();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for chunk in lines.chunks(per_page) {
        let page_id = add_page(&mut doc, pages_id, chunk, layout)?;
        kids.push(page_id.into());
    }
    if kids.is_empty() {
        let page_id = add_page(&mut doc, pages_id, &[], layout)?;
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), layout.page_width.into(), layout.page_height.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Cover Letter"),
        "CreationDate" => Object::string_literal(Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .context("Failed to serialize PDF document")?;
    Ok(buffer)
}

fn add_page(
    doc: &mut Document,
    pages_id: ObjectId,
    lines: &[String],
    layout: &PageLayout,
) -> Result<ObjectId> {
    let baseline = layout.page_height - layout.top_offset;

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), layout.font_size.into()]),
        Operation::new("TL", vec![layout.line_height().into()]),
        Operation::new("Td", vec![layout.left_margin.into(), baseline.into()]),
    ];
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(win_ansi_bytes(line))],
        ));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().context("Failed to encode page content")?,
    ));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    }))
}
