//! PDF serialization of a laid-out `Document`.
//!
//! Writes one page object per `Page`, a single unembedded Helvetica font with
//! WinAnsi encoding, and a document-info title. Layout coordinates are
//! millimetres from the top-left; PDF user space is points from the bottom-left.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::layout::document::{Document, Element, Page};
use crate::layout::font_metrics::{win_ansi_byte, FontFamily};

const PT_PER_MM: f32 = 72.0 / 25.4;
const FONT_RESOURCE: &[u8] = b"F1";
const RULE_WIDTH_PT: f32 = 0.57;

/// Sequential indirect-object id allocator.
struct RefAlloc(i32);

impl RefAlloc {
    fn next(&mut self) -> Ref {
        let id = Ref::new(self.0);
        self.0 += 1;
        id
    }
}

/// Serializes `document` into a complete PDF file.
pub fn render_pdf(document: &Document, font: FontFamily) -> Vec<u8> {
    let mut alloc = RefAlloc(1);
    let catalog_id = alloc.next();
    let page_tree_id = alloc.next();
    let font_id = alloc.next();
    let info_id = alloc.next();

    let page_ids: Vec<(Ref, Ref)> = document
        .pages
        .iter()
        .map(|_| (alloc.next(), alloc.next()))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);

    let width_pt = document.page_width_mm * PT_PER_MM;
    let height_pt = document.page_height_mm * PT_PER_MM;

    for (page, (page_id, content_id)) in document.pages.iter().zip(&page_ids) {
        let mut page_writer = pdf.page(*page_id);
        page_writer.media_box(Rect::new(0.0, 0.0, width_pt, height_pt));
        page_writer.parent(page_tree_id);
        page_writer.contents(*content_id);
        page_writer.resources().fonts().pair(Name(FONT_RESOURCE), font_id);
        page_writer.finish();

        let content = page_content(page, height_pt);
        pdf.stream(*content_id, &content);
    }

    pdf.type1_font(font_id)
        .base_font(Name(font.base_font().as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    pdf.document_info(info_id).title(TextStr(&document.title));

    pdf.finish()
}

fn page_content(page: &Page, height_pt: f32) -> Vec<u8> {
    let mut content = Content::new();

    for element in &page.elements {
        match element {
            Element::Text(run) => {
                let encoded = encode_win_ansi(&run.text);
                content.set_fill_gray(run.gray);
                content.begin_text();
                content.set_font(Name(FONT_RESOURCE), run.size_pt);
                content.next_line(run.x_mm * PT_PER_MM, height_pt - run.y_mm * PT_PER_MM);
                content.show(Str(&encoded));
                content.end_text();
            }
            Element::Rule(rule) => {
                content.set_stroke_gray(0.0);
                content.set_line_width(RULE_WIDTH_PT);
                content.move_to(rule.x1_mm * PT_PER_MM, height_pt - rule.y1_mm * PT_PER_MM);
                content.line_to(rule.x2_mm * PT_PER_MM, height_pt - rule.y2_mm * PT_PER_MM);
                content.stroke();
            }
        }
    }

    content.finish().to_vec()
}

/// Maps text to WinAnsi bytes; characters the encoding lacks become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(|c| win_ansi_byte(c).unwrap_or(b'?')).collect()
}
