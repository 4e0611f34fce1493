//! Paginator: lays a question bank out onto fixed-size pages.
//!
//! # Algorithm
//! - Every page opens with the header (title, subject, question count, rule)
//!   and the `Page N` footer.
//! - Questions flow top to bottom. Before a question is placed:
//!   1. if the cursor is past the overflow threshold, break the page;
//!   2. if the whole block (wrapped lines + metadata line) would run below the
//!      printable bottom and the page already holds body content, break the page.
//! - A block taller than an empty page is split line by line; each
//!   continuation page gets its own header and footer.
//!
//! The pass is synchronous and owns the document under construction. Callers on
//! the async runtime go through `export_async`.

use tracing::debug;

use crate::layout::document::{Document, Element, Page, Rule, TextRole, TextRun};
use crate::layout::font_metrics::TextMeasure;
use crate::layout::page_config::PageConfig;
use crate::models::bank::{QuestionBank, QuestionRecord};

pub const PLACEHOLDER_TEXT: &str = "No questions in this bank.";

/// Title and file stem used when a bank has no name.
pub const UNNAMED_BANK: &str = "Unnamed Bank";

/// The bank's display title, falling back to `UNNAMED_BANK` when blank.
pub fn document_title(bank: &QuestionBank) -> &str {
    if bank.name.trim().is_empty() {
        UNNAMED_BANK
    } else {
        &bank.name
    }
}

/// Lays out `bank` into a paginated document. Never fails and never mutates
/// the bank; malformed text simply wraps as-is.
pub fn layout_bank(bank: &QuestionBank, config: &PageConfig, measure: &dyn TextMeasure) -> Document {
    let mut writer = PageWriter::new(bank, config, measure);
    writer.start_page();

    if bank.questions.is_empty() {
        writer.place_placeholder();
    }

    for (index, question) in bank.questions.iter().enumerate() {
        writer.place_question(index + 1, question);
    }

    let pages = writer.pages;
    debug!(
        bank_id = %bank.id,
        questions = bank.question_count(),
        pages = pages.len(),
        "Laid out question bank"
    );

    Document {
        title: document_title(bank).to_string(),
        page_width_mm: config.page_width_mm,
        page_height_mm: config.page_height_mm,
        pages,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page writer
// ────────────────────────────────────────────────────────────────────────────

struct PageWriter<'a> {
    bank: &'a QuestionBank,
    config: &'a PageConfig,
    measure: &'a dyn TextMeasure,
    pages: Vec<Page>,
    /// Baseline of the next line, in mm from the top edge.
    cursor_mm: f32,
    /// True once the current page carries any body line.
    has_body: bool,
}

impl<'a> PageWriter<'a> {
    fn new(bank: &'a QuestionBank, config: &'a PageConfig, measure: &'a dyn TextMeasure) -> Self {
        Self {
            bank,
            config,
            measure,
            pages: Vec::new(),
            cursor_mm: config.margin_mm,
            has_body: false,
        }
    }

    fn start_page(&mut self) {
        let number = self.pages.len() as u32 + 1;
        self.pages.push(Page::new(number));
        self.cursor_mm = self.config.margin_mm;
        self.has_body = false;
        self.write_header();
        self.write_footer(number);
    }

    fn write_header(&mut self) {
        let cfg = self.config;
        let title = document_title(self.bank).to_string();
        let title_width = self.measure.measure_mm(&title, cfg.title_size_pt);
        let title_x = cfg.center_x_mm() - title_width / 2.0;
        self.text(title, title_x, cfg.title_size_pt, 0.0, TextRole::Title);
        self.cursor_mm += cfg.title_advance_mm;

        let subject = format!("Subject: {}", self.bank.subject);
        self.text(subject, cfg.margin_mm, cfg.header_size_pt, 0.0, TextRole::Subject);
        self.cursor_mm += cfg.subject_advance_mm;

        let count = format!("Total Questions: {}", self.bank.question_count());
        self.text(count, cfg.margin_mm, cfg.header_size_pt, 0.0, TextRole::QuestionCount);
        self.cursor_mm += cfg.count_advance_mm;

        let rule = Rule {
            x1_mm: cfg.margin_mm,
            y1_mm: self.cursor_mm,
            x2_mm: cfg.page_width_mm - cfg.margin_mm,
            y2_mm: self.cursor_mm,
        };
        self.current_page().elements.push(Element::Rule(rule));
        self.cursor_mm += cfg.rule_advance_mm;
    }

    fn write_footer(&mut self, number: u32) {
        let cfg = self.config;
        let label = format!("Page {number}");
        let width = self.measure.measure_mm(&label, cfg.footer_size_pt);
        let run = TextRun {
            text: label,
            x_mm: cfg.center_x_mm() - width / 2.0,
            y_mm: cfg.footer_baseline_mm(),
            size_pt: cfg.footer_size_pt,
            gray: 0.0,
            role: TextRole::Footer,
        };
        self.current_page().elements.push(Element::Text(run));
    }

    fn place_placeholder(&mut self) {
        let cfg = self.config;
        self.text(
            PLACEHOLDER_TEXT.to_string(),
            cfg.margin_mm,
            cfg.body_size_pt,
            0.0,
            TextRole::Placeholder,
        );
        self.has_body = true;
        self.cursor_mm += cfg.line_height_mm;
    }

    fn place_question(&mut self, number: usize, question: &QuestionRecord) {
        let cfg = self.config;

        if self.cursor_mm > cfg.overflow_threshold_mm() {
            self.start_page();
        }

        let heading = format!("Question {number}: {}", question.text);
        let lines = self
            .measure
            .wrap_lines(&heading, cfg.printable_width_mm(), cfg.body_size_pt);

        // The metadata baseline sits one line height below the last text line.
        let metadata_y = self.cursor_mm + lines.len() as f32 * cfg.line_height_mm;
        if self.has_body && metadata_y > cfg.body_bottom_mm() {
            self.start_page();
        }

        for line in lines {
            if self.cursor_mm > cfg.body_bottom_mm() {
                debug!(question = number, "Splitting oversized question across pages");
                self.start_page();
            }
            self.text(line, cfg.margin_mm, cfg.body_size_pt, 0.0, TextRole::QuestionLine { number });
            self.has_body = true;
            self.cursor_mm += cfg.line_height_mm;
        }

        if self.cursor_mm > cfg.body_bottom_mm() {
            self.start_page();
        }
        let metadata = format!("Type: {} | Marks: {}", question.question_type, question.marks);
        self.text(
            metadata,
            cfg.margin_mm + cfg.metadata_indent_mm,
            cfg.metadata_size_pt,
            cfg.metadata_gray,
            TextRole::Metadata { number },
        );
        self.has_body = true;
        self.cursor_mm += cfg.question_spacing_mm;
    }

    /// Writes a text run at the current cursor.
    fn text(&mut self, text: String, x_mm: f32, size_pt: f32, gray: f32, role: TextRole) {
        let run = TextRun {
            text,
            x_mm,
            y_mm: self.cursor_mm,
            size_pt,
            gray,
            role,
        };
        self.current_page().elements.push(Element::Text(run));
    }

    fn current_page(&mut self) -> &mut Page {
        // start_page() always runs before anything is written
        let index = self.pages.len() - 1;
        &mut self.pages[index]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{get_metrics, FontFamily};
    use crate::layout::page_config::default_page_config;
    use crate::models::bank::QuestionType;

    fn bank_with(questions: Vec<QuestionRecord>) -> QuestionBank {
        QuestionBank {
            id: "bank-1".to_string(),
            name: "Computer Science Midterm".to_string(),
            subject: "Computer Science".to_string(),
            questions,
        }
    }

    fn short_questions(n: usize) -> Vec<QuestionRecord> {
        (1..=n)
            .map(|i| QuestionRecord::new(i.to_string(), format!("What is {i} + {i}?"), QuestionType::ShortAnswer, 2))
            .collect()
    }

    fn layout(bank: &QuestionBank) -> Document {
        let config = default_page_config();
        layout_bank(bank, &config, get_metrics(&FontFamily::Helvetica))
    }

    fn assert_header_and_footer(doc: &Document, bank: &QuestionBank) {
        for (i, page) in doc.pages.iter().enumerate() {
            assert_eq!(page.number as usize, i + 1, "page numbers must be contiguous");
            assert_eq!(page.text_with_role(TextRole::Title), Some(document_title(bank)));
            let subject = format!("Subject: {}", bank.subject);
            assert_eq!(page.text_with_role(TextRole::Subject), Some(subject.as_str()));
            let count = format!("Total Questions: {}", bank.question_count());
            assert_eq!(page.text_with_role(TextRole::QuestionCount), Some(count.as_str()));
            let footer = format!("Page {}", i + 1);
            assert_eq!(page.text_with_role(TextRole::Footer), Some(footer.as_str()));
            assert_eq!(page.rules().count(), 1);
        }
    }

    #[test]
    fn test_empty_bank_yields_single_placeholder_page() {
        let bank = bank_with(vec![]);
        let doc = layout(&bank);

        assert_eq!(doc.page_count(), 1);
        assert_header_and_footer(&doc, &bank);
        assert_eq!(doc.pages[0].body_lines(), vec![PLACEHOLDER_TEXT]);
        assert_eq!(doc.pages[0].text_with_role(TextRole::QuestionCount), Some("Total Questions: 0"));
    }

    #[test]
    fn test_sample_bank_layout() {
        let bank = QuestionBank {
            id: "s".to_string(),
            name: "Sample".to_string(),
            subject: "Math".to_string(),
            questions: vec![QuestionRecord::new("1", "2+2=?", QuestionType::MultipleChoice, 2)],
        };
        let doc = layout(&bank);

        assert_eq!(doc.page_count(), 1);
        let page = &doc.pages[0];
        assert_eq!(page.text_with_role(TextRole::Title), Some("Sample"));
        assert_eq!(page.text_with_role(TextRole::Subject), Some("Subject: Math"));
        assert_eq!(page.text_with_role(TextRole::QuestionCount), Some("Total Questions: 1"));
        assert_eq!(page.text_with_role(TextRole::Footer), Some("Page 1"));
        assert_eq!(page.body_lines(), vec!["Question 1: 2+2=?", "Type: MCQ | Marks: 2"]);
    }

    #[test]
    fn test_body_starts_below_header_and_metadata_is_indented_gray() {
        let bank = bank_with(short_questions(1));
        let doc = layout(&bank);
        let config = default_page_config();

        let first_line = doc.pages[0]
            .texts()
            .find(|t| t.role == TextRole::QuestionLine { number: 1 })
            .unwrap();
        assert!((first_line.y_mm - config.body_top_mm()).abs() < 1e-4);
        assert_eq!(first_line.gray, 0.0);

        let metadata = doc.pages[0]
            .texts()
            .find(|t| t.role == TextRole::Metadata { number: 1 })
            .unwrap();
        assert!((metadata.x_mm - (config.margin_mm + config.metadata_indent_mm)).abs() < 1e-4);
        assert!((metadata.y_mm - (first_line.y_mm + config.line_height_mm)).abs() < 1e-4);
        assert!(metadata.gray > 0.0);
        assert_eq!(metadata.size_pt, config.metadata_size_pt);
    }

    #[test]
    fn test_title_is_centered() {
        let bank = bank_with(vec![]);
        let doc = layout(&bank);
        let config = default_page_config();
        let metrics = get_metrics(&FontFamily::Helvetica);

        let title = doc.pages[0].texts().find(|t| t.role == TextRole::Title).unwrap();
        let width = metrics.measure_mm(&title.text, title.size_pt);
        let center = title.x_mm + width / 2.0;
        assert!((center - config.center_x_mm()).abs() < 1e-3);
    }

    #[test]
    fn test_small_bank_fits_on_one_page_in_order() {
        let bank = bank_with(short_questions(5));
        let doc = layout(&bank);

        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages[0].question_numbers(), vec![1, 2, 3, 4, 5]);
        let body = doc.pages[0].body_lines();
        assert_eq!(body[0], "Question 1: What is 1 + 1?");
        assert_eq!(body[1], "Type: Short Answer | Marks: 2");
        assert_eq!(body[8], "Question 5: What is 5 + 5?");
    }

    #[test]
    fn test_threshold_breaks_pages_without_dropping_questions() {
        // One-line questions advance 22mm each from 57mm: ten fit before the
        // cursor passes the 257mm threshold.
        let bank = bank_with(short_questions(30));
        let doc = layout(&bank);

        assert_eq!(doc.page_count(), 3);
        assert_header_and_footer(&doc, &bank);
        assert_eq!(doc.pages[0].question_numbers(), (1..=10).collect::<Vec<_>>());
        assert_eq!(doc.pages[1].question_numbers(), (11..=20).collect::<Vec<_>>());
        assert_eq!(doc.pages[2].question_numbers(), (21..=30).collect::<Vec<_>>());

        let all: Vec<usize> = doc.pages.iter().flat_map(|p| p.question_numbers()).collect();
        assert_eq!(all, (1..=30).collect::<Vec<_>>());
    }

    #[test]
    fn test_cursor_exactly_on_threshold_does_not_break() {
        // Four five-line questions advance 4 * (5 * 7 + 15) = 200mm from 57mm,
        // leaving the cursor exactly on the 257mm threshold.
        let config = default_page_config();
        let mut questions: Vec<QuestionRecord> = (1..=4)
            .map(|i| {
                QuestionRecord::new(i.to_string(), "part\npart\npart\npart\npart", QuestionType::LongAnswer, 5)
            })
            .collect();
        questions.push(QuestionRecord::new("5", "Boundary question", QuestionType::TrueFalse, 1));
        questions.push(QuestionRecord::new("6", "Next page question", QuestionType::TrueFalse, 1));
        let bank = bank_with(questions);
        let doc = layout(&bank);

        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0].question_numbers(), vec![1, 2, 3, 4, 5]);
        assert_eq!(doc.pages[1].question_numbers(), vec![6]);

        let boundary = doc.pages[0]
            .texts()
            .find(|t| t.role == TextRole::QuestionLine { number: 5 })
            .unwrap();
        assert_eq!(boundary.y_mm, config.overflow_threshold_mm());
    }

    #[test]
    fn test_block_that_would_cross_bottom_moves_whole_to_next_page() {
        let mut questions = short_questions(9);
        questions.push(QuestionRecord::new(
            "10",
            "Discuss the trade-offs of ".repeat(30),
            QuestionType::LongAnswer,
            10,
        ));
        let bank = bank_with(questions);
        let doc = layout(&bank);

        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0].question_numbers(), (1..=9).collect::<Vec<_>>());
        assert_eq!(doc.pages[1].question_numbers(), vec![10]);
        assert!(doc.pages[0]
            .texts()
            .all(|t| t.role != TextRole::Metadata { number: 10 }));
        assert!(doc.pages[1]
            .texts()
            .any(|t| t.role == TextRole::Metadata { number: 10 }));
    }

    #[test]
    fn test_oversized_question_splits_across_pages() {
        let config = default_page_config();
        let metrics = get_metrics(&FontFamily::Helvetica);
        let text = "word ".repeat(1500);
        let bank = bank_with(vec![
            QuestionRecord::new("1", "Warm-up question", QuestionType::ShortAnswer, 1),
            QuestionRecord::new("2", text.clone(), QuestionType::LongAnswer, 20),
            QuestionRecord::new("3", "Closing question", QuestionType::TrueFalse, 1),
        ]);
        let doc = layout(&bank);

        let expected = metrics.wrap_lines(
            &format!("Question 2: {text}"),
            config.printable_width_mm(),
            config.body_size_pt,
        );
        assert!(expected.len() > 64, "fixture should span several pages");
        assert!(doc.page_count() >= 3);
        assert_header_and_footer(&doc, &bank);

        let placed: Vec<&str> = doc
            .pages
            .iter()
            .flat_map(|p| p.texts())
            .filter(|t| t.role == TextRole::QuestionLine { number: 2 })
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(placed, expected.iter().map(String::as_str).collect::<Vec<_>>());

        for page in &doc.pages {
            for run in page.texts().filter(|t| t.role != TextRole::Footer) {
                assert!(
                    run.y_mm <= config.body_bottom_mm() + 1e-4,
                    "{:?} placed below printable bottom on page {}",
                    run.role,
                    page.number
                );
            }
        }

        let all: Vec<usize> = doc.pages.iter().flat_map(|p| p.question_numbers()).collect();
        assert_eq!(all.first(), Some(&1));
        assert_eq!(all.last(), Some(&3));
        let metadata_count = doc
            .pages
            .iter()
            .flat_map(|p| p.texts())
            .filter(|t| matches!(t.role, TextRole::Metadata { .. }))
            .count();
        assert_eq!(metadata_count, 3);
    }

    #[test]
    fn test_blank_name_falls_back_to_placeholder_title() {
        let mut bank = bank_with(short_questions(1));
        bank.name = "   ".to_string();
        let doc = layout(&bank);
        assert_eq!(doc.title, UNNAMED_BANK);
        assert_eq!(doc.pages[0].text_with_role(TextRole::Title), Some(UNNAMED_BANK));
    }

    #[test]
    fn test_layout_does_not_mutate_bank() {
        let bank = bank_with(short_questions(12));
        let before = bank.clone();
        let _ = layout(&bank);
        assert_eq!(bank, before);
    }
}
