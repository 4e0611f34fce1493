//! In-memory paginated document produced by the paginator.
//!
//! A `Document` is a list of pages of positioned drawing elements. It carries
//! no PDF specifics; `layout::pdf` serializes it.

/// What a text run is for. Lets callers and tests pick a page apart without
/// re-parsing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Subject,
    QuestionCount,
    Footer,
    /// One wrapped line of question `number` (1-indexed).
    QuestionLine { number: usize },
    /// The "Type | Marks" line of question `number`.
    Metadata { number: usize },
    /// "No questions in this bank."
    Placeholder,
}

#[cfg(test)]
impl TextRole {
    pub fn is_header(&self) -> bool {
        matches!(self, TextRole::Title | TextRole::Subject | TextRole::QuestionCount)
    }
}

/// A single line of text with its baseline origin (left edge) in millimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
    pub size_pt: f32,
    /// 0.0 = black, 1.0 = white.
    pub gray: f32,
    pub role: TextRole,
}

/// A straight stroked line.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub x1_mm: f32,
    pub y1_mm: f32,
    pub x2_mm: f32,
    pub y2_mm: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(TextRun),
    Rule(Rule),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-indexed page number, as printed in the footer.
    pub number: u32,
    pub elements: Vec<Element>,
}

impl Page {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            elements: Vec::new(),
        }
    }
}

/// Accessors for picking a laid-out page apart in tests.
#[cfg(test)]
impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(run) => Some(run),
            Element::Rule(_) => None,
        })
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.elements.iter().filter_map(|e| match e {
            Element::Rule(rule) => Some(rule),
            Element::Text(_) => None,
        })
    }

    /// First text run with the given role, if any.
    pub fn text_with_role(&self, role: TextRole) -> Option<&str> {
        self.texts().find(|t| t.role == role).map(|t| t.text.as_str())
    }

    /// Body text in drawing order (everything except header and footer).
    pub fn body_lines(&self) -> Vec<&str> {
        self.texts()
            .filter(|t| !t.role.is_header() && t.role != TextRole::Footer)
            .map(|t| t.text.as_str())
            .collect()
    }

    /// Question numbers that have at least one line on this page, in order,
    /// without repeats.
    pub fn question_numbers(&self) -> Vec<usize> {
        let mut numbers: Vec<usize> = Vec::new();
        for run in self.texts() {
            if let TextRole::QuestionLine { number } = run.role {
                if numbers.last() != Some(&number) {
                    numbers.push(number);
                }
            }
        }
        numbers
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Display title; also the stem of the output file name.
    pub title: String,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
