use std::fmt;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Question records
// ────────────────────────────────────────────────────────────────────────────

/// The closed set of question kinds a bank can hold.
///
/// Serialized with the labels teachers see in the editor, which are also the
/// labels printed on the exported metadata line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "MCQ")]
    MultipleChoice,
    #[serde(rename = "Short Answer")]
    ShortAnswer,
    #[serde(rename = "Long Answer")]
    LongAnswer,
    #[serde(rename = "True/False")]
    TrueFalse,
}

impl QuestionType {
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "MCQ",
            QuestionType::ShortAnswer => "Short Answer",
            QuestionType::LongAnswer => "Long Answer",
            QuestionType::TrueFalse => "True/False",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub marks: u32,
    /// Only meaningful for `MultipleChoice`; may be empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl QuestionRecord {
    pub fn new(id: impl Into<String>, text: impl Into<String>, question_type: QuestionType, marks: u32) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            question_type,
            marks,
            options: None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Banks
// ────────────────────────────────────────────────────────────────────────────

/// A named, subject-tagged, ordered collection of questions.
///
/// The question count is always derived from `questions`. The stored blob
/// still carries a `questionCount` field, which is written from the live
/// list and ignored when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredBank", into = "StoredBank")]
pub struct QuestionBank {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub questions: Vec<QuestionRecord>,
}

impl QuestionBank {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn summary(&self) -> BankSummary {
        BankSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            subject: self.subject.clone(),
            question_count: self.question_count(),
        }
    }
}

/// On-disk / on-wire shape of a bank.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredBank {
    id: String,
    name: String,
    subject: String,
    #[serde(default)]
    question_count: usize,
    #[serde(default)]
    questions: Vec<QuestionRecord>,
}

impl From<StoredBank> for QuestionBank {
    fn from(stored: StoredBank) -> Self {
        // question_count is recomputed from questions on every write
        QuestionBank {
            id: stored.id,
            name: stored.name,
            subject: stored.subject,
            questions: stored.questions,
        }
    }
}

impl From<QuestionBank> for StoredBank {
    fn from(bank: QuestionBank) -> Self {
        StoredBank {
            question_count: bank.questions.len(),
            id: bank.id,
            name: bank.name,
            subject: bank.subject,
            questions: bank.questions,
        }
    }
}

/// Dashboard row for a bank.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub question_count: usize,
}

/// Editable fields of a bank, as submitted by the editor form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDraft {
    pub name: String,
    pub subject: String,
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub marks: i64,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_type_labels_round_trip_through_json() {
        let json = serde_json::to_string(&QuestionType::TrueFalse).unwrap();
        assert_eq!(json, "\"True/False\"");
        let parsed: QuestionType = serde_json::from_str("\"Short Answer\"").unwrap();
        assert_eq!(parsed, QuestionType::ShortAnswer);
        assert_eq!(QuestionType::MultipleChoice.to_string(), "MCQ");
    }

    #[test]
    fn test_stale_question_count_is_ignored_on_read() {
        let raw = r#"{
            "id": "1",
            "name": "Electronics Basics",
            "subject": "Electronics",
            "questionCount": 9,
            "questions": [
                {"id": "1", "text": "What is Ohm's Law?", "type": "Short Answer", "marks": 5}
            ]
        }"#;
        let bank: QuestionBank = serde_json::from_str(raw).unwrap();
        assert_eq!(bank.question_count(), 1);

        let value = serde_json::to_value(&bank).unwrap();
        assert_eq!(value["questionCount"], 1);
    }

    #[test]
    fn test_options_omitted_when_absent() {
        let q = QuestionRecord::new("1", "2+2=?", QuestionType::ShortAnswer, 2);
        let value = serde_json::to_value(&q).unwrap();
        assert!(value.get("options").is_none());
        assert_eq!(value["type"], "Short Answer");
    }

    #[test]
    fn test_summary_uses_live_count() {
        let mut bank = QuestionBank {
            id: "b".into(),
            name: "Quiz".into(),
            subject: "Math".into(),
            questions: vec![],
        };
        assert_eq!(bank.summary().question_count, 0);
        bank.questions
            .push(QuestionRecord::new("1", "x", QuestionType::LongAnswer, 1));
        assert_eq!(bank.summary().question_count, 1);
    }
}
