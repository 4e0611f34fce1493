//! Save-time validation of editor drafts.
//!
//! Rules: bank name and subject are required, every question needs text, and
//! every question is worth at least `MIN_MARKS`. All problems are collected so
//! the editor can show them together. Export never runs these checks.

use std::collections::HashSet;

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::bank::{BankDraft, QuestionBank, QuestionRecord, QuestionType};

pub const MIN_MARKS: i64 = 1;

/// Lists every rule `draft` breaks. Empty means valid.
pub fn validate_draft(draft: &BankDraft) -> Vec<String> {
    let mut problems = Vec::new();

    if draft.name.trim().is_empty() {
        problems.push("name is required".to_string());
    }
    if draft.subject.trim().is_empty() {
        problems.push("subject is required".to_string());
    }

    let mut seen_ids = HashSet::new();
    for (index, question) in draft.questions.iter().enumerate() {
        let number = index + 1;
        if question.text.trim().is_empty() {
            problems.push(format!("question {number}: text is required"));
        }
        if question.marks < MIN_MARKS {
            problems.push(format!(
                "question {number}: marks must be at least {MIN_MARKS} (got {})",
                question.marks
            ));
        }
        if let Some(id) = question.id.as_deref().filter(|id| !id.trim().is_empty()) {
            if !seen_ids.insert(id) {
                problems.push(format!("question {number}: duplicate id '{id}'"));
            }
        }
    }

    problems
}

/// Validates `draft` and turns it into a bank with id `bank_id`.
///
/// Questions without an id get a fresh one; options are kept only for
/// multiple-choice questions.
pub fn build_bank(bank_id: String, draft: BankDraft) -> Result<QuestionBank, AppError> {
    let problems = validate_draft(&draft);
    if !problems.is_empty() {
        return Err(AppError::Validation(problems));
    }

    let questions = draft
        .questions
        .into_iter()
        .map(|q| QuestionRecord {
            id: q
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            text: q.text,
            question_type: q.question_type,
            // validate_draft guarantees marks >= MIN_MARKS
            marks: u32::try_from(q.marks).unwrap_or(u32::MAX),
            options: match q.question_type {
                QuestionType::MultipleChoice => q.options,
                _ => None,
            },
        })
        .collect();

    Ok(QuestionBank {
        id: bank_id,
        name: draft.name,
        subject: draft.subject,
        questions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bank::QuestionDraft;

    fn question(text: &str, question_type: QuestionType, marks: i64) -> QuestionDraft {
        QuestionDraft {
            id: None,
            text: text.to_string(),
            question_type,
            marks,
            options: None,
        }
    }

    fn draft(questions: Vec<QuestionDraft>) -> BankDraft {
        BankDraft {
            name: "Theoretical Computer Science Quiz".to_string(),
            subject: "Theoretical Computer Science".to_string(),
            questions,
        }
    }

    #[test]
    fn test_valid_draft_has_no_problems() {
        let d = draft(vec![question("Define the Chomsky hierarchy.", QuestionType::ShortAnswer, 5)]);
        assert!(validate_draft(&d).is_empty());
    }

    #[test]
    fn test_required_fields_and_min_marks_reported_together() {
        let d = BankDraft {
            name: " ".to_string(),
            subject: String::new(),
            questions: vec![
                question("", QuestionType::LongAnswer, 10),
                question("What is a Turing machine?", QuestionType::ShortAnswer, 0),
            ],
        };
        let problems = validate_draft(&d);
        assert_eq!(problems.len(), 4, "{problems:?}");
        assert!(problems.contains(&"name is required".to_string()));
        assert!(problems.contains(&"subject is required".to_string()));
        assert!(problems.iter().any(|p| p.starts_with("question 1: text")));
        assert!(problems.iter().any(|p| p.starts_with("question 2: marks")));
    }

    #[test]
    fn test_duplicate_question_ids_rejected() {
        let mut first = question("A", QuestionType::ShortAnswer, 1);
        first.id = Some("q".to_string());
        let mut second = question("B", QuestionType::ShortAnswer, 1);
        second.id = Some("q".to_string());
        let problems = validate_draft(&draft(vec![first, second]));
        assert_eq!(problems, vec!["question 2: duplicate id 'q'".to_string()]);
    }

    #[test]
    fn test_build_bank_assigns_ids_and_drops_non_mcq_options() {
        let mut mcq = question("Pick one", QuestionType::MultipleChoice, 2);
        mcq.options = Some(vec!["O(n)".to_string(), "O(n log n)".to_string()]);
        let mut tf = question("P = NP", QuestionType::TrueFalse, 1);
        tf.options = Some(vec!["stale".to_string()]);

        let bank = build_bank("bank-9".to_string(), draft(vec![mcq, tf])).unwrap();
        assert_eq!(bank.id, "bank-9");
        assert_eq!(bank.question_count(), 2);
        assert!(bank.questions.iter().all(|q| !q.id.is_empty()));
        assert_ne!(bank.questions[0].id, bank.questions[1].id);
        assert_eq!(bank.questions[0].options.as_ref().map(Vec::len), Some(2));
        assert_eq!(bank.questions[1].options, None);
    }

    #[test]
    fn test_build_bank_rejects_invalid_draft() {
        let err = build_bank("x".to_string(), BankDraft::default()).unwrap_err();
        assert!(matches!(err, AppError::Validation(p) if p.len() == 2));
    }
}
