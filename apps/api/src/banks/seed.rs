//! Sample banks written on first run, so a fresh install has something to show.

use crate::models::bank::{QuestionBank, QuestionRecord, QuestionType};

pub fn sample_banks() -> Vec<QuestionBank> {
    use QuestionType::{LongAnswer, MultipleChoice, ShortAnswer};

    vec![
        QuestionBank {
            id: "1".to_string(),
            name: "Computer Science Midterm".to_string(),
            subject: "Computer Science".to_string(),
            questions: vec![
                QuestionRecord::new("1", "What is a binary tree?", ShortAnswer, 5),
                QuestionRecord::new("2", "Explain the concept of recursion.", LongAnswer, 10),
                QuestionRecord::new("3", "What is the time complexity of quicksort?", MultipleChoice, 3),
            ],
        },
        QuestionBank {
            id: "2".to_string(),
            name: "Electronics Basics".to_string(),
            subject: "Electronics".to_string(),
            questions: vec![
                QuestionRecord::new("1", "What is Ohm's Law?", ShortAnswer, 5),
                QuestionRecord::new("2", "Explain the working principle of a transistor.", LongAnswer, 10),
            ],
        },
        QuestionBank {
            id: "3".to_string(),
            name: "Theoretical Computer Science Quiz".to_string(),
            subject: "Theoretical Computer Science".to_string(),
            questions: vec![
                QuestionRecord::new("1", "Define the Chomsky hierarchy.", ShortAnswer, 5),
                QuestionRecord::new("2", "Explain the difference between P and NP problems.", LongAnswer, 10),
                QuestionRecord::new("3", "What is a Turing machine?", ShortAnswer, 5),
            ],
        },
    ]
}
