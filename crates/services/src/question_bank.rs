//! Built-in JavaScript-fundamentals question bank.
//!
//! This is the default catalog wired by the app binary; any other `Catalog`
//! can be supplied through the same configuration surface.

use quiz_core::Error;
use quiz_core::model::{Catalog, OPTION_COUNT, QuestionDraft};

const QUESTIONS: &[(&str, [&str; OPTION_COUNT], usize)] = &[
    (
        "What does 'let' declare in JavaScript?",
        ["A constant value", "A changeable variable", "A function", "An array"],
        1,
    ),
    (
        "Which is the strict equality operator?",
        ["==", "=", "===", "!="],
        2,
    ),
    (
        "What is the purpose of a for loop?",
        [
            "To declare variables",
            "To repeat code a set number of times",
            "To handle events",
            "To style elements",
        ],
        1,
    ),
    (
        "How do you select an element by ID in the DOM?",
        ["querySelector", "getElementById", "createElement", "appendChild"],
        1,
    ),
    (
        "What keyword is used to define a constant in JavaScript?",
        ["let", "var", "const", "define"],
        2,
    ),
    (
        "Which method is used to write a message in the browser console?",
        ["alert()", "print()", "console.log()", "document.write()"],
        2,
    ),
    (
        "Which symbol is used for single-line comments in JavaScript?",
        ["/* */", "//", "<!-- -->", "#"],
        1,
    ),
    (
        "What will `typeof null` return?",
        ["'object'", "'null'", "'undefined'", "'number'"],
        0,
    ),
    (
        "Which statement stops the execution of a loop?",
        ["return", "stop", "exit", "break"],
        3,
    ),
    (
        "Which function converts a string to an integer?",
        ["parseInt()", "int()", "toInteger()", "Number()"],
        0,
    ),
];

/// Build the built-in catalog.
///
/// # Errors
///
/// Returns `Error` if a built-in question fails validation; that would be a
/// programming mistake caught by the tests below.
pub fn default_catalog() -> Result<Catalog, Error> {
    let mut questions = Vec::with_capacity(QUESTIONS.len());
    for (text, options, correct_index) in QUESTIONS {
        questions.push(QuestionDraft::new(*text, *options, *correct_index).validate()?);
    }
    Ok(Catalog::new(questions)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_catalog_validates() {
        let catalog = default_catalog().unwrap();
        assert_eq!(catalog.len(), 10);
    }

    #[test]
    fn every_question_has_an_in_range_answer() {
        let catalog = default_catalog().unwrap();
        for question in catalog.questions() {
            assert!(question.correct_index() < OPTION_COUNT);
            assert!(!question.options()[question.correct_index()].is_empty());
        }
    }
}
