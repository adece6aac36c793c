use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::prompt::ask;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: &'static str,
    pub answer: &'static str,
}

/// The built-in question bank.
pub const QUESTIONS: [Question; 4] = [
    Question {
        prompt: "What is the capital of France?",
        answer: "Paris",
    },
    Question {
        prompt: "How much is 5 * 6?",
        answer: "30",
    },
    Question {
        prompt: "What is the largest continent?",
        answer: "Asia",
    },
    Question {
        prompt: "Which programming language is named after a snake?",
        answer: "Python",
    },
];

impl Question {
    /// Answers match after trimming, ignoring case.
    pub fn is_correct(&self, answer: &str) -> bool {
        answer.trim().to_lowercase() == self.answer.to_lowercase()
    }
}

/// Return the questions in a random order, each exactly once.
pub fn shuffled(questions: &[Question], rng: &mut impl Rng) -> Vec<Question> {
    let mut order = questions.to_vec();
    order.shuffle(rng);
    order
}

/// Ask every question once and print the final score. Returns the score.
pub fn run(
    input: &mut impl BufRead,
    out: &mut impl Write,
    questions: &[Question],
) -> Result<usize> {
    writeln!(out, "Welcome to the quiz!\n").context("Failed to write banner.")?;

    let mut score = 0;
    for question in questions {
        writeln!(out, "{}", question.prompt).context("Failed to write question.")?;
        let answer = match ask(input, out, "Answer: ")? {
            Some(answer) => answer,
            None => break,
        };

        if question.is_correct(&answer) {
            score += 1;
            writeln!(out, "Correct!\n").context("Failed to write verdict.")?;
        } else {
            writeln!(out, "Wrong! The correct answer is: {}\n", question.answer)
                .context("Failed to write verdict.")?;
        }
        debug!(question = question.prompt, score, "answered");
    }

    writeln!(out, "You scored {}/{}.", score, questions.len()).context("Failed to write score.")?;
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    #[rstest]
    #[case("Paris", true)]
    #[case("  paris \t", true)]
    #[case("PARIS", true)]
    #[case("Lyon", false)]
    #[case("", false)]
    fn answers_are_compared_loosely(#[case] answer: &str, #[case] expected: bool) {
        assert_eq!(QUESTIONS[0].is_correct(answer), expected);
    }

    #[rstest]
    fn shuffle_keeps_every_question_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let order = shuffled(&QUESTIONS, &mut rng);
        assert_eq!(order.len(), QUESTIONS.len());
        for q in QUESTIONS.iter() {
            assert_eq!(order.iter().filter(|o| *o == q).count(), 1);
        }
    }

    #[rstest]
    fn scores_correct_answers() {
        let mut out = Vec::new();
        let script = "paris\n31\nasia\npython\n";
        let score = run(&mut script.as_bytes(), &mut out, &QUESTIONS).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(score, 3);
        assert!(text.contains("Wrong! The correct answer is: 30"));
        assert!(text.ends_with("You scored 3/4.\n"));
    }

    #[rstest]
    fn end_of_input_leaves_questions_unanswered() {
        let mut out = Vec::new();
        let score = run(&mut "Paris\n".as_bytes(), &mut out, &QUESTIONS).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(score, 1);
        assert!(text.ends_with("You scored 1/4.\n"));
    }
}
