//! Exam generator: question checks and quiz grading.

use serde::Serialize;

use crate::api::{Difficulty, GenerateExamRequest, Question, QuestionType};
use crate::core::FieldErrors;
use crate::error::StudyError;

/// Most questions a single generated exam may hold.
pub const MAX_QUESTIONS: u32 = 30;

/// Build a generate request.
///
/// # Errors
///
/// Returns [`StudyError::Validation`] if `count` is outside `1..=30`.
pub fn generate_request(
    difficulty: Difficulty,
    question_type: QuestionType,
    count: u32,
) -> Result<GenerateExamRequest, StudyError> {
    if !(1..=MAX_QUESTIONS).contains(&count) {
        return Err(StudyError::invalid(
            "numberOfQuestions",
            format!("Number of questions must be between 1 and {MAX_QUESTIONS}"),
        ));
    }
    Ok(GenerateExamRequest {
        difficulty,
        question_type,
        number_of_questions: count,
    })
}

/// Fields of the add-question form, as typed.
#[derive(Debug, Clone, Default)]
pub struct QuestionForm {
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl QuestionForm {
    /// Check the form and build the question.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::Validation`] listing every invalid field.
    pub fn into_question(self) -> Result<Question, StudyError> {
        let mut errors = FieldErrors::new();
        errors.require("question", "Question", &self.question);
        let question = self.question.trim().to_string();
        let answer = self.answer.trim().to_string();
        let difficulty = self.difficulty;

        let built = match self.question_type {
            QuestionType::Mcq => {
                let options: Vec<String> = self
                    .options
                    .iter()
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect();
                if options.len() < 2 {
                    errors.add("options", "Multiple choice needs at least 2 options");
                }
                if errors.require("answer", "Answer", &answer) && !options.contains(&answer) {
                    errors.add("answer", "Answer must be one of the options");
                }
                Question::Mcq {
                    difficulty,
                    question,
                    options,
                    answer,
                }
            }
            QuestionType::Short => {
                errors.require("answer", "Answer", &answer);
                Question::Short {
                    difficulty,
                    question,
                    answer,
                }
            }
            QuestionType::TrueFalse => {
                let answer = answer.to_lowercase();
                if answer != "true" && answer != "false" {
                    errors.add("answer", "Answer must be 'true' or 'false'");
                }
                Question::TrueFalse {
                    difficulty,
                    question,
                    answer,
                }
            }
            QuestionType::Mixed => {
                errors.add("type", "Pick mcq, short, or truefalse for a single question");
                return Err(into_error(errors));
            }
        };

        errors.into_result()?;
        Ok(built)
    }
}

fn into_error(errors: FieldErrors) -> StudyError {
    match errors.into_result() {
        Err(e) => e,
        Ok(()) => StudyError::invalid("question", "Invalid question"),
    }
}

/// Outcome of answering one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerResult {
    pub given: String,
    pub correct: bool,
}

/// A quiz in progress.
///
/// Each question takes one answer; later answers to the same question are
/// ignored.
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    questions: Vec<Question>,
    answers: Vec<Option<AnswerResult>>,
}

impl QuizAttempt {
    /// Start a quiz over `questions`.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        let answers = vec![None; questions.len()];
        Self { questions, answers }
    }

    /// The questions, in order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Record an answer. Returns the stored result: the new one, or the
    /// earlier one if the question was already answered. `None` for an
    /// out-of-range index or a blank answer.
    pub fn answer(&mut self, index: usize, given: &str) -> Option<&AnswerResult> {
        let question = self.questions.get(index)?;
        let slot = self.answers.get_mut(index)?;
        if slot.is_none() {
            let given = given.trim();
            if given.is_empty() {
                return None;
            }
            *slot = Some(AnswerResult {
                given: given.to_string(),
                correct: is_correct(question, given),
            });
        }
        slot.as_ref()
    }

    /// The stored result for one question.
    #[must_use]
    pub fn result(&self, index: usize) -> Option<&AnswerResult> {
        self.answers.get(index).and_then(Option::as_ref)
    }

    /// `(correct, total)`.
    #[must_use]
    pub fn score(&self) -> (usize, usize) {
        let correct = self.answers.iter().flatten().filter(|a| a.correct).count();
        (correct, self.questions.len())
    }
}

/// Compare an answer with the key.
///
/// Multiple choice must match exactly. True/false accepts any case and the
/// `t`/`f` shorthand. Short answers ignore surrounding whitespace and case.
#[must_use]
pub fn is_correct(question: &Question, given: &str) -> bool {
    match question {
        Question::Mcq { answer, .. } => given == answer,
        Question::TrueFalse { answer, .. } => {
            matches!((parse_truth(given), parse_truth(answer)), (Some(a), Some(b)) if a == b)
        }
        Question::Short { answer, .. } => {
            given.trim().to_lowercase() == answer.trim().to_lowercase()
        }
    }
}

fn parse_truth(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "t" => Some(true),
        "false" | "f" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mcq() -> Question {
        Question::Mcq {
            difficulty: Difficulty::Easy,
            question: "2 + 2?".to_string(),
            options: vec!["3".to_string(), "4".to_string()],
            answer: "4".to_string(),
        }
    }

    fn short() -> Question {
        Question::Short {
            difficulty: Difficulty::Medium,
            question: "Capital of France?".to_string(),
            answer: "Paris".to_string(),
        }
    }

    #[test]
    fn test_count_bounds() {
        assert!(generate_request(Difficulty::Easy, QuestionType::Mixed, 0).is_err());
        assert!(generate_request(Difficulty::Easy, QuestionType::Mixed, 31).is_err());
        let request = generate_request(Difficulty::Hard, QuestionType::Mixed, 30).unwrap();
        assert_eq!(request.number_of_questions, 30);
    }

    #[test]
    fn test_mcq_form_drops_blank_options() {
        let form = QuestionForm {
            question_type: QuestionType::Mcq,
            question: "Largest planet?".to_string(),
            options: vec!["Jupiter".to_string(), " ".to_string(), "Mars".to_string()],
            answer: "Jupiter".to_string(),
            ..QuestionForm::default()
        };
        let Question::Mcq { options, .. } = form.into_question().unwrap() else {
            panic!("expected mcq");
        };
        assert_eq!(options, vec!["Jupiter".to_string(), "Mars".to_string()]);
    }

    #[test]
    fn test_mcq_form_rules() {
        let form = QuestionForm {
            question_type: QuestionType::Mcq,
            question: "Largest planet?".to_string(),
            options: vec!["Jupiter".to_string(), String::new()],
            answer: "Saturn".to_string(),
            ..QuestionForm::default()
        };
        let Err(StudyError::Validation(errors)) = form.into_question() else {
            panic!("expected validation error");
        };
        assert!(errors.contains_key("options"));
        assert!(errors.contains_key("answer"));
    }

    #[test]
    fn test_true_false_answer() {
        let form = QuestionForm {
            question_type: QuestionType::TrueFalse,
            question: "Water boils at 100C at sea level.".to_string(),
            answer: "yes".to_string(),
            ..QuestionForm::default()
        };
        assert!(form.into_question().is_err());

        let form = QuestionForm {
            question_type: QuestionType::TrueFalse,
            question: "Water boils at 100C at sea level.".to_string(),
            answer: "True".to_string(),
            ..QuestionForm::default()
        };
        assert_eq!(form.into_question().unwrap().answer(), "true");
    }

    #[test]
    fn test_true_false_grading_ignores_case() {
        let question = Question::TrueFalse {
            difficulty: Difficulty::Easy,
            question: "The sun is a star.".to_string(),
            answer: "true".to_string(),
        };
        assert!(is_correct(&question, "True"));
        assert!(is_correct(&question, " TRUE "));
        assert!(is_correct(&question, "t"));
        assert!(!is_correct(&question, "false"));
        assert!(!is_correct(&question, "yes"));

        let capitalized_key = Question::TrueFalse {
            difficulty: Difficulty::Easy,
            question: "Ice sinks in water.".to_string(),
            answer: "False".to_string(),
        };
        assert!(is_correct(&capitalized_key, "false"));
        assert!(!is_correct(&capitalized_key, "true"));
    }

    #[test]
    fn test_first_answer_sticks() {
        let mut quiz = QuizAttempt::new(vec![mcq(), short()]);
        assert!(!quiz.answer(0, "3").unwrap().correct);
        let kept = quiz.answer(0, "4").unwrap();
        assert_eq!(kept.given, "3");
        assert!(!kept.correct);
        assert_eq!(quiz.score(), (0, 2));
    }

    #[test]
    fn test_short_answer_is_lenient() {
        let mut quiz = QuizAttempt::new(vec![mcq(), short()]);
        assert!(quiz.answer(1, "  paris ").unwrap().correct);
        assert!(quiz.answer(0, "4").unwrap().correct);
        assert_eq!(quiz.score(), (2, 2));
        assert!(quiz.answer(2, "x").is_none());
    }

    #[test]
    fn test_blank_answer_is_not_recorded() {
        let mut quiz = QuizAttempt::new(vec![short()]);
        assert!(quiz.answer(0, "   ").is_none());
        assert!(quiz.result(0).is_none());
        assert!(quiz.answer(0, "Paris").unwrap().correct);
    }
}
