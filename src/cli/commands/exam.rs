//! Exam generator commands and the interactive quiz.

use std::io::{BufRead, Write};

use colored::Colorize;
use serde_json::json;

use crate::api::{ApiClient, Question};
use crate::cli::args::{AddQuestionArgs, ExamCommands, ExamSettings, OutputFormat};
use crate::error::StudyError;
use crate::features::exam::{generate_request, QuestionForm, QuizAttempt};
use crate::output::{format_question_pretty, format_questions_pretty, option_letter, to_json};

/// Execute exam subcommands
///
/// # Errors
///
/// Returns an error if validation fails, the API call fails, or reading the
/// quiz answers fails.
pub async fn exam(
    client: &ApiClient,
    cmd: ExamCommands,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match cmd {
        ExamCommands::Add(args) => add_question(client, args, format).await,
        ExamCommands::Generate { settings, answers } => {
            let questions = generate(client, settings).await?;
            match format {
                OutputFormat::Json => to_json(&questions),
                OutputFormat::Pretty => Ok(format_questions_pretty(&questions, answers)),
            }
        }
        ExamCommands::Quiz { settings } => {
            let questions = generate(client, settings).await?;
            let attempt = tokio::task::spawn_blocking(move || {
                let stdin = std::io::stdin();
                let stdout = std::io::stdout();
                run_quiz(QuizAttempt::new(questions), stdin.lock(), stdout.lock())
            })
            .await
            .map_err(|e| StudyError::Io(std::io::Error::other(e)))??;
            format_score(&attempt, format)
        }
    }
}

async fn generate(client: &ApiClient, settings: ExamSettings) -> Result<Vec<Question>, StudyError> {
    let request = generate_request(settings.difficulty, settings.question_type, settings.count)?;
    client.generate_exam(&request).await
}

async fn add_question(
    client: &ApiClient,
    args: AddQuestionArgs,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let question = QuestionForm {
        question_type: args.question_type,
        difficulty: args.difficulty,
        question: args.question,
        options: args.options,
        answer: args.answer,
    }
    .into_question()?;

    let stored = client.add_question(&question).await?;
    match format {
        OutputFormat::Json => to_json(&stored.unwrap_or_else(|| json!(question))),
        OutputFormat::Pretty => Ok(format!(
            "{} Added question: {}",
            "✓".green(),
            question.text().bold()
        )),
    }
}

/// Ask every question on `output`, reading one answer per line from `input`.
///
/// Blank lines re-ask the same question. End of input stops the quiz early;
/// unanswered questions count as wrong.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn run_quiz<R: BufRead, W: Write>(
    mut attempt: QuizAttempt,
    mut input: R,
    mut output: W,
) -> Result<QuizAttempt, StudyError> {
    let questions = attempt.questions().to_vec();
    'questions: for (i, question) in questions.iter().enumerate() {
        writeln!(output, "{}", format_question_pretty(i, question))?;
        loop {
            write!(output, "{} ", ">".cyan())?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break 'questions;
            }
            let given = expand_choice(question, line.trim());
            let Some(result) = attempt.answer(i, &given) else {
                continue;
            };
            if result.correct {
                writeln!(output, "{}\n", "Correct".green())?;
            } else {
                writeln!(
                    output,
                    "{} (answer: {})\n",
                    "Wrong".red(),
                    question.answer()
                )?;
            }
            break;
        }
    }
    Ok(attempt)
}

/// Let a multiple-choice answer be given by its letter.
fn expand_choice(question: &Question, given: &str) -> String {
    if let Question::Mcq { options, .. } = question {
        let mut chars = given.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            let c = c.to_ascii_lowercase();
            if let Some(option) = options
                .iter()
                .enumerate()
                .find(|(j, _)| option_letter(*j) == c)
                .map(|(_, o)| o)
            {
                return option.clone();
            }
        }
    }
    given.to_string()
}

fn format_score(attempt: &QuizAttempt, format: OutputFormat) -> Result<String, StudyError> {
    let (correct, total) = attempt.score();
    match format {
        OutputFormat::Json => {
            let answers: Vec<_> = (0..total).map(|i| attempt.result(i)).collect();
            to_json(&json!({ "correct": correct, "total": total, "answers": answers }))
        }
        OutputFormat::Pretty => {
            let score = format!("{correct}/{total}");
            let score = if total > 0 && correct * 2 >= total {
                score.green()
            } else {
                score.red()
            };
            Ok(format!("{} {score}", "Score:".bold()))
        }
    }
}
