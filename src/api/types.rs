//! Wire types for the study backend.
//!
//! Field names follow the backend's camelCase JSON. MongoDB `_id` fields are
//! exposed as `id`.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

use crate::features::pomodoro::{CompletedInterval, SessionKind};

/// Standard response wrapper: `{ success, message, data }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the backend considered the call successful.
    #[serde(default)]
    pub success: Option<bool>,
    /// Human-readable status message.
    #[serde(default)]
    pub message: Option<String>,
    /// Payload.
    pub data: T,
}

/// A list payload: `{ data: [...], metadata }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>, M: Deserialize<'de>"))]
pub struct Page<T, M = serde_json::Value> {
    /// Items.
    #[serde(default)]
    pub data: Vec<T>,
    /// Server-computed summary, when the endpoint provides one.
    #[serde(default)]
    pub metadata: Option<M>,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Login form.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration form.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Token returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    #[serde(alias = "token", alias = "access_token")]
    pub access_token: String,
}

/// The logged-in user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, alias = "full_name")]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

// ---------------------------------------------------------------------------
// Study sessions
// ---------------------------------------------------------------------------

/// A recorded pomodoro interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(alias = "subject")]
    pub study_task: String,
    /// Length in minutes.
    pub duration: u32,
    #[serde(rename = "type")]
    pub kind: SessionKind,
    /// Assigned by the backend on receipt.
    #[serde(default, alias = "completedAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /study-session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSessionRequest {
    pub study_task: String,
    pub duration: u32,
    #[serde(rename = "type")]
    pub kind: SessionKind,
}

impl From<&CompletedInterval> for RecordSessionRequest {
    fn from(interval: &CompletedInterval) -> Self {
        Self {
            study_task: interval.subject.clone(),
            duration: interval.duration_minutes,
            kind: interval.kind,
        }
    }
}

/// Aggregates returned alongside the session list.
///
/// Every field is optional: the view renders what is present and falls back
/// to placeholders for the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionMetadata {
    pub total_sessions: Option<u64>,
    pub total_focus_time: Option<f64>,
    pub total_break_time: Option<f64>,
    pub today_focus_time: Option<f64>,
    pub week_focus_time: Option<f64>,
    pub month_focus_time: Option<f64>,
    pub total_focus_time_formatted: Option<String>,
    pub total_break_time_formatted: Option<String>,
    pub today_focus_time_formatted: Option<String>,
    pub week_focus_time_formatted: Option<String>,
    pub month_focus_time_formatted: Option<String>,
}

// ---------------------------------------------------------------------------
// Study planner
// ---------------------------------------------------------------------------

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A study task from the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyTask {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub title: String,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    /// `YYYY-MM-DD`, or an ISO timestamp whose date part is the deadline.
    pub deadline: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(
        default,
        deserialize_with = "number_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_hours: Option<f64>,
}

/// Body of `POST /study-planner`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudyTask {
    pub title: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub deadline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    pub completed: bool,
}

/// Body of `PATCH /study-planner/{id}`. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyTaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl StudyTaskUpdate {
    /// Whether the update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subject.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.deadline.is_none()
            && self.estimated_hours.is_none()
            && self.completed.is_none()
    }
}

// ---------------------------------------------------------------------------
// Class schedule
// ---------------------------------------------------------------------------

/// Day of the week a class meets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// The local current day.
    #[must_use]
    pub fn today() -> Self {
        Self::from(chrono::Datelike::weekday(&chrono::Local::now()))
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        };
        write!(f, "{name}")
    }
}

/// A class on the weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSchedule {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub subject: String,
    pub instructor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<Weekday>,
    /// `HH:MM`.
    pub start_time: String,
    /// `HH:MM`.
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Body of `POST /class-schedule`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClassSchedule {
    pub subject: String,
    pub instructor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<Weekday>,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Body of `PATCH /class-schedule/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassScheduleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<Weekday>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ClassScheduleUpdate {
    /// Whether the update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.instructor.is_none()
            && self.day.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.location.is_none()
            && self.color.is_none()
    }
}

// ---------------------------------------------------------------------------
// Budget tracker
// ---------------------------------------------------------------------------

/// Direction of a budget entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum BudgetType {
    Income,
    Expense,
}

impl std::fmt::Display for BudgetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// An income or expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetEntry {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub budget_type: BudgetType,
    pub category: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: String,
}

/// Body of `POST /budget-tracker`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudgetEntry {
    pub budget_type: BudgetType,
    pub category: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: String,
}

/// Totals computed by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetMetadata {
    pub total_income: f64,
    pub total_expenses: f64,
    pub current_balance: f64,
    pub total_entries: u64,
}

// ---------------------------------------------------------------------------
// Exam generator
// ---------------------------------------------------------------------------

/// Question difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Question type requested from the generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    #[default]
    Mcq,
    Short,
    #[serde(rename = "truefalse")]
    #[value(name = "truefalse")]
    TrueFalse,
    Mixed,
}

/// A single exam question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Question {
    #[serde(rename = "mcq")]
    Mcq {
        difficulty: Difficulty,
        question: String,
        options: Vec<String>,
        answer: String,
    },
    #[serde(rename = "short")]
    Short {
        difficulty: Difficulty,
        question: String,
        answer: String,
    },
    #[serde(rename = "truefalse")]
    TrueFalse {
        difficulty: Difficulty,
        question: String,
        answer: String,
    },
}

impl Question {
    /// The question text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Mcq { question, .. }
            | Self::Short { question, .. }
            | Self::TrueFalse { question, .. } => question,
        }
    }

    /// The expected answer.
    #[must_use]
    pub fn answer(&self) -> &str {
        match self {
            Self::Mcq { answer, .. } | Self::Short { answer, .. } | Self::TrueFalse { answer, .. } => {
                answer
            }
        }
    }

    /// The question difficulty.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        match self {
            Self::Mcq { difficulty, .. }
            | Self::Short { difficulty, .. }
            | Self::TrueFalse { difficulty, .. } => *difficulty,
        }
    }
}

/// Body of `POST /exam-generator/generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateExamRequest {
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    pub number_of_questions: u32,
}

/// Accept a number given either as JSON number or numeric string.
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .trim_end_matches('h')
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
