//! Domain logic for studykit.
//!
//! - Pomodoro timer with server-recorded sessions
//! - Study planner and class schedule
//! - Budget tracker
//! - Exam generator and quizzes

pub mod budget;
pub mod exam;
pub mod planner;
pub mod pomodoro;
