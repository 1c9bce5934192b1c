//! studykit - a terminal client for a student productivity backend
//!
//! Study planner, class schedule, budget tracker, exam generator, and a
//! pomodoro timer whose completed intervals are recorded on the server.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod tui;

pub use api::ApiClient;
pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::StudyError;
