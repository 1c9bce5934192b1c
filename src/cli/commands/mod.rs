//! Command implementations for studykit.
//!
//! Each command family lives in its own module and returns the text to print.

mod auth;
mod budget;
mod dashboard;
mod exam;
mod schedule;
mod session;
mod task;

pub use auth::{login, logout, register, whoami};
pub use budget::budget;
pub use dashboard::{dashboard, Dashboard};
pub use exam::{exam, run_quiz};
pub use schedule::schedule;
pub use session::{session, subjects};
pub use task::task;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;

/// Execute completions command
#[must_use]
pub fn completions(shell: Shell) -> String {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "studykit", &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_mention_subcommands() {
        let script = completions(Shell::Bash);
        assert!(script.contains("studykit"));
        assert!(script.contains("schedule"));
    }
}
