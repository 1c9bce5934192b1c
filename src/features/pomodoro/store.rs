//! Remote collaborators of the pomodoro timer.
//!
//! The timer only knows these two traits. [`ApiClient`] implements both
//! against the study backend; tests substitute mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::session::CompletedInterval;
use crate::api::{ApiClient, RecordSessionRequest, SessionMetadata, StudySession};
use crate::error::StudyError;

/// Sessions and aggregates as one read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionOverview {
    /// Server-computed rollups.
    pub metadata: SessionMetadata,
    /// Today's recorded sessions.
    pub sessions: Vec<StudySession>,
}

/// Where completed intervals are persisted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a completed interval.
    async fn record_session(&self, interval: &CompletedInterval)
        -> Result<StudySession, StudyError>;

    /// Read today's sessions and the aggregate statistics.
    async fn fetch_overview(&self) -> Result<SessionOverview, StudyError>;
}

/// Source of selectable study subjects.
#[async_trait]
pub trait TaskCatalog: Send + Sync {
    /// Subjects in catalog order, without duplicates.
    async fn list_subjects(&self) -> Result<Vec<String>, StudyError>;
}

#[async_trait]
impl SessionStore for ApiClient {
    async fn record_session(
        &self,
        interval: &CompletedInterval,
    ) -> Result<StudySession, StudyError> {
        ApiClient::record_session(self, &RecordSessionRequest::from(interval)).await
    }

    async fn fetch_overview(&self) -> Result<SessionOverview, StudyError> {
        let page = self.sessions().await?;
        Ok(SessionOverview {
            metadata: page.metadata.unwrap_or_default(),
            sessions: page.data,
        })
    }
}

#[async_trait]
impl TaskCatalog for ApiClient {
    async fn list_subjects(&self) -> Result<Vec<String>, StudyError> {
        let tasks = self.study_tasks().await?;
        Ok(unique_subjects(tasks.into_iter().map(|t| t.subject)))
    }
}

/// Drop blanks and repeats, keeping first-seen order.
pub fn unique_subjects(subjects: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    subjects
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_subjects_keeps_first_seen_order() {
        let subjects = vec![
            "Math".to_string(),
            "Physics".to_string(),
            " math ".to_string(),
            String::new(),
            "Chemistry".to_string(),
        ];
        assert_eq!(
            unique_subjects(subjects),
            vec!["Math".to_string(), "Physics".to_string(), "Chemistry".to_string()]
        );
    }
}
