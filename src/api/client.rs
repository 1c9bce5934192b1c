use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::api::types::{
    AuthToken, BudgetEntry, BudgetMetadata, ClassSchedule, ClassScheduleUpdate, Envelope,
    GenerateExamRequest, LoginRequest, NewBudgetEntry, NewClassSchedule, NewStudyTask, Page,
    Question, RecordSessionRequest, RegisterRequest, SessionMetadata, StudySession, StudyTask,
    StudyTaskUpdate, User,
};
use crate::config::ApiConfig;
use crate::error::StudyError;

/// HTTP client for the study backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, token: Option<String>) -> Result<Self, StudyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a bearer token is attached to requests.
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "api request");
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, StudyError> {
        if self.token.is_none() {
            return Err(StudyError::Unauthorized(
                "run 'studykit login' first or set STUDYKIT_TOKEN".to_string(),
            ));
        }
        Ok(self.request(method, path))
    }

    /// Send a request and unwrap the `{ data }` envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Envelope<T>, StudyError> {
        let response = builder.send().await?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, StudyError> {
        let builder = self.authed(Method::GET, path)?;
        Ok(self.send(builder).await?.data)
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StudyError> {
        let builder = self.authed(Method::POST, path)?.json(body);
        Ok(self.send(builder).await?.data)
    }

    async fn patch<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StudyError> {
        let builder = self.authed(Method::PATCH, path)?.json(body);
        Ok(self.send(builder).await?.data)
    }

    async fn delete(&self, path: &str) -> Result<(), StudyError> {
        let builder = self.authed(Method::DELETE, path)?;
        let response = builder.send().await?;
        check_status(response).await?;
        Ok(())
    }

    // -- auth --------------------------------------------------------------

    /// Log in and return the bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the request fails.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, StudyError> {
        let builder = self.request(Method::POST, "/auth/login").json(request);
        let envelope: Envelope<AuthToken> = self.send(builder).await?;
        Ok(envelope.data.access_token)
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the registration.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, StudyError> {
        let builder = self.request(Method::POST, "/user/register").json(request);
        Ok(self.send(builder).await?.data)
    }

    /// Fetch the logged-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set or it is rejected.
    pub async fn profile(&self) -> Result<User, StudyError> {
        self.get("/user/me").await
    }

    // -- study sessions ----------------------------------------------------

    /// Record a completed interval.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn record_session(
        &self,
        request: &RecordSessionRequest,
    ) -> Result<StudySession, StudyError> {
        self.post("/study-session", request).await
    }

    /// Today's sessions together with the aggregate statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn sessions(&self) -> Result<Page<StudySession, SessionMetadata>, StudyError> {
        self.get("/study-session").await
    }

    // -- study planner -----------------------------------------------------

    /// List study tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn study_tasks(&self) -> Result<Vec<StudyTask>, StudyError> {
        let page: Page<StudyTask> = self.get("/study-planner").await?;
        Ok(page.data)
    }

    /// Fetch one study task.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::NotFound`] if no task has this id.
    pub async fn study_task(&self, id: &str) -> Result<StudyTask, StudyError> {
        self.get(&format!("/study-planner/{id}"))
            .await
            .map_err(|e| not_found(e, "Study task", id))
    }

    /// Create a study task.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_study_task(&self, task: &NewStudyTask) -> Result<StudyTask, StudyError> {
        self.post("/study-planner", task).await
    }

    /// Update a study task.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::NotFound`] if no task has this id.
    pub async fn update_study_task(
        &self,
        id: &str,
        update: &StudyTaskUpdate,
    ) -> Result<StudyTask, StudyError> {
        self.patch(&format!("/study-planner/{id}"), update)
            .await
            .map_err(|e| not_found(e, "Study task", id))
    }

    /// Delete a study task.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::NotFound`] if no task has this id.
    pub async fn delete_study_task(&self, id: &str) -> Result<(), StudyError> {
        self.delete(&format!("/study-planner/{id}"))
            .await
            .map_err(|e| not_found(e, "Study task", id))
    }

    // -- class schedule ----------------------------------------------------

    /// List all classes.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn schedules(&self) -> Result<Vec<ClassSchedule>, StudyError> {
        let page: Page<ClassSchedule> = self.get("/class-schedule").await?;
        Ok(page.data)
    }

    /// Classes meeting today.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn today_schedules(&self) -> Result<Vec<ClassSchedule>, StudyError> {
        let data: Value = self.get("/class-schedule/today").await?;
        // The endpoint answers either a bare array or a page.
        if data.is_array() {
            Ok(serde_json::from_value(data)?)
        } else {
            let page: Page<ClassSchedule> = serde_json::from_value(data)?;
            Ok(page.data)
        }
    }

    /// Fetch one class.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::NotFound`] if no class has this id.
    pub async fn schedule(&self, id: &str) -> Result<ClassSchedule, StudyError> {
        self.get(&format!("/class-schedule/{id}"))
            .await
            .map_err(|e| not_found(e, "Class", id))
    }

    /// Create a class.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_schedule(
        &self,
        schedule: &NewClassSchedule,
    ) -> Result<ClassSchedule, StudyError> {
        self.post("/class-schedule", schedule).await
    }

    /// Update a class.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::NotFound`] if no class has this id.
    pub async fn update_schedule(
        &self,
        id: &str,
        update: &ClassScheduleUpdate,
    ) -> Result<ClassSchedule, StudyError> {
        self.patch(&format!("/class-schedule/{id}"), update)
            .await
            .map_err(|e| not_found(e, "Class", id))
    }

    /// Delete a class.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::NotFound`] if no class has this id.
    pub async fn delete_schedule(&self, id: &str) -> Result<(), StudyError> {
        self.delete(&format!("/class-schedule/{id}"))
            .await
            .map_err(|e| not_found(e, "Class", id))
    }

    // -- budget --------------------------------------------------------------

    /// List budget entries with the backend's totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn budget(&self) -> Result<Page<BudgetEntry, BudgetMetadata>, StudyError> {
        self.get("/budget-tracker").await
    }

    /// Add a budget entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_budget_entry(
        &self,
        entry: &NewBudgetEntry,
    ) -> Result<BudgetEntry, StudyError> {
        self.post("/budget-tracker", entry).await
    }

    /// Delete a budget entry.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::NotFound`] if no entry has this id.
    pub async fn delete_budget_entry(&self, id: &str) -> Result<(), StudyError> {
        self.delete(&format!("/budget-tracker/{id}"))
            .await
            .map_err(|e| not_found(e, "Budget entry", id))
    }

    // -- exam generator ----------------------------------------------------

    /// Add a question to the bank.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn add_question(&self, question: &Question) -> Result<Option<Value>, StudyError> {
        self.post("/exam-generator", question).await
    }

    /// Generate an exam.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn generate_exam(
        &self,
        request: &GenerateExamRequest,
    ) -> Result<Vec<Question>, StudyError> {
        let page: Page<Question> = self.post("/exam-generator/generate", request).await?;
        Ok(page.data)
    }
}

/// Map error statuses to [`StudyError`], using the body's `message` if any.
async fn check_status(response: Response) -> Result<Response, StudyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(String::from))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                text
            }
        });
    debug!(status = status.as_u16(), %message, "api error");

    if status == StatusCode::UNAUTHORIZED {
        return Err(StudyError::Unauthorized(message));
    }
    Err(StudyError::Api {
        status: status.as_u16(),
        message,
    })
}

fn not_found(error: StudyError, what: &str, id: &str) -> StudyError {
    match error {
        StudyError::Api { status: 404, .. } => StudyError::NotFound(format!("{what} '{id}'")),
        other => other,
    }
}
