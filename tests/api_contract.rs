//! Study backend contract tests
//!
//! These tests pin the HTTP shape of every call the client makes: paths,
//! bearer auth, request bodies, the `{ data }` envelope, and error mapping.

use serde_json::json;
use studykit::api::{
    ApiClient, BudgetType, Difficulty, GenerateExamRequest, LoginRequest, NewBudgetEntry,
    Priority, QuestionType, StudyTaskUpdate, Weekday,
};
use studykit::config::ApiConfig;
use studykit::error::StudyError;
use studykit::features::pomodoro::{CompletedInterval, SessionKind, SessionStore, TaskCatalog};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn client(server: &MockServer, token: Option<&str>) -> ApiClient {
    let config = ApiConfig {
        base_url: server.uri(),
        timeout_secs: 5,
    };
    ApiClient::new(&config, token.map(String::from)).unwrap()
}

fn envelope(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "message": "ok",
        "data": data
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Auth
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_returns_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "ana@uni.edu", "password": "secret1"})))
        .respond_with(envelope(json!({"accessToken": "abc.def"})))
        .expect(1)
        .mount(&server)
        .await;

    let token = client(&server, None)
        .login(&LoginRequest {
            email: "ana@uni.edu".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(token, "abc.def");
}

#[tokio::test]
async fn test_login_rejection_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Password is incorrect"})),
        )
        .mount(&server)
        .await;

    let err = client(&server, None)
        .login(&LoginRequest {
            email: "ana@uni.edu".to_string(),
            password: "wrong12".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        StudyError::Unauthorized(message) => assert_eq!(message, "Password is incorrect"),
        other => panic!("expected Unauthorized, got {other:?}"),
    }
}

#[tokio::test]
async fn test_authed_call_without_token_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(envelope(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server, None).profile().await.unwrap_err();
    assert!(matches!(err, StudyError::Unauthorized(_)));
}

#[tokio::test]
async fn test_profile_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/me"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(envelope(json!({
            "_id": "u1",
            "name": "Ana",
            "email": "ana@uni.edu",
            "phone": "555-0100"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client(&server, Some(TOKEN)).profile().await.unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.name.as_deref(), Some("Ana"));
}

// ────────────────────────────────────────────────────────────────────────────
// Study sessions
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_record_session_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/study-session"))
        .and(body_json(json!({"studyTask": "Math", "duration": 1, "type": "focus"})))
        .respond_with(envelope(json!({
            "_id": "s1",
            "studyTask": "Math",
            "duration": 1,
            "type": "focus",
            "createdAt": "2025-03-12T09:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = client(&server, Some(TOKEN));
    let session = SessionStore::record_session(
        &store,
        &CompletedInterval {
            subject: "Math".to_string(),
            duration_minutes: 1,
            kind: SessionKind::Focus,
        },
    )
    .await
    .unwrap();

    assert_eq!(session.id, "s1");
    assert!(session.created_at.is_some());
}

#[tokio::test]
async fn test_fetch_overview_reads_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/study-session"))
        .respond_with(envelope(json!({
            "data": [
                {"_id": "s1", "studyTask": "Math", "duration": 25, "type": "focus"},
                {"_id": "s2", "studyTask": "Math", "duration": 5, "type": "break"}
            ],
            "metadata": {
                "totalSessions": 2,
                "totalFocusTimeFormatted": "0h 25m",
                "todayFocusTimeFormatted": "0h 25m"
            }
        })))
        .mount(&server)
        .await;

    let overview = client(&server, Some(TOKEN)).fetch_overview().await.unwrap();
    assert_eq!(overview.sessions.len(), 2);
    assert_eq!(overview.sessions[1].kind, SessionKind::Break);
    assert_eq!(overview.metadata.total_sessions, Some(2));
}

#[tokio::test]
async fn test_fetch_overview_without_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/study-session"))
        .respond_with(envelope(json!({"data": []})))
        .mount(&server)
        .await;

    let overview = client(&server, Some(TOKEN)).fetch_overview().await.unwrap();
    assert!(overview.sessions.is_empty());
    assert_eq!(overview.metadata.total_sessions, None);
}

#[tokio::test]
async fn test_list_subjects_dedupes_task_subjects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/study-planner"))
        .respond_with(envelope(json!({
            "data": [
                {"_id": "t1", "title": "a", "subject": "Physics", "deadline": "2025-05-01"},
                {"_id": "t2", "title": "b", "subject": "Math", "deadline": "2025-05-01"},
                {"_id": "t3", "title": "c", "subject": "physics", "deadline": "2025-05-01"}
            ]
        })))
        .mount(&server)
        .await;

    let subjects = client(&server, Some(TOKEN)).list_subjects().await.unwrap();
    assert_eq!(subjects, vec!["Physics".to_string(), "Math".to_string()]);
}

// ────────────────────────────────────────────────────────────────────────────
// Planner, schedule, budget
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_study_task_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/study-planner/t1"))
        .and(body_json(json!({"completed": true})))
        .respond_with(envelope(json!({
            "_id": "t1",
            "title": "Essay",
            "subject": "History",
            "priority": "high",
            "deadline": "2025-05-01T00:00:00.000Z",
            "completed": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let update = StudyTaskUpdate {
        completed: Some(true),
        ..StudyTaskUpdate::default()
    };
    let task = client(&server, Some(TOKEN))
        .update_study_task("t1", &update)
        .await
        .unwrap();
    assert!(task.completed);
    assert_eq!(task.priority, Priority::High);
}

#[tokio::test]
async fn test_missing_task_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/study-planner/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
        .mount(&server)
        .await;

    let err = client(&server, Some(TOKEN)).study_task("nope").await.unwrap_err();
    assert_eq!(err.to_string(), "Not found: Study task 'nope'");
}

#[tokio::test]
async fn test_today_schedules_accepts_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/class-schedule/today"))
        .respond_with(envelope(json!([{
            "_id": "c1",
            "subject": "Physics",
            "instructor": "Dr. Ahmed",
            "day": "Wednesday",
            "startTime": "09:00",
            "endTime": "10:30"
        }])))
        .mount(&server)
        .await;

    let classes = client(&server, Some(TOKEN)).today_schedules().await.unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].day, Some(Weekday::Wednesday));
}

#[tokio::test]
async fn test_create_budget_entry_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/budget-tracker"))
        .and(body_json(json!({
            "budgetType": "Expense",
            "category": "Food",
            "amount": 7.5,
            "date": "2025-03-12"
        })))
        .respond_with(envelope(json!({
            "_id": "b1",
            "budgetType": "Expense",
            "category": "Food",
            "amount": 7.5,
            "date": "2025-03-12"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let entry = client(&server, Some(TOKEN))
        .create_budget_entry(&NewBudgetEntry {
            budget_type: BudgetType::Expense,
            category: "Food".to_string(),
            amount: 7.5,
            description: None,
            date: "2025-03-12".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(entry.id, "b1");
}

#[tokio::test]
async fn test_server_error_keeps_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/budget-tracker"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "db down"})))
        .mount(&server)
        .await;

    let err = client(&server, Some(TOKEN)).budget().await.unwrap_err();
    match err {
        StudyError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "db down");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Exam generator
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_generate_exam_body_and_questions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exam-generator/generate"))
        .and(body_json(json!({
            "difficulty": "medium",
            "questionType": "mixed",
            "numberOfQuestions": 2
        })))
        .respond_with(envelope(json!({
            "data": [
                {"type": "mcq", "difficulty": "medium", "question": "2+2?",
                 "options": ["3", "4"], "answer": "4"},
                {"type": "truefalse", "difficulty": "medium",
                 "question": "Water boils at 100C at sea level.", "answer": "true"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let questions = client(&server, Some(TOKEN))
        .generate_exam(&GenerateExamRequest {
            difficulty: Difficulty::Medium,
            question_type: QuestionType::Mixed,
            number_of_questions: 2,
        })
        .await
        .unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].answer(), "4");
}
