use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use devteam::agent::{Agent, AgentError};
use devteam::builder::StepList;
use devteam::llm::{ChatRequest, ClientError, OllamaClient};
use devteam::models::{Message, Role};
use devteam::output::OutputWriter;
use devteam::team::{Team, TeamError, UNIT_TEST_PROMPT_PREFIX};
use serde_json::json;
use tempfile::TempDir;

/// How the fake Ollama server answers `/api/chat`.
#[derive(Clone, Copy)]
enum Behavior {
    /// Reply `CODE(<user text>)` to ideas and `TESTS` to test requests.
    Echo,
    /// Reply with an empty message.
    Empty,
    /// Fail with the given status.
    Fail(StatusCode),
}

#[derive(Clone)]
struct MockOllama {
    behavior: Behavior,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

async fn chat(State(mock): State<MockOllama>, Json(req): Json<ChatRequest>) -> Response {
    let user_text = req
        .messages
        .last()
        .map(|m| m.content.clone())
        .unwrap_or_default();
    let model = req.model.clone();
    mock.requests.lock().unwrap().push(req);

    let content = match mock.behavior {
        Behavior::Fail(status) => return (status, "model 'nope' not found").into_response(),
        Behavior::Empty => String::new(),
        Behavior::Echo if user_text.starts_with(UNIT_TEST_PROMPT_PREFIX) => "TESTS".to_string(),
        Behavior::Echo => format!("CODE({})", user_text),
    };

    Json(json!({
        "model": model,
        "created_at": "2024-07-23T10:00:00Z",
        "message": { "role": "assistant", "content": content },
        "done_reason": "stop",
        "done": true,
        "eval_count": 7
    }))
    .into_response()
}

async fn spawn_mock(behavior: Behavior) -> (OllamaClient, Arc<Mutex<Vec<ChatRequest>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/api/chat", post(chat))
        .with_state(MockOllama {
            behavior,
            requests: requests.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock server failed");
    });

    let client = OllamaClient::new(format!("http://{}", addr), Duration::from_secs(5))
        .expect("Failed to build client");
    (client, requests)
}

fn team(client: OllamaClient, dir: &TempDir) -> Team {
    Team::new(
        Agent::developer("llama3.1", client.clone()),
        Agent::unit_tester("llama3.1", client),
        OutputWriter::new(dir.path().join("output")),
    )
}

mod client {
    use super::*;

    #[tokio::test]
    async fn maps_not_found_to_model_not_found() {
        let (client, _) = spawn_mock(Behavior::Fail(StatusCode::NOT_FOUND)).await;
        let agent = Agent::developer("nope", client);

        let err = agent.send(&Message::user("idea")).await.unwrap_err();

        let AgentError::Client { agent, source } = err;
        assert_eq!(agent, "DeveloperAgent");
        assert!(matches!(source, ClientError::ModelNotFound(body) if body.contains("not found")));
    }

    #[tokio::test]
    async fn maps_other_failures_to_server_error() {
        let (client, _) = spawn_mock(Behavior::Fail(StatusCode::INTERNAL_SERVER_ERROR)).await;
        let agent = Agent::developer("llama3.1", client);

        let AgentError::Client { source, .. } = agent.send(&Message::user("idea")).await.unwrap_err();
        assert!(matches!(source, ClientError::Server(msg) if msg.starts_with("500")));
    }

    #[tokio::test]
    async fn rejects_empty_replies() {
        let (client, _) = spawn_mock(Behavior::Empty).await;
        let agent = Agent::unit_tester("llama3.1", client);

        let AgentError::Client { source, .. } = agent.send(&Message::user("idea")).await.unwrap_err();
        assert!(matches!(source, ClientError::EmptyResponse));
    }

    #[tokio::test]
    async fn reports_connection_failures_as_http_errors() {
        let client = OllamaClient::new("http://127.0.0.1:9", Duration::from_secs(2))
            .expect("Failed to build client");
        let agent = Agent::developer("llama3.1", client);

        let AgentError::Client { source, .. } = agent.send(&Message::user("idea")).await.unwrap_err();
        assert!(matches!(source, ClientError::Http(_)));
    }
}

mod agent {
    use super::*;

    #[tokio::test]
    async fn sends_system_then_user_message() {
        let (client, requests) = spawn_mock(Behavior::Echo).await;
        let agent = Agent::developer("llama3.1", client);

        let reply = agent.send(&Message::user("a todo app")).await.expect("Send failed");

        assert_eq!(reply.agent, "DeveloperAgent");
        assert_eq!(reply.role, Role::Developer);
        assert_eq!(reply.content, "CODE(a todo app)");

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.model, "llama3.1");
        assert!(!req.stream);
        assert_eq!(req.messages[0].role, "system");
        assert_eq!(req.messages[0].content, agent.system_message());
        assert_eq!(req.messages[1].role, "user");
        assert_eq!(req.messages[1].content, "a todo app");
    }
}

mod team {
    use super::*;

    #[tokio::test]
    async fn writes_code_and_tests_for_an_idea() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (client, requests) = spawn_mock(Behavior::Echo).await;
        let team = team(client, &dir);
        let mut steps = StepList::new();

        let outcome = team.run_idea("a calculator", &mut steps).await.expect("Idea failed");

        assert_eq!(outcome.code.content, "CODE(a calculator)");
        assert_eq!(outcome.tests.content, "TESTS");
        assert_eq!(
            outcome.code_path,
            dir.path().join("output").join("Code").join("DeveloperAgent.md")
        );
        assert_eq!(
            outcome.tests_path,
            dir.path().join("output").join("Tests").join("UnitTestAgent.md")
        );
        assert_eq!(std::fs::read_to_string(&outcome.code_path).unwrap(), "CODE(a calculator)");
        assert_eq!(std::fs::read_to_string(&outcome.tests_path).unwrap(), "TESTS");

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1].messages[1].content,
            "write unit tests for the code: CODE(a calculator)"
        );

        assert_eq!(steps.len(), 4);
        assert_eq!(steps.steps()[0], "Generated code with DeveloperAgent");
        assert_eq!(steps.steps()[1], "Generated unit tests with UnitTestAgent");
        assert!(steps.steps()[2].ends_with("DeveloperAgent.md"));
        assert!(steps.steps()[3].ends_with("UnitTestAgent.md"));
    }

    #[tokio::test]
    async fn overwrites_output_from_a_previous_idea() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (client, _) = spawn_mock(Behavior::Echo).await;
        let team = team(client, &dir);

        team.run_idea("first", &mut StepList::new()).await.expect("Idea failed");
        let outcome = team.run_idea("second", &mut StepList::new()).await.expect("Idea failed");

        assert_eq!(std::fs::read_to_string(&outcome.code_path).unwrap(), "CODE(second)");
    }

    #[tokio::test]
    async fn rejects_an_empty_idea_without_calling_agents() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (client, requests) = spawn_mock(Behavior::Echo).await;
        let team = team(client, &dir);
        let mut steps = StepList::new();

        let result = team.run_idea("  ", &mut steps).await;

        assert!(matches!(result, Err(TeamError::EmptyIdea)));
        assert!(requests.lock().unwrap().is_empty());
        assert!(steps.is_empty());
    }

    #[tokio::test]
    async fn writes_nothing_when_an_agent_fails() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let (client, _) = spawn_mock(Behavior::Fail(StatusCode::BAD_REQUEST)).await;
        let team = team(client, &dir);
        let mut steps = StepList::new();

        let result = team.run_idea("a game", &mut steps).await;

        assert!(matches!(result, Err(TeamError::Agent(_))));
        assert!(!dir.path().join("output").exists());
        assert!(steps.is_empty());
    }
}
