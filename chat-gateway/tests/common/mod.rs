#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chat_gateway::config::{GatewayConfig, LlmConfig, TelemetryConfig};
use chat_gateway::startup::{AppState, Application};
use secrecy::Secret;
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use std::sync::{Arc, Mutex};

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn(config: GatewayConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        Self::run(app).await
    }

    pub async fn spawn_with_state(state: AppState) -> Self {
        let app = Application::build_with_state(state)
            .await
            .expect("Failed to build test application");
        Self::run(app).await
    }

    async fn run(app: Application) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/healthz", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post_chat(&self, body: Value) -> reqwest::Response {
        self.client
            .post(format!("{}/chat", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn test_config(llm: LlmConfig) -> GatewayConfig {
    GatewayConfig {
        common: CoreConfig { port: 0 },
        llm,
        telemetry: TelemetryConfig::default(),
    }
}

pub fn mock_config() -> GatewayConfig {
    test_config(LlmConfig {
        mock_mode: true,
        ..LlmConfig::default()
    })
}

pub fn live_config(api_key: Option<&str>, api_base: &str) -> GatewayConfig {
    test_config(LlmConfig {
        mock_mode: false,
        api_key: api_key.map(|k| Secret::new(k.to_string())),
        model: "gpt-3.5-turbo".to_string(),
        api_base: api_base.to_string(),
    })
}

/// What the fake OpenAI endpoint answers with.
#[derive(Clone)]
pub enum StubReply {
    Answer(&'static str),
    Status(u16, &'static str),
    Raw(&'static str),
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Local stand-in for `POST /chat/completions`.
pub struct OpenAiStub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl OpenAiStub {
    pub async fn spawn(reply: StubReply) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            reply,
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/v1/chat/completions", post(completions))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
            .await
            .expect("Failed to bind stub listener");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/v1", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn completions(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    match state.reply {
        StubReply::Answer(text) => Json(json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": text }, "finish_reason": "stop" },
                { "index": 1, "message": { "role": "assistant", "content": "ignored" }, "finish_reason": "stop" }
            ]
        }))
        .into_response(),
        StubReply::Status(code, body) => (
            StatusCode::from_u16(code).unwrap(),
            [("content-type", "application/json")],
            body,
        )
            .into_response(),
        StubReply::Raw(body) => {
            ([("content-type", "application/json")], body).into_response()
        }
    }
}
