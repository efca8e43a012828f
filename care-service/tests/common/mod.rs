#![allow(dead_code)]

use axum::{extract::Multipart, http::HeaderMap, routing::post, Json, Router};
use care_service::config::{AnalysisConfig, CareConfig, MongoConfig, UploadConfig};
use care_service::services::CareDb;
use care_service::startup::{build_analyzer, router, AppState, Application};
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub fn test_config(analysis_endpoint: Option<String>) -> CareConfig {
    CareConfig {
        common: CoreConfig { port: 0 },
        mongodb: MongoConfig {
            uri: std::env::var("TEST_MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: format!("care_test_{}", uuid::Uuid::new_v4()),
        },
        analysis: AnalysisConfig {
            endpoint: analysis_endpoint,
            timeout_secs: 5,
        },
        uploads: UploadConfig {
            max_bytes: 1024 * 1024,
        },
    }
}

/// The full service on a random port, backed by a throw-away database.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: CareDb,
    pub db_name: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let config = test_config(None);
        let db_name = config.mongodb.database.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        wait_until_up(&client, &address).await;

        TestApp {
            address,
            port,
            db,
            db_name,
            client,
        }
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Drop the test database.
    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}

/// Only the router, without touching MongoDB: for routes that never reach the
/// database (validation failures, the progress tracker). The driver connects
/// lazily, so no server is needed.
pub async fn spawn_router(analysis_endpoint: Option<String>) -> String {
    let config = test_config(analysis_endpoint);
    let db = CareDb::connect(&config.mongodb.uri, &config.mongodb.database)
        .await
        .expect("Failed to create MongoDB client");
    let analyzer = build_analyzer(&config.analysis).expect("Failed to build analyzer");

    let state = AppState {
        config,
        db,
        analyzer,
    };

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let address = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.ok();
    });

    wait_until_up(&reqwest::Client::new(), &address).await;
    address
}

async fn wait_until_up(client: &reqwest::Client, address: &str) {
    for _ in 0..50 {
        if client.get(address).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }
}

/// What the stub analysis service saw on its last call.
#[derive(Debug, Default, Clone)]
pub struct StubCall {
    pub fields: Vec<String>,
    pub disease: Option<String>,
    pub request_id: Option<String>,
}

/// Stand-in analysis service answering every call with `status` and `body`.
pub async fn spawn_analysis_stub(
    status: u16,
    body: Value,
) -> (String, Arc<Mutex<Option<StubCall>>>) {
    let seen: Arc<Mutex<Option<StubCall>>> = Arc::new(Mutex::new(None));
    let recorder = seen.clone();

    let handler = move |headers: HeaderMap, mut multipart: Multipart| {
        let recorder = recorder.clone();
        let body = body.clone();
        async move {
            let mut call = StubCall {
                request_id: headers
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
                ..Default::default()
            };
            while let Ok(Some(field)) = multipart.next_field().await {
                let name = field.name().unwrap_or_default().to_string();
                if name == "disease" {
                    call.disease = field.text().await.ok();
                } else {
                    let _ = field.bytes().await;
                }
                call.fields.push(name);
            }
            *recorder.lock().unwrap() = Some(call);

            (
                axum::http::StatusCode::from_u16(status).unwrap(),
                Json(body),
            )
        }
    };

    let app = Router::new().route("/analyze", post(handler));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub");
    let endpoint = format!("http://{}/analyze", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    (endpoint, seen)
}

pub fn sample_report() -> Value {
    json!({
        "disease": "Psoriasis",
        "past_area": 1200,
        "new_area": 900,
        "percent_change": -25.0,
        "status": "IMPROVEMENT"
    })
}
