use crate::config::{AnalysisConfig, CareConfig};
use crate::handlers;
use crate::services::{CareDb, DisabledAnalyzer, HttpProgressAnalyzer, ProgressAnalyzer};
use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware,
    routing::{delete, get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware,
};
use service_core::observability::REQUEST_ID_HEADER;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: CareConfig,
    pub db: CareDb,
    pub analyzer: Arc<dyn ProgressAnalyzer>,
}

pub fn build_analyzer(config: &AnalysisConfig) -> Result<Arc<dyn ProgressAnalyzer>, AppError> {
    match &config.endpoint {
        Some(endpoint) => {
            let analyzer =
                HttpProgressAnalyzer::new(endpoint.clone(), Duration::from_secs(config.timeout_secs))
                    .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;
            tracing::info!(endpoint = %analyzer.endpoint(), "Progress analysis enabled");
            Ok(Arc::new(analyzer))
        }
        None => {
            tracing::warn!("ANALYSIS_SERVICE_URL not set, progress tracker disabled");
            Ok(Arc::new(DisabledAnalyzer))
        }
    }
}

pub fn router(state: AppState) -> Router {
    let upload_limit = state.config.uploads.max_bytes;

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            "/review",
            post(handlers::create_review).get(handlers::list_reviews),
        )
        .route("/review/:id", delete(handlers::delete_review))
        .route("/user", post(handlers::login_user).get(handlers::list_users))
        .route("/user/logout", post(handlers::logout_user))
        .route("/signup", post(handlers::signup))
        .route(
            "/payment",
            post(handlers::create_payment).get(handlers::list_payments),
        )
        .route(
            "/reservation",
            post(handlers::create_reservation).get(handlers::list_reservations),
        )
        .route(
            "/contact",
            post(handlers::create_contact).get(handlers::list_contacts),
        )
        .route("/admin", post(handlers::create_admin).get(handlers::get_admin))
        .route("/info", post(handlers::create_info).get(handlers::list_infos))
        .route(
            "/progress-tracker",
            post(handlers::track_progress).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    state: AppState,
}

impl Application {
    pub async fn build(config: CareConfig) -> Result<Self, AppError> {
        let db = CareDb::connect(&config.mongodb.uri, &config.mongodb.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;
        db.initialize_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize database indexes: {}", e);
            e
        })?;

        let analyzer = build_analyzer(&config.analysis)?;

        let state = AppState {
            config: config.clone(),
            db,
            analyzer,
        };

        // Port 0 picks a random port (tests).
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            port,
            listener,
            router: router(state.clone()),
            state,
        })
    }

    pub fn db(&self) -> &CareDb {
        &self.state.db
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    pub async fn run_with_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
    }
}
