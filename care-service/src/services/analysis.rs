//! Client for the external image-analysis service behind the progress tracker.

use crate::dtos::{ProgressReport, UpstreamReport};
use async_trait::async_trait;
use reqwest::{
    header::HeaderMap,
    multipart::{Form, Part},
    Client,
};
use service_core::observability::inject_trace_headers;
use std::time::Duration;
use thiserror::Error;

/// Longest slice of an upstream error body echoed back to the client.
const MAX_UPSTREAM_MESSAGE: usize = 200;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Progress analysis is not enabled")]
    NotEnabled,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Analysis service returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid analysis response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ProgressRequest {
    pub disease: String,
    pub past_image: ImageUpload,
    pub new_image: ImageUpload,
    pub request_id: Option<String>,
}

#[async_trait]
pub trait ProgressAnalyzer: Send + Sync {
    async fn analyze(&self, request: ProgressRequest) -> Result<ProgressReport, AnalysisError>;
    fn is_enabled(&self) -> bool;
}

/// Stand-in used when no analysis endpoint is configured.
pub struct DisabledAnalyzer;

#[async_trait]
impl ProgressAnalyzer for DisabledAnalyzer {
    async fn analyze(&self, _request: ProgressRequest) -> Result<ProgressReport, AnalysisError> {
        Err(AnalysisError::NotEnabled)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Posts both images and the disease label as `multipart/form-data`, using
/// the same part names the browser form uses.
pub struct HttpProgressAnalyzer {
    endpoint: String,
    client: Client,
}

impl HttpProgressAnalyzer {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::Configuration(e.to_string()))?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn image_part(image: ImageUpload) -> Result<Part, AnalysisError> {
    let part = Part::bytes(image.bytes).file_name(image.file_name);
    match image.content_type {
        Some(content_type) => part
            .mime_str(&content_type)
            .map_err(|e| AnalysisError::InvalidUpload(format!("bad content type: {}", e))),
        None => Ok(part),
    }
}

/// Pulls a readable message out of an error body: the `error` field of a JSON
/// body, otherwise the (truncated) text itself.
fn upstream_message(body: &str) -> String {
    let message = serde_json::from_str::<UpstreamReport>(body)
        .ok()
        .and_then(|report| report.error)
        .unwrap_or_else(|| body.trim().to_string());

    if message.is_empty() {
        "no details".to_string()
    } else {
        message.chars().take(MAX_UPSTREAM_MESSAGE).collect()
    }
}

#[async_trait]
impl ProgressAnalyzer for HttpProgressAnalyzer {
    async fn analyze(&self, request: ProgressRequest) -> Result<ProgressReport, AnalysisError> {
        let disease = request.disease;
        let form = Form::new()
            .part("past_image", image_part(request.past_image)?)
            .part("new_image", image_part(request.new_image)?)
            .text("disease", disease.clone());

        let mut headers = HeaderMap::new();
        inject_trace_headers(&mut headers, request.request_id.as_deref());

        let response = self
            .client
            .post(&self.endpoint)
            .headers(headers)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                AnalysisError::Connection(format!("Failed to reach analysis service: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Upstream {
                status: status.as_u16(),
                message: upstream_message(&body),
            });
        }

        let upstream: UpstreamReport = response.json().await.map_err(|e| {
            AnalysisError::InvalidResponse(format!("Failed to parse analysis response: {}", e))
        })?;

        if let Some(error) = upstream.error.clone() {
            if upstream.past_area.is_none() || upstream.new_area.is_none() {
                return Err(AnalysisError::Upstream {
                    status: status.as_u16(),
                    message: upstream_message(&error),
                });
            }
        }

        let report =
            ProgressReport::from_upstream(upstream, &disease).map_err(AnalysisError::InvalidResponse)?;

        tracing::info!(
            disease = %report.disease,
            percent_change = report.percent_change,
            status = %report.status,
            "Progress analysis completed"
        );

        Ok(report)
    }

    fn is_enabled(&self) -> bool {
        true
    }
}
