use crate::dtos::progress::DEFAULT_DISEASE;
use crate::dtos::ProgressReport;
use crate::services::{record_analysis, AnalysisError, ImageUpload, ProgressRequest};
use crate::startup::AppState;
use crate::utils::is_allowed_image;
use axum::{
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use service_core::error::AppError;
use service_core::observability::REQUEST_ID_HEADER;

const MISSING_IMAGES: &str = "Please select both past and new images";

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(anyhow::anyhow!("Images exceed the upload limit"))
    } else {
        AppError::BadRequest(anyhow::anyhow!("Failed to read upload: {}", err.body_text()))
    }
}

/// Reads one file part. A part with neither a file name nor content is what
/// browsers send for an empty file input, and counts as no image.
async fn read_image(field: Field<'_>) -> Result<Option<ImageUpload>, AppError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(multipart_error)?;

    if file_name.is_empty() && bytes.is_empty() {
        return Ok(None);
    }
    if !is_allowed_image(&file_name) {
        return Err(AppError::BadRequest(anyhow::anyhow!("Invalid file type")));
    }
    if bytes.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Uploaded image {} is empty",
            file_name
        )));
    }

    Ok(Some(ImageUpload {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

fn analysis_error(err: AnalysisError) -> AppError {
    match err {
        AnalysisError::NotEnabled => AppError::ServiceUnavailable,
        AnalysisError::InvalidUpload(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
        AnalysisError::Configuration(msg) => AppError::InternalError(anyhow::anyhow!(msg)),
        // The analysis service rejected the images themselves.
        AnalysisError::Upstream { status, message } if matches!(status, 400 | 415 | 422) => {
            AppError::BadRequest(anyhow::anyhow!(message))
        }
        AnalysisError::Upstream { message, .. } => AppError::BadGateway(message),
        err @ (AnalysisError::Connection(_) | AnalysisError::InvalidResponse(_)) => {
            AppError::BadGateway(err.to_string())
        }
    }
}

/// Failure body of the progress tracker: the usual envelope plus an `error`
/// key, which is what the tracker page reads on non-2xx answers.
#[derive(Debug, Serialize)]
struct TrackerFailure {
    success: bool,
    message: String,
    data: Option<()>,
    error: String,
}

#[derive(Debug)]
pub struct TrackerError(AppError);

impl From<AppError> for TrackerError {
    fn from(err: AppError) -> Self {
        TrackerError(err)
    }
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let (status, message) = self.0.into_status_and_message();
        let body = TrackerFailure {
            success: false,
            error: message.clone(),
            message,
            data: None,
        };
        (status, Json(body)).into_response()
    }
}

/// Compares a past and a new image of the same condition through the
/// analysis service. Answers with the bare report, which is what the
/// tracker page renders.
#[tracing::instrument(skip(state, headers, multipart))]
pub async fn track_progress(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProgressReport>, TrackerError> {
    let mut multipart = multipart.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Expected a multipart upload: {}", e))
    })?;

    let mut past_image = None;
    let mut new_image = None;
    let mut disease = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "past_image" => past_image = read_image(field).await?,
            "new_image" => new_image = read_image(field).await?,
            "disease" => {
                let text = field.text().await.map_err(multipart_error)?;
                disease = Some(text.trim().to_string()).filter(|d| !d.is_empty());
            }
            other => tracing::debug!(field = %other, "Ignoring unexpected upload field"),
        }
    }

    let (Some(past_image), Some(new_image)) = (past_image, new_image) else {
        record_analysis("rejected");
        return Err(AppError::BadRequest(anyhow::anyhow!(MISSING_IMAGES)).into());
    };

    if !state.analyzer.is_enabled() {
        record_analysis("disabled");
        return Err(AppError::ServiceUnavailable.into());
    }

    let request = ProgressRequest {
        disease: disease.unwrap_or_else(|| DEFAULT_DISEASE.to_string()),
        past_image,
        new_image,
        request_id: headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };

    tracing::info!(
        disease = %request.disease,
        past_size = request.past_image.bytes.len(),
        new_size = request.new_image.bytes.len(),
        "Forwarding images for progress analysis"
    );

    let report = state.analyzer.analyze(request).await.map_err(|e| {
        tracing::warn!("Progress analysis failed: {}", e);
        record_analysis("failed");
        analysis_error(e)
    })?;

    record_analysis("ok");

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_rejections_of_the_images_are_client_errors() {
        let err = analysis_error(AnalysisError::Upstream {
            status: 400,
            message: "Invalid file type".to_string(),
        });
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn upstream_failures_are_bad_gateway() {
        let err = analysis_error(AnalysisError::Upstream {
            status: 500,
            message: "Processing error".to_string(),
        });
        assert!(matches!(err, AppError::BadGateway(msg) if msg == "Processing error"));

        let err = analysis_error(AnalysisError::Connection("refused".to_string()));
        assert!(matches!(err, AppError::BadGateway(_)));
    }

    #[tokio::test]
    async fn tracker_failures_carry_an_error_key() {
        let response =
            TrackerError::from(AppError::BadRequest(anyhow::anyhow!(MISSING_IMAGES))).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], MISSING_IMAGES);
        assert_eq!(body["error"], MISSING_IMAGES);
        assert!(body["data"].is_null());
    }

    #[test]
    fn disabled_analysis_is_unavailable() {
        assert!(matches!(
            analysis_error(AnalysisError::NotEnabled),
            AppError::ServiceUnavailable
        ));
    }
}
