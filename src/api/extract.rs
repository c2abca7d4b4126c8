//! `POST /api/extract` handler.
//!
//! Accepts either a JSON body (`{"manualText": "..."}`) or a
//! `multipart/form-data` upload with a `file` part and/or a `manualText`
//! text part. Manual text wins when both are present.

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::error::ApiError;
use super::types::{ApiContext, ExtractRequest};
use crate::pipeline::orchestrator::{PipelineError, PipelineInput, ResultEnvelope};

/// Uploads bigger than this are rejected before the pipeline runs (16 MB).
/// The router raises axum's body limit to match, so this is the operative cap.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

pub async fn extract(
    State(ctx): State<ApiContext>,
    req: Request,
) -> Result<Response, ApiError> {
    let input = read_input(req).await?;

    // Non-PDF uploads are a client error unless manual text covers for them.
    if input.manual_text.as_deref().map_or(true, |t| t.trim().is_empty()) {
        if let Some(bytes) = &input.file_bytes {
            if !bytes.starts_with(b"%PDF") {
                return Ok(failure_response(&PipelineError::NotAPdf));
            }
        }
    }

    let orchestrator = ctx.orchestrator.clone();
    let outcome = tokio::task::spawn_blocking(move || orchestrator.run(input))
        .await
        .map_err(|e| ApiError::Internal(format!("pipeline task panicked: {e}")))?;

    Ok(match outcome {
        Ok((events, text_length)) => {
            let envelope = ResultEnvelope::success(events, text_length);
            (StatusCode::OK, Json(envelope)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "extract request failed");
            failure_response(&e)
        }
    })
}

/// Client-input failures get a 400; pipeline failures are data, not
/// transport errors, and ride a 200 like successes do.
fn failure_response(e: &PipelineError) -> Response {
    let status = if e.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };
    (status, Json(ResultEnvelope::failure(e))).into_response()
}

/// Branch on content type: multipart upload or JSON body.
async fn read_input(req: Request) -> Result<PipelineInput, ApiError> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?;
        return read_multipart(multipart).await;
    }

    let Json(body): Json<ExtractRequest> = Json::from_request(req, &())
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))?;

    Ok(PipelineInput {
        manual_text: body.manual_text,
        file_bytes: None,
    })
}

async fn read_multipart(mut multipart: Multipart) -> Result<PipelineInput, ApiError> {
    let mut input = PipelineInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("unreadable multipart field: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "manualText" | "text" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("unreadable text field: {e}")))?;
                input.manual_text = Some(text);
            }
            "file" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("unreadable file field: {e}")))?;
                if bytes.len() > MAX_UPLOAD_BYTES {
                    return Err(ApiError::BadRequest(format!(
                        "file exceeds {} MB upload limit",
                        MAX_UPLOAD_BYTES / (1024 * 1024)
                    )));
                }
                input.file_bytes = Some(bytes.to_vec());
            }
            other => {
                tracing::debug!(field = %other, "ignoring unknown multipart field");
            }
        }
    }

    Ok(input)
}
