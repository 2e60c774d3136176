// handlers/public/auth/ocr.rs - POST /api/auth/ocr handler

use axum::extract::State;
use serde_json::Value;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, UploadForm};
use crate::proxy::input::read_multipart;
use crate::proxy::ProxyRequest;

const OPERATION: &str = "OCR";

/// POST /api/auth/ocr - Extract business-licence fields from an uploaded image
///
/// Multipart input with a required `file` part. The form is forwarded to the
/// backend unchanged; recognition itself happens there. The response `data`
/// is whatever the backend extracted (business number, store name, owner...)
/// and is used to pre-fill the signup form.
pub async fn ocr_post(State(state): State<AppState>, UploadForm(multipart): UploadForm) -> ApiResult<Option<Value>> {
    let form = read_multipart(OPERATION, multipart).await?;
    let file = form.require_file("file")?;

    tracing::debug!(
        "{}: forwarding {} ({} bytes)",
        OPERATION,
        file.file_name.as_deref().unwrap_or("unnamed"),
        file.bytes.len()
    );

    let data = state
        .proxy
        .execute(ProxyRequest::post(OPERATION, "/auth/ocr").multipart(form))
        .await?;

    Ok(ApiResponse::success(data))
}
