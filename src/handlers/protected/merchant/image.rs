use axum::extract::State;
use serde_json::Value;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, SessionToken, UploadForm};
use crate::proxy::input::read_multipart;
use crate::proxy::ProxyRequest;

const OPERATION: &str = "Upload merchant image";

/// POST /api/merchant/image - Replace the store image
///
/// Multipart input with a required `image` part, forwarded as-is. The backend
/// answers with the stored image URL.
pub async fn image_post(
    State(state): State<AppState>,
    session: SessionToken,
    UploadForm(multipart): UploadForm,
) -> ApiResult<Option<Value>> {
    let form = read_multipart(OPERATION, multipart).await?;
    form.require_file("image")?;
    let token = session.require()?;

    let data = state
        .proxy
        .execute(
            ProxyRequest::post(OPERATION, "/merchant/image")
                .bearer(&token)
                .multipart(form),
        )
        .await?;

    Ok(ApiResponse::success(data))
}
