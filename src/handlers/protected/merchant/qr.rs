use axum::{body::Bytes, extract::State};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, SessionToken};
use crate::proxy::input::parse_json_body;
use crate::proxy::ProxyRequest;
use crate::services::table_qr::join_tables_with_qr;
use crate::types::{CreateQrRequest, DiningTable, QrCode, TableId, TableQr};

/// GET /api/merchant/qr - Every table with its QR code
///
/// The one composite route: the table list and the QR list are read
/// separately and left-joined on the table id, so a table without a QR code
/// still appears (with empty QR fields), in table-list order.
pub async fn qr_get(State(state): State<AppState>, session: SessionToken) -> ApiResult<Vec<TableQr>> {
    const OPERATION: &str = "Fetch QR codes";
    let token = session.require()?;

    let (tables, qr_codes) = tokio::try_join!(
        state
            .proxy
            .execute::<Vec<DiningTable>>(ProxyRequest::get(OPERATION, "/merchant/tables").bearer(&token)),
        state
            .proxy
            .execute::<Vec<QrCode>>(ProxyRequest::get(OPERATION, "/merchant/qr").bearer(&token)),
    )?;

    let joined = join_tables_with_qr(tables.unwrap_or_default(), qr_codes.unwrap_or_default());

    Ok(ApiResponse::success(joined))
}

/// POST /api/merchant/qr - Generate a QR code for a table
///
/// Expected Input: `{ "tableId": number | "string" }`
pub async fn qr_post(State(state): State<AppState>, session: SessionToken, body: Bytes) -> ApiResult<Option<Value>> {
    const OPERATION: &str = "Create QR code";

    let request: CreateQrRequest = parse_json_body(OPERATION, &body)?;
    let table_id = match request.table_id {
        Some(TableId::Text(id)) if id.trim().is_empty() => None,
        other => other,
    }
    .ok_or_else(|| ApiError::missing_field("tableId"))?;
    let token = session.require()?;

    let data = state
        .proxy
        .execute(
            ProxyRequest::post(OPERATION, "/merchant/qr")
                .bearer(&token)
                .json(json!({ "tableId": table_id })),
        )
        .await?;

    Ok(ApiResponse::success(data))
}
