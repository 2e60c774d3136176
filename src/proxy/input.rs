// Input acquisition helpers shared by the route handlers.
//
// Missing or blank required input is a 400 raised before any upstream call.
// Input that cannot be parsed at all (broken JSON, broken multipart stream)
// falls into the catch-all and is reported as "<operation> error: ...".

use axum::extract::Multipart;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// One field of a multipart form, buffered so it can be forwarded upstream
#[derive(Clone)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for FormPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormPart")
            .field("name", &self.name)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    pub parts: Vec<FormPart>,
}

impl MultipartBody {
    pub fn part(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|part| part.name == name)
    }

    /// The named field must be present and carry at least one byte
    pub fn require_file(&self, name: &str) -> Result<&FormPart, ApiError> {
        self.part(name)
            .filter(|part| !part.bytes.is_empty())
            .ok_or_else(|| ApiError::missing_field(name))
    }
}

/// Parse a JSON request body. An empty body is read as `{}` so that the
/// required-field checks report what is missing.
pub fn parse_json_body<T: DeserializeOwned>(operation: &'static str, body: &[u8]) -> Result<T, ApiError> {
    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) { b"{}" } else { body };

    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("{}: unparsable request body: {}", operation, e);
        ApiError::unexpected(operation, e)
    })
}

/// Present and not blank, or a 400 naming the field
pub fn require_field<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::missing_field(name))
}

/// Buffer every field of a multipart request
pub async fn read_multipart(operation: &'static str, mut multipart: Multipart) -> Result<MultipartBody, ApiError> {
    let mut body = MultipartBody::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::unexpected(operation, e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::unexpected(operation, e))?;

        body.parts.push(FormPart {
            name,
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Ok(body)
}
