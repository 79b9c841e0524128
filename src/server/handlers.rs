//! Endpoint handlers.

use super::envelope::{ApiError, ApiResponse};
use super::AppState;
use crate::batch;
use crate::cleanse::cleanse;
use axum::async_trait;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Uri};
use axum::{Form, Json};
use serde::Deserialize;
use tracing::debug;

pub const HOME_DESCRIPTION: &str = "API yang bisa menghasilkan output berupa teks yang sudah di-cleansing, inputan dapat berupa text dan file";
pub const PROCESSED_DESCRIPTION: &str = "Teks yang sudah diproses";

const TEXT_FIELD: &str = "text";
const FILE_FIELD: &str = "file";

/// `GET /`
pub async fn home() -> Json<ApiResponse<String>> {
    Json(ApiResponse::ok(
        HOME_DESCRIPTION,
        format!("API Text Processing v{}", env!("CARGO_PKG_VERSION")),
    ))
}

/// `POST /text-processing`
pub async fn text_processing(
    State(state): State<AppState>,
    TextField(text): TextField,
) -> Json<ApiResponse<String>> {
    let cleaned = cleanse(&text, &state.lexicon, &state.options);
    debug!(
        input_len = text.len(),
        output_len = cleaned.len(),
        "text cleansed"
    );
    Json(ApiResponse::ok(PROCESSED_DESCRIPTION, cleaned))
}

/// `POST /text-processing-file`
pub async fn text_processing_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let mut multipart = multipart.map_err(ApiError::bad_request)?;
    let (file_name, bytes) = first_file(&mut multipart)
        .await?
        .ok_or_else(|| ApiError::bad_request(format!("missing file field '{FILE_FIELD}'")))?;

    debug!(file = ?file_name, size = bytes.len(), "batch file received");

    let cleaned = tokio::task::spawn_blocking(move || {
        batch::cleanse_file(&bytes, &state.lexicon, &state.batch, &state.options)
    })
    .await
    .map_err(ApiError::internal)??;

    debug!(file = ?file_name, rows = cleaned.len(), "batch file cleansed");
    Ok(Json(ApiResponse::ok(PROCESSED_DESCRIPTION, cleaned)))
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(uri.path())
}

async fn first_file(
    multipart: &mut Multipart,
) -> Result<Option<(Option<String>, axum::body::Bytes)>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(field_error)? {
        if field.name() == Some(FILE_FIELD) {
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.map_err(field_error)?;
            return Ok(Some((file_name, bytes)));
        }
    }
    Ok(None)
}

// Oversized bodies surface here as 413.
fn field_error(err: MultipartError) -> ApiError {
    ApiError::new(err.status(), err.body_text())
}

#[derive(Debug, Deserialize)]
struct TextForm {
    text: Option<String>,
}

/// The `text` form field, from a urlencoded or multipart body.
pub struct TextField(pub String);

#[async_trait]
impl<S> FromRequest<S> for TextField
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let text = if is_multipart(req.headers()) {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(ApiError::bad_request)?;
            text_field(&mut multipart).await?
        } else {
            let Form(form) = Form::<TextForm>::from_request(req, state)
                .await
                .map_err(ApiError::bad_request)?;
            form.text
        };

        text.map(TextField)
            .ok_or_else(|| ApiError::bad_request(format!("missing form field '{TEXT_FIELD}'")))
    }
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

async fn text_field(multipart: &mut Multipart) -> Result<Option<String>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(field_error)? {
        if field.name() == Some(TEXT_FIELD) {
            let text = field.text().await.map_err(field_error)?;
            return Ok(Some(text));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_is_multipart() {
        let mut headers = HeaderMap::new();
        assert!(!is_multipart(&headers));

        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("multipart/form-data; boundary=xyz"),
        );
        assert!(is_multipart(&headers));

        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        assert!(!is_multipart(&headers));
    }
}
