use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use docunest_blobstore::{BlobStoreError, ObjectKey};
use tracing::error;

/// Serves a stored object by key. Keys are only ever handed out inside view
/// and download grants.
pub(crate) async fn serve(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let storage = state.files.as_ref().ok_or_else(ApiError::not_found)?;
    let key = ObjectKey::parse(&key).map_err(|_| ApiError::not_found())?;

    match storage.read(&key).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, key.content_type())], bytes)),
        Err(BlobStoreError::NotFound(_)) => Err(ApiError::not_found()),
        Err(e) => {
            error!(error = %e, "failed to read stored object");
            Err(ApiError::new(
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                "unavailable",
                "Service temporarily unavailable",
            ))
        }
    }
}
