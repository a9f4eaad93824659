//! Guest-facing routes. Every request is decided by the access engine; an
//! owner hitting these routes is recognized and bypasses the password.

use crate::error::{ApiError, ApiResult};
use crate::{AppState, CurrentCaller};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use docunest_access::{Decision, Grant, Operation};
use docunest_model::DocumentSummary;
use docunest_types::DocumentId;
use serde::{Deserialize, Serialize};

/// Body of a download request. An absent body means no password.
#[derive(Deserialize, Default)]
pub struct DownloadRequest {
    pub password: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    #[serde(flatten)]
    pub document: DocumentSummary,
    pub view_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    pub download_url: String,
    pub file_name: String,
    pub file_type: String,
}

/// Path ids that do not parse are reported like any other missing document.
pub(crate) fn parse_id(raw: &str) -> ApiResult<DocumentId> {
    DocumentId::parse(raw).map_err(|_| ApiError::not_found())
}

fn granted(decision: Decision) -> ApiResult<Grant> {
    match decision {
        Decision::Allow(grant) => Ok(grant),
        Decision::Deny(denial) => Err(denial.into()),
    }
}

pub(crate) async fn list_public(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<DocumentSummary>>> {
    Ok(Json(state.engine.list_public()?))
}

pub(crate) async fn metadata(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<String>,
) -> ApiResult<Json<DocumentSummary>> {
    let id = parse_id(&id)?;
    let grant = granted(state.engine.decide(&caller, &id, Operation::Metadata, None)?)?;
    Ok(Json(grant.summary().clone()))
}

pub(crate) async fn view(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<String>,
) -> ApiResult<Json<ViewResponse>> {
    let id = parse_id(&id)?;
    match granted(state.engine.decide(&caller, &id, Operation::View, None)?)? {
        Grant::View { summary, locator } => Ok(Json(ViewResponse {
            document: summary,
            view_url: locator,
        })),
        _ => Err(ApiError::not_found()),
    }
}

pub(crate) async fn download(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<DownloadResponse>> {
    let id = parse_id(&id)?;
    let request: DownloadRequest = if body.iter().all(u8::is_ascii_whitespace) {
        DownloadRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|_| ApiError::bad_request("Malformed download request"))?
    };

    let decision = state.engine.decide(
        &caller,
        &id,
        Operation::Download,
        request.password.as_deref(),
    )?;
    match granted(decision)? {
        Grant::Download { summary, locator } => Ok(Json(DownloadResponse {
            download_url: locator,
            file_name: summary.file_name,
            file_type: summary.file_type,
        })),
        _ => Err(ApiError::not_found()),
    }
}
