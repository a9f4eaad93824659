//! Routes for signed-in owners managing their own documents.

use crate::error::{ApiError, ApiResult};
use crate::guest::parse_id;
use crate::{AppState, CurrentCaller};
use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use docunest_access::{NewUpload, PasswordSetting};
use docunest_model::{OwnerDocumentView, Visibility};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityRequest {
    pub is_public: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRequest {
    pub password_enabled: bool,
    #[serde(default)]
    pub password: Option<String>,
}

impl From<PasswordRequest> for PasswordSetting {
    fn from(req: PasswordRequest) -> Self {
        match (req.password_enabled, req.password) {
            (false, _) => PasswordSetting::Disable,
            (true, Some(pw)) if !pw.is_empty() => PasswordSetting::Enable(Some(pw)),
            (true, _) => PasswordSetting::Enable(None),
        }
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8], message: &str) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|_| ApiError::bad_request(message))
}

pub(crate) async fn list_mine(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
) -> ApiResult<Json<Vec<OwnerDocumentView>>> {
    Ok(Json(state.service.list_mine(&caller)?))
}

pub(crate) async fn get_document(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<String>,
) -> ApiResult<Json<OwnerDocumentView>> {
    caller.require_user()?;
    let id = parse_id(&id)?;
    Ok(Json(state.service.get(&caller, &id)?))
}

pub(crate) async fn upload(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<OwnerDocumentView>)> {
    caller.require_user()?;

    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut title = String::new();
    let mut description = None;
    let mut is_public = false;
    let mut password_enabled = false;
    let mut password = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            "title" => title = field.text().await.map_err(multipart_error)?,
            "description" => description = Some(field.text().await.map_err(multipart_error)?),
            "isPublic" => is_public = field.text().await.map_err(multipart_error)? == "true",
            "passwordEnabled" => {
                password_enabled = field.text().await.map_err(multipart_error)? == "true";
            }
            "password" => password = Some(field.text().await.map_err(multipart_error)?),
            other => debug!(field = other, "ignoring unknown upload field"),
        }
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    if title.trim().is_empty() {
        return Err(ApiError::bad_request("Title is required"));
    }
    let password = if password_enabled {
        match password.filter(|p| !p.is_empty()) {
            Some(pw) => Some(pw),
            None => {
                return Err(ApiError::bad_request(
                    "A password is required when password protection is enabled",
                ));
            }
        }
    } else {
        None
    };

    let view = state
        .service
        .upload(
            &caller,
            NewUpload {
                title,
                description,
                file_name,
                content_type,
                bytes,
                visibility: Visibility::from_public_flag(is_public),
                password,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub(crate) async fn set_visibility(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<OwnerDocumentView>> {
    caller.require_user()?;
    let id = parse_id(&id)?;
    let req: VisibilityRequest = parse_body(&body, "isPublic must be a boolean")?;
    let view = state
        .service
        .set_visibility(&caller, &id, Visibility::from_public_flag(req.is_public))?;
    Ok(Json(view))
}

pub(crate) async fn set_password(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<OwnerDocumentView>> {
    caller.require_user()?;
    let id = parse_id(&id)?;
    let req: PasswordRequest =
        parse_body(&body, "passwordEnabled must be a boolean and password a string")?;
    Ok(Json(state.service.set_password(&caller, &id, req.into())?))
}

pub(crate) async fn delete_document(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    caller.require_user()?;
    let id = parse_id(&id)?;
    state.service.delete(&caller, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    let status = err.status();
    ApiError::new(status, "invalid_input", err.body_text())
}
