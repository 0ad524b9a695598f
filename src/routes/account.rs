use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::account_dto::{
        AccountResponse, LoginPayload, RegisterPayload, ResumeUploadResponse, TokenResponse,
        UpdateAccountPayload,
    },
    error::{Error, Result},
    middleware::{auth::AuthAccount, extract::ApiJson},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/account/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Account registered", body = AccountResponse),
        (status = 400, description = "Invalid payload or email already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let account = state.account_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(AccountResponse::new(account, None))))
}

#[utoipa::path(
    post,
    path = "/api/token",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Bearer token issued", body = TokenResponse),
        (status = 401, description = "Wrong email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let token = state.account_service.login(payload).await?;
    Ok(Json(TokenResponse {
        access: token.access,
        token_type: "Bearer".to_string(),
        expires_in: token.expires_in,
    }))
}

#[utoipa::path(
    get,
    path = "/api/account/me",
    responses(
        (status = 200, description = "The caller's account", body = AccountResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn current_user(
    State(state): State<AppState>,
    account: AuthAccount,
) -> Result<impl IntoResponse> {
    let (account, profile) = state.account_service.me(account.id).await?;
    Ok(Json(AccountResponse::new(account, profile)))
}

#[utoipa::path(
    post,
    path = "/api/account/me/update",
    request_body = UpdateAccountPayload,
    responses(
        (status = 200, description = "Account updated", body = AccountResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    account: AuthAccount,
    ApiJson(payload): ApiJson<UpdateAccountPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (account, profile) = state.account_service.update_me(account.id, payload).await?;
    Ok(Json(AccountResponse::new(account, profile)))
}

#[utoipa::path(
    post,
    path = "/api/account/upload/resume",
    request_body(content = String, content_type = "multipart/form-data", description = "PDF file in the `resume` field"),
    responses(
        (status = 200, description = "Resume stored", body = ResumeUploadResponse),
        (status = 400, description = "Missing or non-PDF file")
    )
)]
pub async fn upload_resume(
    State(state): State<AppState>,
    account: AuthAccount,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("resume") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        let profile = state
            .account_service
            .upload_resume(account.id, &filename, data)
            .await?;
        return Ok(Json(ResumeUploadResponse {
            resume: profile.resume.unwrap_or_default(),
        }));
    }
    Err(Error::BadRequest("Please upload your resume".to_string()))
}
