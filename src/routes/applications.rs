use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{
    dto::job_dto::{ApplicationResponse, ApplyResponse},
    error::Result,
    middleware::{auth::AuthAccount, extract::ApiPath},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/apply",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Application recorded", body = ApplyResponse),
        (status = 400, description = "No resume uploaded, or the deadline has passed"),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Already applied to this job")
    )
)]
pub async fn apply_to_job(
    State(state): State<AppState>,
    account: AuthAccount,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.apply(account.id, id).await?;
    Ok(Json(ApplyResponse {
        applied: true,
        job_id: application.job_id,
        application_id: application.id,
    }))
}

#[utoipa::path(
    get,
    path = "/api/jobs/applied",
    responses(
        (status = 200, description = "The caller's applications", body = [ApplicationResponse]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_applied_jobs(
    State(state): State<AppState>,
    account: AuthAccount,
) -> Result<impl IntoResponse> {
    let applications = state.application_service.list_for_account(account.id).await?;
    let items: Vec<ApplicationResponse> = applications.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}/applied",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Whether the caller applied", body = bool),
        (status = 404, description = "Job not found")
    )
)]
pub async fn is_applied(
    State(state): State<AppState>,
    account: AuthAccount,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    let applied = state.application_service.has_applied(account.id, id).await?;
    Ok(Json(applied))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}/candidates",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Applications to the job", body = [ApplicationResponse]),
        (status = 403, description = "Caller does not own the job"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn list_candidates(
    State(state): State<AppState>,
    account: AuthAccount,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    let applications = state.application_service.list_for_job(id, account.id).await?;
    let items: Vec<ApplicationResponse> = applications.into_iter().map(Into::into).collect();
    Ok(Json(items))
}
