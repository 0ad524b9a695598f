use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::job_dto::{
        CreateJobPayload, JobListQuery, JobListResponse, JobResponse, JobStatsResponse,
        MessageResponse, UpdateJobPayload,
    },
    error::{Error, Result},
    middleware::{
        auth::AuthAccount,
        extract::{ApiJson, ApiPath, ApiQuery},
    },
    models::job::Page,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("page" = Option<i64>, Query, description = "Page number, 3 jobs per page"),
        ("keyword" = Option<String>, Query, description = "Title contains (case-insensitive)"),
        ("location" = Option<String>, Query, description = "Address contains (case-insensitive)"),
        ("jobType" = Option<String>, Query, description = "Exact job type"),
        ("education" = Option<String>, Query, description = "Exact education level"),
        ("experience" = Option<String>, Query, description = "Exact experience level"),
        ("industry" = Option<String>, Query, description = "Exact industry"),
        ("min_salary" = Option<i32>, Query, description = "Salary lower bound"),
        ("max_salary" = Option<i32>, Query, description = "Salary upper bound")
    ),
    responses(
        (status = 200, description = "Filtered page of jobs", body = JobListResponse)
    )
)]
pub async fn list_jobs(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<JobListQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .job_service
        .list(&query.filters(), Page::new(query.page))
        .await?;
    Ok(Json(JobListResponse::from(page)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found", body = JobResponse),
        (status = 404, description = "Job not found")
    )
)]
pub async fn get_job(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get(id).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created", body = JobResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_job(
    State(state): State<AppState>,
    account: AuthAccount,
    ApiJson(payload): ApiJson<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.create(account.id, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    put,
    path = "/api/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated", body = JobResponse),
        (status = 403, description = "Caller does not own the job"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn update_job(
    State(state): State<AppState>,
    account: AuthAccount,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state
        .job_service
        .update(id, account.id, payload.into())
        .await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job deleted", body = MessageResponse),
        (status = 403, description = "Caller does not own the job"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn delete_job(
    State(state): State<AppState>,
    account: AuthAccount,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    state.job_service.delete(id, account.id).await?;
    Ok(Json(MessageResponse {
        message: "Job is deleted".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/jobs/stats/{topic}",
    params(
        ("topic" = String, Path, description = "Case-insensitive title substring")
    ),
    responses(
        (status = 200, description = "Aggregates over matching jobs", body = JobStatsResponse),
        (status = 404, description = "No job title matches the topic")
    )
)]
pub async fn job_stats(
    State(state): State<AppState>,
    ApiPath(topic): ApiPath<String>,
) -> Result<impl IntoResponse> {
    match state.job_service.stats_by_title(&topic).await? {
        Some(stats) => Ok(Json(JobStatsResponse::from(stats))),
        None => Err(Error::NoStats(topic)),
    }
}

#[utoipa::path(
    get,
    path = "/api/me/jobs",
    responses(
        (status = 200, description = "Jobs posted by the caller", body = [JobResponse]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_my_jobs(
    State(state): State<AppState>,
    account: AuthAccount,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list_for_owner(account.id).await?;
    let items: Vec<JobResponse> = jobs.into_iter().map(Into::into).collect();
    Ok(Json(items))
}
