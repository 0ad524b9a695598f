use axum::Json;
use utoipa::OpenApi;

use crate::dto::{account_dto, job_dto};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::jobs::list_jobs,
        super::jobs::get_job,
        super::jobs::create_job,
        super::jobs::update_job,
        super::jobs::delete_job,
        super::jobs::job_stats,
        super::jobs::list_my_jobs,
        super::applications::apply_to_job,
        super::applications::list_applied_jobs,
        super::applications::is_applied,
        super::applications::list_candidates,
        super::account::register,
        super::account::login,
        super::account::current_user,
        super::account::update_user,
        super::account::upload_resume,
    ),
    components(schemas(
        job_dto::CreateJobPayload,
        job_dto::UpdateJobPayload,
        job_dto::JobResponse,
        job_dto::JobListResponse,
        job_dto::JobStatsResponse,
        job_dto::MessageResponse,
        job_dto::ApplyResponse,
        job_dto::ApplicationResponse,
        account_dto::RegisterPayload,
        account_dto::LoginPayload,
        account_dto::UpdateAccountPayload,
        account_dto::TokenResponse,
        account_dto::AccountResponse,
        account_dto::ResumeUploadResponse,
    )),
    tags((name = "jobs", description = "Job board API"))
)]
pub struct ApiDoc;

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
