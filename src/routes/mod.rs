pub mod account;
pub mod applications;
pub mod docs;
pub mod health;
pub mod jobs;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// All API routes plus the health probe, bound to `state`.
pub fn router(state: AppState) -> Router {
    let jobs_api = Router::new()
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/jobs/applied", get(applications::list_applied_jobs))
        .route("/jobs/stats/:topic", get(jobs::job_stats))
        .route(
            "/jobs/:id",
            get(jobs::get_job)
                .put(jobs::update_job)
                .delete(jobs::delete_job),
        )
        .route("/jobs/:id/apply", post(applications::apply_to_job))
        .route("/jobs/:id/applied", get(applications::is_applied))
        .route("/jobs/:id/candidates", get(applications::list_candidates))
        .route("/me/jobs", get(jobs::list_my_jobs));

    let account_api = Router::new()
        .route("/account/register", post(account::register))
        .route("/account/me", get(account::current_user))
        .route("/account/me/update", post(account::update_user))
        .route("/account/upload/resume", post(account::upload_resume))
        .route("/token", post(account::login));

    let api = jobs_api
        .merge(account_api)
        .route("/openapi.json", get(docs::openapi));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .with_state(state)
}
