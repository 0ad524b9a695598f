pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::repositories::{
    AccountRepository, ApplicationRepository, JobRepository, PgAccountRepository,
    PgApplicationRepository, PgJobRepository, PgProfileRepository, ProfileRepository,
};
use crate::services::{
    account_service::AccountService,
    application_service::ApplicationService,
    job_service::JobService,
    resume_storage::{LocalResumeStorage, ResumeStorage},
};
use crate::utils::token::JwtKeys;

#[derive(Clone)]
pub struct AppState {
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub account_service: AccountService,
}

/// Store implementations handed to the services.
#[derive(Clone)]
pub struct Repositories {
    pub accounts: Arc<dyn AccountRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            accounts: Arc::new(PgAccountRepository::new(pool.clone())),
            profiles: Arc::new(PgProfileRepository::new(pool.clone())),
            jobs: Arc::new(PgJobRepository::new(pool.clone())),
            applications: Arc::new(PgApplicationRepository::new(pool)),
        }
    }
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Self {
        Self::from_parts(
            Repositories::postgres(pool),
            Arc::new(LocalResumeStorage::new(&config.uploads_dir)),
            JwtKeys::new(&config.jwt_secret, config.jwt_ttl_hours),
            config.max_resume_bytes,
        )
    }

    pub fn from_parts(
        repositories: Repositories,
        storage: Arc<dyn ResumeStorage>,
        keys: JwtKeys,
        max_resume_bytes: usize,
    ) -> Self {
        let job_service = JobService::new(repositories.jobs.clone());
        let application_service = ApplicationService::new(
            repositories.applications,
            repositories.jobs,
            repositories.profiles.clone(),
        );
        let account_service = AccountService::new(
            repositories.accounts,
            repositories.profiles,
            storage,
            keys,
            max_resume_bytes,
        );

        Self {
            job_service,
            application_service,
            account_service,
        }
    }
}
