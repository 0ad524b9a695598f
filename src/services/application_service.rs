use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationWithJob};
use crate::repositories::{ApplicationRepository, JobRepository, ProfileRepository};
use crate::services::authorization::ensure_owner;
use crate::utils::time;

#[derive(Clone)]
pub struct ApplicationService {
    applications: Arc<dyn ApplicationRepository>,
    jobs: Arc<dyn JobRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl ApplicationService {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        jobs: Arc<dyn JobRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            applications,
            jobs,
            profiles,
        }
    }

    pub async fn apply(&self, account_id: i64, job_id: i64) -> Result<Application> {
        self.apply_at(account_id, job_id, time::now()).await
    }

    /// Applies as of `now`. Checks run in order: resume, job, deadline, duplicate.
    pub async fn apply_at(
        &self,
        account_id: i64,
        job_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Application> {
        let profile = self.profiles.get(account_id).await?;
        let resume = profile
            .as_ref()
            .and_then(|p| p.resume_reference())
            .ok_or(Error::MissingResume)?
            .to_string();

        let job = self
            .jobs
            .get(job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        if !job.is_open_at(now) {
            return Err(Error::DeadlinePassed);
        }

        let application = self
            .applications
            .insert(account_id, job_id, &resume)
            .await?
            .ok_or(Error::AlreadyApplied)?;

        tracing::info!(
            application_id = application.id,
            account_id,
            job_id,
            "application submitted"
        );
        Ok(application)
    }

    pub async fn has_applied(&self, account_id: i64, job_id: i64) -> Result<bool> {
        if self.jobs.get(job_id).await?.is_none() {
            return Err(Error::NotFound("Job not found".to_string()));
        }
        self.applications.exists(account_id, job_id).await
    }

    pub async fn list_for_account(&self, account_id: i64) -> Result<Vec<ApplicationWithJob>> {
        self.applications.list_for_account(account_id).await
    }

    pub async fn list_for_job(
        &self,
        job_id: i64,
        acting_account_id: i64,
    ) -> Result<Vec<ApplicationWithJob>> {
        let job = self
            .jobs
            .get(job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        ensure_owner(acting_account_id, &job, "You can not access this job")?;
        self.applications.list_for_job(job_id).await
    }
}
