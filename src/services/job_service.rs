use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::job::{Job, JobChanges, JobFields, JobFilters, JobPage, JobStats, Page};
use crate::repositories::JobRepository;
use crate::services::authorization::ensure_owner;

#[derive(Clone)]
pub struct JobService {
    jobs: Arc<dyn JobRepository>,
}

impl JobService {
    pub fn new(jobs: Arc<dyn JobRepository>) -> Self {
        Self { jobs }
    }

    pub async fn list(&self, filters: &JobFilters, page: Page) -> Result<JobPage> {
        self.jobs.list(filters, page).await
    }

    pub async fn get(&self, id: i64) -> Result<Job> {
        self.jobs
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    pub async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<Job>> {
        self.jobs.list_by_owner(owner_id).await
    }

    pub async fn create(&self, owner_id: i64, fields: JobFields) -> Result<Job> {
        let job = self.jobs.create(owner_id, &fields).await?;
        tracing::info!(job_id = job.id, owner_id, "job created");
        Ok(job)
    }

    pub async fn update(&self, id: i64, acting_account_id: i64, changes: JobChanges) -> Result<Job> {
        let current = self.get(id).await?;
        ensure_owner(acting_account_id, &current, "You cannot update this job").map_err(|e| {
            tracing::warn!(job_id = id, acting_account_id, "rejected job update by non-owner");
            e
        })?;

        let fields = changes.apply_to(&current);
        let job = self
            .jobs
            .update(id, &fields)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        tracing::info!(job_id = id, "job updated");
        Ok(job)
    }

    pub async fn delete(&self, id: i64, acting_account_id: i64) -> Result<()> {
        let current = self.get(id).await?;
        ensure_owner(acting_account_id, &current, "You cannot delete this job").map_err(|e| {
            tracing::warn!(job_id = id, acting_account_id, "rejected job delete by non-owner");
            e
        })?;

        if !self.jobs.delete(id).await? {
            return Err(Error::NotFound("Job not found".to_string()));
        }
        tracing::info!(job_id = id, "job deleted");
        Ok(())
    }

    /// Aggregates over jobs whose title contains `topic`; `None` when none match.
    pub async fn stats_by_title(&self, topic: &str) -> Result<Option<JobStats>> {
        let row = self.jobs.stats_by_title(topic).await?;
        Ok(row.into_stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobStatsRow;
    use crate::repositories::job_repository::MockJobRepository;
    use chrono::{TimeZone, Utc};
    use mockall::predicate::eq;

    fn job(id: i64, owner: i64) -> Job {
        let at = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        Job {
            id,
            title: "Backend engineer".into(),
            description: "Build services".into(),
            email: "hr@acme.test".into(),
            address: "Berlin".into(),
            job_type: "Permanent".into(),
            education: "Bachelors".into(),
            industry: "Information Technology".into(),
            experience: "2 Years".into(),
            salary: 70_000,
            positions: 2,
            company: "Acme".into(),
            last_date: at,
            user_id: owner,
            created_at: at,
        }
    }

    fn changes() -> JobChanges {
        JobChanges {
            title: "Senior backend engineer".into(),
            description: "Own services".into(),
            email: "hr@acme.test".into(),
            address: "Remote".into(),
            job_type: "Temporary".into(),
            education: "Masters".into(),
            industry: "Banking".into(),
            experience: "3 Years above".into(),
            salary: 90_000,
            positions: 1,
            company: "Acme".into(),
            last_date: None,
        }
    }

    #[tokio::test]
    async fn update_by_non_owner_is_forbidden_and_writes_nothing() {
        let mut repo = MockJobRepository::new();
        let existing = job(1, 10);
        repo.expect_get()
            .with(eq(1))
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update().never();

        let service = JobService::new(Arc::new(repo));
        let err = service.update(1, 11, changes()).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[tokio::test]
    async fn update_by_owner_keeps_deadline_when_absent() {
        let mut repo = MockJobRepository::new();
        let existing = job(1, 10);
        let deadline = existing.last_date;
        repo.expect_get()
            .with(eq(1))
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update()
            .withf(move |id, fields| *id == 1 && fields.last_date == deadline && fields.salary == 90_000)
            .times(1)
            .returning(|id, fields| {
                let mut updated = job(id, 10);
                updated.title = fields.title.clone();
                updated.salary = fields.salary;
                Ok(Some(updated))
            });

        let service = JobService::new(Arc::new(repo));
        let updated = service.update(1, 10, changes()).await.unwrap();
        assert_eq!(updated.title, "Senior backend engineer");
        assert_eq!(updated.user_id, 10);
    }

    #[tokio::test]
    async fn delete_by_non_owner_is_forbidden() {
        let mut repo = MockJobRepository::new();
        repo.expect_get().returning(|id| Ok(Some(job(id, 10))));
        repo.expect_delete().never();

        let service = JobService::new(Arc::new(repo));
        let err = service.delete(3, 99).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[tokio::test]
    async fn delete_missing_job_is_not_found() {
        let mut repo = MockJobRepository::new();
        repo.expect_get().returning(|_| Ok(None));

        let service = JobService::new(Arc::new(repo));
        let err = service.delete(3, 10).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn stats_without_matches_is_empty_signal() {
        let mut repo = MockJobRepository::new();
        repo.expect_stats_by_title()
            .withf(|topic| topic == "zzz")
            .returning(|_| {
                Ok(JobStatsRow {
                    total_jobs: 0,
                    avg_positions: None,
                    avg_salary: None,
                    min_salary: None,
                    max_salary: None,
                })
            });

        let service = JobService::new(Arc::new(repo));
        assert_eq!(service.stats_by_title("zzz").await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_forwards_filters_and_page() {
        let mut repo = MockJobRepository::new();
        repo.expect_list()
            .withf(|filters, page| filters.keyword.as_deref() == Some("rust") && page.number() == 2)
            .returning(|_, page| {
                Ok(JobPage {
                    items: vec![job(4, 1)],
                    total: 4,
                    per_page: page.limit(),
                })
            });

        let service = JobService::new(Arc::new(repo));
        let filters = JobFilters {
            keyword: Some("rust".into()),
            ..Default::default()
        };
        let page = service.list(&filters, Page::new(Some(2))).await.unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.per_page, 3);
        assert_eq!(page.items.len(), 1);
    }
}
