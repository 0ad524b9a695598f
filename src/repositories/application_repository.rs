use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationWithJob};
use crate::models::job::Job;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Inserts unless `(account_id, job_id)` already exists, in which case `None`.
    async fn insert(&self, account_id: i64, job_id: i64, resume: &str)
        -> Result<Option<Application>>;

    async fn exists(&self, account_id: i64, job_id: i64) -> Result<bool>;

    async fn list_for_account(&self, account_id: i64) -> Result<Vec<ApplicationWithJob>>;

    async fn list_for_job(&self, job_id: i64) -> Result<Vec<ApplicationWithJob>>;
}

#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ApplicationJobRow {
    application_id: i64,
    account_id: i64,
    resume: String,
    applied_at: DateTime<Utc>,
    job_id: i64,
    title: String,
    description: String,
    email: String,
    address: String,
    job_type: String,
    education: String,
    industry: String,
    experience: String,
    salary: i32,
    positions: i32,
    company: String,
    last_date: DateTime<Utc>,
    user_id: i64,
    created_at: DateTime<Utc>,
}

impl From<ApplicationJobRow> for ApplicationWithJob {
    fn from(row: ApplicationJobRow) -> Self {
        Self {
            application: Application {
                id: row.application_id,
                account_id: row.account_id,
                job_id: row.job_id,
                resume: row.resume,
                applied_at: row.applied_at,
            },
            job: Job {
                id: row.job_id,
                title: row.title,
                description: row.description,
                email: row.email,
                address: row.address,
                job_type: row.job_type,
                education: row.education,
                industry: row.industry,
                experience: row.experience,
                salary: row.salary,
                positions: row.positions,
                company: row.company,
                last_date: row.last_date,
                user_id: row.user_id,
                created_at: row.created_at,
            },
        }
    }
}

const APPLICATION_JOB_SELECT: &str = r#"
    SELECT
        a.id AS application_id, a.account_id, a.resume, a.applied_at,
        j.id AS job_id, j.title, j.description, j.email, j.address, j.job_type,
        j.education, j.industry, j.experience, j.salary, j.positions, j.company,
        j.last_date, j.user_id, j.created_at
    FROM applications a
    JOIN jobs j ON j.id = a.job_id
"#;

/// Foreign key from `applications.job_id`, named in the initial migration.
const JOB_FOREIGN_KEY: &str = "applications_job_id_fkey";

/// Job foreign key maps to NotFound; any other dangling reference is internal.
fn foreign_key_error(constraint: Option<&str>) -> Error {
    match constraint {
        Some(JOB_FOREIGN_KEY) => Error::NotFound("Job not found".to_string()),
        other => Error::Internal(format!(
            "Application insert violated {}",
            other.unwrap_or("a foreign key")
        )),
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn insert(
        &self,
        account_id: i64,
        job_id: i64,
        resume: &str,
    ) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (account_id, job_id, resume)
            VALUES ($1, $2, $3)
            ON CONFLICT (account_id, job_id) DO NOTHING
            RETURNING id, account_id, job_id, resume, applied_at
            "#,
        )
        .bind(account_id)
        .bind(job_id)
        .bind(resume)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                foreign_key_error(db.constraint())
            }
            other => other.into(),
        })?;
        Ok(application)
    }

    async fn exists(&self, account_id: i64, job_id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM applications WHERE account_id = $1 AND job_id = $2)",
        )
        .bind(account_id)
        .bind(job_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn list_for_account(&self, account_id: i64) -> Result<Vec<ApplicationWithJob>> {
        let rows = sqlx::query_as::<_, ApplicationJobRow>(&format!(
            "{} WHERE a.account_id = $1 ORDER BY a.applied_at DESC, a.id DESC",
            APPLICATION_JOB_SELECT
        ))
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_for_job(&self, job_id: i64) -> Result<Vec<ApplicationWithJob>> {
        let rows = sqlx::query_as::<_, ApplicationJobRow>(&format!(
            "{} WHERE a.job_id = $1 ORDER BY a.applied_at ASC, a.id ASC",
            APPLICATION_JOB_SELECT
        ))
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_job_is_not_found() {
        assert!(matches!(
            foreign_key_error(Some("applications_job_id_fkey")),
            Error::NotFound(_)
        ));
    }

    #[test]
    fn missing_account_is_internal() {
        let err = foreign_key_error(Some("applications_account_id_fkey"));
        assert!(matches!(err, Error::Internal(_)));
        assert_eq!(err.code(), "internal_error");
        assert!(matches!(foreign_key_error(None), Error::Internal(_)));
    }
}
