use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::Result;
use crate::models::job::{Job, JobFields, JobFilters, JobPage, JobStatsRow, Page};

const JOB_COLUMNS: &str = "id, title, description, email, address, job_type, education, industry, experience, salary, positions, company, last_date, user_id, created_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Filtered jobs ordered by id, one page of them plus the filtered total.
    async fn list(&self, filters: &JobFilters, page: Page) -> Result<JobPage>;

    async fn get(&self, id: i64) -> Result<Option<Job>>;

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Job>>;

    async fn create(&self, owner_id: i64, fields: &JobFields) -> Result<Job>;

    /// Overwrites every writable column. `None` when the job does not exist.
    async fn update(&self, id: i64, fields: &JobFields) -> Result<Option<Job>>;

    /// Removes the job and, through the foreign key, its applications.
    async fn delete(&self, id: i64) -> Result<bool>;

    async fn stats_by_title(&self, substring: &str) -> Result<JobStatsRow>;
}

#[derive(Clone)]
pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Wraps free text for a containment match, escaping LIKE metacharacters.
pub fn contains_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Appends a `WHERE` clause ANDing every present filter.
pub fn push_job_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &JobFilters) {
    if filters.is_empty() {
        return;
    }

    builder.push(" WHERE ");
    let mut conditions = builder.separated(" AND ");

    if let Some(keyword) = &filters.keyword {
        conditions.push("title ILIKE ");
        conditions.push_bind_unseparated(contains_pattern(keyword));
    }
    if let Some(location) = &filters.location {
        conditions.push("address ILIKE ");
        conditions.push_bind_unseparated(contains_pattern(location));
    }
    if let Some(job_type) = &filters.job_type {
        conditions.push("job_type = ");
        conditions.push_bind_unseparated(job_type.clone());
    }
    if let Some(education) = &filters.education {
        conditions.push("education = ");
        conditions.push_bind_unseparated(education.clone());
    }
    if let Some(experience) = &filters.experience {
        conditions.push("experience = ");
        conditions.push_bind_unseparated(experience.clone());
    }
    if let Some(industry) = &filters.industry {
        conditions.push("industry = ");
        conditions.push_bind_unseparated(industry.clone());
    }
    if let Some(min_salary) = filters.min_salary {
        conditions.push("salary >= ");
        conditions.push_bind_unseparated(min_salary);
    }
    if let Some(max_salary) = filters.max_salary {
        conditions.push("salary <= ");
        conditions.push_bind_unseparated(max_salary);
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn list(&self, filters: &JobFilters, page: Page) -> Result<JobPage> {
        let mut total_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM jobs");
        push_job_filters(&mut total_query, filters);
        let total = total_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut items_query = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM jobs", JOB_COLUMNS));
        push_job_filters(&mut items_query, filters);
        items_query.push(" ORDER BY id ASC LIMIT ");
        items_query.push_bind(page.limit());
        items_query.push(" OFFSET ");
        items_query.push_bind(page.offset());
        let items = items_query
            .build_query_as::<Job>()
            .fetch_all(&self.pool)
            .await?;

        Ok(JobPage {
            items,
            total,
            per_page: page.limit(),
        })
    }

    async fn get(&self, id: i64) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE user_id = $1 ORDER BY id ASC",
            JOB_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    async fn create(&self, owner_id: i64, fields: &JobFields) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs (
                title, description, email, address, job_type,
                education, industry, experience, salary, positions,
                company, last_date, user_id
            ) VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8, $9, $10,
                $11, $12, $13
            )
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.email)
        .bind(&fields.address)
        .bind(&fields.job_type)
        .bind(&fields.education)
        .bind(&fields.industry)
        .bind(&fields.experience)
        .bind(fields.salary)
        .bind(fields.positions)
        .bind(&fields.company)
        .bind(fields.last_date)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    async fn update(&self, id: i64, fields: &JobFields) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs
            SET
                title = $2,
                description = $3,
                email = $4,
                address = $5,
                job_type = $6,
                education = $7,
                industry = $8,
                experience = $9,
                salary = $10,
                positions = $11,
                company = $12,
                last_date = $13
            WHERE id = $1
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.email)
        .bind(&fields.address)
        .bind(&fields.job_type)
        .bind(&fields.education)
        .bind(&fields.industry)
        .bind(&fields.experience)
        .bind(fields.salary)
        .bind(fields.positions)
        .bind(&fields.company)
        .bind(fields.last_date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn stats_by_title(&self, substring: &str) -> Result<JobStatsRow> {
        let row = sqlx::query_as::<_, JobStatsRow>(
            r#"
            SELECT
                COUNT(*) AS total_jobs,
                AVG(positions)::float8 AS avg_positions,
                AVG(salary)::float8 AS avg_salary,
                MIN(salary) AS min_salary,
                MAX(salary) AS max_salary
            FROM jobs
            WHERE title ILIKE $1
            "#,
        )
        .bind(contains_pattern(substring))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
