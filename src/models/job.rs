use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const JOB_TYPES: &[&str] = &["Permanent", "Temporary", "Internship"];
pub const EDUCATION_LEVELS: &[&str] = &["Bachelors", "Masters", "Phd"];
pub const INDUSTRIES: &[&str] = &[
    "Business",
    "Information Technology",
    "Banking",
    "Education/Training",
    "Telecommunication",
    "Others",
];
pub const EXPERIENCE_LEVELS: &[&str] = &["No Experience", "1 Years", "2 Years", "3 Years above"];

/// Jobs per page on the public listing.
pub const JOBS_PER_PAGE: i64 = 3;

/// Days a posting stays open when no deadline is supplied.
pub const DEFAULT_OPEN_DAYS: i64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub email: String,
    pub address: String,
    pub job_type: String,
    pub education: String,
    pub industry: String,
    pub experience: String,
    pub salary: i32,
    pub positions: i32,
    pub company: String,
    pub last_date: DateTime<Utc>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        now < self.last_date
    }
}

/// Every caller-writable field of a job. Owner, id and creation time are not here.
#[derive(Debug, Clone, PartialEq)]
pub struct JobFields {
    pub title: String,
    pub description: String,
    pub email: String,
    pub address: String,
    pub job_type: String,
    pub education: String,
    pub industry: String,
    pub experience: String,
    pub salary: i32,
    pub positions: i32,
    pub company: String,
    pub last_date: DateTime<Utc>,
}

/// Replacement values for an existing job; the deadline is kept when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct JobChanges {
    pub title: String,
    pub description: String,
    pub email: String,
    pub address: String,
    pub job_type: String,
    pub education: String,
    pub industry: String,
    pub experience: String,
    pub salary: i32,
    pub positions: i32,
    pub company: String,
    pub last_date: Option<DateTime<Utc>>,
}

impl JobChanges {
    pub fn apply_to(self, current: &Job) -> JobFields {
        JobFields {
            title: self.title,
            description: self.description,
            email: self.email,
            address: self.address,
            job_type: self.job_type,
            education: self.education,
            industry: self.industry,
            experience: self.experience,
            salary: self.salary,
            positions: self.positions,
            company: self.company,
            last_date: self.last_date.unwrap_or(current.last_date),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilters {
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub industry: Option<String>,
    pub min_salary: Option<i32>,
    pub max_salary: Option<i32>,
}

impl JobFilters {
    pub fn is_empty(&self) -> bool {
        *self == JobFilters::default()
    }
}

/// 1-based page over a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: i64,
}

impl Page {
    pub fn new(number: Option<i64>) -> Self {
        Self {
            number: number.unwrap_or(1).max(1),
        }
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn limit(&self) -> i64 {
        JOBS_PER_PAGE
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1).saturating_mul(JOBS_PER_PAGE)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobPage {
    pub items: Vec<Job>,
    pub total: i64,
    pub per_page: i64,
}

/// Raw aggregate row; `total_jobs == 0` means nothing matched.
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct JobStatsRow {
    pub total_jobs: i64,
    pub avg_positions: Option<f64>,
    pub avg_salary: Option<f64>,
    pub min_salary: Option<i32>,
    pub max_salary: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobStats {
    pub total_jobs: i64,
    pub avg_positions: f64,
    pub avg_salary: f64,
    pub min_salary: i32,
    pub max_salary: i32,
}

impl JobStatsRow {
    pub fn into_stats(self) -> Option<JobStats> {
        if self.total_jobs == 0 {
            return None;
        }
        Some(JobStats {
            total_jobs: self.total_jobs,
            avg_positions: self.avg_positions?,
            avg_salary: self.avg_salary?,
            min_salary: self.min_salary?,
            max_salary: self.max_salary?,
        })
    }
}
