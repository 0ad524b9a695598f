use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::application::ApplicationWithJob;
use crate::models::job::{Job, JobChanges, JobFields, JobFilters, JobPage, JobStats, DEFAULT_OPEN_DAYS};
use crate::utils::time;
use crate::utils::validation::{
    blank_as_none, non_blank, validate_education, validate_experience, validate_industry,
    validate_job_type,
};

fn default_job_type() -> String {
    "Permanent".to_string()
}

fn default_education() -> String {
    "Bachelors".to_string()
}

fn default_industry() -> String {
    "Business".to_string()
}

fn default_experience() -> String {
    "No Experience".to_string()
}

fn default_salary() -> i32 {
    1
}

fn default_positions() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub address: String,
    #[serde(default = "default_job_type")]
    #[validate(custom(function = "validate_job_type"))]
    pub job_type: String,
    #[serde(default = "default_education")]
    #[validate(custom(function = "validate_education"))]
    pub education: String,
    #[serde(default = "default_industry")]
    #[validate(custom(function = "validate_industry"))]
    pub industry: String,
    #[serde(default = "default_experience")]
    #[validate(custom(function = "validate_experience"))]
    pub experience: String,
    #[serde(default = "default_salary")]
    #[validate(range(min = 1, max = 1_000_000))]
    pub salary: i32,
    #[serde(default = "default_positions")]
    #[validate(range(min = 0))]
    pub positions: i32,
    #[validate(length(min = 1, max = 100))]
    pub company: String,
    pub last_date: Option<DateTime<Utc>>,
}

impl From<CreateJobPayload> for JobFields {
    fn from(value: CreateJobPayload) -> Self {
        Self {
            title: value.title,
            description: value.description,
            email: value.email,
            address: value.address,
            job_type: value.job_type,
            education: value.education,
            industry: value.industry,
            experience: value.experience,
            salary: value.salary,
            positions: value.positions,
            company: value.company,
            last_date: value
                .last_date
                .unwrap_or_else(|| time::days_from_now(DEFAULT_OPEN_DAYS)),
        }
    }
}

/// Full replacement of a job's writable fields; `lastDate` may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub address: String,
    #[validate(custom(function = "validate_job_type"))]
    pub job_type: String,
    #[validate(custom(function = "validate_education"))]
    pub education: String,
    #[validate(custom(function = "validate_industry"))]
    pub industry: String,
    #[validate(custom(function = "validate_experience"))]
    pub experience: String,
    #[validate(range(min = 1, max = 1_000_000))]
    pub salary: i32,
    #[validate(range(min = 0))]
    pub positions: i32,
    #[validate(length(min = 1, max = 100))]
    pub company: String,
    pub last_date: Option<DateTime<Utc>>,
}

impl From<UpdateJobPayload> for JobChanges {
    fn from(value: UpdateJobPayload) -> Self {
        Self {
            title: value.title,
            description: value.description,
            email: value.email,
            address: value.address,
            job_type: value.job_type,
            education: value.education,
            industry: value.industry,
            experience: value.experience,
            salary: value.salary,
            positions: value.positions,
            company: value.company,
            last_date: value.last_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    #[serde(deserialize_with = "blank_as_none")]
    pub page: Option<i64>,
    pub keyword: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "jobType")]
    pub job_type: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub industry: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub min_salary: Option<i32>,
    #[serde(deserialize_with = "blank_as_none")]
    pub max_salary: Option<i32>,
}

impl JobListQuery {
    pub fn filters(&self) -> JobFilters {
        JobFilters {
            keyword: non_blank(self.keyword.clone()),
            location: non_blank(self.location.clone()),
            job_type: non_blank(self.job_type.clone()),
            education: non_blank(self.education.clone()),
            experience: non_blank(self.experience.clone()),
            industry: non_blank(self.industry.clone()),
            min_salary: self.min_salary,
            max_salary: self.max_salary,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
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
    /// Owning account id.
    pub user: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Job> for JobResponse {
    fn from(value: Job) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            email: value.email,
            address: value.address,
            job_type: value.job_type,
            education: value.education,
            industry: value.industry,
            experience: value.experience,
            salary: value.salary,
            positions: value.positions,
            company: value.company,
            last_date: value.last_date,
            user: value.user_id,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobListResponse {
    pub count: i64,
    pub res_per_page: i64,
    pub jobs: Vec<JobResponse>,
}

impl From<JobPage> for JobListResponse {
    fn from(value: JobPage) -> Self {
        Self {
            count: value.total,
            res_per_page: value.per_page,
            jobs: value.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobStatsResponse {
    pub total_jobs: i64,
    pub avg_positions: f64,
    pub avg_salary: f64,
    pub min_salary: i32,
    pub max_salary: i32,
}

impl From<JobStats> for JobStatsResponse {
    fn from(value: JobStats) -> Self {
        Self {
            total_jobs: value.total_jobs,
            avg_positions: value.avg_positions,
            avg_salary: value.avg_salary,
            min_salary: value.min_salary,
            max_salary: value.max_salary,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplyResponse {
    pub applied: bool,
    pub job_id: i64,
    pub application_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: i64,
    /// Applicant account id.
    pub user: i64,
    pub resume: String,
    pub applied_at: DateTime<Utc>,
    pub job: JobResponse,
}

impl From<ApplicationWithJob> for ApplicationResponse {
    fn from(value: ApplicationWithJob) -> Self {
        Self {
            id: value.application.id,
            user: value.application.account_id,
            resume: value.application.resume,
            applied_at: value.application.applied_at,
            job: value.job.into(),
        }
    }
}
