use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::job::Job;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Application {
    pub id: i64,
    pub account_id: i64,
    pub job_id: i64,
    pub resume: String,
    pub applied_at: DateTime<Utc>,
}

/// An application together with the job it targets.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationWithJob {
    pub application: Application,
    pub job: Job,
}
