#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use bytes::Bytes;
use chrono::Utc;
use serde_json::Value as JsonValue;
use tower::ServiceExt;

use job_board_backend::{
    error::Result,
    models::{
        account::{Account, AccountChanges, NewAccount},
        application::{Application, ApplicationWithJob},
        job::{Job, JobFields, JobFilters, JobPage, JobStatsRow, Page},
        user_profile::UserProfile,
    },
    repositories::{AccountRepository, ApplicationRepository, JobRepository, ProfileRepository},
    routes,
    services::resume_storage::ResumeStorage,
    utils::token::JwtKeys,
    AppState, Repositories,
};

#[derive(Default)]
struct Tables {
    next_id: i64,
    accounts: Vec<Account>,
    profiles: Vec<UserProfile>,
    jobs: Vec<Job>,
    applications: Vec<Application>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory stand-in for the PostgreSQL repositories.
#[derive(Clone, Default)]
pub struct MemoryDb {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryDb {
    pub fn application_count(&self) -> usize {
        self.tables.lock().unwrap().applications.len()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn job_matches(job: &Job, f: &JobFilters) -> bool {
    f.keyword.as_deref().map_or(true, |k| contains_ci(&job.title, k))
        && f.location.as_deref().map_or(true, |l| contains_ci(&job.address, l))
        && f.job_type.as_deref().map_or(true, |v| job.job_type == v)
        && f.education.as_deref().map_or(true, |v| job.education == v)
        && f.experience.as_deref().map_or(true, |v| job.experience == v)
        && f.industry.as_deref().map_or(true, |v| job.industry == v)
        && f.min_salary.map_or(true, |v| job.salary >= v)
        && f.max_salary.map_or(true, |v| job.salary <= v)
}

fn job_from(id: i64, owner_id: i64, fields: &JobFields) -> Job {
    Job {
        id,
        title: fields.title.clone(),
        description: fields.description.clone(),
        email: fields.email.clone(),
        address: fields.address.clone(),
        job_type: fields.job_type.clone(),
        education: fields.education.clone(),
        industry: fields.industry.clone(),
        experience: fields.experience.clone(),
        salary: fields.salary,
        positions: fields.positions,
        company: fields.company.clone(),
        last_date: fields.last_date,
        user_id: owner_id,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl AccountRepository for MemoryDb {
    async fn create(&self, account: &NewAccount) -> Result<Account> {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        let created = Account {
            id,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            date_joined: Utc::now(),
        };
        t.accounts.push(created.clone());
        t.profiles.push(UserProfile {
            account_id: id,
            resume: None,
        });
        Ok(created)
    }

    async fn get(&self, id: i64) -> Result<Option<Account>> {
        let t = self.tables.lock().unwrap();
        Ok(t.accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn update(&self, id: i64, changes: &AccountChanges) -> Result<Option<Account>> {
        let mut t = self.tables.lock().unwrap();
        let Some(account) = t.accounts.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        account.first_name = changes.first_name.clone();
        account.last_name = changes.last_name.clone();
        account.email = changes.email.clone();
        if let Some(hash) = &changes.password_hash {
            account.password_hash = hash.clone();
        }
        Ok(Some(account.clone()))
    }
}

#[async_trait]
impl ProfileRepository for MemoryDb {
    async fn get(&self, account_id: i64) -> Result<Option<UserProfile>> {
        let t = self.tables.lock().unwrap();
        Ok(t.profiles.iter().find(|p| p.account_id == account_id).cloned())
    }

    async fn set_resume(&self, account_id: i64, resume: &str) -> Result<Option<UserProfile>> {
        let mut t = self.tables.lock().unwrap();
        let Some(profile) = t.profiles.iter_mut().find(|p| p.account_id == account_id) else {
            return Ok(None);
        };
        profile.resume = Some(resume.to_string());
        Ok(Some(profile.clone()))
    }
}

#[async_trait]
impl JobRepository for MemoryDb {
    async fn list(&self, filters: &JobFilters, page: Page) -> Result<JobPage> {
        let t = self.tables.lock().unwrap();
        let mut matching: Vec<Job> = t.jobs.iter().filter(|j| job_matches(j, filters)).cloned().collect();
        matching.sort_by_key(|j| j.id);
        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(JobPage {
            items,
            total,
            per_page: page.limit(),
        })
    }

    async fn get(&self, id: i64) -> Result<Option<Job>> {
        let t = self.tables.lock().unwrap();
        Ok(t.jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Job>> {
        let t = self.tables.lock().unwrap();
        Ok(t.jobs.iter().filter(|j| j.user_id == owner_id).cloned().collect())
    }

    async fn create(&self, owner_id: i64, fields: &JobFields) -> Result<Job> {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        let job = job_from(id, owner_id, fields);
        t.jobs.push(job.clone());
        Ok(job)
    }

    async fn update(&self, id: i64, fields: &JobFields) -> Result<Option<Job>> {
        let mut t = self.tables.lock().unwrap();
        let Some(job) = t.jobs.iter_mut().find(|j| j.id == id) else {
            return Ok(None);
        };
        let updated = Job {
            created_at: job.created_at,
            ..job_from(id, job.user_id, fields)
        };
        *job = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.jobs.len();
        t.jobs.retain(|j| j.id != id);
        t.applications.retain(|a| a.job_id != id);
        Ok(t.jobs.len() < before)
    }

    async fn stats_by_title(&self, substring: &str) -> Result<JobStatsRow> {
        let t = self.tables.lock().unwrap();
        let hits: Vec<&Job> = t.jobs.iter().filter(|j| contains_ci(&j.title, substring)).collect();
        let n = hits.len() as f64;
        Ok(JobStatsRow {
            total_jobs: hits.len() as i64,
            avg_positions: (!hits.is_empty())
                .then(|| hits.iter().map(|j| j.positions as f64).sum::<f64>() / n),
            avg_salary: (!hits.is_empty())
                .then(|| hits.iter().map(|j| j.salary as f64).sum::<f64>() / n),
            min_salary: hits.iter().map(|j| j.salary).min(),
            max_salary: hits.iter().map(|j| j.salary).max(),
        })
    }
}

#[async_trait]
impl ApplicationRepository for MemoryDb {
    async fn insert(
        &self,
        account_id: i64,
        job_id: i64,
        resume: &str,
    ) -> Result<Option<Application>> {
        let mut t = self.tables.lock().unwrap();
        if t
            .applications
            .iter()
            .any(|a| a.account_id == account_id && a.job_id == job_id)
        {
            return Ok(None);
        }
        let id = t.next_id();
        let application = Application {
            id,
            account_id,
            job_id,
            resume: resume.to_string(),
            applied_at: Utc::now(),
        };
        t.applications.push(application.clone());
        Ok(Some(application))
    }

    async fn exists(&self, account_id: i64, job_id: i64) -> Result<bool> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .applications
            .iter()
            .any(|a| a.account_id == account_id && a.job_id == job_id))
    }

    async fn list_for_account(&self, account_id: i64) -> Result<Vec<ApplicationWithJob>> {
        let t = self.tables.lock().unwrap();
        Ok(t.applications
            .iter()
            .filter(|a| a.account_id == account_id)
            .filter_map(|a| {
                let job = t.jobs.iter().find(|j| j.id == a.job_id)?.clone();
                Some(ApplicationWithJob {
                    application: a.clone(),
                    job,
                })
            })
            .collect())
    }

    async fn list_for_job(&self, job_id: i64) -> Result<Vec<ApplicationWithJob>> {
        let t = self.tables.lock().unwrap();
        let Some(job) = t.jobs.iter().find(|j| j.id == job_id).cloned() else {
            return Ok(vec![]);
        };
        Ok(t.applications
            .iter()
            .filter(|a| a.job_id == job_id)
            .map(|a| ApplicationWithJob {
                application: a.clone(),
                job: job.clone(),
            })
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    files: Mutex<Vec<(String, Bytes)>>,
}

#[async_trait]
impl ResumeStorage for MemoryStorage {
    async fn store(&self, account_id: i64, extension: &str, data: Bytes) -> Result<String> {
        let mut files = self.files.lock().unwrap();
        let reference = format!("resumes/{}_{}.{}", account_id, files.len() + 1, extension);
        files.push((reference.clone(), data));
        Ok(reference)
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: MemoryDb,
}

pub fn setup_app() -> TestApp {
    let db = MemoryDb::default();
    let repositories = Repositories {
        accounts: Arc::new(db.clone()),
        profiles: Arc::new(db.clone()),
        jobs: Arc::new(db.clone()),
        applications: Arc::new(db.clone()),
    };
    let state = AppState::from_parts(
        repositories,
        Arc::new(MemoryStorage::default()),
        JwtKeys::new("test_secret_key", 1),
        1024 * 1024,
    );
    TestApp {
        router: routes::router(state),
        db,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<JsonValue>,
    ) -> (StatusCode, JsonValue) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let req = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.dispatch(req).await
    }

    pub async fn dispatch(&self, req: Request<Body>) -> (StatusCode, JsonValue) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let body = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
        };
        (status, body)
    }

    /// Registers an account and returns its bearer token.
    pub async fn signup(&self, email: &str) -> String {
        let (status, _) = self
            .send(
                "POST",
                "/api/account/register",
                None,
                Some(serde_json::json!({
                    "first_name": "Test",
                    "last_name": "User",
                    "email": email,
                    "password": "password123"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .send(
                "POST",
                "/api/token",
                None,
                Some(serde_json::json!({ "email": email, "password": "password123" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["access"].as_str().unwrap().to_string()
    }

    pub async fn upload_resume(&self, token: &str, filename: &str, content: &[u8]) -> (StatusCode, JsonValue) {
        let boundary = "X-JOB-BOARD-BOUNDARY";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"resume\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/account/upload/resume")
            .header("authorization", format!("Bearer {}", token))
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap();
        self.dispatch(req).await
    }

    pub async fn create_job(&self, token: &str, job: JsonValue) -> JsonValue {
        let (status, body) = self.send("POST", "/api/jobs", Some(token), Some(job)).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body
    }
}

pub fn job_payload(title: &str, salary: i32) -> JsonValue {
    serde_json::json!({
        "title": title,
        "description": "Build and run backend services",
        "email": "jobs@acme.test",
        "address": "12 Main Street, Berlin",
        "jobType": "Permanent",
        "education": "Bachelors",
        "industry": "Information Technology",
        "experience": "2 Years",
        "salary": salary,
        "positions": 2,
        "company": "Acme",
        "lastDate": (Utc::now() + chrono::Duration::days(30)).to_rfc3339()
    })
}
