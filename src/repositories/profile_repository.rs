use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::user_profile::UserProfile;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn get(&self, account_id: i64) -> Result<Option<UserProfile>>;

    /// Points the profile at a new resume. Existing applications keep their copy.
    async fn set_resume(&self, account_id: i64, resume: &str) -> Result<Option<UserProfile>>;
}

#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn get(&self, account_id: i64) -> Result<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(
            "SELECT account_id, resume FROM user_profiles WHERE account_id = $1",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn set_resume(&self, account_id: i64, resume: &str) -> Result<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            UPDATE user_profiles
            SET resume = $2
            WHERE account_id = $1
            RETURNING account_id, resume
            "#,
        )
        .bind(account_id)
        .bind(resume)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }
}
