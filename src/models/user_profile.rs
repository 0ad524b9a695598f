use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct UserProfile {
    pub account_id: i64,
    pub resume: Option<String>,
}

impl UserProfile {
    /// Resume reference usable for an application; blank references count as missing.
    pub fn resume_reference(&self) -> Option<&str> {
        self.resume.as_deref().filter(|r| !r.trim().is_empty())
    }
}
