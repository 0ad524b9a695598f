use std::sync::Arc;

use bytes::Bytes;

use crate::dto::account_dto::{LoginPayload, RegisterPayload, UpdateAccountPayload};
use crate::error::{Error, Result};
use crate::models::account::{Account, AccountChanges, NewAccount};
use crate::models::user_profile::UserProfile;
use crate::repositories::{AccountRepository, ProfileRepository};
use crate::services::resume_storage::{check_resume_upload, ResumeStorage};
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::token::{IssuedToken, JwtKeys};

#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountRepository>,
    profiles: Arc<dyn ProfileRepository>,
    storage: Arc<dyn ResumeStorage>,
    keys: JwtKeys,
    max_resume_bytes: usize,
}

impl AccountService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        profiles: Arc<dyn ProfileRepository>,
        storage: Arc<dyn ResumeStorage>,
        keys: JwtKeys,
        max_resume_bytes: usize,
    ) -> Self {
        Self {
            accounts,
            profiles,
            storage,
            keys,
            max_resume_bytes,
        }
    }

    /// Creating an account synchronously creates its profile.
    pub async fn register(&self, payload: RegisterPayload) -> Result<Account> {
        let email = payload.email.trim().to_lowercase();
        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(Error::BadRequest("User already exists".to_string()));
        }

        let account = self
            .accounts
            .create(&NewAccount {
                first_name: payload.first_name,
                last_name: payload.last_name,
                email,
                password_hash: hash_password(&payload.password)?,
            })
            .await?;
        tracing::info!(account_id = account.id, "account registered");
        Ok(account)
    }

    pub async fn login(&self, payload: LoginPayload) -> Result<IssuedToken> {
        let invalid = || Error::Unauthorized("Invalid email or password".to_string());
        let account = self
            .accounts
            .find_by_email(payload.email.trim())
            .await?
            .ok_or_else(invalid)?;
        if !verify_password(&payload.password, &account.password_hash)? {
            tracing::warn!(account_id = account.id, "failed login");
            return Err(invalid());
        }
        self.keys.issue(account.id)
    }

    /// Resolves a bearer token to the acting account id.
    pub fn authenticate(&self, token: &str) -> Result<i64> {
        self.keys
            .verify(token)
            .map_err(|_| Error::Unauthorized("invalid_token".to_string()))?
            .account_id()
    }

    pub async fn me(&self, account_id: i64) -> Result<(Account, Option<UserProfile>)> {
        let account = self
            .accounts
            .get(account_id)
            .await?
            .ok_or_else(|| Error::NotFound("Account not found".to_string()))?;
        let profile = self.profiles.get(account_id).await?;
        Ok((account, profile))
    }

    pub async fn update_me(
        &self,
        account_id: i64,
        payload: UpdateAccountPayload,
    ) -> Result<(Account, Option<UserProfile>)> {
        let password_hash = payload.password.as_deref().map(hash_password).transpose()?;
        let changes = AccountChanges {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email.trim().to_lowercase(),
            password_hash,
        };
        let account = self
            .accounts
            .update(account_id, &changes)
            .await?
            .ok_or_else(|| Error::NotFound("Account not found".to_string()))?;
        let profile = self.profiles.get(account_id).await?;
        Ok((account, profile))
    }

    pub async fn upload_resume(
        &self,
        account_id: i64,
        filename: &str,
        data: Bytes,
    ) -> Result<UserProfile> {
        let extension = check_resume_upload(filename, &data, self.max_resume_bytes)?;
        let reference = self.storage.store(account_id, extension, data).await?;
        let profile = self
            .profiles
            .set_resume(account_id, &reference)
            .await?
            .ok_or_else(|| Error::NotFound("Account not found".to_string()))?;
        tracing::info!(account_id, resume = %reference, "resume uploaded");
        Ok(profile)
    }
}
