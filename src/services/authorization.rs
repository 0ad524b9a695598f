use crate::error::{Error, Result};
use crate::models::job::Job;

/// A resource with a single owning account.
pub trait Owned {
    fn owner_id(&self) -> i64;
}

impl Owned for Job {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// Passes only when the acting account owns `resource`.
pub fn ensure_owner<R: Owned>(acting_account_id: i64, resource: &R, message: &str) -> Result<()> {
    if resource.owner_id() == acting_account_id {
        Ok(())
    } else {
        Err(Error::Forbidden(message.to_string()))
    }
}
