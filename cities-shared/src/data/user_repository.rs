use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::{NewUser, User};

#[derive(Debug, Clone)]
pub struct UserWithSecret {
    pub user: User,
    pub password_hash: String,
}

/// Result of the insert-if-absent operation: the stored identity plus
/// whether this call created it.
#[derive(Debug, Clone)]
pub struct FoundOrCreated {
    pub user: User,
    pub created: bool,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Atomic find-or-create keyed by email: at most one user per email,
    /// even under concurrent imports. An existing email returns the
    /// stored identity untouched.
    async fn insert_user_if_absent(&self, input: NewUser) -> Result<FoundOrCreated, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithSecret>, DomainError>;

    async fn add_favorite(&self, user_id: i64, offer_id: i64) -> Result<(), DomainError>;
    async fn remove_favorite(&self, user_id: i64, offer_id: i64) -> Result<(), DomainError>;
    async fn list_favorites(&self, user_id: i64) -> Result<Vec<i64>, DomainError>;
}
