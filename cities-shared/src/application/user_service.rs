use tracing::info;

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, NewUser, RegisterRequest, User, normalize_email};
use crate::infrastructure::password::{hash_password, verify_password};
use crate::tsv::factory::ImportUser;

pub struct UserService<R: UserRepository> {
    repo: R,
    salt: String,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R, salt: impl Into<String>) -> Self {
        Self {
            repo,
            salt: salt.into(),
        }
    }

    /// Registration fails when the email is already taken; the stored
    /// identity is never overwritten.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, DomainError> {
        let req = req.validate()?;
        let password_hash = hash_password(&req.password, &self.salt)?;

        let outcome = self
            .repo
            .insert_user_if_absent(NewUser {
                name: req.name,
                email: req.email,
                avatar_url: req.avatar_url,
                password_hash,
                user_type: req.user_type,
            })
            .await?;

        if !outcome.created {
            return Err(DomainError::AlreadyExists(outcome.user.email));
        }

        info!(email = %outcome.user.email, "new user created");
        Ok(outcome.user)
    }

    pub async fn login(&self, req: LoginRequest) -> Result<User, DomainError> {
        let req = req.validate()?;

        let Some(stored) = self.repo.find_by_email(&req.email).await? else {
            return Err(DomainError::InvalidCredentials);
        };

        verify_password(&req.password, &stored.password_hash)?;
        Ok(stored.user)
    }

    /// Import path: reuse the stored identity when the email exists,
    /// otherwise create it with the salted hash of the fixture password.
    pub async fn find_or_create(&self, import_user: &ImportUser) -> Result<User, DomainError> {
        let email = normalize_email(&import_user.email)?;
        let password_hash = hash_password(&import_user.password, &self.salt)?;

        let outcome = self
            .repo
            .insert_user_if_absent(NewUser {
                name: import_user.name.clone(),
                email,
                avatar_url: import_user.avatar_url.clone(),
                password_hash,
                user_type: import_user.user_type,
            })
            .await?;

        if outcome.created {
            info!(email = %outcome.user.email, "new user created");
        }
        Ok(outcome.user)
    }

    pub async fn add_favorite(&self, user_id: i64, offer_id: i64) -> Result<(), DomainError> {
        self.repo.add_favorite(user_id, offer_id).await
    }

    pub async fn remove_favorite(&self, user_id: i64, offer_id: i64) -> Result<(), DomainError> {
        self.repo.remove_favorite(user_id, offer_id).await
    }

    pub async fn find_favorites(&self, user_id: i64) -> Result<Vec<i64>, DomainError> {
        self.repo.list_favorites(user_id).await
    }
}
