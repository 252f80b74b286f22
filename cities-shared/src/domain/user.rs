use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::error::DomainError;

pub const MIN_NAME_LENGTH: usize = 1;
pub const MAX_NAME_LENGTH: usize = 15;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Regular,
    Pro,
}

impl UserType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "regular" => Some(UserType::Regular),
            "pro" => Some(UserType::Pro),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Regular => "regular",
            UserType::Pro => "pro",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub user_type: UserType,
}

/// Insert shape; the password is already hashed by the service layer.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub password_hash: String,
    pub user_type: UserType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub password: String,
    pub user_type: UserType,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<Self, DomainError> {
        let name = self.name.trim().to_string();
        let name_len = name.chars().count();
        if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&name_len) {
            return Err(DomainError::Validation {
                field: "name",
                message: "must be 1..15 chars",
            });
        }

        let email = normalize_email(&self.email)?;

        let password_len = self.password.chars().count();
        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&password_len) {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be 6..12 chars",
            });
        }

        Ok(Self {
            name,
            email,
            avatar_url: self.avatar_url,
            password: self.password,
            user_type: self.user_type,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(self) -> Result<Self, DomainError> {
        let email = normalize_email(&self.email)?;
        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            email,
            password: self.password,
        })
    }
}

pub fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}
