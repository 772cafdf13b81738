use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::enums::Role,
    error::{AppError, AppResult},
    models::User,
    validation::require_non_blank,
};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Deserialize, Debug, ToSchema)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// `consumer` (default) or `company`.
    pub role: Option<Role>,
}

impl SignUpRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_blank("name", &self.name)?;
        require_non_blank("email", &self.email)?;
        require_non_blank("password", &self.password)?;
        if !self.email.contains('@') {
            return Err(AppError::validation("email is invalid"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if self.role == Some(Role::Admin) {
            return Err(AppError::validation("role must be consumer or company"));
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl SignInRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_blank("email", &self.email)?;
        require_non_blank("password", &self.password)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignInResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up(role: Option<Role>) -> SignUpRequest {
        SignUpRequest {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            password: "secret1".into(),
            role,
        }
    }

    #[test]
    fn consumers_and_companies_may_sign_up() {
        assert!(sign_up(None).validate().is_ok());
        assert!(sign_up(Some(Role::Company)).validate().is_ok());
    }

    #[test]
    fn admins_cannot_self_register() {
        assert!(sign_up(Some(Role::Admin)).validate().is_err());
    }

    #[test]
    fn short_passwords_and_bad_emails_are_rejected() {
        let mut req = sign_up(None);
        req.password = "abc".into();
        assert!(req.validate().is_err());

        let mut req = sign_up(None);
        req.email = "asha.example.com".into();
        assert!(req.validate().is_err());
    }
}
