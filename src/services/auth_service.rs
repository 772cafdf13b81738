use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::auth::{Claims, SignInRequest, SignInResponse, SignUpRequest},
    entity::{
        carts::{ActiveModel as CartActive, LineItems},
        enums::{AccountStatus, Role},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn issue_token(user_id: Uuid, role: Role, secret: &str, ttl_secs: i64) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::seconds(ttl_secs))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub async fn sign_up(state: &AppState, payload: SignUpRequest) -> AppResult<ApiResponse<User>> {
    payload.validate()?;
    let SignUpRequest {
        name,
        email,
        password,
        role,
    } = payload;
    let email = email.trim().to_lowercase();
    let role = role.unwrap_or(Role::Consumer);

    let exist = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::validation("User already exists"));
    }

    let password_hash = hash_password(&password)?;
    let now = Utc::now();

    let txn = state.orm.begin().await?;
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.trim().to_string()),
        email: Set(email),
        password_hash: Set(password_hash),
        role: Set(role),
        account_status: Set((role == Role::Company).then_some(AccountStatus::Pending)),
        created_at: Set(now.into()),
    }
    .insert(&txn)
    .await?;

    if role == Role::Consumer {
        CartActive {
            id: Set(Uuid::new_v4()),
            user_id: Set(user.id),
            line_items: Set(LineItems::default()),
            total_price: Set(0),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;
    }
    txn.commit().await?;

    tracing::info!(user_id = %user.id, role = role.as_str(), "user signed up");
    audit::record(
        &state.orm,
        Some(user.id),
        "user_sign_up",
        "users",
        serde_json::json!({ "user_id": user.id, "role": role }),
    )
    .await;

    Ok(ApiResponse::success("New user created!", user.into(), None))
}

pub async fn sign_in(
    state: &AppState,
    payload: SignInRequest,
) -> AppResult<ApiResponse<SignInResponse>> {
    payload.validate()?;
    let SignInRequest { email, password } = payload;
    let email = email.trim().to_lowercase();

    let user = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    let invalid = || AppError::Unauthorized("Invalid email or password".into());
    let user = user.ok_or_else(invalid)?;

    if !verify_password(&password, &user.password_hash)? {
        return Err(invalid());
    }

    let ttl = state.config.jwt_ttl_secs;
    let token = issue_token(user.id, user.role, &state.config.jwt_secret, ttl)?;

    audit::record(
        &state.orm,
        Some(user.id),
        "user_sign_in",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Sign In Success",
        SignInResponse {
            token,
            expires_in: ttl,
            user: user.into(),
        },
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::decode_token;

    #[test]
    fn issued_token_decodes_to_same_principal() {
        let id = Uuid::new_v4();
        let token = issue_token(id, Role::Company, "test-secret", 3600).unwrap();
        let principal = decode_token(&token, "test-secret").unwrap();
        assert_eq!(principal.user_id, id);
        assert_eq!(principal.role, Role::Company);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_token(Uuid::new_v4(), Role::Consumer, "one", 3600).unwrap();
        assert!(matches!(
            decode_token(&token, "two"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Beyond the default 60s leeway.
        let token = issue_token(Uuid::new_v4(), Role::Consumer, "s", -3600).unwrap();
        assert!(matches!(
            decode_token(&token, "s"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("hunter22").unwrap();
        assert!(verify_password("hunter22", &hash).unwrap());
        assert!(!verify_password("hunter23", &hash).unwrap());
    }
}
