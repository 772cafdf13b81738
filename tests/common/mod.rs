#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, Set};
use true_origin_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        enums::{AccountStatus, Role},
        products::ActiveModel as ProductActive,
        users::ActiveModel as UserActive,
    },
    middleware::auth::AuthUser,
    payment::{PaymentError, PaymentIntent, PaymentIntentRequest, PaymentProvider},
    services::auth_service::{hash_password, issue_token},
    state::AppState,
};
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret";

/// Records every request; fails them all when `fail` is set.
#[derive(Default)]
pub struct FakePayments {
    pub fail: bool,
    pub calls: AtomicUsize,
    pub last_amount: std::sync::Mutex<Option<i64>>,
}

impl FakePayments {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentProvider for FakePayments {
    fn currency(&self) -> &str {
        "inr"
    }

    async fn create_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_amount.lock() {
            *last = Some(request.amount);
        }
        if self.fail {
            return Err(PaymentError::Rejected("card declined".into()));
        }
        Ok(PaymentIntent {
            id: format!("pi_{}", Uuid::new_v4().simple()),
            client_secret: Some("pi_secret_test".into()),
        })
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: JWT_SECRET.into(),
        jwt_ttl_secs: 3600,
        cookie_secure: false,
        payment: None,
    }
}

pub async fn setup_state(payments: Option<Arc<dyn PaymentProvider>>) -> anyhow::Result<AppState> {
    let config = test_config();
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm, config, payments))
}

pub async fn create_user(
    state: &AppState,
    role: Role,
    account_status: Option<AccountStatus>,
) -> anyhow::Result<AuthUser> {
    let id = Uuid::new_v4();
    UserActive {
        id: Set(id),
        name: Set(format!("{} {}", role.as_str(), &id.simple().to_string()[..6])),
        email: Set(format!("{id}@example.com")),
        password_hash: Set(hash_password("password123")?),
        role: Set(role),
        account_status: Set(account_status),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(AuthUser { user_id: id, role })
}

pub async fn consumer(state: &AppState) -> anyhow::Result<AuthUser> {
    create_user(state, Role::Consumer, None).await
}

pub async fn admin(state: &AppState) -> anyhow::Result<AuthUser> {
    create_user(state, Role::Admin, None).await
}

pub async fn approved_company(state: &AppState) -> anyhow::Result<AuthUser> {
    create_user(state, Role::Company, Some(AccountStatus::Approved)).await
}

pub async fn create_product(
    state: &AppState,
    manufacturer: Uuid,
    name: &str,
    price: i64,
) -> anyhow::Result<Uuid> {
    let id = Uuid::new_v4();
    ProductActive {
        id: Set(id),
        name: Set(name.into()),
        manufacturer: Set(manufacturer),
        distributor: Set("Test Distribution".into()),
        price: Set(price),
        manufacturing_date: Set(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
        expiry_date: Set(None),
        description: Set(format!("{name} for tests")),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(id)
}

pub fn bearer(user: &AuthUser) -> String {
    let token = issue_token(user.user_id, user.role, JWT_SECRET, 3600).unwrap();
    format!("Bearer {token}")
}
