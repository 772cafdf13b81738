use std::{env, fmt};

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    /// Lifetime of issued session tokens, in seconds.
    pub jwt_ttl_secs: i64,
    pub cookie_secure: bool,
    pub payment: Option<PaymentConfig>,
}

#[derive(Clone)]
pub struct PaymentConfig {
    pub secret_key: String,
    pub api_base: String,
    pub currency: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let jwt_ttl_secs = env::var("JWT_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(3600);
        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let payment = env::var("STRIPE_SECRET_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(|secret_key| PaymentConfig {
                secret_key,
                api_base: env::var("STRIPE_API_BASE")
                    .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
                currency: env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "inr".to_string()),
            });

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            jwt_ttl_secs,
            cookie_secure,
            payment,
        })
    }
}

// Secrets never reach the logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_ttl_secs", &self.jwt_ttl_secs)
            .field("cookie_secure", &self.cookie_secure)
            .field("payment", &self.payment)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("api_base", &self.api_base)
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}
