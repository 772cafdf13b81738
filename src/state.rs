use std::sync::Arc;

use crate::{config::AppConfig, db::OrmConn, payment::PaymentProvider};

#[derive(Clone)]
pub struct AppState {
    pub orm: OrmConn,
    pub config: Arc<AppConfig>,
    /// `None` when no payment provider is configured; checkout then skips intent creation.
    pub payments: Option<Arc<dyn PaymentProvider>>,
}

impl AppState {
    pub fn new(
        orm: OrmConn,
        config: AppConfig,
        payments: Option<Arc<dyn PaymentProvider>>,
    ) -> Self {
        Self {
            orm,
            config: Arc::new(config),
            payments,
        }
    }
}
