//! Payment provider seam. Checkout only creates intents; confirmation happens outside this service.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::PaymentConfig;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment provider unreachable: {0}")]
    Transport(String),

    #[error("payment provider rejected the request: {0}")]
    Rejected(String),

    #[error("unexpected payment provider response: {0}")]
    Parse(String),
}

#[derive(Debug, Clone)]
pub struct PaymentIntentRequest {
    /// Minor currency units.
    pub amount: i64,
    pub currency: String,
    pub description: String,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: Option<String>,
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    fn currency(&self) -> &str;

    async fn create_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError>;
}

#[derive(Clone)]
pub struct StripePaymentProvider {
    config: PaymentConfig,
    client: reqwest::Client,
}

impl StripePaymentProvider {
    pub fn new(config: PaymentConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentProvider {
    fn currency(&self) -> &str {
        &self.config.currency
    }

    #[tracing::instrument(skip(self, request), fields(amount = request.amount))]
    async fn create_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let mut params: Vec<(String, String)> = vec![
            ("amount".to_string(), request.amount.to_string()),
            ("currency".to_string(), request.currency),
            ("description".to_string(), request.description),
            (
                "automatic_payment_methods[enabled]".to_string(),
                "true".to_string(),
            ),
        ];
        for (key, value) in request.metadata {
            params.push((format!("metadata[{key}]"), value));
        }

        let url = format!(
            "{}/v1/payment_intents",
            self.config.api_base.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.secret_key, Some(""))
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "payment intent rejected");
            return Err(PaymentError::Rejected(format!("status {status}")));
        }

        let intent: PaymentIntent = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;

        tracing::info!(intent_id = %intent.id, "payment intent created");
        Ok(intent)
    }
}
