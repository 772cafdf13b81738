use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{error::AppResult, validation::require_positive_quantity};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

impl AddToCartRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_positive_quantity(self.quantity)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

impl UpdateCartItemRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_positive_quantity(self.quantity)
    }
}
