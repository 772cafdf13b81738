use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::User;

/// Status arrives as a raw string so unknown values surface as validation errors.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDeliveryStatusRequest {
    pub delivery_status: String,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpdateAccountStatusQuery {
    pub company_id: String,
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyList {
    pub items: Vec<User>,
}
