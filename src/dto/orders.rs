use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{Order, OrderItem},
    validation::{require_digits, require_non_blank},
};

pub const PHONE_DIGITS: usize = 10;
pub const PINCODE_DIGITS: usize = 6;

/// Shipping details collected at checkout.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub name: String,
    pub phone_number: String,
    pub pincode: String,
    pub address: String,
}

impl CheckoutRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_blank("name", &self.name)?;
        require_digits("phone_number", &self.phone_number, PHONE_DIGITS)?;
        require_digits("pincode", &self.pincode, PINCODE_DIGITS)?;
        require_non_blank("address", &self.address)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    #[serde(flatten)]
    pub order: OrderWithItems,
    /// Handed to the client to complete payment; absent when payments are disabled.
    pub client_secret: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipping() -> CheckoutRequest {
        CheckoutRequest {
            name: "Ravi".into(),
            phone_number: "9876543210".into(),
            pincode: "400001".into(),
            address: "12 Marine Drive, Mumbai".into(),
        }
    }

    #[test]
    fn accepts_complete_shipping_details() {
        assert!(shipping().validate().is_ok());
    }

    #[test]
    fn rejects_malformed_phone_and_pincode() {
        let mut req = shipping();
        req.phone_number = "12345".into();
        assert!(req.validate().is_err());

        let mut req = shipping();
        req.pincode = "40000A".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_blank_address() {
        let mut req = shipping();
        req.address = "   ".into();
        assert!(req.validate().is_err());
    }
}
