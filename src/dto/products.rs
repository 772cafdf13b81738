use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::Product,
    validation::require_non_blank,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub distributor: String,
    pub price: i64,
    pub manufacturing_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub description: String,
}

impl CreateProductRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_blank("name", &self.name)?;
        require_non_blank("distributor", &self.distributor)?;
        require_non_blank("description", &self.description)?;
        if self.price < 0 {
            return Err(AppError::validation("price must not be negative"));
        }
        if let Some(expiry) = self.expiry_date {
            if expiry < self.manufacturing_date {
                return Err(AppError::validation(
                    "expiry_date must not precede manufacturing_date",
                ));
            }
        }
        Ok(())
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateProductRequest {
        CreateProductRequest {
            name: "Saffron 5g".into(),
            distributor: "Kashmir Spices Co".into(),
            price: 45_000,
            manufacturing_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2026, 9, 1),
            description: "Grade A1 saffron".into(),
        }
    }

    #[test]
    fn accepts_well_formed_product() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn rejects_expiry_before_manufacture() {
        let mut req = request();
        req.expiry_date = NaiveDate::from_ymd_opt(2023, 1, 1);
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_missing_fields_and_negative_price() {
        let mut req = request();
        req.distributor = String::new();
        assert!(req.validate().is_err());

        let mut req = request();
        req.price = -1;
        assert!(req.validate().is_err());
    }
}
