use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "consumer")]
    Consumer,
    #[sea_orm(string_value = "company")]
    Company,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Consumer => "consumer",
            Role::Company => "company",
            Role::Admin => "admin",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl AccountStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(AccountStatus::Pending),
            "approved" => Some(AccountStatus::Approved),
            "rejected" => Some(AccountStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum DeliveryStatus {
    #[sea_orm(string_value = "not dispatched")]
    #[serde(rename = "not dispatched")]
    NotDispatched,
    #[sea_orm(string_value = "dispatched")]
    #[serde(rename = "dispatched", alias = "in transit")]
    Dispatched,
    #[sea_orm(string_value = "out for delivery")]
    #[serde(rename = "out for delivery")]
    OutForDelivery,
    #[sea_orm(string_value = "delivered")]
    #[serde(rename = "delivered")]
    Delivered,
    #[sea_orm(string_value = "returned")]
    #[serde(rename = "returned")]
    Returned,
}

impl DeliveryStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "not dispatched" => Some(DeliveryStatus::NotDispatched),
            "dispatched" | "in transit" => Some(DeliveryStatus::Dispatched),
            "out for delivery" => Some(DeliveryStatus::OutForDelivery),
            "delivered" => Some(DeliveryStatus::Delivered),
            "returned" => Some(DeliveryStatus::Returned),
            _ => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "unpaid")]
    Unpaid,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_status_accepts_legacy_spelling() {
        assert_eq!(
            DeliveryStatus::parse("in transit"),
            Some(DeliveryStatus::Dispatched)
        );
        let parsed: DeliveryStatus = serde_json::from_str("\"in transit\"").unwrap();
        assert_eq!(parsed, DeliveryStatus::Dispatched);
        assert_eq!(
            serde_json::to_string(&DeliveryStatus::NotDispatched).unwrap(),
            "\"not dispatched\""
        );
    }

    #[test]
    fn account_status_rejects_unknown_values() {
        assert_eq!(AccountStatus::parse("approved"), Some(AccountStatus::Approved));
        assert_eq!(AccountStatus::parse("Approved"), None);
        assert_eq!(AccountStatus::parse("banned"), None);
    }
}
