use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    carts::{self, LineItem},
    enums::{AccountStatus, DeliveryStatus, PaymentStatus, Role},
    order_items, orders, products, reports, users,
};

/// Public view of a user; the password hash never leaves the service layer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub account_status: Option<AccountStatus>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub manufacturer: Uuid,
    pub distributor: String,
    pub price: i64,
    pub manufacturing_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
    pub line_items: Vec<LineItem>,
    pub total_price: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_price: i64,
    pub name: String,
    pub phone_number: String,
    pub pincode: String,
    pub address: String,
    pub delivery_status: DeliveryStatus,
    pub payment_status: PaymentStatus,
    pub payment_intent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Report {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: String,
    pub product_name: String,
    pub product_description: String,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role,
            account_status: model.account_status,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            manufacturer: model.manufacturer,
            distributor: model.distributor,
            price: model.price,
            manufacturing_date: model.manufacturing_date,
            expiry_date: model.expiry_date,
            description: model.description,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<carts::Model> for Cart {
    fn from(model: carts::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            line_items: model.line_items.0,
            total_price: model.total_price,
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            total_price: model.total_price,
            name: model.name,
            phone_number: model.phone_number,
            pincode: model.pincode,
            address: model.address,
            delivery_status: model.delivery_status,
            payment_status: model.payment_status,
            payment_intent_id: model.payment_intent_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<order_items::Model> for OrderItem {
    fn from(model: order_items::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            product_id: model.product_id,
            quantity: model.quantity,
            price: model.price,
        }
    }
}

impl From<reports::Model> for Report {
    fn from(model: reports::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            product_id: model.product_id,
            product_name: model.product_name,
            product_description: model.product_description,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
