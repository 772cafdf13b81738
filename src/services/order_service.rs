use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::orders::{CheckoutRequest, CheckoutResponse, OrderList, OrderWithItems},
    entity::{
        carts::LineItem,
        enums::{DeliveryStatus, PaymentStatus},
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems},
        orders::{self, ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
        products::{Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_consumer},
    models::{Order, OrderItem},
    payment::PaymentIntentRequest,
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    services::cart_service::{find_cart, save_cart, total_price},
    state::AppState,
};

/// Human-readable summary sent to the payment provider, e.g. `2 x Saffron, 1 x Honey`.
pub fn payment_description(items: &[LineItem], names: &HashMap<Uuid, String>) -> String {
    items
        .iter()
        .map(|item| {
            let name = names
                .get(&item.product_id)
                .cloned()
                .unwrap_or_else(|| item.product_id.to_string());
            format!("{} x {}", item.quantity, name)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

async fn product_names<C>(conn: &C, items: &[LineItem]) -> AppResult<HashMap<Uuid, String>>
where
    C: ConnectionTrait,
{
    let ids: Vec<Uuid> = items.iter().map(|item| item.product_id).collect();
    Ok(Products::find()
        .filter(ProdCol::Id.is_in(ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect())
}

pub(crate) async fn load_items<C>(conn: &C, order_id: Uuid) -> AppResult<Vec<OrderItem>>
where
    C: ConnectionTrait,
{
    Ok(OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .order_by_asc(OrderItemCol::Position)
        .all(conn)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect())
}

/// Converts the caller's cart into an order.
///
/// The payment intent is requested before any database work, so no
/// connection is held across the provider round trip. Order creation and
/// clearing the cart then run in one transaction, which re-reads the cart
/// and refuses to proceed if it changed since the intent was priced.
///
/// A provider failure leaves the cart untouched and no order behind. If the
/// transaction fails after the intent was created, that intent is orphaned:
/// it stays unconfirmed on the provider side and is never charged.
pub async fn checkout(
    state: &AppState,
    user: &AuthUser,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<CheckoutResponse>> {
    ensure_consumer(user)?;
    payload.validate()?;

    let items = find_cart(&state.orm, user.user_id)
        .await?
        .map(|cart| cart.line_items.0)
        .filter(|items| !items.is_empty())
        .ok_or(AppError::EmptyCart)?;
    let total = total_price(&items)?;
    let order_id = Uuid::new_v4();

    let intent = match &state.payments {
        Some(provider) => {
            let names = product_names(&state.orm, &items).await?;
            let request = PaymentIntentRequest {
                amount: total,
                currency: provider.currency().to_string(),
                description: payment_description(&items, &names),
                metadata: HashMap::from([
                    ("order_id".to_string(), order_id.to_string()),
                    ("user_id".to_string(), user.user_id.to_string()),
                ]),
            };
            Some(provider.create_intent(request).await?)
        }
        None => None,
    };

    let txn = state.orm.begin().await?;

    let cart = find_cart(&txn, user.user_id)
        .await?
        .filter(|cart| !cart.line_items.0.is_empty())
        .ok_or(AppError::EmptyCart)?;
    if cart.line_items.0 != items {
        if let Some(intent) = &intent {
            tracing::warn!(intent_id = %intent.id, user_id = %user.user_id, "cart changed during checkout");
        }
        return Err(AppError::validation(
            "Cart changed during checkout, please try again",
        ));
    }

    let now = Utc::now();
    let order = OrderActive {
        id: Set(order_id),
        user_id: Set(user.user_id),
        total_price: Set(total),
        name: Set(payload.name.trim().to_string()),
        phone_number: Set(payload.phone_number.trim().to_string()),
        pincode: Set(payload.pincode.trim().to_string()),
        address: Set(payload.address.trim().to_string()),
        delivery_status: Set(DeliveryStatus::NotDispatched),
        payment_status: Set(PaymentStatus::Unpaid),
        payment_intent_id: Set(intent.as_ref().map(|i| i.id.clone())),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&txn)
    .await?;

    let mut order_items = Vec::with_capacity(items.len());
    for (position, line) in items.iter().enumerate() {
        let item = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(line.product_id),
            quantity: Set(line.quantity),
            price: Set(line.price),
            position: Set(i32::try_from(position).map_err(|_| {
                AppError::validation("Too many line items in cart")
            })?),
        }
        .insert(&txn)
        .await?;
        order_items.push(OrderItem::from(item));
    }

    save_cart(&txn, user.user_id, Some(cart), Vec::new()).await?;

    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        user_id = %user.user_id,
        total = order.total_price,
        items = order_items.len(),
        "order placed"
    );
    audit::record(
        &state.orm,
        Some(user.user_id),
        "checkout",
        "orders",
        serde_json::json!({ "order_id": order.id, "total_price": order.total_price }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order placed",
        CheckoutResponse {
            order: OrderWithItems {
                order: order.into(),
                items: order_items,
            },
            client_secret: intent.and_then(|i| i.client_secret),
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_my_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_consumer(user)?;
    list_orders_where(
        state,
        Condition::all().add(OrderCol::UserId.eq(user.user_id)),
        query,
    )
    .await
}

pub(crate) async fn list_orders_where(
    state: &AppState,
    mut condition: Condition,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();
    if let Some(raw) = query.delivery_status.as_deref().filter(|s| !s.is_empty()) {
        let status = DeliveryStatus::parse(raw)
            .ok_or_else(|| AppError::validation("Invalid delivery status"))?;
        condition = condition.add(OrderCol::DeliveryStatus.eq(status));
    }

    let finder = Orders::find().filter(condition);
    let finder = match query.sort_order.unwrap_or_default() {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

    Ok(ApiResponse::success(
        "Orders",
        OrderList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_my_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_consumer(user)?;
    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(user.user_id))
                .add(OrderCol::Id.eq(id)),
        )
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order not found with ID {id}")))?;
    with_items(state, order).await
}

pub(crate) async fn with_items(
    state: &AppState,
    order: orders::Model,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let items = load_items(&state.orm, order.id).await?;
    Ok(ApiResponse::success(
        "OK",
        OrderWithItems {
            order: order.into(),
            items,
        },
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_lists_quantities_and_names() {
        let known = Uuid::new_v4();
        let gone = Uuid::new_v4();
        let items = vec![
            LineItem {
                product_id: known,
                quantity: 2,
                price: 100,
            },
            LineItem {
                product_id: gone,
                quantity: 1,
                price: 50,
            },
        ];
        let names = HashMap::from([(known, "Saffron".to_string())]);
        assert_eq!(
            payment_description(&items, &names),
            format!("2 x Saffron, 1 x {gone}")
        );
    }
}
