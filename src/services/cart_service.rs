use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::cart::{AddToCartRequest, UpdateCartItemRequest},
    entity::{
        carts::{self, ActiveModel as CartActive, Column as CartCol, Entity as Carts, LineItem, LineItems},
        products::Entity as Products,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_consumer},
    models::Cart,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Σ(price × quantity). Totals that do not fit in an `i64` are rejected.
pub fn total_price(items: &[LineItem]) -> AppResult<i64> {
    items
        .iter()
        .try_fold(0i64, |acc, item| {
            item.price
                .checked_mul(i64::from(item.quantity))
                .and_then(|line| acc.checked_add(line))
        })
        .ok_or_else(|| AppError::validation("Cart total is too large"))
}

/// Merges a product into the line items: an existing entry gains `quantity`
/// and keeps its captured price, a new entry goes to the front.
pub fn add_line_item(
    items: &mut Vec<LineItem>,
    product_id: Uuid,
    quantity: i32,
    price: i64,
) -> AppResult<()> {
    match items.iter_mut().find(|item| item.product_id == product_id) {
        Some(existing) => {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| AppError::validation("Quantity is too large"))?;
        }
        None => items.insert(
            0,
            LineItem {
                product_id,
                quantity,
                price,
            },
        ),
    }
    Ok(())
}

pub(crate) async fn find_cart<C>(conn: &C, user_id: Uuid) -> AppResult<Option<carts::Model>>
where
    C: ConnectionTrait,
{
    Ok(Carts::find()
        .filter(CartCol::UserId.eq(user_id))
        .one(conn)
        .await?)
}

/// Writes the line items back, recomputing the total. Creates the cart when absent.
pub(crate) async fn save_cart<C>(
    conn: &C,
    user_id: Uuid,
    existing: Option<carts::Model>,
    items: Vec<LineItem>,
) -> AppResult<carts::Model>
where
    C: ConnectionTrait,
{
    let now = Utc::now();
    let total = total_price(&items)?;
    let cart = match existing {
        Some(cart) => {
            let mut active: CartActive = cart.into();
            active.line_items = Set(LineItems(items));
            active.total_price = Set(total);
            active.updated_at = Set(now.into());
            active.update(conn).await?
        }
        None => {
            CartActive {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                line_items: Set(LineItems(items)),
                total_price: Set(total),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            }
            .insert(conn)
            .await?
        }
    };
    Ok(cart)
}

pub async fn get_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Cart>> {
    ensure_consumer(user)?;
    let cart = match find_cart(&state.orm, user.user_id).await? {
        Some(cart) => cart,
        None => save_cart(&state.orm, user.user_id, None, Vec::new()).await?,
    };
    Ok(ApiResponse::success("OK", cart.into(), Some(Meta::empty())))
}

pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<Cart>> {
    ensure_consumer(user)?;
    payload.validate()?;

    let product = Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    let existing = find_cart(&state.orm, user.user_id).await?;
    let mut items = existing
        .as_ref()
        .map(|cart| cart.line_items.0.clone())
        .unwrap_or_default();
    add_line_item(&mut items, product.id, payload.quantity, product.price)?;

    let cart = save_cart(&state.orm, user.user_id, existing, items).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "cart_update",
        "carts",
        serde_json::json!({ "product_id": product.id, "quantity": payload.quantity }),
    )
    .await;

    Ok(ApiResponse::success("Product added to cart", cart.into(), None))
}

/// Sets the quantity of a line item already in the cart.
pub async fn update_cart_item(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<Cart>> {
    ensure_consumer(user)?;
    payload.validate()?;

    let existing = find_cart(&state.orm, user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Cart item not found"))?;
    let mut items = existing.line_items.0.clone();
    let item = items
        .iter_mut()
        .find(|item| item.product_id == product_id)
        .ok_or_else(|| AppError::not_found("Cart item not found"))?;
    item.quantity = payload.quantity;

    let cart = save_cart(&state.orm, user.user_id, Some(existing), items).await?;
    Ok(ApiResponse::success("Cart updated", cart.into(), None))
}

pub async fn remove_from_cart(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
) -> AppResult<ApiResponse<Cart>> {
    ensure_consumer(user)?;

    let existing = find_cart(&state.orm, user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Cart item not found"))?;
    let mut items = existing.line_items.0.clone();
    let before = items.len();
    items.retain(|item| item.product_id != product_id);
    if items.len() == before {
        return Err(AppError::not_found("Cart item not found"));
    }

    let cart = save_cart(&state.orm, user.user_id, Some(existing), items).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "cart_remove",
        "carts",
        serde_json::json!({ "product_id": product_id }),
    )
    .await;

    Ok(ApiResponse::success("Removed from cart", cart.into(), Some(Meta::empty())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_add_creates_single_line_item_at_current_price() {
        let product = Uuid::new_v4();
        let mut items = Vec::new();
        add_line_item(&mut items, product, 2, 100).unwrap();
        assert_eq!(
            items,
            vec![LineItem {
                product_id: product,
                quantity: 2,
                price: 100
            }]
        );
    }

    #[test]
    fn repeated_add_accumulates_quantity() {
        let product = Uuid::new_v4();
        let mut items = Vec::new();
        add_line_item(&mut items, product, 2, 100).unwrap();
        add_line_item(&mut items, product, 3, 120).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
        // The price captured on first add sticks.
        assert_eq!(items[0].price, 100);
    }

    #[test]
    fn new_products_are_prepended() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let mut items = Vec::new();
        add_line_item(&mut items, first, 1, 10).unwrap();
        add_line_item(&mut items, second, 1, 20).unwrap();
        assert_eq!(items[0].product_id, second);
        assert_eq!(items[1].product_id, first);
    }

    #[test]
    fn total_is_sum_of_price_times_quantity() {
        let mut items = Vec::new();
        add_line_item(&mut items, Uuid::new_v4(), 2, 100).unwrap();
        add_line_item(&mut items, Uuid::new_v4(), 1, 50).unwrap();
        assert_eq!(total_price(&items).unwrap(), 250);
        assert_eq!(total_price(&[]).unwrap(), 0);
    }

    #[test]
    fn quantity_overflow_is_rejected_and_leaves_item_unchanged() {
        let product = Uuid::new_v4();
        let mut items = Vec::new();
        add_line_item(&mut items, product, i32::MAX, 1).unwrap();
        let err = add_line_item(&mut items, product, 1, 1).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(items[0].quantity, i32::MAX);
    }

    #[test]
    fn total_overflow_is_rejected() {
        let mut items = Vec::new();
        add_line_item(&mut items, Uuid::new_v4(), 2, i64::MAX / 2 + 1).unwrap();
        assert!(matches!(total_price(&items), Err(AppError::Validation(_))));

        let mut items = Vec::new();
        add_line_item(&mut items, Uuid::new_v4(), 1, i64::MAX).unwrap();
        add_line_item(&mut items, Uuid::new_v4(), 1, 1).unwrap();
        assert!(matches!(total_price(&items), Err(AppError::Validation(_))));
    }
}
