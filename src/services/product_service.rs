use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::products::{CreateProductRequest, ProductList},
    entity::{
        enums::{AccountStatus, Role},
        products::{ActiveModel, Column as ProdCol, Entity as Products},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_company, ensure_role},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::{Pagination, ProductQuery},
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    list_filtered(state, query.manufacturer, query.pagination()).await
}

/// Products registered by the calling company.
pub async fn list_own_products(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    ensure_company(user)?;
    list_filtered(state, Some(user.user_id), pagination).await
}

async fn list_filtered(
    state: &AppState,
    manufacturer: Option<Uuid>,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = pagination.normalize();

    let mut finder = Products::find();
    if let Some(manufacturer) = manufacturer {
        finder = finder.filter(ProdCol::Manufacturer.eq(manufacturer));
    }
    let finder = finder.order_by_desc(ProdCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

/// Exact-id lookup used to verify a product's authenticity.
pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    Ok(ApiResponse::success("Product", product.into(), None))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_company(user)?;
    payload.validate()?;

    let company = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .filter(|u| u.role == Role::Company)
        .ok_or_else(|| AppError::not_found("Company not found"))?;
    if company.account_status != Some(AccountStatus::Approved) {
        return Err(AppError::Forbidden(
            "Company account is not approved".into(),
        ));
    }

    let product = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        manufacturer: Set(company.id),
        distributor: Set(payload.distributor.trim().to_string()),
        price: Set(payload.price),
        manufacturing_date: Set(payload.manufacturing_date),
        expiry_date: Set(payload.expiry_date),
        description: Set(payload.description),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(product_id = %product.id, company_id = %company.id, "product registered");
    audit::record(
        &state.orm,
        Some(user.user_id),
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product Saved",
        product.into(),
        Some(Meta::empty()),
    ))
}

/// Owner or admin only.
pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_role(user, &[Role::Company, Role::Admin])?;

    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    if user.role == Role::Company && product.manufacturer != user.user_id {
        return Err(AppError::Forbidden(
            "Only the manufacturer may delete this product".into(),
        ));
    }

    Products::delete_by_id(id).exec(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}
