use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};

use crate::{
    dto::products::{CreateProductRequest, ProductList},
    error::AppResult,
    extract::{AppJson, AppQuery},
    middleware::auth::{AuthUser, ensure_company},
    models::Product,
    response::ApiResponse,
    routes::params::Pagination,
    services::product_service,
    state::AppState,
    validation::parse_id,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add-product", post(add_product))
        .route("/all-products", get(all_products))
        .route("/product/{id}", get(get_product))
        .route("/delete-product/{id}", delete(delete_product))
}

#[utoipa::path(
    post,
    path = "/api/company/add-product",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Register a product", body = ApiResponse<Product>),
        (status = 400, description = "Missing or invalid fields"),
        (status = 403, description = "Not a company, or company not approved")
    ),
    security(("bearer_auth" = [])),
    tag = "Company"
)]
pub async fn add_product(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let resp = product_service::create_product(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/company/all-products",
    params(Pagination),
    responses(
        (status = 200, description = "Products registered by the caller", body = ApiResponse<ProductList>),
        (status = 403, description = "Companies only")
    ),
    security(("bearer_auth" = [])),
    tag = "Company"
)]
pub async fn all_products(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(pagination): AppQuery<Pagination>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_own_products(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/company/product/{id}",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product detail", body = ApiResponse<Product>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Company"
)]
pub async fn get_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    ensure_company(&user)?;
    let id = parse_id("Product", &id)?;
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/company/delete-product/{id}",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product removed", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Neither the manufacturer nor an admin"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Company"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let id = parse_id("Product", &id)?;
    let resp = product_service::delete_product(&state, &user, id).await?;
    Ok(Json(resp))
}
