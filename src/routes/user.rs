use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};

use crate::{
    dto::{
        cart::{AddToCartRequest, UpdateCartItemRequest},
        orders::{CheckoutRequest, CheckoutResponse, OrderList, OrderWithItems},
        products::ProductList,
        reports::{ReportList, SubmitReportRequest},
    },
    error::AppResult,
    extract::{AppJson, AppQuery},
    middleware::auth::AuthUser,
    models::{Cart, Product, Report},
    response::ApiResponse,
    routes::params::{OrderListQuery, Pagination, ProductQuery},
    services::{cart_service, order_service, product_service, report_service},
    state::AppState,
    validation::parse_id,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/product/{product_id}", get(get_product))
        .route("/add-to-cart", post(add_to_cart))
        .route("/cart", get(get_cart))
        .route("/cart/{product_id}", put(update_cart_item).delete(remove_from_cart))
        .route("/order", post(checkout))
        .route("/my-orders", get(my_orders))
        .route("/my-orders/{id}", get(my_order))
        .route("/report-product", post(report_product))
        .route("/my-reports", get(my_reports))
}

#[utoipa::path(
    get,
    path = "/api/user/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Browse the catalog, newest first", body = ApiResponse<ProductList>)
    ),
    tag = "User"
)]
pub async fn list_products(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/user/product/{product_id}",
    params(("product_id" = String, Path, description = "Product ID to verify")),
    responses(
        (status = 200, description = "Genuine product", body = ApiResponse<Product>),
        (status = 400, description = "Malformed product id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No such product")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn get_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(product_id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let id = parse_id("Product", &product_id)?;
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/user/add-to-cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Add a product or increase its quantity", body = ApiResponse<Cart>),
        (status = 400, description = "Quantity must be positive"),
        (status = 403, description = "Consumers only"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let resp = cart_service::add_to_cart(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/user/cart",
    responses(
        (status = 200, description = "Current cart", body = ApiResponse<Cart>),
        (status = 403, description = "Consumers only")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let resp = cart_service::get_cart(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/user/cart/{product_id}",
    params(("product_id" = String, Path, description = "Product ID of the line item")),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Set a line item's quantity", body = ApiResponse<Cart>),
        (status = 404, description = "Cart item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<String>,
    AppJson(payload): AppJson<UpdateCartItemRequest>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let product_id = parse_id("Product", &product_id)?;
    let resp = cart_service::update_cart_item(&state, &user, product_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/user/cart/{product_id}",
    params(("product_id" = String, Path, description = "Product ID of the line item")),
    responses(
        (status = 200, description = "Remove a line item", body = ApiResponse<Cart>),
        (status = 404, description = "Cart item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<String>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let product_id = parse_id("Product", &product_id)?;
    let resp = cart_service::remove_from_cart(&state, &user, product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/user/order",
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Convert the cart into an order", body = ApiResponse<CheckoutResponse>),
        (status = 400, description = "Invalid shipping details or empty cart"),
        (status = 403, description = "Consumers only")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn checkout(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CheckoutResponse>>)> {
    let resp = order_service::checkout(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/user/my-orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "Own orders, newest first", body = ApiResponse<OrderList>)
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn my_orders(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_my_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/user/my-orders/{id}",
    params(("id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "One of the caller's orders with items", body = ApiResponse<OrderWithItems>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn my_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let id = parse_id("Order", &id)?;
    let resp = order_service::get_my_order(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/user/report-product",
    request_body = SubmitReportRequest,
    responses(
        (status = 201, description = "Flag a suspected counterfeit", body = ApiResponse<Report>),
        (status = 400, description = "Missing fields")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn report_product(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<SubmitReportRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Report>>)> {
    let resp = report_service::submit_report(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/user/my-reports",
    params(Pagination),
    responses(
        (status = 200, description = "Own reports, newest first", body = ApiResponse<ReportList<Report>>)
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn my_reports(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(pagination): AppQuery<Pagination>,
) -> AppResult<Json<ApiResponse<ReportList<Report>>>> {
    let resp = report_service::list_my_reports(&state, &user, pagination).await?;
    Ok(Json(resp))
}
