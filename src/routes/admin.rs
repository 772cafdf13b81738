use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, put},
};

use crate::{
    dto::{
        admin::{CompanyList, UpdateAccountStatusQuery, UpdateDeliveryStatusRequest},
        orders::{OrderList, OrderWithItems},
        reports::{ReportList, ReportWithReporter},
    },
    error::AppResult,
    extract::{AppJson, AppQuery},
    middleware::auth::AuthUser,
    models::{Order, User},
    response::ApiResponse,
    routes::params::{OrderListQuery, Pagination},
    services::admin_service,
    state::AppState,
    validation::parse_id,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/all-orders", get(list_all_orders))
        .route("/order/{id}", get(get_order_admin))
        .route("/update-order/{id}", put(update_order_status))
        .route("/all-reports", get(list_all_reports))
        .route("/all-companies", get(list_companies))
        .route(
            "/update-company-account-status",
            patch(update_company_account_status),
        )
}

#[utoipa::path(
    get,
    path = "/api/admin/all-orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "Get all orders (admin only)", body = ApiResponse<OrderList>),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal Server Error"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = admin_service::list_all_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/order/{id}",
    params(("id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Get any order with items (admin only)", body = ApiResponse<OrderWithItems>),
        (status = 400, description = "Malformed order id"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_order_admin(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let id = parse_id("Order", &id)?;
    let resp = admin_service::get_order_admin(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/update-order/{id}",
    params(("id" = String, Path, description = "Order ID")),
    request_body = UpdateDeliveryStatusRequest,
    responses(
        (status = 200, description = "Update delivery status", body = ApiResponse<Order>),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateDeliveryStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let id = parse_id("Order", &id)?;
    let resp = admin_service::update_delivery_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/all-reports",
    params(Pagination),
    responses(
        (status = 200, description = "Counterfeit reports with reporter names", body = ApiResponse<ReportList<ReportWithReporter>>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_reports(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(pagination): AppQuery<Pagination>,
) -> AppResult<Json<ApiResponse<ReportList<ReportWithReporter>>>> {
    let resp = admin_service::list_all_reports(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/all-companies",
    params(Pagination),
    responses(
        (status = 200, description = "Company accounts", body = ApiResponse<CompanyList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_companies(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(pagination): AppQuery<Pagination>,
) -> AppResult<Json<ApiResponse<CompanyList>>> {
    let resp = admin_service::list_companies(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/update-company-account-status",
    params(UpdateAccountStatusQuery),
    responses(
        (status = 200, description = "Approve, reject or reset a company", body = ApiResponse<User>),
        (status = 400, description = "Unknown status or malformed id"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Company not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_company_account_status(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<UpdateAccountStatusQuery>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = admin_service::update_company_account_status(&state, &user, query).await?;
    Ok(Json(resp))
}
