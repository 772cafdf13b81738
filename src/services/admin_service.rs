use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::{
        admin::{CompanyList, UpdateAccountStatusQuery, UpdateDeliveryStatusRequest},
        orders::{OrderList, OrderWithItems},
        reports::{ReportList, ReportWithReporter},
    },
    entity::{
        enums::{AccountStatus, DeliveryStatus, Role},
        orders::{ActiveModel as OrderActive, Entity as Orders},
        reports::{Column as ReportCol, Entity as Reports},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Order, Report, User},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, Pagination},
    services::order_service,
    state::AppState,
    validation::parse_id,
};

pub async fn list_all_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    order_service::list_orders_where(state, Condition::all(), query).await
}

pub async fn get_order_admin(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_admin(user)?;
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order not found with ID {id}")))?;
    order_service::with_items(state, order).await
}

/// Any delivery status may follow any other; only membership in the enum is checked.
pub async fn update_delivery_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateDeliveryStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    let status = DeliveryStatus::parse(payload.delivery_status.trim())
        .ok_or_else(|| AppError::validation("Invalid delivery status"))?;

    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    let mut active: OrderActive = existing.into();
    active.delivery_status = Set(status);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "order_status_update",
        "orders",
        serde_json::json!({ "order_id": order.id, "delivery_status": status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order Status Updated!",
        order.into(),
        Some(Meta::empty()),
    ))
}

pub async fn list_all_reports(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<ReportList<ReportWithReporter>>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();

    let total = Reports::find().count(&state.orm).await? as i64;
    let items = Reports::find()
        .find_also_related(Users)
        .order_by_desc(ReportCol::CreatedAt)
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(report, reporter)| ReportWithReporter {
            report: Report::from(report),
            reporter_name: reporter.map(|u| u.name),
        })
        .collect();

    Ok(ApiResponse::success(
        "Reports",
        ReportList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn list_companies(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<CompanyList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = Users::find()
        .filter(UserCol::Role.eq(Role::Company))
        .order_by_desc(UserCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from)
        .collect();

    Ok(ApiResponse::success(
        "Companies",
        CompanyList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn update_company_account_status(
    state: &AppState,
    user: &AuthUser,
    query: UpdateAccountStatusQuery,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    let company_id = parse_id("Company", &query.company_id)?;
    let status = AccountStatus::parse(query.status.trim()).ok_or_else(|| {
        AppError::validation("status must be one of pending, approved, rejected")
    })?;

    let company = Users::find_by_id(company_id)
        .one(&state.orm)
        .await?
        .filter(|u| u.role == Role::Company)
        .ok_or_else(|| AppError::not_found("Company not found"))?;

    let mut active: UserActive = company.into();
    active.account_status = Set(Some(status));
    let company = active.update(&state.orm).await?;

    tracing::info!(company_id = %company.id, status = ?status, "company account status changed");
    audit::record(
        &state.orm,
        Some(user.user_id),
        "company_status_update",
        "users",
        serde_json::json!({ "company_id": company.id, "status": status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Account status updated",
        company.into(),
        Some(Meta::empty()),
    ))
}
