use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::reports::{ReportList, SubmitReportRequest},
    entity::reports::{ActiveModel as ReportActive, Column as ReportCol, Entity as Reports},
    error::AppResult,
    middleware::auth::{AuthUser, ensure_consumer},
    models::Report,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

/// Files a counterfeit report. The product id is stored as given: reports are
/// meant for items that may not resolve to a catalog entry, and duplicates are allowed.
pub async fn submit_report(
    state: &AppState,
    user: &AuthUser,
    payload: SubmitReportRequest,
) -> AppResult<ApiResponse<Report>> {
    ensure_consumer(user)?;
    payload.validate()?;

    let report = ReportActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        product_id: Set(payload.product_id.trim().to_string()),
        product_name: Set(payload.product_name.trim().to_string()),
        product_description: Set(payload.product_description),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(report_id = %report.id, product_id = %report.product_id, "product reported");
    audit::record(
        &state.orm,
        Some(user.user_id),
        "report_submit",
        "reports",
        serde_json::json!({ "report_id": report.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Report submitted",
        report.into(),
        Some(Meta::empty()),
    ))
}

pub async fn list_my_reports(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<ReportList<Report>>> {
    ensure_consumer(user)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = Reports::find()
        .filter(ReportCol::UserId.eq(user.user_id))
        .order_by_desc(ReportCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Report::from)
        .collect();

    Ok(ApiResponse::success(
        "Reports",
        ReportList { items },
        Some(Meta::new(page, limit, total)),
    ))
}
