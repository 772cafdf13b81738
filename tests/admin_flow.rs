mod common;

use chrono::NaiveDate;
use common::{admin, approved_company, consumer, create_product, create_user, setup_state};
use true_origin_api::{
    dto::{
        admin::{UpdateAccountStatusQuery, UpdateDeliveryStatusRequest},
        auth::{SignInRequest, SignUpRequest},
        cart::AddToCartRequest,
        orders::CheckoutRequest,
        products::CreateProductRequest,
        reports::SubmitReportRequest,
    },
    entity::enums::{AccountStatus, DeliveryStatus, Role},
    error::AppError,
    routes::params::{OrderListQuery, Pagination, ProductQuery},
    services::{
        admin_service, auth_service, cart_service, order_service, product_service,
        report_service,
    },
    state::AppState,
};
use uuid::Uuid;

fn product_request(name: &str) -> CreateProductRequest {
    CreateProductRequest {
        name: name.into(),
        distributor: "Coastal Traders".into(),
        price: 12_000,
        manufacturing_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        expiry_date: NaiveDate::from_ymd_opt(2025, 3, 1),
        description: "Cold pressed coconut oil".into(),
    }
}

fn status_query(company_id: Uuid, status: &str) -> UpdateAccountStatusQuery {
    UpdateAccountStatusQuery {
        company_id: company_id.to_string(),
        status: status.into(),
    }
}

async fn company_status(
    state: &AppState,
    admin: &true_origin_api::middleware::auth::AuthUser,
    company_id: Uuid,
) -> anyhow::Result<Option<AccountStatus>> {
    let companies = admin_service::list_companies(state, admin, Pagination::default())
        .await?
        .data
        .unwrap();
    Ok(companies
        .items
        .into_iter()
        .find(|c| c.id == company_id)
        .and_then(|c| c.account_status))
}

#[tokio::test]
async fn company_must_be_approved_before_registering_products() -> anyhow::Result<()> {
    let state = setup_state(None).await?;
    let admin = admin(&state).await?;
    let company = create_user(&state, Role::Company, Some(AccountStatus::Pending)).await?;

    let err = product_service::create_product(&state, &company, product_request("Coconut oil"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let updated = admin_service::update_company_account_status(
        &state,
        &admin,
        status_query(company.user_id, "approved"),
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.account_status, Some(AccountStatus::Approved));

    let product = product_service::create_product(&state, &company, product_request("Coconut oil"))
        .await?
        .data
        .unwrap();
    assert_eq!(product.manufacturer, company.user_id);

    let verified = product_service::get_product(&state, product.id)
        .await?
        .data
        .unwrap();
    assert_eq!(verified.name, "Coconut oil");

    let own = product_service::list_own_products(&state, &company, Pagination::default())
        .await?
        .data
        .unwrap();
    assert_eq!(own.items.len(), 1);
    Ok(())
}

#[tokio::test]
async fn unknown_account_status_leaves_company_unchanged() -> anyhow::Result<()> {
    let state = setup_state(None).await?;
    let admin = admin(&state).await?;
    let company = create_user(&state, Role::Company, Some(AccountStatus::Pending)).await?;

    let err = admin_service::update_company_account_status(
        &state,
        &admin,
        status_query(company.user_id, "suspended"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(
        company_status(&state, &admin, company.user_id).await?,
        Some(AccountStatus::Pending)
    );

    let err = admin_service::update_company_account_status(
        &state,
        &admin,
        UpdateAccountStatusQuery {
            company_id: "not-a-uuid".into(),
            status: "approved".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Consumers are not companies.
    let buyer = consumer(&state).await?;
    let err = admin_service::update_company_account_status(
        &state,
        &admin,
        status_query(buyer.user_id, "approved"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn only_manufacturer_or_admin_may_delete_a_product() -> anyhow::Result<()> {
    let state = setup_state(None).await?;
    let admin = admin(&state).await?;
    let owner = approved_company(&state).await?;
    let rival = approved_company(&state).await?;
    let first = create_product(&state, owner.user_id, "Basmati", 900).await?;
    let second = create_product(&state, owner.user_id, "Turmeric", 300).await?;

    let err = product_service::delete_product(&state, &rival, first)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let buyer = consumer(&state).await?;
    let err = product_service::delete_product(&state, &buyer, first)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    product_service::delete_product(&state, &owner, first).await?;
    product_service::delete_product(&state, &admin, second).await?;

    let err = product_service::get_product(&state, first).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let catalog = product_service::list_products(&state, ProductQuery::default())
        .await?
        .data
        .unwrap();
    assert!(catalog.items.is_empty());
    Ok(())
}

#[tokio::test]
async fn catalog_can_be_filtered_by_manufacturer() -> anyhow::Result<()> {
    let state = setup_state(None).await?;
    let a = approved_company(&state).await?;
    let b = approved_company(&state).await?;
    create_product(&state, a.user_id, "Coffee", 500).await?;
    create_product(&state, a.user_id, "Cocoa", 450).await?;
    create_product(&state, b.user_id, "Vanilla", 800).await?;

    let resp = product_service::list_products(
        &state,
        ProductQuery {
            manufacturer: Some(a.user_id),
            ..ProductQuery::default()
        },
    )
    .await?;
    assert_eq!(resp.meta.unwrap().total, Some(2));
    assert!(
        resp.data
            .unwrap()
            .items
            .iter()
            .all(|p| p.manufacturer == a.user_id)
    );
    Ok(())
}

#[tokio::test]
async fn reports_accept_any_product_id_and_show_reporter() -> anyhow::Result<()> {
    let state = setup_state(None).await?;
    let admin = admin(&state).await?;
    let buyer = consumer(&state).await?;

    let request = || SubmitReportRequest {
        product_id: "QR-FAKE-0042".into(),
        product_name: "Counterfeit saffron".into(),
        product_description: "Threads bleed colour in water".into(),
    };
    report_service::submit_report(&state, &buyer, request()).await?;
    // Duplicates are allowed.
    report_service::submit_report(&state, &buyer, request()).await?;

    let mine = report_service::list_my_reports(&state, &buyer, Pagination::default()).await?;
    assert_eq!(mine.meta.unwrap().total, Some(2));

    let all = admin_service::list_all_reports(&state, &admin, Pagination::default())
        .await?
        .data
        .unwrap();
    assert_eq!(all.items.len(), 2);
    assert!(all.items.iter().all(|r| r.report.product_id == "QR-FAKE-0042"));
    assert!(all.items.iter().all(|r| r.reporter_name.is_some()));

    let err = admin_service::list_all_reports(&state, &buyer, Pagination::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    Ok(())
}

#[tokio::test]
async fn admin_moves_orders_through_delivery_statuses() -> anyhow::Result<()> {
    let state = setup_state(None).await?;
    let admin = admin(&state).await?;
    let company = approved_company(&state).await?;
    let buyer = consumer(&state).await?;
    let product = create_product(&state, company.user_id, "Millet", 200).await?;

    cart_service::add_to_cart(
        &state,
        &buyer,
        AddToCartRequest {
            product_id: product,
            quantity: 1,
        },
    )
    .await?;
    let order = order_service::checkout(
        &state,
        &buyer,
        CheckoutRequest {
            name: "Kiran".into(),
            phone_number: "9123456780".into(),
            pincode: "560001".into(),
            address: "MG Road, Bengaluru".into(),
        },
    )
    .await?
    .data
    .unwrap()
    .order
    .order;
    assert_eq!(order.delivery_status, DeliveryStatus::NotDispatched);

    let updated = admin_service::update_delivery_status(
        &state,
        &admin,
        order.id,
        UpdateDeliveryStatusRequest {
            delivery_status: "in transit".into(),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.delivery_status, DeliveryStatus::Dispatched);

    let err = admin_service::update_delivery_status(
        &state,
        &admin,
        order.id,
        UpdateDeliveryStatusRequest {
            delivery_status: "lost at sea".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = admin_service::update_delivery_status(
        &state,
        &buyer,
        order.id,
        UpdateDeliveryStatusRequest {
            delivery_status: "delivered".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let dispatched = admin_service::list_all_orders(
        &state,
        &admin,
        OrderListQuery {
            delivery_status: Some("dispatched".into()),
            ..OrderListQuery::default()
        },
    )
    .await?;
    assert_eq!(dispatched.meta.unwrap().total, Some(1));

    let detail = admin_service::get_order_admin(&state, &admin, order.id)
        .await?
        .data
        .unwrap();
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].product_id, product);
    Ok(())
}

#[tokio::test]
async fn sign_up_and_sign_in_round_trip() -> anyhow::Result<()> {
    let state = setup_state(None).await?;
    let sign_up = || SignUpRequest {
        name: "Meera".into(),
        email: "Meera@Example.com".into(),
        password: "s3cret-pass".into(),
        role: Some(Role::Company),
    };

    let user = auth_service::sign_up(&state, sign_up()).await?.data.unwrap();
    assert_eq!(user.email, "meera@example.com");
    assert_eq!(user.account_status, Some(AccountStatus::Pending));

    let err = auth_service::sign_up(&state, sign_up()).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let session = auth_service::sign_in(
        &state,
        SignInRequest {
            email: "meera@example.com".into(),
            password: "s3cret-pass".into(),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(session.user.id, user.id);
    assert!(!session.token.is_empty());

    let err = auth_service::sign_in(
        &state,
        SignInRequest {
            email: "meera@example.com".into(),
            password: "wrong-pass".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
    Ok(())
}
