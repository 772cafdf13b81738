use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        admin::{CompanyList, UpdateAccountStatusQuery, UpdateDeliveryStatusRequest},
        auth::{SignInRequest, SignInResponse, SignUpRequest},
        cart::{AddToCartRequest, UpdateCartItemRequest},
        orders::{CheckoutRequest, CheckoutResponse, OrderList, OrderWithItems},
        products::{CreateProductRequest, ProductList},
        reports::{ReportWithReporter, SubmitReportRequest},
    },
    entity::{
        carts::LineItem,
        enums::{AccountStatus, DeliveryStatus, PaymentStatus, Role},
    },
    models::{Cart, Order, OrderItem, Product, Report, User},
    response::{ApiResponse, ErrorBody, Meta},
    routes::{admin, auth, company, health, params, user},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::sign_up,
        auth::sign_in,
        auth::sign_out,
        user::list_products,
        user::get_product,
        user::add_to_cart,
        user::get_cart,
        user::update_cart_item,
        user::remove_from_cart,
        user::checkout,
        user::my_orders,
        user::my_order,
        user::report_product,
        user::my_reports,
        company::add_product,
        company::all_products,
        company::get_product,
        company::delete_product,
        admin::list_all_orders,
        admin::get_order_admin,
        admin::update_order_status,
        admin::list_all_reports,
        admin::list_companies,
        admin::update_company_account_status
    ),
    components(
        schemas(
            User,
            Product,
            Cart,
            LineItem,
            Order,
            OrderItem,
            Report,
            Role,
            AccountStatus,
            DeliveryStatus,
            PaymentStatus,
            SignUpRequest,
            SignInRequest,
            SignInResponse,
            AddToCartRequest,
            UpdateCartItemRequest,
            CheckoutRequest,
            CheckoutResponse,
            CreateProductRequest,
            SubmitReportRequest,
            ReportWithReporter,
            UpdateDeliveryStatusRequest,
            UpdateAccountStatusQuery,
            CompanyList,
            OrderList,
            OrderWithItems,
            ProductList,
            params::Pagination,
            params::ProductQuery,
            params::OrderListQuery,
            Meta,
            ErrorBody,
            ApiResponse<Product>,
            ApiResponse<Cart>,
            ApiResponse<ProductList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Sign-up, sign-in and sign-out"),
        (name = "User", description = "Consumer catalog, cart, checkout and reports"),
        (name = "Company", description = "Product registration for approved companies"),
        (name = "Admin", description = "Order, report and company oversight"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
