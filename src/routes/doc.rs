use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        categories::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest},
        orders::{CartLine, CheckoutRequest, CheckoutResponse, OrderList, OrderWithItems},
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        users::{CreateUserRequest, UpdateUserRequest, UserList},
    },
    error::ErrorData,
    models::{Category, Order, OrderItem, Product, User},
    response::{ApiResponse, Meta},
    routes::{categories, checkout, health, orders, params, products, users},
    validation::FieldError,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        orders::list_orders,
        orders::get_order,
        orders::delete_order,
        checkout::checkout,
        checkout::list_items
    ),
    components(
        schemas(
            Category,
            Product,
            User,
            Order,
            OrderItem,
            CartLine,
            CheckoutRequest,
            CheckoutResponse,
            CreateProductRequest,
            UpdateProductRequest,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CreateUserRequest,
            UpdateUserRequest,
            ProductList,
            CategoryList,
            UserList,
            OrderList,
            OrderWithItems,
            FieldError,
            ErrorData,
            params::Pagination,
            Meta,
            ApiResponse<Product>,
            ApiResponse<Category>,
            ApiResponse<User>,
            ApiResponse<ProductList>,
            ApiResponse<CategoryList>,
            ApiResponse<UserList>,
            ApiResponse<OrderList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<ErrorData>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Users", description = "User endpoints"),
        (name = "Orders", description = "Checkout, order and order item endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
