use axum::{Json, extract::State, http::StatusCode};

use crate::{
    dto::orders::{CheckoutRequest, CheckoutResponse},
    error::AppResult,
    middleware::validate::ValidatedJson,
    models::OrderItem,
    services::order_service,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Order created from the cart", body = CheckoutResponse),
        (status = 400, description = "Validation failed or a product does not exist"),
    ),
    tag = "Orders"
)]
pub async fn checkout(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<CheckoutResponse>)> {
    let order = order_service::checkout(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            message: "order is created".to_string(),
            order,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/items",
    responses(
        (status = 200, description = "Every order item", body = Vec<OrderItem>)
    ),
    tag = "Orders"
)]
pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<Vec<OrderItem>>> {
    let items = order_service::list_items(&state).await?;
    Ok(Json(items))
}
