use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::orders::{CartLine, CheckoutRequest, OrderList, OrderWithItems},
    entity::{
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::{Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
    models::{Order, OrderItem},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::paginate,
    state::AppState,
    validation::ValidationErrors,
};

/// A cart line with the product price captured at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64,
}

/// Attaches current prices to the cart. Every line whose product is unknown is
/// reported; a checkout never proceeds with a partial cart.
pub fn price_lines(
    lines: &[CartLine],
    prices: &HashMap<Uuid, f64>,
) -> Result<Vec<PricedLine>, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut priced = Vec::with_capacity(lines.len());

    for (index, line) in lines.iter().enumerate() {
        match prices.get(&line.id) {
            Some(&unit_price) => priced.push(PricedLine {
                product_id: line.id,
                quantity: line.quantity,
                unit_price,
            }),
            None => errors.push(format!("products.{index}.id"), "Product not found"),
        }
    }

    errors.into_result()?;
    Ok(priced)
}

/// Sum of `unit_price * quantity`. Rejects totals that are not finite.
pub fn order_total(lines: &[PricedLine]) -> Result<f64, ValidationErrors> {
    let total: f64 = lines
        .iter()
        .fold(0.0, |total, line| total + line.unit_price * f64::from(line.quantity));

    if !total.is_finite() {
        return Err(ValidationErrors::single(
            "products",
            "Order total is not a finite number",
        ));
    }
    Ok(total)
}

/// Prices the cart, then writes the order and its items in one transaction.
pub async fn checkout(state: &AppState, payload: CheckoutRequest) -> AppResult<Order> {
    let product_ids: Vec<Uuid> = payload.products.iter().map(|line| line.id).collect();

    let mut prices: HashMap<Uuid, f64> = HashMap::new();
    if !product_ids.is_empty() {
        prices = Products::find()
            .filter(ProdCol::Id.is_in(product_ids))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|product| (product.id, product.price))
            .collect();
    }

    let lines = price_lines(&payload.products, &prices)?;
    let total_amount = order_total(&lines)?;

    let txn = state.orm.begin().await?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(payload.user_id),
        total_amount: Set(total_amount),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;

    for line in &lines {
        OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(line.product_id),
            quantity: Set(line.quantity),
            unit_price: Set(line.unit_price),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        user_id = %order.user_id,
        items = lines.len(),
        total_amount = order.total_amount,
        "order created"
    );

    Ok(order_from_entity(order))
}

pub async fn list_orders(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<OrderList>> {
    let finder = Orders::find().order_by_desc(OrderCol::CreatedAt);
    let (models, meta) = paginate(&state.orm, finder, &pagination).await?;
    let items = models.into_iter().map(order_from_entity).collect();
    Ok(ApiResponse::success("Ok", OrderList { items }, Some(meta)))
}

pub async fn get_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = Orders::find_by_id(id).one(&state.orm).await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound("Order")),
    };

    let items = order
        .find_related(OrderItems)
        .order_by_asc(OrderItemCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_item_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "OK",
        OrderWithItems {
            order: order_from_entity(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

/// Removes the order together with its items.
pub async fn delete_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    if Orders::find_by_id(id).one(&txn).await?.is_none() {
        return Err(AppError::NotFound("Order"));
    }

    let items = OrderItems::delete_many()
        .filter(OrderItemCol::OrderId.eq(id))
        .exec(&txn)
        .await?;
    Orders::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    tracing::info!(order_id = %id, items = items.rows_affected, "order deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn list_items(state: &AppState) -> AppResult<Vec<OrderItem>> {
    let items = OrderItems::find()
        .order_by_asc(OrderItemCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_item_from_entity)
        .collect();
    Ok(items)
}

fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        user_id: model.user_id,
        total_amount: model.total_amount,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        quantity: model.quantity,
        unit_price: model.unit_price,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
