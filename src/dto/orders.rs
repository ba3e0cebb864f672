use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::{Order, OrderItem},
    validation::{ObjectSchema, RequestSchema, Rule},
};

/// One `{ id, quantity }` cart line.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CartLine {
    pub id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub user_id: Uuid,
    pub products: Vec<CartLine>,
}

impl RequestSchema for CheckoutRequest {
    fn schema(_: &Value) -> ObjectSchema {
        let line = ObjectSchema::strict()
            .required("id", Rule::Identifier)
            .required("quantity", Rule::positive_integer());
        ObjectSchema::strict()
            .required("userId", Rule::Identifier)
            .required("products", Rule::array_of(Rule::object(line)))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub message: String,
    pub order: Order,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}
