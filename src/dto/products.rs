use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::categories::{CreateCategoryRequest, category_body_schema},
    models::Product,
    validation::{ObjectSchema, RequestSchema, Rule},
};

/// Product with its category embedded as `{ name }`.
pub fn product_body_schema() -> ObjectSchema {
    ObjectSchema::strict()
        .required("name", Rule::String)
        .required("description", Rule::String)
        .required("price", Rule::non_negative_number())
        .required("category", Rule::object(category_body_schema()))
        .required("images", Rule::array_of(Rule::String))
}

/// Product referencing an existing category through `categoryId`.
pub fn product_by_reference_schema() -> ObjectSchema {
    product_body_schema().merge(
        ObjectSchema::strict()
            .required("categoryId", Rule::Identifier)
            .forbidden("category"),
    )
}

/// Accepts either product shape; `categoryId` selects the by-reference one.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Option<CreateCategoryRequest>,
    pub category_id: Option<Uuid>,
    pub images: Vec<String>,
}

impl RequestSchema for CreateProductRequest {
    fn schema(payload: &Value) -> ObjectSchema {
        if payload.get("categoryId").is_some() {
            product_by_reference_schema()
        } else {
            product_body_schema()
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<CreateCategoryRequest>,
    pub images: Option<Vec<String>>,
}

impl RequestSchema for UpdateProductRequest {
    fn schema(_: &Value) -> ObjectSchema {
        product_body_schema().partial()
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
