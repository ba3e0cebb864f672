use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    models::Category,
    validation::{ObjectSchema, RequestSchema, Rule},
};

/// Shape of a category, both standalone and embedded in a product body.
pub fn category_body_schema() -> ObjectSchema {
    ObjectSchema::strict().required("name", Rule::String)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
}

impl RequestSchema for CreateCategoryRequest {
    fn schema(_: &Value) -> ObjectSchema {
        category_body_schema()
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
}

impl RequestSchema for UpdateCategoryRequest {
    fn schema(_: &Value) -> ObjectSchema {
        category_body_schema().partial()
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryList {
    #[schema(value_type = Vec<Category>)]
    pub items: Vec<Category>,
}
