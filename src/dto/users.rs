use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    models::User,
    validation::{ObjectSchema, RequestSchema, Rule},
};

fn user_body_schema() -> ObjectSchema {
    ObjectSchema::strict()
        .required("name", Rule::String)
        .required("email", Rule::String)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

impl RequestSchema for CreateUserRequest {
    fn schema(_: &Value) -> ObjectSchema {
        user_body_schema()
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl RequestSchema for UpdateUserRequest {
    fn schema(_: &Value) -> ObjectSchema {
        user_body_schema().partial()
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct UserList {
    #[schema(value_type = Vec<User>)]
    pub items: Vec<User>,
}
