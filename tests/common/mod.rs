#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use storefront_api::{
    db::{connect, run_migrations},
    routes::create_app,
    state::AppState,
};
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// Full application over a private in-memory SQLite database.
pub async fn spawn_app() -> anyhow::Result<TestApp> {
    // A single connection keeps every query on the same in-memory database.
    let orm = connect("sqlite::memory:", 1).await?;
    run_migrations(&orm).await?;
    let state = AppState::new(orm);
    Ok(TestApp {
        router: create_app(state.clone()),
        state,
    })
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, json))
    }

    pub async fn get(&self, uri: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        self.request(Method::POST, uri, Some(body)).await
    }

    /// Creates a product through the API and returns its id.
    pub async fn create_product(&self, name: &str, price: f64) -> anyhow::Result<String> {
        let (status, body) = self
            .post(
                "/products",
                serde_json::json!({
                    "name": name,
                    "description": format!("{name} description"),
                    "price": price,
                    "category": { "name": "General" },
                    "images": [format!("{name}.png")]
                }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create product failed: {body}");
        body["data"]["id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("product id missing: {body}"))
    }
}
