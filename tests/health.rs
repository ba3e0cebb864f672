use axum::http::StatusCode;
use storefront_api::routes::doc::ApiDoc;
use utoipa::OpenApi;

mod common;

#[tokio::test]
async fn health_check_returns_ok() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;

    let (status, body) = app.get("/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Health check");
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn unknown_route_falls_back_to_not_found() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;

    let (status, body) = app.get("/nope/nothing").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not Found");
    assert_eq!(body["data"]["path"], "/nope/nothing");
    Ok(())
}

#[test]
fn openapi_documents_checkout_routes() {
    let doc = ApiDoc::openapi();
    assert!(doc.paths.paths.contains_key("/checkout"));
    assert!(doc.paths.paths.contains_key("/items"));
    assert!(doc.paths.paths.contains_key("/products/{id}"));
}
