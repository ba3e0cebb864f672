use axum::http::{Method, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

mod common;

fn lamp() -> Value {
    json!({
        "name": "Desk Lamp",
        "description": "Warm light",
        "price": 19.5,
        "category": { "name": "Lighting" },
        "images": ["lamp-front.png", "lamp-side.png"]
    })
}

#[tokio::test]
async fn create_product_stores_fields_and_joins_category() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;

    let (status, body) = app.post("/products", lamp()).await?;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let product = &body["data"];
    assert_eq!(product["name"], "Desk Lamp");
    assert_eq!(product["description"], "Warm light");
    assert_eq!(product["price"].as_f64(), Some(19.5));
    assert_eq!(product["images"], json!(["lamp-front.png", "lamp-side.png"]));
    assert_eq!(product["category"]["name"], "Lighting");
    assert_eq!(product["categoryId"], product["category"]["id"]);

    let id = product["id"].as_str().unwrap_or_default();
    let (status, fetched) = app.get(&format!("/products/{id}")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["category"]["name"], "Lighting");

    // The embedded category became a stored one.
    let (_, categories) = app.get("/categories").await?;
    assert_eq!(categories["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(categories["meta"]["total"], 1);
    Ok(())
}

#[tokio::test]
async fn embedded_category_is_reused_by_name() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;

    let (_, first) = app.post("/products", lamp()).await?;
    let mut second = lamp();
    second["name"] = json!("Floor Lamp");
    let (_, second) = app.post("/products", second).await?;

    assert_eq!(first["data"]["categoryId"], second["data"]["categoryId"]);
    Ok(())
}

#[tokio::test]
async fn create_product_by_category_reference() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;

    let (status, category) = app.post("/categories", json!({ "name": "Books" })).await?;
    assert_eq!(status, StatusCode::CREATED);
    let category_id = category["data"]["id"].clone();

    let (status, body) = app
        .post(
            "/products",
            json!({
                "name": "Rust Book",
                "description": "Paperback",
                "price": 39.0,
                "categoryId": category_id,
                "images": []
            }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["categoryId"], category_id);
    assert_eq!(body["data"]["category"]["name"], "Books");
    Ok(())
}

#[tokio::test]
async fn category_reference_must_exist_and_exclude_embedding() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;

    let (status, body) = app
        .post(
            "/products",
            json!({
                "name": "Orphan",
                "description": "No category",
                "price": 1.0,
                "categoryId": Uuid::new_v4(),
                "images": []
            }),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["errors"][0]["field"], "categoryId");

    let (status, body) = app
        .post(
            "/products",
            json!({
                "name": "Both",
                "description": "Two shapes",
                "price": 1.0,
                "categoryId": Uuid::new_v4(),
                "category": { "name": "Dup" },
                "images": []
            }),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"]["errors"],
        json!([{ "field": "category", "message": "Must not be present" }])
    );

    let (_, products) = app.get("/products").await?;
    assert_eq!(products["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn invalid_product_payloads_create_nothing() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;

    let mut missing = lamp();
    if let Some(body) = missing.as_object_mut() {
        body.remove("description");
    }
    let (status, body) = app.post("/products", missing).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"]["errors"],
        json!([{ "field": "description", "message": "Description is required" }])
    );

    let mut unknown = lamp();
    unknown["stock"] = json!(4);
    let (status, body) = app.post("/products", unknown).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["data"]["errors"],
        json!([{ "field": "stock", "message": "Unrecognized key" }])
    );

    let mut negative = lamp();
    negative["price"] = json!(-1);
    let (status, _) = app.post("/products", negative).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .request(Method::POST, "/products", Some(json!("not an object")))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["errors"][0]["field"], "body");

    let (_, products) = app.get("/products").await?;
    assert_eq!(products["data"], json!([]));
    let (_, categories) = app.get("/categories").await?;
    assert_eq!(categories["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn update_product_patches_given_fields() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;
    let (_, created) = app.post("/products", lamp()).await?;
    let id = created["data"]["id"].as_str().unwrap_or_default().to_string();

    let (status, body) = app
        .request(
            Method::PATCH,
            &format!("/products/{id}"),
            Some(json!({ "price": 25.0, "category": { "name": "Home" } })),
        )
        .await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["price"].as_f64(), Some(25.0));
    assert_eq!(body["data"]["name"], "Desk Lamp");
    assert_eq!(body["data"]["category"]["name"], "Home");

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/products/{id}"),
            Some(json!({ "name": "Reading Lamp", "colour": "red" })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["errors"][0]["field"], "colour");

    let (status, body) = app
        .request(Method::PUT, &format!("/products/{id}"), Some(json!({})))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Desk Lamp");
    Ok(())
}

#[tokio::test]
async fn deleting_a_category_detaches_its_products() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;
    let (_, created) = app.post("/products", lamp()).await?;
    let product_id = created["data"]["id"].as_str().unwrap_or_default().to_string();
    let category_id = created["data"]["categoryId"]
        .as_str()
        .unwrap_or_default()
        .to_string();

    let (status, _) = app
        .request(Method::DELETE, &format!("/categories/{category_id}"), None)
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get(&format!("/products/{product_id}")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["categoryId"], Value::Null);
    assert_eq!(body["data"]["category"], Value::Null);
    Ok(())
}

#[tokio::test]
async fn user_crud_round() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;

    let (status, created) = app
        .post("/users", json!({ "name": "Ada", "email": "ada@example.com" }))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_str().unwrap_or_default().to_string();

    let (status, updated) = app
        .request(
            Method::PUT,
            &format!("/users/{id}"),
            Some(json!({ "email": "ada@lovelace.dev" })),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["name"], "Ada");
    assert_eq!(updated["data"]["email"], "ada@lovelace.dev");

    let (status, _) = app
        .request(Method::DELETE, &format!("/users/{id}"), None)
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(Method::DELETE, &format!("/users/{id}"), None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn missing_documents_are_not_found_for_every_resource() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;
    let missing = Uuid::new_v4();

    for (resource, name) in [
        ("products", "Product"),
        ("categories", "Category"),
        ("orders", "Order"),
        ("users", "User"),
    ] {
        let (status, body) = app.get(&format!("/{resource}/{missing}")).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "{resource}");
        assert_eq!(body["message"], format!("{name} not found"));

        let (status, _) = app
            .request(Method::DELETE, &format!("/{resource}/{missing}"), None)
            .await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "{resource}");
    }

    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/categories/{missing}"),
            Some(json!({ "name": "x" })),
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_ids_and_bodies_are_bad_requests() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;

    let (status, body) = app.get("/products/p1").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Bad Request Invalid id p1");

    let (status, _) = app.post("/categories", json!({ "title": "Books" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn lists_can_be_paged() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;
    for name in ["Alpha", "Beta", "Gamma"] {
        let (status, _) = app.post("/categories", json!({ "name": name })).await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.get("/categories?page=2&per_page=2").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["meta"]["page"], 2);
    assert_eq!(body["meta"]["per_page"], 2);
    assert_eq!(body["meta"]["total"], 3);
    Ok(())
}

#[tokio::test]
async fn page_far_past_the_end_is_empty() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;
    app.create_product("Stapler", 4.0).await?;

    let (status, body) = app
        .get(&format!("/products?page={}&per_page=100", i64::MAX))
        .await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["meta"]["total"], 1);
    Ok(())
}
