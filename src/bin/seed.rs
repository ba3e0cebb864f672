use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use storefront_api::{
    config::AppConfig,
    db::{connect, run_migrations},
    entity::{
        products::{self, Entity as Products},
        users::{self, Entity as Users},
    },
    services::category_service::resolve_by_name,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = connect(&config.database_url, 1).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let user_id = ensure_user(&orm, "Demo Customer", "customer@example.com").await?;
    seed_products(&orm).await?;

    println!("Seed completed. User ID: {user_id}");
    orm.close().await?;
    Ok(())
}

async fn ensure_user(
    orm: &sea_orm::DatabaseConnection,
    name: &str,
    email: &str,
) -> anyhow::Result<Uuid> {
    let existing = Users::find()
        .filter(users::Column::Email.eq(email))
        .one(orm)
        .await?;
    if let Some(user) = existing {
        return Ok(user.id);
    }

    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;

    println!("Ensured user {email}");
    Ok(user.id)
}

async fn seed_products(orm: &sea_orm::DatabaseConnection) -> anyhow::Result<()> {
    let products = vec![
        ("Axum Hoodie", "Warm hoodie for Rustaceans", 55.0, "Apparel", "hoodie.png"),
        ("Ferris Mug", "Coffee tastes better with Ferris", 12.5, "Kitchen", "mug.png"),
        ("Rust Sticker Pack", "Decorate your laptop", 4.99, "Accessories", "stickers.png"),
        ("E-book: Async Rust", "Learn async Rust patterns", 25.0, "Books", "ebook.png"),
    ];

    for (name, desc, price, category, image) in products {
        let exists = Products::find()
            .filter(products::Column::Name.eq(name))
            .one(orm)
            .await?
            .is_some();
        if exists {
            continue;
        }

        let category = resolve_by_name(orm, category.to_string()).await?;
        products::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(desc.to_string()),
            price: Set(price),
            category_id: Set(Some(category.id)),
            images: Set(serde_json::json!([image])),
            created_at: Set(Utc::now().into()),
        }
        .insert(orm)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
