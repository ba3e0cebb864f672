use sea_orm_migration::MigratorTrait;
use storefront_api::{config::AppConfig, db::connect, migration::Migrator};

/// `migrate` applies pending migrations; `migrate down` rolls back the latest one.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let orm = connect(&config.database_url, 1).await?;

    match std::env::args().nth(1).as_deref() {
        None | Some("up") => {
            Migrator::up(&orm, None).await?;
            println!("Migrations applied");
        }
        Some("down") => {
            Migrator::down(&orm, Some(1)).await?;
            println!("Rolled back latest migration");
        }
        Some(other) => anyhow::bail!("unknown command {other}, expected `up` or `down`"),
    }

    orm.close().await?;
    Ok(())
}
