use sea_orm::{EntityTrait, Schema};
use sea_orm_migration::prelude::*;

use crate::entity::{categories, order_items, orders, products, users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Referenced tables first so foreign keys resolve.
        create_table(manager, categories::Entity).await?;
        create_table(manager, products::Entity).await?;
        create_table(manager, users::Entity).await?;
        create_table(manager, orders::Entity).await?;
        create_table(manager, order_items::Entity).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(order_items::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(orders::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(users::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(products::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(categories::Entity).to_owned())
            .await?;
        Ok(())
    }
}

async fn create_table<E>(manager: &SchemaManager<'_>, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let schema = Schema::new(manager.get_database_backend());
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    manager.create_table(statement).await
}
