use sea_orm::{EntityTrait, PaginatorTrait, QuerySelect, Select};

use crate::{db::OrmConn, error::AppResult, response::Meta, routes::params::Pagination};

pub mod category_service;
pub mod order_service;
pub mod product_service;
pub mod user_service;

/// Runs `finder`, paged when the caller asked for it.
pub(crate) async fn paginate<E>(
    conn: &OrmConn,
    finder: Select<E>,
    pagination: &Pagination,
) -> AppResult<(Vec<E::Model>, Meta)>
where
    E: EntityTrait,
    E::Model: Sync,
{
    match pagination.window() {
        Some((page, per_page, offset)) => {
            let total = finder.clone().count(conn).await? as i64;
            let items = finder
                .limit(per_page as u64)
                .offset(offset as u64)
                .all(conn)
                .await?;
            Ok((items, Meta::new(page, per_page, total)))
        }
        None => {
            let items = finder.all(conn).await?;
            let total = items.len() as i64;
            Ok((items, Meta::total(total)))
        }
    }
}
