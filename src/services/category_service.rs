use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::categories::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest},
    entity::{
        categories::{ActiveModel, Column, Entity as Categories, Model as CategoryModel},
        products::{Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
    models::Category,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::paginate,
    state::AppState,
};

pub async fn list_categories(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<CategoryList>> {
    let finder = Categories::find().order_by_asc(Column::CreatedAt);
    let (models, meta) = paginate(&state.orm, finder, &pagination).await?;
    let items = models.into_iter().map(category_from_entity).collect();
    Ok(ApiResponse::success("Categories", CategoryList { items }, Some(meta)))
}

pub async fn get_category(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Category>> {
    let category = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(category_from_entity);
    let category = match category {
        Some(c) => c,
        None => return Err(AppError::NotFound("Category")),
    };
    Ok(ApiResponse::success("Category", category, None))
}

pub async fn create_category(
    state: &AppState,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    let category = insert_category(&state.orm, payload.name).await?;
    tracing::info!(category_id = %category.id, "category created");

    Ok(ApiResponse::success(
        "Category created",
        category_from_entity(category),
        Some(Meta::empty()),
    ))
}

pub async fn update_category(
    state: &AppState,
    id: Uuid,
    payload: UpdateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    let existing = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Category"))?;

    let mut active: ActiveModel = existing.clone().into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    let category = if active.is_changed() {
        active.update(&state.orm).await?
    } else {
        existing
    };

    Ok(ApiResponse::success(
        "Updated",
        category_from_entity(category),
        Some(Meta::empty()),
    ))
}

/// Products in the deleted category keep existing with no category.
pub async fn delete_category(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    let detached = Products::update_many()
        .col_expr(ProdCol::CategoryId, Expr::value(Option::<Uuid>::None))
        .filter(ProdCol::CategoryId.eq(id))
        .exec(&txn)
        .await?;
    let result = Categories::delete_by_id(id).exec(&txn).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Category"));
    }

    txn.commit().await?;
    tracing::info!(category_id = %id, products = detached.rows_affected, "category deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Turns an embedded `{ name }` category into a stored one, reusing a category of the same name.
pub async fn resolve_by_name<C>(conn: &C, name: String) -> AppResult<CategoryModel>
where
    C: ConnectionTrait,
{
    let existing = Categories::find()
        .filter(Column::Name.eq(name.as_str()))
        .order_by_asc(Column::CreatedAt)
        .one(conn)
        .await?;
    if let Some(category) = existing {
        tracing::debug!(category_id = %category.id, "embedded category matched existing");
        return Ok(category);
    }

    let category = insert_category(conn, name).await?;
    tracing::info!(category_id = %category.id, "category created from product body");
    Ok(category)
}

async fn insert_category<C>(conn: &C, name: String) -> AppResult<CategoryModel>
where
    C: ConnectionTrait,
{
    let category = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        created_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await?;
    Ok(category)
}

pub(crate) fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        name: model.name,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
