use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    entity::{
        categories::{Column as CategoryCol, Entity as Categories, Model as CategoryModel},
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::{
        category_service::{category_from_entity, resolve_by_name},
        paginate,
    },
    state::AppState,
    validation::ValidationErrors,
};

pub async fn list_products(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let finder = Products::find().order_by_asc(Column::CreatedAt);
    let (models, meta) = paginate(&state.orm, finder, &pagination).await?;

    // Join the referenced categories in one query.
    let category_ids: Vec<Uuid> = models.iter().filter_map(|p| p.category_id).collect();
    let mut categories: HashMap<Uuid, CategoryModel> = HashMap::new();
    if !category_ids.is_empty() {
        categories = Categories::find()
            .filter(CategoryCol::Id.is_in(category_ids))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
    }

    let items = models
        .into_iter()
        .map(|product| {
            let category = product
                .category_id
                .and_then(|id| categories.get(&id).cloned());
            product_from_entity(product, category)
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let result = Products::find_by_id(id)
        .find_also_related(Categories)
        .one(&state.orm)
        .await?;
    let (product, category) = match result {
        Some(row) => row,
        None => return Err(AppError::NotFound("Product")),
    };
    Ok(ApiResponse::success(
        "Product",
        product_from_entity(product, category)?,
        None,
    ))
}

/// Stores the product with its category by reference. An embedded category is
/// resolved by name first; a `categoryId` must point at an existing category.
pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let txn = state.orm.begin().await?;

    let category = match (payload.category_id, payload.category) {
        (Some(category_id), _) => Categories::find_by_id(category_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ValidationErrors::single("categoryId", "Category does not exist"))?,
        (None, Some(embedded)) => resolve_by_name(&txn, embedded.name).await?,
        (None, None) => {
            return Err(ValidationErrors::single("category", "Category is required").into());
        }
    };

    let product = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(payload.price),
        category_id: Set(Some(category.id)),
        images: Set(serde_json::json!(payload.images)),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    tracing::info!(product_id = %product.id, category_id = %category.id, "product created");

    Ok(ApiResponse::success(
        "Product created",
        product_from_entity(product, Some(category))?,
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let txn = state.orm.begin().await?;

    let existing = Products::find_by_id(id).one(&txn).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound("Product")),
    };

    let mut active: ActiveModel = existing.clone().into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(images) = payload.images {
        active.images = Set(serde_json::json!(images));
    }
    if let Some(embedded) = payload.category {
        let category = resolve_by_name(&txn, embedded.name).await?;
        active.category_id = Set(Some(category.id));
    }

    let product = if active.is_changed() {
        active.update(&txn).await?
    } else {
        existing
    };
    let category = product.find_related(Categories).one(&txn).await?;

    txn.commit().await?;

    Ok(ApiResponse::success(
        "Updated",
        product_from_entity(product, category)?,
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Product"));
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn product_from_entity(
    model: ProductModel,
    category: Option<CategoryModel>,
) -> AppResult<Product> {
    let images: Vec<String> =
        serde_json::from_value(model.images).map_err(|err| AppError::Internal(err.into()))?;
    Ok(Product {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        category_id: model.category_id,
        category: category.map(category_from_entity),
        images,
        created_at: model.created_at.with_timezone(&Utc),
    })
}
