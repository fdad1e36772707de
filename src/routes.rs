//! Generic axum handlers over [`CrudService`].
//!
//! ```rust,ignore
//! let state = CrudState::new(db, CrudService::default());
//! let app = Router::new()
//!     .nest("/articles", crud_router::<article::Entity>())
//!     .with_state(state);
//! ```

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use sea_orm::{DatabaseConnection, EntityTrait, IntoActiveModel, PrimaryKeyTrait};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::fmt::Debug;

use crate::core::{CrudResource, CrudService};
use crate::errors::ApiError;
use crate::models::IndexParams;
use crate::pagination::{Page, content_range};

type Id<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// Shared state for the generated routes.
#[derive(Debug, Clone)]
pub struct CrudState {
    pub db: DatabaseConnection,
    pub crud: CrudService,
}

impl CrudState {
    #[must_use]
    pub const fn new(db: DatabaseConnection, crud: CrudService) -> Self {
        Self { db, crud }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteRequest<K> {
    pub ids: Vec<K>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub deleted: u64,
}

/// Mount index/store/show/update/delete/bulk-delete for `E`.
pub fn crud_router<E>() -> Router<CrudState>
where
    E: CrudResource,
    E::Model: Serialize + IntoActiveModel<E::ActiveModelType> + Send + Sync,
    Id<E>: DeserializeOwned + Clone + Debug + Send + Sync,
{
    Router::new()
        .route("/", get(index::<E>).post(store::<E>))
        .route("/bulk-delete", post(bulk_delete::<E>))
        .route(
            "/{id}",
            get(show::<E>).put(update::<E>).delete(destroy::<E>),
        )
}

async fn find_or_404<E>(state: &CrudState, id: Id<E>) -> Result<E::Model, ApiError>
where
    E: CrudResource,
    Id<E>: Debug,
{
    let label = format!("{id:?}");
    E::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found(E::RESOURCE_NAME_SINGULAR, Some(label)))
}

/// List records, honouring `filter`, `search`, `search_fields`, `sort`,
/// `direction`, `per_page` and the configured page parameter. Without a
/// `sort` the configured default ordering applies.
pub async fn index<E>(
    State(state): State<CrudState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<(HeaderMap, Json<Page<E::Model>>), ApiError>
where
    E: CrudResource,
    E::Model: Serialize + Send + Sync,
{
    let config = state.crud.config();
    let mut params = IndexParams::from_query(&query, config)?;
    if params.sort.is_none() {
        params.sort = Some(config.crud.default_sort.clone());
        params
            .direction
            .get_or_insert_with(|| config.default_direction().to_string());
    }

    let page = state.crud.index(&state.db, E::find(), &params).await?;
    let headers = content_range(&page.meta(), E::RESOURCE_NAME_PLURAL);
    Ok((headers, Json(page)))
}

pub async fn store<E>(
    State(state): State<CrudState>,
    Json(payload): Json<E::CreateModel>,
) -> Result<(StatusCode, Json<E::Model>), ApiError>
where
    E: CrudResource,
    E::Model: Serialize + IntoActiveModel<E::ActiveModelType>,
{
    let model = state.crud.store::<E>(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(model)))
}

pub async fn show<E>(
    State(state): State<CrudState>,
    Path(id): Path<Id<E>>,
) -> Result<Json<E::Model>, ApiError>
where
    E: CrudResource,
    E::Model: Serialize,
    Id<E>: Debug,
{
    let model = find_or_404::<E>(&state, id).await?;
    Ok(Json(state.crud.show::<E>(model)))
}

pub async fn update<E>(
    State(state): State<CrudState>,
    Path(id): Path<Id<E>>,
    Json(payload): Json<E::UpdateModel>,
) -> Result<Json<E::Model>, ApiError>
where
    E: CrudResource,
    E::Model: Serialize + IntoActiveModel<E::ActiveModelType>,
    Id<E>: Debug,
{
    let model = find_or_404::<E>(&state, id).await?;
    let updated = state.crud.update::<E>(&state.db, model, payload).await?;
    Ok(Json(updated))
}

pub async fn destroy<E>(
    State(state): State<CrudState>,
    Path(id): Path<Id<E>>,
) -> Result<StatusCode, ApiError>
where
    E: CrudResource,
    E::Model: IntoActiveModel<E::ActiveModelType>,
    Id<E>: Debug,
{
    let label = format!("{id:?}");
    let model = find_or_404::<E>(&state, id).await?;
    if state.crud.delete::<E>(&state.db, model).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(E::RESOURCE_NAME_SINGULAR, Some(label)))
    }
}

/// Delete every listed record that exists. Unknown ids are skipped, not
/// reported as errors.
pub async fn bulk_delete<E>(
    State(state): State<CrudState>,
    Json(request): Json<BulkDeleteRequest<Id<E>>>,
) -> Result<Json<BulkDeleteResponse>, ApiError>
where
    E: CrudResource,
    E::Model: IntoActiveModel<E::ActiveModelType>,
    Id<E>: Debug,
{
    let mut models = Vec::with_capacity(request.ids.len());
    for id in request.ids {
        match E::find_by_id(id).one(&state.db).await? {
            Some(model) => models.push(model),
            None => tracing::debug!(resource = E::RESOURCE_NAME_SINGULAR, "Bulk delete id not found"),
        }
    }

    let deleted = state.crud.bulk_delete::<E>(&state.db, models).await;
    Ok(Json(BulkDeleteResponse { deleted }))
}
