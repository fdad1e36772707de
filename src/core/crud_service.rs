use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, IntoActiveModel, Iterable,
    ModelTrait, PrimaryKeyToColumn, QueryFilter, Select,
};
use tracing::{debug, warn};

use super::traits::{CrudResource, MergeIntoActiveModel};
use crate::config::CrudConfig;
use crate::filtering::QueryBuilder;
use crate::models::IndexParams;
use crate::pagination::{Page, PaginationService};

/// Orchestrates listing and persistence for any [`CrudResource`].
///
/// Holds the two query services and the configuration; clones are cheap and
/// share nothing mutable, so one value can sit in axum state.
#[derive(Debug, Clone, Default)]
pub struct CrudService {
    query_builder: QueryBuilder,
    pagination: PaginationService,
    config: CrudConfig,
}

impl CrudService {
    #[must_use]
    pub fn new(query_builder: QueryBuilder, pagination: PaginationService, config: CrudConfig) -> Self {
        Self {
            query_builder,
            pagination,
            config,
        }
    }

    #[must_use]
    pub fn with_config(config: CrudConfig) -> Self {
        Self::new(QueryBuilder::new(), PaginationService::new(), config)
    }

    #[must_use]
    pub const fn config(&self) -> &CrudConfig {
        &self.config
    }

    #[must_use]
    pub const fn query_builder(&self) -> &QueryBuilder {
        &self.query_builder
    }

    #[must_use]
    pub const fn pagination(&self) -> &PaginationService {
        &self.pagination
    }

    /// List one page of `query`.
    ///
    /// Stages run in a fixed order: filters, then search (only when both a
    /// term and fields are given), then sort (direction defaults to `asc`),
    /// then pagination with `per_page` falling back to the configured size.
    ///
    /// ```rust,ignore
    /// let params = IndexParams::new()
    ///     .with_filters(filters)
    ///     .with_search("rust", ["name", "body"])
    ///     .with_sort("created_at", "desc")
    ///     .with_per_page(10)
    ///     .with_page(2);
    /// let page = crud.index(&db, article::Entity::find(), &params).await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Propagates store errors from counting or fetching.
    pub async fn index<E>(
        &self,
        db: &impl ConnectionTrait,
        query: Select<E>,
        params: &IndexParams,
    ) -> Result<Page<E::Model>, DbErr>
    where
        E: CrudResource,
        E::Model: Send + Sync,
    {
        let mut query = query;

        if let Some(filters) = &params.filters {
            debug!(resource = E::RESOURCE_NAME_PLURAL, count = filters.len(), "Applying filters");
            query = self.query_builder.apply_filters(query, filters);
        }

        if let (Some(term), Some(fields)) = (&params.search, &params.search_fields) {
            debug!(resource = E::RESOURCE_NAME_PLURAL, term = %term, ?fields, "Applying search");
            query = self.query_builder.apply_search(query, term, fields);
        }

        if let Some(sort) = &params.sort {
            let direction = params.direction.as_deref().unwrap_or("asc");
            debug!(resource = E::RESOURCE_NAME_PLURAL, sort = %sort, direction, "Applying sort");
            query = self.query_builder.apply_sorting(query, sort, direction);
        }

        let per_page = params.per_page.unwrap_or(self.config.pagination.per_page);
        self.pagination
            .paginate(db, query, per_page, params.page)
            .await
    }

    /// Return the record unchanged.
    #[must_use]
    pub fn show<E: CrudResource>(&self, model: E::Model) -> E::Model {
        model
    }

    /// Insert a new record and return it as stored.
    ///
    /// # Errors
    ///
    /// Propagates store errors (constraint violations included).
    pub async fn store<E>(
        &self,
        db: &impl ConnectionTrait,
        data: impl IntoActiveModel<E::ActiveModelType>,
    ) -> Result<E::Model, DbErr>
    where
        E: CrudResource,
        E::Model: IntoActiveModel<E::ActiveModelType>,
    {
        let model = data.into_active_model().insert(db).await?;
        debug!(resource = E::RESOURCE_NAME_SINGULAR, "Stored record");
        Ok(model)
    }

    /// Merge `data` onto `model`, persist, and return the record reloaded
    /// from the store so server-assigned values are visible.
    ///
    /// # Errors
    ///
    /// Propagates merge and store errors. If the record disappears before the
    /// reload, returns `DbErr::RecordNotFound`.
    pub async fn update<E>(
        &self,
        db: &impl ConnectionTrait,
        model: E::Model,
        data: impl MergeIntoActiveModel<E::ActiveModelType>,
    ) -> Result<E::Model, DbErr>
    where
        E: CrudResource,
        E::Model: IntoActiveModel<E::ActiveModelType>,
    {
        let existing: E::ActiveModelType = model.into_active_model();
        let updated = data.merge_into_activemodel(existing)?.update(db).await?;
        debug!(resource = E::RESOURCE_NAME_SINGULAR, "Updated record");
        self.fresh::<E>(db, &updated).await
    }

    /// Reload a record by its primary key.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if no row matches.
    pub async fn fresh<E: CrudResource>(
        &self,
        db: &impl ConnectionTrait,
        model: &E::Model,
    ) -> Result<E::Model, DbErr> {
        let query = E::PrimaryKey::iter().fold(E::find(), |query, key| {
            let column = key.into_column();
            query.filter(column.eq(model.get(column)))
        });

        query.one(db).await?.ok_or_else(|| {
            DbErr::RecordNotFound(format!("{} not found", E::RESOURCE_NAME_SINGULAR))
        })
    }

    /// Delete a record. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub async fn delete<E>(&self, db: &impl ConnectionTrait, model: E::Model) -> Result<bool, DbErr>
    where
        E: CrudResource,
        E::Model: IntoActiveModel<E::ActiveModelType>,
    {
        let active: E::ActiveModelType = model.into_active_model();
        let result = active.delete(db).await?;
        debug!(
            resource = E::RESOURCE_NAME_SINGULAR,
            rows_affected = result.rows_affected,
            "Deleted record"
        );
        Ok(result.rows_affected > 0)
    }

    /// Delete records one after another and count the successes.
    ///
    /// A failure (store error or nothing removed) is logged and skipped; it
    /// neither stops the loop nor rolls back earlier deletes.
    pub async fn bulk_delete<E>(
        &self,
        db: &impl ConnectionTrait,
        models: impl IntoIterator<Item = E::Model>,
    ) -> u64
    where
        E: CrudResource,
        E::Model: IntoActiveModel<E::ActiveModelType>,
    {
        let mut deleted = 0;
        for model in models {
            match self.delete::<E>(db, model).await {
                Ok(true) => deleted += 1,
                Ok(false) => {
                    warn!(resource = E::RESOURCE_NAME_SINGULAR, "Bulk delete skipped a missing record");
                }
                Err(err) => {
                    warn!(resource = E::RESOURCE_NAME_SINGULAR, error = %err, "Bulk delete failed for a record");
                }
            }
        }
        debug!(resource = E::RESOURCE_NAME_PLURAL, deleted, "Bulk delete finished");
        deleted
    }
}
