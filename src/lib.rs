//! # aiods-core
//!
//! Generic listing and persistence for Sea-ORM entities.
//!
//! - [`QueryBuilder`] narrows and orders a `Select` from a filter map, a
//!   search term and sort instructions.
//! - [`PaginationService`] runs a query one page at a time and reports the
//!   counters (`total`, `last_page`, `from`, `to`).
//! - [`CrudService`] chains both for `index` and wraps single-record
//!   `store`/`update`/`delete` plus a best-effort `bulk_delete`.
//!
//! An entity opts in by implementing [`CrudResource`]; [`crud_router`] then
//! exposes it over HTTP.
//!
//! ```rust,ignore
//! let crud = CrudService::with_config(CrudConfig::load("config/aiods-core.toml")?);
//! let params = IndexParams::new()
//!     .with_filters(filters)
//!     .with_sort("name", "asc")
//!     .with_per_page(10);
//! let page = crud.index(&db, article::Entity::find(), &params).await?;
//! ```

pub mod config;
pub mod core;
pub mod errors;
pub mod filtering;
pub mod models;
pub mod pagination;
pub mod routes;

#[cfg(test)]
mod test_fixtures;

pub use config::{ConfigError, CrudConfig};
pub use self::core::{CrudResource, CrudService, MergeIntoActiveModel, RelationScope};
pub use errors::ApiError;
pub use filtering::{Filter, FilterSet, QueryBuilder, SortDirection};
pub use models::IndexParams;
pub use pagination::{Page, PageMeta, PaginationService};
pub use routes::{CrudState, crud_router};
