//! # Filtering, Search & Sorting
//!
//! Conditional composition of predicates and ordering clauses onto a Sea-ORM
//! [`Select`](sea_orm::Select). This is the query-manipulation half of the
//! crate; pagination and persistence live elsewhere.
//!
//! ## Filters
//!
//! A [`FilterSet`] maps field names to JSON values. Each entry is classified
//! once into a [`Filter`]:
//!
//! ```rust,ignore
//! // {"status": "active"}            -> status = 'active'
//! // {"status": ["draft", "live"]}   -> status IN ('draft', 'live')
//! // {"comments.author": "ann"}      -> EXISTS (SELECT 1 FROM comments
//! //                                      WHERE comments.article_id = articles.id
//! //                                        AND comments.author = 'ann')
//! // {"status": null} / {"name": ""} -> skipped
//! ```
//!
//! ## Search
//!
//! `apply_search(query, "foo", &["name", "body"])` ANDs one group
//! `(UPPER(name) LIKE '%FOO%' OR UPPER(body) LIKE '%FOO%')`.
//!
//! ## Sorting
//!
//! `apply_sorting` appends an ordering clause; directions other than
//! `asc`/`desc` fall back to ascending. Repeated calls compose.

pub mod conditions;
pub mod query_builder;
pub mod search;
pub mod sort;

pub use conditions::{Filter, FilterSet, RELATION_SEPARATOR, apply_filter, apply_filters, filter_condition};
pub use query_builder::QueryBuilder;
pub use search::{apply_search, build_search_condition};
pub use sort::{SortDirection, apply_multiple_sorts, apply_sorting};
