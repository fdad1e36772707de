use sea_orm::{EntityTrait, Select};

use super::{conditions, search, sort};
use super::{Filter, FilterSet};
use crate::core::CrudResource;

/// Stateless service composing filters, search and ordering onto a query.
///
/// Every method takes the query by value and returns it with the extra
/// clauses; nothing is deduplicated.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder;

#[allow(clippy::unused_self)]
impl QueryBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn apply_filters<E: CrudResource>(&self, query: Select<E>, filters: &FilterSet) -> Select<E> {
        conditions::apply_filters(query, filters)
    }

    #[must_use]
    pub fn apply_filter<E: CrudResource>(&self, query: Select<E>, filter: Filter) -> Select<E> {
        conditions::apply_filter(query, filter)
    }

    #[must_use]
    pub fn apply_search<E, F>(&self, query: Select<E>, term: &str, fields: &[F]) -> Select<E>
    where
        E: EntityTrait,
        F: AsRef<str>,
    {
        search::apply_search(query, term, fields)
    }

    #[must_use]
    pub fn apply_sorting<E: EntityTrait>(
        &self,
        query: Select<E>,
        field: &str,
        direction: &str,
    ) -> Select<E> {
        sort::apply_sorting(query, field, direction)
    }

    #[must_use]
    pub fn apply_multiple_sorts<E, I, K, D>(&self, query: Select<E>, sorts: I) -> Select<E>
    where
        E: EntityTrait,
        I: IntoIterator<Item = (K, D)>,
        K: AsRef<str>,
        D: AsRef<str>,
    {
        sort::apply_multiple_sorts(query, sorts)
    }
}
