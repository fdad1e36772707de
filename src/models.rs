use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::CrudConfig;
use crate::errors::ApiError;
use crate::filtering::FilterSet;

/// Parameters for listing a resource.
///
/// Every part is optional; [`CrudService::index`](crate::CrudService::index)
/// applies whatever is present in a fixed order.
///
/// # Query string form
///
/// [`IndexParams::from_query`] reads these keys:
///
/// - `filter`: JSON object, e.g. `{"status":["draft","live"],"comments.author":"ann"}`
/// - `search`: term, e.g. `rust`
/// - `search_fields`: comma separated columns, e.g. `name,body`
/// - `sort` / `direction`: column and `asc`/`desc`
/// - `per_page`: page size
/// - the page parameter named by `pagination.page_name` (`page` by default)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexParams {
    pub filters: Option<FilterSet>,
    pub search: Option<String>,
    pub search_fields: Option<Vec<String>>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub per_page: Option<u64>,
    pub page: Option<u64>,
}

impl IndexParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = Some(filters);
        self
    }

    #[must_use]
    pub fn with_search<I, S>(mut self, term: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search = Some(term.into());
        self.search_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, direction: impl Into<String>) -> Self {
        self.sort = Some(field.into());
        self.direction = Some(direction.into());
        self
    }

    #[must_use]
    pub const fn with_per_page(mut self, per_page: u64) -> Self {
        self.per_page = Some(per_page);
        self
    }

    #[must_use]
    pub const fn with_page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Build parameters from a raw query-string map.
    ///
    /// Empty values count as absent. A page value that is not a number is
    /// ignored and the first page is served.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BadRequest` when `filter` is not a JSON object or
    /// `per_page` is not a positive integer.
    pub fn from_query(query: &HashMap<String, String>, config: &CrudConfig) -> Result<Self, ApiError> {
        let get = |key: &str| {
            query
                .get(key)
                .map(String::as_str)
                .filter(|value| !value.is_empty())
        };

        let filters = get("filter")
            .map(|raw| {
                serde_json::from_str::<FilterSet>(raw)
                    .map_err(|_| ApiError::bad_request("filter must be a JSON object"))
            })
            .transpose()?;

        let search_fields = get("search_fields")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|field| !field.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|fields| !fields.is_empty());

        let per_page = get("per_page")
            .map(|raw| match raw.parse::<u64>() {
                Ok(per_page) if per_page > 0 => Ok(per_page),
                _ => Err(ApiError::bad_request("per_page must be a positive integer")),
            })
            .transpose()?;

        let page = get(config.pagination.page_name.as_str()).and_then(|raw| raw.parse::<u64>().ok());

        Ok(Self {
            filters,
            search: get("search").map(String::from),
            search_fields,
            sort: get("sort").map(String::from),
            direction: get("direction").map(String::from),
            per_page,
            page,
        })
    }
}
