use axum::http::header::{HeaderMap, HeaderValue};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QuerySelect, Select};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One page of records plus counts describing the full result set.
///
/// Serializes flat, with the records under `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
    /// 1-based index of the first record on this page, `None` when empty
    pub from: Option<u64>,
    /// 1-based index of the last record on this page, `None` when empty
    pub to: Option<u64>,
}

/// Page counters without the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
    pub from: Option<u64>,
    pub to: Option<u64>,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(data: Vec<T>, current_page: u64, per_page: u64, total: u64) -> Self {
        let last_page = total.div_ceil(per_page.max(1)).max(1);
        let (from, to) = if data.is_empty() {
            (None, None)
        } else {
            let first = current_page
                .saturating_sub(1)
                .saturating_mul(per_page)
                .saturating_add(1);
            let len = u64::try_from(data.len()).unwrap_or(u64::MAX);
            (Some(first), Some(first.saturating_add(len - 1)))
        };

        Self {
            data,
            current_page,
            per_page,
            total,
            last_page,
            from,
            to,
        }
    }

    #[must_use]
    pub const fn meta(&self) -> PageMeta {
        PageMeta {
            current_page: self.current_page,
            per_page: self.per_page,
            total: self.total,
            last_page: self.last_page,
            from: self.from,
            to: self.to,
        }
    }

    #[must_use]
    pub const fn has_more_pages(&self) -> bool {
        self.current_page < self.last_page
    }

    /// Convert the records while keeping the counters.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            current_page: self.current_page,
            per_page: self.per_page,
            total: self.total,
            last_page: self.last_page,
            from: self.from,
            to: self.to,
        }
    }
}

/// Sanitize resource name by removing control characters for HTTP headers
fn sanitize_resource_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect()
}

/// Build a `Content-Range` header (`articles 0-9/42`) describing a page.
///
/// An empty page reports `*/total`.
#[must_use]
pub fn content_range(meta: &PageMeta, resource_name: &str) -> HeaderMap {
    let safe_name = sanitize_resource_name(resource_name);
    let range = match (meta.from, meta.to) {
        (Some(from), Some(to)) => format!("{safe_name} {}-{}/{}", from - 1, to - 1, meta.total),
        _ => format!("{safe_name} */{}", meta.total),
    };

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&range) {
        headers.insert("Content-Range", value);
    }
    headers
}

/// Largest offset or limit the SQL drivers bind without overflowing.
const MAX_BOUND: u64 = i64::MAX.unsigned_abs();

/// Stateless service executing a query one page at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationService;

#[allow(clippy::unused_self)]
impl PaginationService {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Count the full result set and fetch the records of one page.
    ///
    /// `page` is 1-based; `None` and `0` resolve to the first page. A page
    /// past the end yields no records with the counters still filled in,
    /// including pages whose offset does not fit a signed 64-bit bound.
    ///
    /// # Errors
    ///
    /// Propagates store errors. `per_page == 0` is rejected as
    /// `DbErr::Custom`.
    pub async fn paginate<C, E>(
        &self,
        db: &C,
        query: Select<E>,
        per_page: u64,
        page: Option<u64>,
    ) -> Result<Page<E::Model>, DbErr>
    where
        C: ConnectionTrait,
        E: EntityTrait,
        E::Model: Send + Sync,
    {
        if per_page == 0 {
            return Err(DbErr::Custom("per_page must be greater than zero".to_string()));
        }
        let current_page = page.filter(|page| *page >= 1).unwrap_or(1);

        let total = query.clone().count(db).await?;
        let offset = (current_page - 1)
            .checked_mul(per_page)
            .filter(|offset| *offset <= MAX_BOUND);
        let data = match offset {
            Some(offset) => {
                query
                    .offset(offset)
                    .limit(per_page.min(MAX_BOUND))
                    .all(db)
                    .await?
            }
            None => Vec::new(),
        };

        tracing::debug!(current_page, per_page, total, fetched = data.len(), "Fetched page");

        Ok(Page::new(data, current_page, per_page, total))
    }

    /// Project the page counters.
    #[must_use]
    pub const fn get_metadata<T>(&self, page: &Page<T>) -> PageMeta {
        page.meta()
    }
}
