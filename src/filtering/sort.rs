use sea_orm::{
    EntityTrait, Order, QueryOrder, Select,
    sea_query::SimpleExpr,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::conditions::column_expr;

/// Ordering direction. Anything that is not `asc` or `desc` parses as `Asc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Normalize a caller-supplied direction (case-insensitive).
    #[must_use]
    pub fn parse(direction: &str) -> Self {
        if direction.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Self::Asc,
            SortDirection::Desc => Self::Desc,
        }
    }
}

/// Append an `ORDER BY field direction` clause.
///
/// Earlier ordering clauses are kept; sorting twice on the same field
/// appends a second clause.
#[must_use]
pub fn apply_sorting<E: EntityTrait>(query: Select<E>, field: &str, direction: &str) -> Select<E> {
    let direction = SortDirection::parse(direction);
    query.order_by(SimpleExpr::from(column_expr(field)), Order::from(direction))
}

/// Apply each `(field, direction)` pair in iteration order.
#[must_use]
pub fn apply_multiple_sorts<E, I, K, D>(query: Select<E>, sorts: I) -> Select<E>
where
    E: EntityTrait,
    I: IntoIterator<Item = (K, D)>,
    K: AsRef<str>,
    D: AsRef<str>,
{
    sorts.into_iter().fold(query, |query, (field, direction)| {
        apply_sorting(query, field.as_ref(), direction.as_ref())
    })
}
