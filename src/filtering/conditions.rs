use indexmap::IndexMap;
use sea_orm::{
    QueryFilter, Select, Value,
    sea_query::{Alias, Expr, Query, SimpleExpr},
};
use serde_json::Value as JsonValue;

use crate::core::CrudResource;

/// Separator between a relation name and a column in a filter key.
pub const RELATION_SEPARATOR: char = '.';

/// Filter set as received from callers, keyed by field name.
///
/// Insertion order is preserved and is the order predicates are applied in.
pub type FilterSet = IndexMap<String, JsonValue>;

/// A single predicate, classified by the shape of its input.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `field = value`
    Equality { field: String, value: Value },
    /// `field IN (values)`
    Membership { field: String, values: Vec<Value> },
    /// At least one related row satisfies `column = value`
    RelationScoped {
        relation: String,
        column: String,
        value: Value,
    },
}

impl Filter {
    pub fn equality(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equality {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn membership<V: Into<Value>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::Membership {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn relation_scoped(
        relation: impl Into<String>,
        column: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self::RelationScoped {
            relation: relation.into(),
            column: column.into(),
            value: value.into(),
        }
    }

    /// Classify one filter entry.
    ///
    /// Returns `None` for entries that must not produce a predicate: `null`
    /// and the empty string. Lists (and objects, by their values) become
    /// membership predicates; dotted field names become relation-scoped
    /// predicates split on the first separator; anything else is equality.
    #[must_use]
    pub fn classify(field: &str, value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Null => None,
            JsonValue::String(s) if s.is_empty() => None,
            JsonValue::Array(items) => Some(Self::Membership {
                field: field.to_string(),
                values: items.iter().filter_map(scalar_value).collect(),
            }),
            JsonValue::Object(map) => Some(Self::Membership {
                field: field.to_string(),
                values: map.values().filter_map(scalar_value).collect(),
            }),
            scalar => {
                let value = scalar_value(scalar)?;
                Some(match field.split_once(RELATION_SEPARATOR) {
                    Some((relation, column)) => Self::relation_scoped(relation, column, value),
                    None => Self::equality(field, value),
                })
            }
        }
    }
}

/// Convert a scalar JSON value into a bindable query value.
fn scalar_value(value: &JsonValue) -> Option<Value> {
    match value {
        JsonValue::String(s) => Some(s.clone().into()),
        JsonValue::Bool(b) => Some((*b).into()),
        JsonValue::Number(n) => n
            .as_i64()
            .map(Value::from)
            .or_else(|| n.as_u64().map(Value::from))
            .or_else(|| n.as_f64().map(Value::from)),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => {
            tracing::debug!(?value, "Skipping non-scalar filter value");
            None
        }
    }
}

/// Column expression for a field, honouring `table.column` qualification.
pub(crate) fn column_expr(field: &str) -> Expr {
    match field.split_once(RELATION_SEPARATOR) {
        Some((table, column)) => Expr::col((Alias::new(table), Alias::new(column))),
        None => Expr::col(Alias::new(field)),
    }
}

/// Build the `EXISTS` sub-select for a relation-scoped predicate.
///
/// Relations the resource does not declare are forwarded as a qualified
/// column comparison, which the store rejects.
fn relation_condition<E: CrudResource>(relation: &str, column: &str, value: Value) -> SimpleExpr {
    let Some(scope) = E::relation_scope(relation) else {
        tracing::debug!(
            resource = E::RESOURCE_NAME_PLURAL,
            relation,
            "Relation is not declared, forwarding qualified column"
        );
        return Expr::col((Alias::new(relation), Alias::new(column))).eq(value);
    };

    let related = Alias::new(scope.table);
    let parent = Alias::new(E::default().table_name());

    let mut related_rows = Query::select();
    related_rows
        .expr(Expr::val(1))
        .from(related.clone())
        .and_where(
            Expr::col((related.clone(), Alias::new(scope.related_key)))
                .equals((parent, Alias::new(scope.local_key))),
        )
        .and_where(Expr::col((related, Alias::new(column))).eq(value));

    Expr::exists(related_rows)
}

/// Translate a classified filter into a predicate expression.
#[must_use]
pub fn filter_condition<E: CrudResource>(filter: Filter) -> SimpleExpr {
    match filter {
        Filter::Equality { field, value } => column_expr(&field).eq(value),
        Filter::Membership { field, values } => column_expr(&field).is_in(values),
        Filter::RelationScoped {
            relation,
            column,
            value,
        } => relation_condition::<E>(&relation, &column, value),
    }
}

/// AND one classified filter onto the query.
#[must_use]
pub fn apply_filter<E: CrudResource>(query: Select<E>, filter: Filter) -> Select<E> {
    query.filter(filter_condition::<E>(filter))
}

/// AND every non-empty entry of `filters` onto the query, in insertion order.
///
/// Repeated application is not deduplicated.
#[must_use]
pub fn apply_filters<E: CrudResource>(query: Select<E>, filters: &FilterSet) -> Select<E> {
    filters
        .iter()
        .filter_map(|(field, value)| Filter::classify(field, value))
        .fold(query, apply_filter::<E>)
}
