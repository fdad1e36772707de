use sea_orm::{
    Condition, EntityTrait, QueryFilter, Select,
    sea_query::{Expr, Func, SimpleExpr},
};

use super::conditions::column_expr;

const LIKE_ESCAPE: char = '!';

/// Escape LIKE wildcards so the term matches literally.
/// Escapes: % (match any) and _ (match single char)
fn escape_like_wildcards(input: &str) -> String {
    input
        .replace(LIKE_ESCAPE, "!!") // Escape the escape character first
        .replace('%', "!%")
        .replace('_', "!_")
}

/// Build the grouped search predicate: `UPPER(field) LIKE UPPER('%term%')`
/// OR-ed across `fields`.
///
/// Both sides are upper-cased by the store so the comparison folds case the
/// same way on each side, whatever the store's `UPPER` does with non-ASCII
/// letters.
///
/// Returns `None` when the term or the field list is empty.
#[must_use]
pub fn build_search_condition<F: AsRef<str>>(term: &str, fields: &[F]) -> Option<Condition> {
    if term.is_empty() || fields.is_empty() {
        return None;
    }

    let pattern = format!("%{}%", escape_like_wildcards(term));
    let like = format!("$1 LIKE UPPER($2) ESCAPE '{LIKE_ESCAPE}'");

    Some(fields.iter().fold(Condition::any(), |any, field| {
        let column: SimpleExpr = Func::upper(column_expr(field.as_ref())).into();
        let value: SimpleExpr = Expr::val(pattern.clone()).into();
        any.add(Expr::cust_with_exprs(like.as_str(), [column, value]))
    }))
}

/// AND a case-insensitive substring search across `fields` onto the query.
///
/// No-op when the term or the field list is empty.
#[must_use]
pub fn apply_search<E, F>(query: Select<E>, term: &str, fields: &[F]) -> Select<E>
where
    E: EntityTrait,
    F: AsRef<str>,
{
    match build_search_condition(term, fields) {
        Some(condition) => query.filter(condition),
        None => query,
    }
}
