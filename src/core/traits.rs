use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, DbErr, EntityTrait, IntoActiveModel,
    Iterable,
};
use serde::de::DeserializeOwned;

/// Describes how a named relation of a resource maps onto a related table.
///
/// Relation-scoped filters (`"comments.author"`) are resolved through this
/// definition into an `EXISTS` sub-select that correlates
/// `table.related_key` with `parent.local_key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationScope {
    /// Name used in filter keys (e.g. "comments")
    pub relation: &'static str,
    /// Related table (e.g. "comments")
    pub table: &'static str,
    /// Column on the related table taking part in the join
    pub related_key: &'static str,
    /// Column on the parent table taking part in the join
    pub local_key: &'static str,
}

impl RelationScope {
    /// Parent has many rows in `table`, each pointing back through `foreign_key`.
    #[must_use]
    pub const fn has_many(
        relation: &'static str,
        table: &'static str,
        foreign_key: &'static str,
        local_key: &'static str,
    ) -> Self {
        Self {
            relation,
            table,
            related_key: foreign_key,
            local_key,
        }
    }

    /// Parent holds `foreign_key` pointing at `owner_key` in `table`.
    #[must_use]
    pub const fn belongs_to(
        relation: &'static str,
        table: &'static str,
        owner_key: &'static str,
        foreign_key: &'static str,
    ) -> Self {
        Self {
            relation,
            table,
            related_key: owner_key,
            local_key: foreign_key,
        }
    }
}

pub trait MergeIntoActiveModel<ActiveModelType> {
    /// Merge this update payload into an existing active model
    ///
    /// # Errors
    ///
    /// Returns a `DbErr` if the merge fails due to data conversion issues.
    fn merge_into_activemodel(self, existing: ActiveModelType) -> Result<ActiveModelType, DbErr>;
}

/// An active model merges by copying every column it has `Set`.
impl<A> MergeIntoActiveModel<A> for A
where
    A: ActiveModelTrait,
{
    fn merge_into_activemodel(self, mut existing: A) -> Result<A, DbErr> {
        for column in <A::Entity as EntityTrait>::Column::iter() {
            if let ActiveValue::Set(value) = self.get(column) {
                existing.set(column, value);
            }
        }
        Ok(existing)
    }
}

/// Binds a Sea-ORM entity to the CRUD services and the generated router.
///
/// ```rust,ignore
/// impl CrudResource for article::Entity {
///     type ActiveModelType = article::ActiveModel;
///     type CreateModel = ArticleCreate;
///     type UpdateModel = ArticleUpdate;
///
///     const RESOURCE_NAME_SINGULAR: &'static str = "article";
///     const RESOURCE_NAME_PLURAL: &'static str = "articles";
///
///     fn relation_scopes() -> Vec<RelationScope> {
///         vec![RelationScope::has_many("comments", "comments", "article_id", "id")]
///     }
/// }
/// ```
pub trait CrudResource: EntityTrait {
    type ActiveModelType: ActiveModelTrait<Entity = Self> + ActiveModelBehavior + Send + Sync;
    type CreateModel: DeserializeOwned + IntoActiveModel<Self::ActiveModelType> + Send;
    type UpdateModel: DeserializeOwned + MergeIntoActiveModel<Self::ActiveModelType> + Send;

    const RESOURCE_NAME_SINGULAR: &'static str;
    const RESOURCE_NAME_PLURAL: &'static str;

    /// Relations that filter keys may scope into. Default: none.
    #[must_use]
    fn relation_scopes() -> Vec<RelationScope> {
        Vec::new()
    }

    #[must_use]
    fn relation_scope(relation: &str) -> Option<RelationScope> {
        Self::relation_scopes()
            .into_iter()
            .find(|scope| scope.relation == relation)
    }
}
