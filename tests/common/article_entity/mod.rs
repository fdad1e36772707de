use aiods_core::{CrudResource, MergeIntoActiveModel, RelationScope};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::IntoActiveModel;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comment_entity::Entity")]
    Comments,
}

impl Related<super::comment_entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        if insert {
            if self.id.is_not_set() {
                self.id = Set(Uuid::new_v4());
            }
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ArticleCreate {
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub body: Option<String>,
}

impl IntoActiveModel<ActiveModel> for ArticleCreate {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            name: Set(self.name),
            status: Set(self.status),
            body: Set(self.body),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ArticleUpdate {
    pub name: Option<String>,
    pub status: Option<String>,
    pub body: Option<String>,
}

impl MergeIntoActiveModel<ActiveModel> for ArticleUpdate {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        if let Some(name) = self.name {
            existing.name = Set(name);
        }
        if let Some(status) = self.status {
            existing.status = Set(status);
        }
        if let Some(body) = self.body {
            existing.body = Set(Some(body));
        }
        Ok(existing)
    }
}

impl CrudResource for Entity {
    type ActiveModelType = ActiveModel;
    type CreateModel = ArticleCreate;
    type UpdateModel = ArticleUpdate;

    const RESOURCE_NAME_SINGULAR: &'static str = "article";
    const RESOURCE_NAME_PLURAL: &'static str = "articles";

    fn relation_scopes() -> Vec<RelationScope> {
        vec![RelationScope::has_many("comments", "comments", "article_id", "id")]
    }
}
