//! Minimal entities for rendering queries in unit tests.

pub mod article {
    use crate::core::{CrudResource, MergeIntoActiveModel, RelationScope};
    use sea_orm::ActiveValue::Set;
    use sea_orm::IntoActiveModel;
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "article")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub status: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    #[derive(Debug, Deserialize)]
    pub struct ArticleInput {
        pub name: String,
        pub status: String,
    }

    impl IntoActiveModel<ActiveModel> for ArticleInput {
        fn into_active_model(self) -> ActiveModel {
            ActiveModel {
                name: Set(self.name),
                status: Set(self.status),
                ..Default::default()
            }
        }
    }

    impl MergeIntoActiveModel<ActiveModel> for ArticleInput {
        fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
            existing.name = Set(self.name);
            existing.status = Set(self.status);
            Ok(existing)
        }
    }

    impl CrudResource for Entity {
        type ActiveModelType = ActiveModel;
        type CreateModel = ArticleInput;
        type UpdateModel = ArticleInput;

        const RESOURCE_NAME_SINGULAR: &'static str = "article";
        const RESOURCE_NAME_PLURAL: &'static str = "articles";

        fn relation_scopes() -> Vec<RelationScope> {
            vec![RelationScope::has_many("comments", "comment", "article_id", "id")]
        }
    }
}

pub mod comment {
    use crate::core::{CrudResource, MergeIntoActiveModel, RelationScope};
    use sea_orm::ActiveValue::Set;
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "comment")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub article_id: i32,
        pub author: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl MergeIntoActiveModel<ActiveModel> for Model {
        fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
            existing.author = Set(self.author);
            Ok(existing)
        }
    }

    impl CrudResource for Entity {
        type ActiveModelType = ActiveModel;
        type CreateModel = Model;
        type UpdateModel = Model;

        const RESOURCE_NAME_SINGULAR: &'static str = "comment";
        const RESOURCE_NAME_PLURAL: &'static str = "comments";

        fn relation_scopes() -> Vec<RelationScope> {
            vec![RelationScope::belongs_to("article", "article", "id", "article_id")]
        }
    }
}
