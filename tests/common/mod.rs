#![allow(dead_code)]

use aiods_core::{CrudService, CrudState, crud_router};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::prelude::*;
use tower::ServiceExt;

pub mod article_entity;

use article_entity::ArticleCreate;
use comment_entity::CommentCreate;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    init_tracing();
    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    Ok(db)
}

pub fn setup_test_app(db: DatabaseConnection, crud: CrudService) -> Router {
    let api = Router::new()
        .nest("/articles", crud_router::<article_entity::Entity>())
        .nest("/comments", crud_router::<comment_entity::Entity>())
        .with_state(CrudState::new(db, crud));

    Router::new().nest("/api/v1", api)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn new_article(name: &str, status: &str) -> ArticleCreate {
    ArticleCreate {
        name: name.to_string(),
        status: status.to_string(),
        body: None,
    }
}

pub async fn create_article(
    db: &DatabaseConnection,
    name: &str,
    status: &str,
) -> article_entity::Model {
    CrudService::default()
        .store::<article_entity::Entity>(db, new_article(name, status))
        .await
        .unwrap()
}

pub async fn create_comment(
    db: &DatabaseConnection,
    article: &article_entity::Model,
    author: &str,
) -> comment_entity::Model {
    let comment = CommentCreate {
        article_id: article.id,
        author: author.to_string(),
        body: format!("{author} on {}", article.name),
    };
    CrudService::default()
        .store::<comment_entity::Entity>(db, comment)
        .await
        .unwrap()
}

/// Three drafts, two live, one archived; "Rust" appears in two names.
pub async fn seed_articles(db: &DatabaseConnection) -> Vec<article_entity::Model> {
    let mut articles = Vec::new();
    for (name, status) in [
        ("Learning Rust", "draft"),
        ("Async in practice", "live"),
        ("Rust at scale", "live"),
        ("Gardening notes", "draft"),
        ("Old news", "archived"),
        ("Cooking 100% butter", "draft"),
    ] {
        articles.push(create_article(db, name, status).await);
    }
    articles
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateArticleTable), Box::new(CreateCommentTable)]
    }
}

pub struct CreateArticleTable;

impl MigrationName for CreateArticleTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_article_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateArticleTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(Articles::Table)
            .if_not_exists()
            .col(ColumnDef::new(Articles::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Articles::Name).string().not_null())
            .col(ColumnDef::new(Articles::Status).string().not_null())
            .col(ColumnDef::new(Articles::Body).text().null())
            .col(
                ColumnDef::new(Articles::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Articles::UpdatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .to_owned();

        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Articles::Table).to_owned())
            .await
    }
}

pub struct CreateCommentTable;

impl MigrationName for CreateCommentTable {
    fn name(&self) -> &'static str {
        "m20240101_000002_create_comment_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateCommentTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(Comments::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Comments::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Comments::ArticleId).uuid().not_null())
            .col(ColumnDef::new(Comments::Author).string().not_null())
            .col(ColumnDef::new(Comments::Body).text().not_null())
            .to_owned();

        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Articles {
    Table,
    Id,
    Name,
    Status,
    Body,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    ArticleId,
    Author,
    Body,
}
