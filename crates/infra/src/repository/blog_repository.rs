//! # BlogRepository
//!
//! ブログ情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **所有者の一括取得**: 一覧表示では N+1 問題を避けるため JOIN で取得
//! - **部分更新**: 更新はリクエストに含まれたフィールドのみ書き換える
//!   （COALESCE による部分更新。省略されたフィールドは保存値を維持）

use async_trait::async_trait;
use bloglist_domain::{
    blog::{Blog, BlogId},
    user::UserId,
};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// ブログ一覧に添える所有者情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSummary {
    pub id:       UserId,
    pub username: String,
    pub name:     Option<String>,
}

/// 所有者情報付きのブログ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogWithOwner {
    pub blog:  Blog,
    pub owner: OwnerSummary,
}

/// ブログの部分更新パッチ
///
/// `None` のフィールドは更新しない。
#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title:  Option<String>,
    pub author: Option<String>,
    pub url:    Option<String>,
    pub likes:  Option<i64>,
}

/// ブログリポジトリトレイト
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// ブログを登録する
    async fn insert(&self, blog: &Blog) -> Result<(), InfraError>;

    /// ID でブログを検索する
    async fn find_by_id(&self, id: &BlogId) -> Result<Option<Blog>, InfraError>;

    /// 全ブログを取得する
    async fn find_all(&self) -> Result<Vec<Blog>, InfraError>;

    /// 全ブログを所有者情報付きで取得する
    async fn find_all_with_owner(&self) -> Result<Vec<BlogWithOwner>, InfraError>;

    /// ブログを部分更新し、更新後の値を返す
    ///
    /// # 戻り値
    ///
    /// - `Ok(None)`: 対象のブログが存在しない場合
    async fn update_fields(
        &self,
        id: &BlogId,
        patch: &BlogPatch,
    ) -> Result<Option<Blog>, InfraError>;

    /// ブログを削除する
    ///
    /// 存在しない ID に対しては何もしない。
    async fn delete(&self, id: &BlogId) -> Result<(), InfraError>;
}

/// blogs テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct BlogRow {
    id:      Uuid,
    title:   String,
    author:  String,
    url:     String,
    likes:   i64,
    date:    DateTime<Utc>,
    user_id: Uuid,
}

impl BlogRow {
    fn into_blog(self) -> Blog {
        Blog::from_db(
            BlogId::from_uuid(self.id),
            self.title,
            self.author,
            self.url,
            self.likes,
            self.date,
            UserId::from_uuid(self.user_id),
        )
    }
}

/// blogs テーブルの行（所有者情報付き）
#[derive(Debug, sqlx::FromRow)]
struct BlogWithOwnerRow {
    id:         Uuid,
    title:      String,
    author:     String,
    url:        String,
    likes:      i64,
    date:       DateTime<Utc>,
    user_id:    Uuid,
    username:   String,
    owner_name: Option<String>,
}

impl BlogWithOwnerRow {
    fn into_blog_with_owner(self) -> BlogWithOwner {
        let owner = OwnerSummary {
            id:       UserId::from_uuid(self.user_id),
            username: self.username,
            name:     self.owner_name,
        };
        let blog = Blog::from_db(
            BlogId::from_uuid(self.id),
            self.title,
            self.author,
            self.url,
            self.likes,
            self.date,
            UserId::from_uuid(self.user_id),
        );

        BlogWithOwner { blog, owner }
    }
}

/// PostgreSQL 実装の BlogRepository
#[derive(Debug, Clone)]
pub struct PostgresBlogRepository {
    pool: PgPool,
}

impl PostgresBlogRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(blog_id = %blog.id()))]
    async fn insert(&self, blog: &Blog) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO blogs (id, title, author, url, likes, date, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(blog.id().as_uuid())
        .bind(blog.title())
        .bind(blog.author())
        .bind(blog.url())
        .bind(blog.likes())
        .bind(blog.date())
        .bind(blog.user_id().as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &BlogId) -> Result<Option<Blog>, InfraError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT id, title, author, url, likes, date, user_id
            FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BlogRow::into_blog))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Blog>, InfraError> {
        let rows = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT id, title, author, url, likes, date, user_id
            FROM blogs
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BlogRow::into_blog).collect())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all_with_owner(&self) -> Result<Vec<BlogWithOwner>, InfraError> {
        let rows = sqlx::query_as::<_, BlogWithOwnerRow>(
            r#"
            SELECT
                b.id,
                b.title,
                b.author,
                b.url,
                b.likes,
                b.date,
                b.user_id,
                u.username,
                u.name AS owner_name
            FROM blogs b
            INNER JOIN users u ON u.id = b.user_id
            ORDER BY b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(BlogWithOwnerRow::into_blog_with_owner)
            .collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update_fields(
        &self,
        id: &BlogId,
        patch: &BlogPatch,
    ) -> Result<Option<Blog>, InfraError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            UPDATE blogs
            SET
                title  = COALESCE($2, title),
                author = COALESCE($3, author),
                url    = COALESCE($4, url),
                likes  = COALESCE($5, likes)
            WHERE id = $1
            RETURNING id, title, author, url, likes, date, user_id
            "#,
        )
        .bind(id.as_uuid())
        .bind(patch.title.as_deref())
        .bind(patch.author.as_deref())
        .bind(patch.url.as_deref())
        .bind(patch.likes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BlogRow::into_blog))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: &BlogId) -> Result<(), InfraError> {
        sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
