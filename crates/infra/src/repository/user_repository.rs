//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **認証情報の分離**: パスワードハッシュは `find_credentials` でのみ
//!   取り出せる。一覧取得系のメソッドはハッシュを返さない
//! - **一意制約**: username の重複は UNIQUE 制約違反として検出し、
//!   [`InfraError`] の Conflict として返す

use async_trait::async_trait;
use bloglist_domain::{
    password::PasswordHash,
    user::{User, UserId, Username},
};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを認証情報とともに登録する
    ///
    /// # 戻り値
    ///
    /// - `Err(Conflict)`: username が既に使用されている場合
    async fn insert(&self, user: &User, password_hash: &PasswordHash) -> Result<(), InfraError>;

    /// ID でユーザーを検索する
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError>;

    /// ユーザー名でユーザーと認証情報を検索する
    ///
    /// ログイン時のパスワード検証で使用する。
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<(User, PasswordHash)>, InfraError>;

    /// 全ユーザーを取得する
    async fn find_all(&self) -> Result<Vec<User>, InfraError>;
}

/// users テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id:         Uuid,
    username:   String,
    name:       Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, InfraError> {
        Ok(User::from_db(
            UserId::from_uuid(self.id),
            Username::new(self.username).map_err(|e| InfraError::unexpected(e.to_string()))?,
            self.name,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// users テーブルの行（認証情報付き）
#[derive(Debug, sqlx::FromRow)]
struct CredentialsRow {
    id:            Uuid,
    username:      String,
    name:          Option<String>,
    password_hash: String,
    created_at:    DateTime<Utc>,
    updated_at:    DateTime<Utc>,
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(username = %user.username()))]
    async fn insert(&self, user: &User, password_hash: &PasswordHash) -> Result<(), InfraError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, username, name, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.username().as_str())
        .bind(user.name())
        .bind(password_hash.as_str())
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                if e.as_database_error()
                    .is_some_and(|db_err| db_err.is_unique_violation())
                {
                    return Err(InfraError::conflict("User", user.username().as_str()));
                }
                Err(e.into())
            }
        }
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%username))]
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<(User, PasswordHash)>, InfraError> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT id, username, name, password_hash, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let hash = PasswordHash::new(row.password_hash);
        let user = User::from_db(
            UserId::from_uuid(row.id),
            Username::new(row.username).map_err(|e| InfraError::unexpected(e.to_string()))?,
            row.name,
            row.created_at,
            row.updated_at,
        );

        Ok(Some((user, hash)))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<User>, InfraError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, name, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }
}
