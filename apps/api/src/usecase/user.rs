//! # ユーザーユースケース
//!
//! ユーザー登録と一覧取得のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **重複の扱い**: username の UNIQUE 制約違反はバリデーションエラー
//!   （400）として返す
//! - **ハッシュの秘匿**: パスワードハッシュは `User` エンティティに
//!   含まれないため、レスポンスに混入する経路がない

use std::sync::Arc;

use async_trait::async_trait;
use bloglist_domain::{
    blog::Blog,
    clock::Clock,
    password::PlainPassword,
    user::{User, UserId, Username},
};
use bloglist_infra::{
    PasswordHasher,
    repository::{BlogRepository, UserRepository},
};

use crate::error::ApiError;

/// ユーザー作成の入力
#[derive(Debug, Default)]
pub struct CreateUserInput {
    pub username: Option<String>,
    pub name:     Option<String>,
    pub password: Option<String>,
}

/// 所有ブログ付きのユーザー
#[derive(Debug)]
pub struct UserWithBlogs {
    pub user:  User,
    pub blogs: Vec<Blog>,
}

/// ユーザーユースケーストレイト
#[async_trait]
pub trait UserUseCase: Send + Sync {
    /// 全ユーザーを所有ブログ付きで取得する
    async fn list(&self) -> Result<Vec<UserWithBlogs>, ApiError>;

    /// ユーザーを登録する
    ///
    /// username（3 文字以上・一意）と password（3 文字以上）を検証し、
    /// パスワードは Argon2id でハッシュ化して保存する。
    async fn create(&self, input: CreateUserInput) -> Result<User, ApiError>;
}

/// ユーザーユースケースの実装
pub struct UserUseCaseImpl {
    user_repository: Arc<dyn UserRepository>,
    blog_repository: Arc<dyn BlogRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    clock:           Arc<dyn Clock>,
}

impl UserUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        blog_repository: Arc<dyn BlogRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repository,
            blog_repository,
            password_hasher,
            clock,
        }
    }
}

#[async_trait]
impl UserUseCase for UserUseCaseImpl {
    async fn list(&self) -> Result<Vec<UserWithBlogs>, ApiError> {
        let users = self.user_repository.find_all().await?;
        let blogs = self.blog_repository.find_all().await?;

        let result = users
            .into_iter()
            .map(|user| {
                let owned = blogs
                    .iter()
                    .filter(|blog| blog.user_id() == user.id())
                    .cloned()
                    .collect();
                UserWithBlogs { user, blogs: owned }
            })
            .collect();

        Ok(result)
    }

    async fn create(&self, input: CreateUserInput) -> Result<User, ApiError> {
        let username = input
            .username
            .ok_or_else(|| ApiError::Validation("ユーザー名は必須です".to_string()))?;
        let username =
            Username::new(username).map_err(|e| ApiError::Validation(e.to_string()))?;

        let password = input
            .password
            .ok_or_else(|| ApiError::Validation("パスワードは必須です".to_string()))?;
        let password = PlainPassword::for_registration(password)
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        let password_hash = self.password_hasher.hash(&password)?;

        let user = User::new(UserId::new(), username, input.name, self.clock.now());

        self.user_repository
            .insert(&user, &password_hash)
            .await
            .map_err(|e| {
                if e.as_conflict().is_some() {
                    ApiError::Validation("ユーザー名は既に使用されています".to_string())
                } else {
                    ApiError::Infra(e)
                }
            })?;

        Ok(user)
    }
}
