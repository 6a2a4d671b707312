//! # テスト用モックリポジトリ
//!
//! ユースケース/ハンドラテストで使用するインメモリリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! bloglist-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! PostgreSQL 実装と同じ可視的挙動（username の一意制約、部分更新の
//! COALESCE 相当、所有者 JOIN）を再現する。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bloglist_domain::{
    blog::{Blog, BlogId},
    password::PasswordHash,
    user::{User, UserId},
};

use crate::{
    error::InfraError,
    repository::{BlogPatch, BlogRepository, BlogWithOwner, OwnerSummary, UserRepository},
};

/// ユーザーと認証情報のインメモリストア
///
/// [`MockUserRepository`] と [`MockBlogRepository`] の間で共有し、
/// 所有者 JOIN を再現する。
pub type UserRecords = Arc<Mutex<Vec<(User, PasswordHash)>>>;

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
    records: UserRecords,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// ブログリポジトリと共有するためのストア参照を取得する
    pub fn records(&self) -> UserRecords {
        Arc::clone(&self.records)
    }

    /// テストデータを直接投入する
    pub fn add_user(&self, user: User, password_hash: PasswordHash) {
        self.records.lock().unwrap().push((user, password_hash));
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn insert(&self, user: &User, password_hash: &PasswordHash) -> Result<(), InfraError> {
        let mut records = self.records.lock().unwrap();

        if records
            .iter()
            .any(|(existing, _)| existing.username() == user.username())
        {
            return Err(InfraError::conflict("User", user.username().as_str()));
        }

        records.push((user.clone(), password_hash.clone()));
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|(user, _)| user.id() == id)
            .map(|(user, _)| user.clone()))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<(User, PasswordHash)>, InfraError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|(user, _)| user.username().as_str() == username)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, InfraError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .map(|(user, _)| user.clone())
            .collect())
    }
}

// ===== MockBlogRepository =====

#[derive(Clone)]
pub struct MockBlogRepository {
    blogs: Arc<Mutex<Vec<Blog>>>,
    users: UserRecords,
}

impl MockBlogRepository {
    /// ユーザーストアを共有してリポジトリを作成する
    ///
    /// 所有者 JOIN（`find_all_with_owner`）で参照するため、
    /// [`MockUserRepository::records`] から取得したストアを渡す。
    pub fn new(users: UserRecords) -> Self {
        Self {
            blogs: Arc::new(Mutex::new(Vec::new())),
            users,
        }
    }

    /// テストデータを直接投入する
    pub fn add_blog(&self, blog: Blog) {
        self.blogs.lock().unwrap().push(blog);
    }
}

#[async_trait]
impl BlogRepository for MockBlogRepository {
    async fn insert(&self, blog: &Blog) -> Result<(), InfraError> {
        self.blogs.lock().unwrap().push(blog.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BlogId) -> Result<Option<Blog>, InfraError> {
        Ok(self
            .blogs
            .lock()
            .unwrap()
            .iter()
            .find(|blog| blog.id() == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Blog>, InfraError> {
        Ok(self.blogs.lock().unwrap().clone())
    }

    async fn find_all_with_owner(&self) -> Result<Vec<BlogWithOwner>, InfraError> {
        let users = self.users.lock().unwrap();
        self.blogs
            .lock()
            .unwrap()
            .iter()
            .map(|blog| {
                let owner = users
                    .iter()
                    .find(|(user, _)| user.id() == blog.user_id())
                    .map(|(user, _)| OwnerSummary {
                        id:       *user.id(),
                        username: user.username().as_str().to_string(),
                        name:     user.name().map(str::to_string),
                    })
                    .ok_or_else(|| {
                        InfraError::unexpected(format!(
                            "所有ユーザーが存在しません: {}",
                            blog.user_id()
                        ))
                    })?;

                Ok(BlogWithOwner {
                    blog: blog.clone(),
                    owner,
                })
            })
            .collect()
    }

    async fn update_fields(
        &self,
        id: &BlogId,
        patch: &BlogPatch,
    ) -> Result<Option<Blog>, InfraError> {
        let mut blogs = self.blogs.lock().unwrap();

        let Some(pos) = blogs.iter().position(|blog| blog.id() == id) else {
            return Ok(None);
        };

        let current = &blogs[pos];
        let updated = Blog::from_db(
            *current.id(),
            patch.title.clone().unwrap_or_else(|| current.title().to_string()),
            patch
                .author
                .clone()
                .unwrap_or_else(|| current.author().to_string()),
            patch.url.clone().unwrap_or_else(|| current.url().to_string()),
            patch.likes.unwrap_or(current.likes()),
            current.date(),
            *current.user_id(),
        );
        blogs[pos] = updated.clone();

        Ok(Some(updated))
    }

    async fn delete(&self, id: &BlogId) -> Result<(), InfraError> {
        self.blogs.lock().unwrap().retain(|blog| blog.id() != id);
        Ok(())
    }
}
