//! # ブログユースケース
//!
//! ブログの CRUD と一覧集計のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **所有権チェック**: 削除は所有者のみ実行できる。所有者以外の
//!   リクエストは何もせず成功として扱う（警告ログのみ）
//! - **部分更新**: 更新はリクエストに含まれたフィールドだけを書き換える

use std::sync::Arc;

use async_trait::async_trait;
use bloglist_domain::{
    blog::{Blog, BlogId},
    clock::Clock,
    stats::{self, MostBlogs},
    user::UserId,
};
use bloglist_infra::repository::{BlogPatch, BlogRepository, BlogWithOwner, UserRepository};

use crate::error::ApiError;

/// ブログ作成の入力
///
/// 必須フィールドの欠落はこの層で検出する。
#[derive(Debug, Default)]
pub struct CreateBlogInput {
    pub title:  Option<String>,
    pub author: Option<String>,
    pub url:    Option<String>,
    pub likes:  Option<i64>,
}

/// ブログ更新の入力
///
/// `None` のフィールドは変更しない。
#[derive(Debug, Default)]
pub struct UpdateBlogInput {
    pub title:  Option<String>,
    pub author: Option<String>,
    pub url:    Option<String>,
    pub likes:  Option<i64>,
}

/// ブログ一覧の集計結果
#[derive(Debug)]
pub struct BlogListStats {
    /// 全ブログの likes 合計
    pub total_likes: i64,
    /// 最も likes の多いブログ（一覧が空のときは `None`）
    pub favorite:    Option<Blog>,
    /// 最も投稿数の多い著者（一覧が空のときは `None`）
    pub most_blogs:  Option<MostBlogs>,
}

/// ブログユースケーストレイト
#[async_trait]
pub trait BlogUseCase: Send + Sync {
    /// 全ブログを所有者情報付きで取得する
    async fn list(&self) -> Result<Vec<BlogWithOwner>, ApiError>;

    /// ID でブログを取得する
    ///
    /// 存在しない場合は `ApiError::NotFound`。
    async fn get(&self, id: &BlogId) -> Result<Blog, ApiError>;

    /// ブログを作成する
    ///
    /// `likes` が省略された場合は 0 で初期化する。
    async fn create(&self, user_id: &UserId, input: CreateBlogInput) -> Result<Blog, ApiError>;

    /// ブログを部分更新する
    ///
    /// 存在しない場合は `ApiError::NotFound`。
    async fn update(&self, id: &BlogId, input: UpdateBlogInput) -> Result<Blog, ApiError>;

    /// ブログを削除する
    ///
    /// 所有者以外・存在しない ID の場合も成功として扱う（警告ログのみ）。
    async fn delete(&self, id: &BlogId, caller: &UserId) -> Result<(), ApiError>;

    /// 一覧全体の集計を取得する
    async fn stats(&self) -> Result<BlogListStats, ApiError>;
}

/// ブログユースケースの実装
pub struct BlogUseCaseImpl {
    blog_repository: Arc<dyn BlogRepository>,
    user_repository: Arc<dyn UserRepository>,
    clock:           Arc<dyn Clock>,
}

impl BlogUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    pub fn new(
        blog_repository: Arc<dyn BlogRepository>,
        user_repository: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            blog_repository,
            user_repository,
            clock,
        }
    }
}

/// 必須フィールドを検証して取り出す
fn require(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value.ok_or_else(|| ApiError::Validation(format!("{field}は必須です")))
}

#[async_trait]
impl BlogUseCase for BlogUseCaseImpl {
    async fn list(&self) -> Result<Vec<BlogWithOwner>, ApiError> {
        let blogs = self.blog_repository.find_all_with_owner().await?;
        Ok(blogs)
    }

    async fn get(&self, id: &BlogId) -> Result<Blog, ApiError> {
        self.blog_repository
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound)
    }

    async fn create(&self, user_id: &UserId, input: CreateBlogInput) -> Result<Blog, ApiError> {
        let title = require(input.title, "title")?;
        let author = require(input.author, "author")?;
        let url = require(input.url, "url")?;

        // トークンは有効でも、ユーザーが既に存在しない可能性がある
        let owner = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("ユーザーが存在しません".to_string()))?;

        let blog = Blog::new(
            BlogId::new(),
            title,
            author,
            url,
            input.likes,
            self.clock.now(),
            *owner.id(),
        );

        self.blog_repository.insert(&blog).await?;

        Ok(blog)
    }

    async fn update(&self, id: &BlogId, input: UpdateBlogInput) -> Result<Blog, ApiError> {
        let patch = BlogPatch {
            title:  input.title,
            author: input.author,
            url:    input.url,
            likes:  input.likes,
        };

        self.blog_repository
            .update_fields(id, &patch)
            .await?
            .ok_or(ApiError::NotFound)
    }

    async fn delete(&self, id: &BlogId, caller: &UserId) -> Result<(), ApiError> {
        let Some(blog) = self.blog_repository.find_by_id(id).await? else {
            // 存在しない ID の削除は冪等に成功として扱う
            return Ok(());
        };

        if blog.user_id() != caller {
            tracing::warn!(
                blog_id = %id,
                owner = %blog.user_id(),
                caller = %caller,
                "所有者以外からの削除リクエストを無視しました"
            );
            return Ok(());
        }

        self.blog_repository.delete(id).await?;

        Ok(())
    }

    async fn stats(&self) -> Result<BlogListStats, ApiError> {
        let blogs = self.blog_repository.find_all().await?;

        Ok(BlogListStats {
            total_likes: stats::total_likes(&blogs),
            favorite:    stats::favorite_blog(&blogs).cloned(),
            most_blogs:  stats::most_blogs(&blogs),
        })
    }
}

#[cfg(test)]
mod tests {
    use bloglist_domain::{clock::FixedClock, password::PasswordHash, user::{User, Username}};
    use bloglist_infra::mock::{MockBlogRepository, MockUserRepository};
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn create_sut() -> (BlogUseCaseImpl, MockUserRepository, MockBlogRepository) {
        let users = MockUserRepository::new();
        let blogs = MockBlogRepository::new(users.records());
        let sut = BlogUseCaseImpl::new(
            Arc::new(blogs.clone()),
            Arc::new(users.clone()),
            Arc::new(FixedClock::new(fixed_now())),
        );
        (sut, users, blogs)
    }

    fn add_user(users: &MockUserRepository, username: &str) -> User {
        let user = User::new(
            UserId::new(),
            Username::new(username).unwrap(),
            None,
            fixed_now(),
        );
        users.add_user(user.clone(), PasswordHash::new("hash"));
        user
    }

    fn input(title: &str, likes: Option<i64>) -> CreateBlogInput {
        CreateBlogInput {
            title:  Some(title.to_string()),
            author: Some("Edsger W. Dijkstra".to_string()),
            url:    Some("https://example.com/blog".to_string()),
            likes,
        }
    }

    #[tokio::test]
    async fn test_ブログを作成できる() {
        // Given
        let (sut, users, blogs) = create_sut();
        let owner = add_user(&users, "mluukkai");

        // When
        let blog = sut.create(owner.id(), input("Canonical string reduction", Some(12)))
            .await
            .unwrap();

        // Then
        assert_eq!(blog.title(), "Canonical string reduction");
        assert_eq!(blog.likes(), 12);
        assert_eq!(blog.date(), fixed_now());
        assert_eq!(blog.user_id(), owner.id());
        assert_eq!(blogs.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_likes省略時は0で作成される() {
        let (sut, users, _) = create_sut();
        let owner = add_user(&users, "mluukkai");

        let blog = sut.create(owner.id(), input("Go To Statement", None))
            .await
            .unwrap();

        assert_eq!(blog.likes(), 0);
    }

    #[tokio::test]
    async fn test_titleがないとバリデーションエラー() {
        let (sut, users, _) = create_sut();
        let owner = add_user(&users, "mluukkai");

        let result = sut
            .create(
                owner.id(),
                CreateBlogInput {
                    author: Some("author".to_string()),
                    url: Some("https://example.com".to_string()),
                    ..CreateBlogInput::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_存在しないユーザーの作成は401() {
        let (sut, _, _) = create_sut();

        let result = sut.create(&UserId::new(), input("orphan", None)).await;

        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_存在しないブログの取得はnot_found() {
        let (sut, _, _) = create_sut();

        let result = sut.get(&BlogId::new()).await;

        assert!(matches!(result, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_更新はリクエストのフィールドだけを書き換える() {
        // Given
        let (sut, users, _) = create_sut();
        let owner = add_user(&users, "mluukkai");
        let blog = sut.create(owner.id(), input("original title", Some(3)))
            .await
            .unwrap();

        // When
        let updated = sut
            .update(
                blog.id(),
                UpdateBlogInput {
                    url: Some("https://example.com/moved".to_string()),
                    ..UpdateBlogInput::default()
                },
            )
            .await
            .unwrap();

        // Then: url だけが変わり、他のフィールドは維持される
        assert_eq!(updated.url(), "https://example.com/moved");
        assert_eq!(updated.title(), "original title");
        assert_eq!(updated.likes(), 3);
    }

    #[tokio::test]
    async fn test_存在しないブログの更新はnot_found() {
        let (sut, _, _) = create_sut();

        let result = sut.update(&BlogId::new(), UpdateBlogInput::default()).await;

        assert!(matches!(result, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_所有者はブログを削除できる() {
        let (sut, users, blogs) = create_sut();
        let owner = add_user(&users, "mluukkai");
        let blog = sut.create(owner.id(), input("to delete", None)).await.unwrap();

        sut.delete(blog.id(), owner.id()).await.unwrap();

        assert!(blogs.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_所有者以外の削除は無視されブログが残る() {
        // Given
        let (sut, users, blogs) = create_sut();
        let owner = add_user(&users, "mluukkai");
        let other = add_user(&users, "hellas");
        let blog = sut.create(owner.id(), input("still here", None)).await.unwrap();

        // When: 所有者ではないユーザーが削除を試みる
        sut.delete(blog.id(), other.id()).await.unwrap();

        // Then: ブログは残っている
        assert_eq!(blogs.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_存在しないidの削除も成功として扱う() {
        let (sut, _, _) = create_sut();

        let result = sut.delete(&BlogId::new(), &UserId::new()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_statsは合計と最多を集計する() {
        // Given
        let (sut, users, _) = create_sut();
        let owner = add_user(&users, "mluukkai");
        for (title, author, likes) in [
            ("a", "Edsger W. Dijkstra", 0),
            ("b", "Robert C. Martin", 5),
            ("c", "Robert C. Martin", 3),
        ] {
            let mut input = input(title, Some(likes));
            input.author = Some(author.to_string());
            sut.create(owner.id(), input).await.unwrap();
        }

        // When
        let stats = sut.stats().await.unwrap();

        // Then
        assert_eq!(stats.total_likes, 8);
        assert_eq!(stats.favorite.unwrap().title(), "b");
        let most = stats.most_blogs.unwrap();
        assert_eq!(most.author, "Robert C. Martin");
        assert_eq!(most.blogs, 2);
    }

    #[tokio::test]
    async fn test_空の一覧のstatsは合計0で最多はnone() {
        let (sut, _, _) = create_sut();

        let stats = sut.stats().await.unwrap();

        assert_eq!(stats.total_likes, 0);
        assert!(stats.favorite.is_none());
        assert!(stats.most_blogs.is_none());
    }
}
