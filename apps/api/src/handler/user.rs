//! # ユーザーハンドラ
//!
//! ユーザー API のエンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `GET /api/users` - ユーザー一覧（所有ブログ付き）
//! - `POST /api/users` - ユーザー登録
//!
//! レスポンスにパスワードハッシュは含まれない（エンティティが
//! ハッシュを持たないため、型レベルで保証される）。

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use bloglist_domain::user::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::ApiError,
    usecase::{CreateUserInput, UserUseCase, UserWithBlogs},
};

/// ユーザーハンドラの共有状態
pub struct UserState {
    pub usecase: Arc<dyn UserUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// ユーザー登録リクエスト
///
/// 必須フィールドの検証は usecase 層で行う（欠落は 400）。
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub name:     Option<String>,
    pub password: Option<String>,
}

/// 一覧用の所有ブログ DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserBlogDto {
    pub id:     Uuid,
    pub title:  String,
    pub author: String,
    pub url:    String,
}

/// ユーザー DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserDto {
    pub id:       Uuid,
    pub username: String,
    pub name:     Option<String>,
    pub blogs:    Vec<UserBlogDto>,
}

impl UserDto {
    fn from_user(user: &User, blogs: Vec<UserBlogDto>) -> Self {
        Self {
            id: *user.id().as_uuid(),
            username: user.username().as_str().to_string(),
            name: user.name().map(str::to_string),
            blogs,
        }
    }

    fn from_user_with_blogs(item: &UserWithBlogs) -> Self {
        let blogs = item
            .blogs
            .iter()
            .map(|blog| UserBlogDto {
                id:     *blog.id().as_uuid(),
                title:  blog.title().to_string(),
                author: blog.author().to_string(),
                url:    blog.url().to_string(),
            })
            .collect();

        Self::from_user(&item.user, blogs)
    }
}

// --- ハンドラ ---

/// GET /api/users
///
/// 全ユーザーを所有ブログ付きで返す。
#[tracing::instrument(skip_all)]
pub async fn list_users(
    State(state): State<Arc<UserState>>,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.usecase.list().await?;

    let items: Vec<UserDto> = users.iter().map(UserDto::from_user_with_blogs).collect();

    Ok(Json(items))
}

/// POST /api/users
///
/// ユーザーを登録する。
///
/// ## レスポンス
///
/// - `200 OK`: 作成されたユーザー（ハッシュは含まない）
/// - `400 Bad Request`: ユーザー名・パスワードの検証エラー、重複ユーザー名
#[tracing::instrument(skip_all)]
pub async fn create_user(
    State(state): State<Arc<UserState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateUserInput {
        username: req.username,
        name:     req.name,
        password: req.password,
    };

    let user = state.usecase.create(input).await?;

    Ok(Json(UserDto::from_user(&user, Vec::new())))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode},
        routing::get,
    };
    use bloglist_domain::{
        blog::{Blog, BlogId},
        user::{UserId, Username},
    };
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    // --- スタブ ---

    struct StubUserUseCase {
        users: Vec<(User, Vec<Blog>)>,
    }

    impl StubUserUseCase {
        fn empty() -> Self {
            Self { users: Vec::new() }
        }

        fn with_users(users: Vec<(User, Vec<Blog>)>) -> Self {
            Self { users }
        }
    }

    #[async_trait]
    impl UserUseCase for StubUserUseCase {
        async fn list(&self) -> Result<Vec<UserWithBlogs>, ApiError> {
            Ok(self
                .users
                .iter()
                .map(|(user, blogs)| UserWithBlogs {
                    user:  user.clone(),
                    blogs: blogs.clone(),
                })
                .collect())
        }

        async fn create(&self, input: CreateUserInput) -> Result<User, ApiError> {
            let username = input
                .username
                .ok_or_else(|| ApiError::Validation("ユーザー名は必須です".to_string()))?;
            let username =
                Username::new(username).map_err(|e| ApiError::Validation(e.to_string()))?;
            Ok(User::new(UserId::new(), username, input.name, fixed_now()))
        }
    }

    // --- ヘルパー ---

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn create_test_app(usecase: StubUserUseCase) -> Router {
        let state = Arc::new(UserState {
            usecase: Arc::new(usecase),
        });

        Router::new()
            .route("/api/users", get(list_users).post(create_user))
            .with_state(state)
    }

    fn sample_user(username: &str) -> User {
        User::new(
            UserId::new(),
            Username::new(username).unwrap(),
            Some("Matti Luukkainen".to_string()),
            fixed_now(),
        )
    }

    fn sample_blog(owner: &UserId) -> Blog {
        Blog::new(
            BlogId::new(),
            "Go To Statement Considered Harmful".to_string(),
            "Edsger W. Dijkstra".to_string(),
            "https://example.com/goto".to_string(),
            Some(5),
            fixed_now(),
            *owner,
        )
    }

    async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // --- テストケース ---

    #[tokio::test]
    async fn test_post_ユーザーを登録できる() {
        // Given
        let sut = create_test_app(StubUserUseCase::empty());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/users")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "username": "mluukkai",
                    "name": "Matti Luukkainen",
                    "password": "salainen"
                })
                .to_string(),
            ))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["username"], "mluukkai");
        assert_eq!(json["name"], "Matti Luukkainen");
    }

    #[tokio::test]
    async fn test_post_レスポンスにハッシュ関連のフィールドが含まれない() {
        // Given
        let sut = create_test_app(StubUserUseCase::empty());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/users")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "username": "mluukkai",
                    "password": "salainen"
                })
                .to_string(),
            ))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        let json = response_json(response).await;
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_post_短いユーザー名は400() {
        // Given
        let sut = create_test_app(StubUserUseCase::empty());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/users")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "username": "ab",
                    "password": "salainen"
                })
                .to_string(),
            ))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(
            json["type"],
            "https://bloglist.example.com/errors/validation-error"
        );
    }

    #[tokio::test]
    async fn test_get_一覧は所有ブログをインライン展開して返す() {
        // Given
        let user = sample_user("mluukkai");
        let blog = sample_blog(user.id());
        let sut = create_test_app(StubUserUseCase::with_users(vec![(user, vec![blog])]));

        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/users")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<UserDto> = serde_json::from_value(response_json(response).await).unwrap();
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].username, "mluukkai");
        assert_eq!(body[0].blogs.len(), 1);
        assert_eq!(
            body[0].blogs[0].title,
            "Go To Statement Considered Harmful"
        );
    }
}
