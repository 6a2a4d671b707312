//! # ブログハンドラ
//!
//! ブログ API のエンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `GET /api/blogs` - ブログ一覧（所有者情報付き）
//! - `GET /api/blogs/stats` - 一覧全体の集計
//! - `GET /api/blogs/{id}` - ブログ取得
//! - `POST /api/blogs` - ブログ作成（要トークン）
//! - `PUT /api/blogs/{id}` - ブログ更新
//! - `DELETE /api/blogs/{id}` - ブログ削除（要トークン）

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use bloglist_domain::{blog::{Blog, BlogId}, stats::MostBlogs};
use bloglist_infra::{TokenService, repository::BlogWithOwner};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    error::ApiError,
    usecase::{BlogUseCase, CreateBlogInput, UpdateBlogInput},
};

/// ブログハンドラの共有状態
pub struct BlogState {
    pub usecase:       Arc<dyn BlogUseCase>,
    pub token_service: Arc<dyn TokenService>,
}

// --- リクエスト/レスポンス型 ---

/// ブログ作成リクエスト
///
/// 必須フィールドの検証は usecase 層で行う（欠落は 400）。
#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title:  Option<String>,
    pub author: Option<String>,
    pub url:    Option<String>,
    pub likes:  Option<i64>,
}

/// ブログ更新リクエスト
///
/// 省略されたフィールドは変更しない。
#[derive(Debug, Deserialize)]
pub struct UpdateBlogRequest {
    pub title:  Option<String>,
    pub author: Option<String>,
    pub url:    Option<String>,
    pub likes:  Option<i64>,
}

/// ブログ DTO（所有者は ID のみ）
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct BlogDto {
    pub id:     Uuid,
    pub title:  String,
    pub author: String,
    pub url:    String,
    pub likes:  i64,
    pub date:   String,
    pub user:   Uuid,
}

impl BlogDto {
    fn from_blog(blog: &Blog) -> Self {
        Self {
            id:     *blog.id().as_uuid(),
            title:  blog.title().to_string(),
            author: blog.author().to_string(),
            url:    blog.url().to_string(),
            likes:  blog.likes(),
            date:   blog.date().to_rfc3339(),
            user:   *blog.user_id().as_uuid(),
        }
    }
}

/// 一覧用の所有者 DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct BlogOwnerDto {
    pub id:       Uuid,
    pub username: String,
    pub name:     Option<String>,
}

/// ブログ DTO（所有者情報をインライン展開）
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct BlogWithOwnerDto {
    pub id:     Uuid,
    pub title:  String,
    pub author: String,
    pub url:    String,
    pub likes:  i64,
    pub date:   String,
    pub user:   BlogOwnerDto,
}

impl BlogWithOwnerDto {
    fn from_blog_with_owner(item: &BlogWithOwner) -> Self {
        Self {
            id:     *item.blog.id().as_uuid(),
            title:  item.blog.title().to_string(),
            author: item.blog.author().to_string(),
            url:    item.blog.url().to_string(),
            likes:  item.blog.likes(),
            date:   item.blog.date().to_rfc3339(),
            user:   BlogOwnerDto {
                id:       *item.owner.id.as_uuid(),
                username: item.owner.username.clone(),
                name:     item.owner.name.clone(),
            },
        }
    }
}

/// 集計レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_likes: i64,
    pub favorite:    Option<BlogDto>,
    pub most_blogs:  Option<MostBlogs>,
}

// --- ハンドラ ---

/// GET /api/blogs
///
/// 全ブログを所有者情報付きで返す。認証不要。
#[tracing::instrument(skip_all)]
pub async fn list_blogs(
    State(state): State<Arc<BlogState>>,
) -> Result<impl IntoResponse, ApiError> {
    let blogs = state.usecase.list().await?;

    let items: Vec<BlogWithOwnerDto> = blogs
        .iter()
        .map(BlogWithOwnerDto::from_blog_with_owner)
        .collect();

    Ok(Json(items))
}

/// GET /api/blogs/stats
///
/// 一覧全体の集計（likes 合計、最多 likes、最多投稿者）を返す。
#[tracing::instrument(skip_all)]
pub async fn blog_stats(
    State(state): State<Arc<BlogState>>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.usecase.stats().await?;

    Ok(Json(StatsResponse {
        total_likes: stats.total_likes,
        favorite:    stats.favorite.as_ref().map(BlogDto::from_blog),
        most_blogs:  stats.most_blogs,
    }))
}

/// GET /api/blogs/{id}
///
/// ブログを取得する。存在しない場合はボディなしの 404。
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_blog(
    State(state): State<Arc<BlogState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let blog = state.usecase.get(&BlogId::from_uuid(id)).await?;

    Ok(Json(BlogDto::from_blog(&blog)))
}

/// POST /api/blogs
///
/// ブログを作成する。所有者はトークンから解決する。
///
/// ## レスポンス
///
/// - `200 OK`: 作成されたブログ
/// - `400 Bad Request`: 必須フィールドの欠落
/// - `401 Unauthorized`: トークンの欠落・無効
#[tracing::instrument(skip_all)]
pub async fn create_blog(
    State(state): State<Arc<BlogState>>,
    current_user: CurrentUser,
    Json(req): Json<CreateBlogRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateBlogInput {
        title:  req.title,
        author: req.author,
        url:    req.url,
        likes:  req.likes,
    };

    let blog = state.usecase.create(&current_user.user_id, input).await?;

    Ok(Json(BlogDto::from_blog(&blog)))
}

/// PUT /api/blogs/{id}
///
/// ブログを部分更新する。省略されたフィールドは変更しない。
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_blog(
    State(state): State<Arc<BlogState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBlogRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = UpdateBlogInput {
        title:  req.title,
        author: req.author,
        url:    req.url,
        likes:  req.likes,
    };

    let blog = state.usecase.update(&BlogId::from_uuid(id), input).await?;

    Ok(Json(BlogDto::from_blog(&blog)))
}

/// DELETE /api/blogs/{id}
///
/// ブログを削除する。所有者以外・存在しない ID でも 204 を返す。
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_blog(
    State(state): State<Arc<BlogState>>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .usecase
        .delete(&BlogId::from_uuid(id), &current_user.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
