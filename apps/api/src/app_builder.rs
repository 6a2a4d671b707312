//! # ルーター構築
//!
//! API のルーティングとミドルウェアを一箇所で組み立てる。
//! `main` と統合テストの両方から使用する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use bloglist_shared::observability::make_request_span;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handler::{
    BlogState,
    LoginState,
    UserState,
    blog_stats,
    create_blog,
    create_user,
    delete_blog,
    get_blog,
    health_check,
    list_blogs,
    list_users,
    login,
    update_blog,
};

/// API ルーターを構築する
///
/// `/health/ready` はデータベースプールを必要とするため、
/// ここでは組み込まず `main` 側でマージする。
pub fn build_app(
    blog_state: Arc<BlogState>,
    user_state: Arc<UserState>,
    login_state: Arc<LoginState>,
) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/api/blogs", get(list_blogs).post(create_blog))
                .route("/api/blogs/stats", get(blog_stats))
                .route(
                    "/api/blogs/{id}",
                    get(get_blog).put(update_blog).delete(delete_blog),
                )
                .with_state(blog_state),
        )
        .merge(
            Router::new()
                .route("/api/users", get(list_users).post(create_user))
                .with_state(user_state),
        )
        .merge(
            Router::new()
                .route("/api/login", post(login))
                .with_state(login_state),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
}
