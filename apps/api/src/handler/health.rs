//! # ヘルスチェックハンドラ
//!
//! API サーバーの稼働状態を確認するためのエンドポイント。
//!
//! ## エンドポイント
//!
//! - `GET /health` - プロセスの生存確認（liveness）
//! - `GET /health/ready` - データベース接続を含む受付可否（readiness）

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use bloglist_shared::{ErrorResponse, HealthResponse};
use sqlx::PgPool;

/// Readiness Check 用の共有状態
pub struct ReadinessState {
    pub pool: PgPool,
}

/// ヘルスチェックエンドポイント
///
/// サーバーが正常に稼働していることを確認する。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness Check エンドポイント
///
/// データベースへ疎通確認クエリを発行し、リクエストを受け付けられる
/// 状態かを返す。接続できない場合は 503。
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status:  "ready".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("readiness check に失敗しました: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::service_unavailable(
                    "データベースに接続できません",
                )),
            )
                .into_response()
        }
    }
}
