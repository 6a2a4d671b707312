//! # API エラー定義
//!
//! API サーバーで発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## 設計方針
//!
//! - エラーボディは RFC 9457 Problem Details（[`ErrorResponse`]）
//! - 例外は `NotFound`: ボディなしの 404 を返す
//! - 500 系は detail を固定文言にし、内部情報を漏らさない
//!   （元のエラーは tracing に記録する）

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bloglist_infra::InfraError;
use bloglist_shared::ErrorResponse;
use thiserror::Error;

/// API サーバーで発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// バリデーションエラー（不正な入力、重複ユーザー名など）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 認証エラー（トークン欠落・無効、パスワード不一致など）
    #[error("認証エラー: {0}")]
    Unauthorized(String),

    /// リソースが見つからない
    #[error("リソースが見つかりません")]
    NotFound,

    /// インフラ層のエラー
    #[error("インフラエラー: {0}")]
    Infra(#[from] InfraError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(detail) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::validation_error(detail.clone()),
            ),
            ApiError::Unauthorized(detail) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::unauthorized(detail.clone()),
            ),
            // 404 はボディなしで返す
            ApiError::NotFound => return StatusCode::NOT_FOUND.into_response(),
            ApiError::Infra(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "インフラエラーが発生しました"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("内部エラーが発生しました: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error(),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validationは400とproblem_detailsを返す() {
        let response = ApiError::Validation("タイトルは必須です".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(
            json["type"],
            "https://bloglist.example.com/errors/validation-error"
        );
        assert_eq!(json["detail"], "タイトルは必須です");
    }

    #[tokio::test]
    async fn test_not_foundは空ボディの404を返す() {
        let response = ApiError::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_内部エラーのdetailは固定文言になる() {
        let response =
            ApiError::Internal("接続プールが枯渇しました".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["detail"], "内部エラーが発生しました");
    }
}
