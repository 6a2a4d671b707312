//! # ログインハンドラ
//!
//! ログイン API のエンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `POST /api/login` - パスワード認証とトークン発行

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, usecase::LoginUseCase};

/// ログインハンドラの共有状態
pub struct LoginState {
    pub usecase: Arc<dyn LoginUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// ログインリクエスト
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// ログインレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token:    String,
    pub username: String,
    pub name:     Option<String>,
}

// --- ハンドラ ---

/// POST /api/login
///
/// パスワードを検証し、ベアラートークンを発行する。
///
/// ## レスポンス
///
/// - `200 OK`: トークンとユーザー情報
/// - `401 Unauthorized`: ユーザー名またはパスワードの不一致
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<Arc<LoginState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let output = state.usecase.login(&req.username, &req.password).await?;

    Ok(Json(LoginResponse {
        token:    output.token,
        username: output.user.username().as_str().to_string(),
        name:     output.user.name().map(str::to_string),
    }))
}
