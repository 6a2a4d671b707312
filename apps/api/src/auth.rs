//! # 認証エクストラクタ
//!
//! `Authorization: Bearer <token>` ヘッダーの解析とトークン検証を
//! 一箇所に集約する。
//!
//! ハンドラは引数に [`CurrentUser`] を書くだけで認証済みユーザーを
//! 受け取れる。トークンの欠落・形式不正・署名不一致・期限切れは
//! すべて 401 になる。

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use bloglist_domain::user::UserId;

use crate::{error::ApiError, handler::blog::BlogState};

/// 認証済みユーザー
///
/// ベアラートークンの検証に成功した場合のみ構築される。
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: UserId,
}

/// Authorization ヘッダーからベアラートークンを取り出す
///
/// スキーム名は大文字小文字を区別しない。
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}

impl FromRequestParts<Arc<BlogState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<BlogState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::Unauthorized("トークンがありません".to_string()))?;

        let claims = state
            .token_service
            .verify(token)
            .map_err(|_| ApiError::Unauthorized("トークンが無効です".to_string()))?;

        Ok(Self {
            user_id: UserId::from_uuid(claims.id),
        })
    }
}
