//! # トークン発行・検証
//!
//! JWT（HS256）によるベアラートークンの発行と検証を提供する。
//!
//! ## クレーム
//!
//! トークンにはユーザー ID とユーザー名を埋め込む。`exp` を含めるため、
//! 期限切れトークンは検証時に自動的に拒否される。
//!
//! ## 鍵の扱い
//!
//! 署名鍵は環境変数（`JWT_SECRET`）から渡される。鍵はこの型の外に
//! 出さず、発行・検証の操作だけを公開する。

use bloglist_domain::user::{UserId, Username};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::InfraError;

/// トークンに埋め込むクレーム
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// ユーザー ID
    pub id:       Uuid,
    /// ユーザー名
    pub username: String,
    /// 発行日時（UNIX 秒）
    pub iat:      i64,
    /// 有効期限（UNIX 秒）
    pub exp:      i64,
}

/// トークンの発行と検証を担当するトレイト
pub trait TokenService: Send + Sync {
    /// ユーザー ID を埋め込んだ署名付きトークンを発行する
    ///
    /// # Errors
    ///
    /// - 署名処理が失敗した場合
    fn issue(&self, user_id: &UserId, username: &Username) -> Result<String, InfraError>;

    /// トークンを検証し、クレームを取り出す
    ///
    /// # Errors
    ///
    /// - 署名が一致しない、形式が不正、または期限切れの場合
    fn verify(&self, token: &str) -> Result<TokenClaims, InfraError>;
}

/// JWT（HS256）による [`TokenService`] の実装
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs:     i64,
}

impl JwtTokenService {
    /// トークンのデフォルト有効期間（秒）
    pub const DEFAULT_TTL_SECS: i64 = 3600;

    /// 署名鍵と有効期間からサービスを作成する
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: &UserId, username: &Username) -> Result<String, InfraError> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            id:       *user_id.as_uuid(),
            username: username.as_str().to_string(),
            iat:      now,
            exp:      now + self.ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| InfraError::unexpected(format!("トークンの発行に失敗: {e}")))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, InfraError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| InfraError::invalid_input(format!("トークンが無効です: {e}")))
    }
}
