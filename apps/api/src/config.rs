//! # API サーバー設定
//!
//! 環境変数から API サーバーの設定を読み込む。

use std::env;

use bloglist_infra::JwtTokenService;

/// API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host:           String,
    /// ポート番号
    pub port:           u16,
    /// データベース接続 URL
    pub database_url:   String,
    /// トークン署名鍵
    pub jwt_secret:     String,
    /// トークン有効期間（秒）
    pub token_ttl_secs: i64,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host:           env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port:           env::var("API_PORT")
                .expect("API_PORT が設定されていません")
                .parse()
                .expect("API_PORT は有効なポート番号である必要があります"),
            database_url:   env::var("DATABASE_URL").expect("DATABASE_URL が設定されていません"),
            jwt_secret:     env::var("JWT_SECRET").expect("JWT_SECRET が設定されていません"),
            token_ttl_secs: env::var("TOKEN_TTL_SECS")
                .ok()
                .map(|v| {
                    v.parse()
                        .expect("TOKEN_TTL_SECS は秒数の整数である必要があります")
                })
                .unwrap_or(JwtTokenService::DEFAULT_TTL_SECS),
        })
    }
}
