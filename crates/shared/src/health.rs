//! # ヘルスチェックレスポンス
//!
//! 稼働確認エンドポイントのレスポンス型を提供する。

use serde::{Deserialize, Serialize};

/// ヘルスチェックのレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（例: `"healthy"`）
    pub status:  String,
    /// サービスのバージョン
    pub version: String,
}
