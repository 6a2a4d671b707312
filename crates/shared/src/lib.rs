//! # BlogList 共有クレート
//!
//! レイヤ間で共有する軽量な型とユーティリティを提供する。
//!
//! ## モジュール構成
//!
//! - [`error_response`] - RFC 9457 Problem Details 形式のエラーレスポンス
//! - [`health`] - ヘルスチェックのレスポンス型
//! - [`observability`] - トレーシング初期化（`observability` feature）
//!
//! このクレートは axum に依存しない。`IntoResponse` への変換は
//! 各サービスの責務とする。

pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::HealthResponse;
