//! # BlogList API ライブラリ
//!
//! ブログリストサービスの HTTP API を提供する。
//!
//! ## レイヤ構成
//!
//! ```text
//! handler（axum ハンドラ・DTO）
//!    ↓
//! usecase（ビジネスロジック・バリデーション）
//!    ↓
//! bloglist-infra（リポジトリ・ハッシュ化・トークン発行）
//!    ↓
//! bloglist-domain（エンティティ・値オブジェクト・集計）
//! ```
//!
//! 統合テストから使用するため、ルーター構築（[`app_builder`]）を含めて
//! ライブラリとして公開する。

pub mod app_builder;
pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
