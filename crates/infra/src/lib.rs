//! # BlogList インフラ層
//!
//! 永続化と認証基盤の具体的な実装を提供する。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プールとマイグレーション
//! - [`repository`] - ユーザー/ブログのリポジトリ（トレイト + PostgreSQL 実装）
//! - [`password`] - Argon2id によるパスワードハッシュ化・検証
//! - [`token`] - JWT（HS256）の発行・検証
//! - [`error`] - インフラ層エラー
//! - [`mock`] - テスト用インメモリリポジトリ（`test-utils` feature）
//!
//! リポジトリとトークンサービスはトレイトとして公開し、ユースケース層は
//! `Arc<dyn Trait>` 経由で利用する。

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod password;
pub mod repository;
pub mod token;

pub use error::{InfraError, InfraErrorKind};
pub use password::{Argon2PasswordHasher, PasswordHasher};
pub use token::{JwtTokenService, TokenClaims, TokenService};
