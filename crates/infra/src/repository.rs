//! # リポジトリ
//!
//! ユーザー/ブログの永続化操作を定義する。
//!
//! ## 設計方針
//!
//! - **トレイトベース**: ユースケース層は `Arc<dyn Trait>` 経由で利用し、
//!   テストではインメモリ実装（[`crate::mock`]）に差し替える
//! - **明示的なプール受け渡し**: PostgreSQL 実装はコンストラクタで
//!   `PgPool` を受け取る

pub mod blog_repository;
pub mod user_repository;

pub use blog_repository::{
    BlogPatch,
    BlogRepository,
    BlogWithOwner,
    OwnerSummary,
    PostgresBlogRepository,
};
pub use user_repository::{PostgresUserRepository, UserRepository};
