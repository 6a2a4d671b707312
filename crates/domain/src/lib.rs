//! # BlogList ドメイン層
//!
//! ブログリストサービスのドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`user::User`], [`blog::Blog`]）
//! - **値オブジェクト**: 生成時にバリデーションを行う不変オブジェクト
//!   （[`user::Username`], [`password::PlainPassword`] など）
//! - **純粋関数**: ブログ一覧の集計ヘルパ（[`stats`]）は副作用を持たない
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、トークン発行）には一切依存しない。

pub mod blog;
pub mod clock;
pub mod error;
pub mod password;
pub mod stats;
pub mod user;

pub use error::DomainError;
