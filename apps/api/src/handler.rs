//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各リソースのハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックは usecase 層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `blog`: ブログ CRUD と一覧集計
//! - `user`: ユーザー登録・一覧
//! - `login`: ログイン（トークン発行）
//! - `health`: ヘルスチェック

pub mod blog;
pub mod health;
pub mod login;
pub mod user;

pub use blog::{
    BlogState,
    blog_stats,
    create_blog,
    delete_blog,
    get_blog,
    list_blogs,
    update_blog,
};
pub use health::{ReadinessState, health_check, readiness_check};
pub use login::{LoginState, login};
pub use user::{UserState, create_user, list_users};
