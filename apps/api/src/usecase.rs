//! # ユースケース層
//!
//! API サーバーのビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ハンドラテストでスタブに差し替え可能にする
//! - **依存性注入**: リポジトリ・ハッシュ化・トークン発行・時刻は
//!   コンストラクタで `Arc<dyn Trait>` として注入する
//! - **薄いハンドラ**: バリデーションとエラーマッピングはこの層に集約する

pub mod blog;
pub mod login;
pub mod user;

pub use blog::{BlogListStats, BlogUseCase, BlogUseCaseImpl, CreateBlogInput, UpdateBlogInput};
pub use login::{LoginOutput, LoginUseCase, LoginUseCaseImpl};
pub use user::{CreateUserInput, UserUseCase, UserUseCaseImpl, UserWithBlogs};
