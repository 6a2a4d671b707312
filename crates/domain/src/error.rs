//! # ドメイン層エラー定義
//!
//! ビジネスルール違反を表現するエラー型。
//! API 層でこのエラーを適切な HTTP ステータスに変換する。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 値オブジェクトの生成時に制約を満たさなかった場合。
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
