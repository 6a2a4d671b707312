//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: [`UserId`] は UUID をラップし、型安全性を確保
//! - **バリデーション**: [`Username`] は生成時に検証ロジックを実行
//! - **認証情報の分離**: パスワードハッシュはエンティティのフィールドに
//!   持たない。ハッシュが API レスポンスに混入する経路を型レベルで塞ぐ。
//!
//! ## 不変条件
//!
//! - `username` はストア全体で一意（ストレージ層の UNIQUE 制約で保証）

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DomainError;

/// ユーザー ID（一意識別子）
///
/// UUID v7 を使用し、生成順にソート可能。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct UserId(Uuid);

impl UserId {
    /// 新しいユーザー ID を生成する
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// 既存の UUID からユーザー ID を作成する
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 内部の UUID 参照を取得する
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// ユーザー名（値オブジェクト）
///
/// ログイン ID として使用する一意な名前。
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct Username(String);

impl Username {
    /// ユーザー名の最小文字数
    pub const MIN_LENGTH: usize = 3;
    /// ユーザー名の最大文字数
    pub const MAX_LENGTH: usize = 255;

    /// ユーザー名を作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 3 文字以上 255 文字以内
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.chars().count() < Self::MIN_LENGTH {
            return Err(DomainError::Validation(format!(
                "ユーザー名は{}文字以上である必要があります",
                Self::MIN_LENGTH
            )));
        }

        if value.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "ユーザー名は{}文字以内である必要があります",
                Self::MAX_LENGTH
            )));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

/// ユーザーエンティティ
///
/// ブログの所有者となるアカウントを表現する。
/// 登録時に作成され、このシステムでは削除されない。
///
/// 認証情報（パスワードハッシュ）はインフラ層の `users.password_hash`
/// カラムでのみ管理し、このエンティティには載せない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:         UserId,
    username:   Username,
    name:       Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// 新規ユーザーを作成する
    pub fn new(id: UserId, username: Username, name: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            username,
            name,
            created_at: now,
            updated_at: now,
        }
    }

    /// 永続化データからエンティティを復元する
    ///
    /// バリデーション済みの値を前提とするため、リポジトリ実装からのみ
    /// 使用すること。
    pub fn from_db(
        id: UserId,
        username: Username,
        name: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            name,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
