//! # ブログ
//!
//! ブログエンティティを定義する。
//!
//! ## 不変条件
//!
//! - `user_id` は必ず既存のユーザーを参照する（ストレージ層の FK で保証）
//! - `likes` はリクエストで省略された場合 0 で初期化される

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::UserId;

/// ブログ ID（一意識別子）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct BlogId(Uuid);

impl BlogId {
    /// 新しいブログ ID を生成する
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// 既存の UUID からブログ ID を作成する
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 内部の UUID 参照を取得する
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BlogId {
    fn default() -> Self {
        Self::new()
    }
}

/// ブログエンティティ
///
/// ユーザーが投稿したブログ記事への参照を表現する。
/// `date` はサーバー側で採番する作成日時。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    id:      BlogId,
    title:   String,
    author:  String,
    url:     String,
    likes:   i64,
    date:    DateTime<Utc>,
    user_id: UserId,
}

impl Blog {
    /// 新規ブログを作成する
    ///
    /// `likes` が `None` の場合は 0 で初期化する。
    pub fn new(
        id: BlogId,
        title: String,
        author: String,
        url: String,
        likes: Option<i64>,
        date: DateTime<Utc>,
        user_id: UserId,
    ) -> Self {
        Self {
            id,
            title,
            author,
            url,
            likes: likes.unwrap_or(0),
            date,
            user_id,
        }
    }

    /// 永続化データからエンティティを復元する
    pub fn from_db(
        id: BlogId,
        title: String,
        author: String,
        url: String,
        likes: i64,
        date: DateTime<Utc>,
        user_id: UserId,
    ) -> Self {
        Self {
            id,
            title,
            author,
            url,
            likes,
            date,
            user_id,
        }
    }

    pub fn id(&self) -> &BlogId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn likes(&self) -> i64 {
        self.likes
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}
