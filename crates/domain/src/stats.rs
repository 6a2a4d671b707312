//! # ブログ一覧の集計ヘルパ
//!
//! メモリ上のブログ一覧に対する純粋な集計関数を提供する。
//!
//! ## 設計方針
//!
//! - 空の一覧に対しては `0` や未定義動作ではなく、`None` を返して
//!   「結果なし」を型で表現する
//! - タイブレークは決定的に行う（[`favorite_blog`], [`most_blogs`] を参照）

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::blog::Blog;

/// 最多投稿者の集計結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MostBlogs {
    /// 著者名
    pub author: String,
    /// 投稿数
    pub blogs:  usize,
}

/// 全ブログの likes の合計を返す
///
/// 空の一覧に対しては 0 を返す。
pub fn total_likes(blogs: &[Blog]) -> i64 {
    blogs.iter().map(Blog::likes).sum()
}

/// likes が最大のブログを返す
///
/// 空の一覧に対しては `None` を返す。
/// likes が同数の場合は一覧の後方の要素を採用する。
pub fn favorite_blog(blogs: &[Blog]) -> Option<&Blog> {
    blogs.iter().max_by_key(|blog| blog.likes())
}

/// 投稿数が最も多い著者とその投稿数を返す
///
/// 空の一覧に対しては `None` を返す。
/// 投稿数が同数の場合は辞書順で最小の著者名を採用する。
pub fn most_blogs(blogs: &[Blog]) -> Option<MostBlogs> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for blog in blogs {
        *counts.entry(blog.author()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|(author_a, count_a), (author_b, count_b)| {
            // 投稿数が多い方を優先、同数なら辞書順で小さい著者名を優先
            count_a.cmp(count_b).then_with(|| author_b.cmp(author_a))
        })
        .map(|(author, blogs)| MostBlogs {
            author: author.to_string(),
            blogs,
        })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{blog::BlogId, user::UserId};

    fn blog(author: &str, likes: i64) -> Blog {
        Blog::new(
            BlogId::new(),
            format!("{author} の記事"),
            author.to_string(),
            "https://example.com".to_string(),
            Some(likes),
            Utc::now(),
            UserId::new(),
        )
    }

    // ===== total_likes =====

    #[rstest]
    fn test_total_likesは全likesの合計を返す() {
        let blogs = vec![blog("a", 0), blog("b", 5), blog("c", 3)];
        assert_eq!(total_likes(&blogs), 8);
    }

    #[rstest]
    fn test_total_likesは空の一覧で0を返す() {
        assert_eq!(total_likes(&[]), 0);
    }

    #[rstest]
    fn test_total_likesは要素が1つならその値を返す() {
        let blogs = vec![blog("a", 7)];
        assert_eq!(total_likes(&blogs), 7);
    }

    // ===== favorite_blog =====

    #[rstest]
    fn test_favorite_blogはlikes最大の要素を返す() {
        let blogs = vec![blog("a", 2), blog("b", 10), blog("c", 3)];
        let favorite = favorite_blog(&blogs).unwrap();
        assert_eq!(favorite.likes(), 10);
        assert_eq!(favorite.author(), "b");
    }

    #[rstest]
    fn test_favorite_blogは空の一覧でnoneを返す() {
        assert!(favorite_blog(&[]).is_none());
    }

    #[rstest]
    fn test_favorite_blogは同数の場合後方の要素を返す() {
        let blogs = vec![blog("first", 5), blog("second", 5)];
        assert_eq!(favorite_blog(&blogs).unwrap().author(), "second");
    }

    // ===== most_blogs =====

    #[rstest]
    fn test_most_blogsは最多投稿者と投稿数を返す() {
        let blogs = vec![blog("a", 1), blog("b", 2), blog("a", 3)];
        assert_eq!(
            most_blogs(&blogs),
            Some(MostBlogs {
                author: "a".to_string(),
                blogs:  2,
            })
        );
    }

    #[rstest]
    fn test_most_blogsは空の一覧でnoneを返す() {
        assert!(most_blogs(&[]).is_none());
    }

    #[rstest]
    fn test_most_blogsは同数の場合辞書順最小の著者を返す() {
        let blogs = vec![blog("zeta", 1), blog("alpha", 1)];
        assert_eq!(
            most_blogs(&blogs),
            Some(MostBlogs {
                author: "alpha".to_string(),
                blogs:  1,
            })
        );
    }
}
