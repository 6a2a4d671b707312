//! # ログインユースケース
//!
//! パスワード認証とトークン発行を実装する。
//!
//! ## タイミング攻撃対策
//!
//! ユーザーが存在しない場合もダミーハッシュで検証を実行し、
//! 処理時間を均一化する。これによりユーザー名の存在確認を防ぐ。

use std::sync::Arc;

use async_trait::async_trait;
use bloglist_domain::{
    password::{PasswordHash, PlainPassword},
    user::User,
};
use bloglist_infra::{PasswordHasher, TokenService, repository::UserRepository};

use crate::error::ApiError;

/// 認証失敗時の共通メッセージ
///
/// ユーザー名とパスワードのどちらが誤っているかを区別させない。
const INVALID_CREDENTIALS: &str = "ユーザー名またはパスワードが違います";

/// ログイン成功時の出力
#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
    pub user:  User,
}

/// ログインユースケーストレイト
#[async_trait]
pub trait LoginUseCase: Send + Sync {
    /// パスワードを検証し、ベアラートークンを発行する
    ///
    /// # エラー
    ///
    /// - `ApiError::Unauthorized`: ユーザーが存在しない、または
    ///   パスワードが一致しない場合
    async fn login(&self, username: &str, password: &str) -> Result<LoginOutput, ApiError>;
}

/// ログインユースケースの実装
pub struct LoginUseCaseImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_service:   Arc<dyn TokenService>,
}

impl LoginUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_service: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_service,
        }
    }

    /// ダミーハッシュで検証を実行する（タイミング攻撃対策）
    ///
    /// ユーザーが存在しない場合も実際の検証と同等の時間を消費させる。
    fn dummy_verification(&self, password: &PlainPassword) {
        // 有効な Argon2id 形式のダミーハッシュ
        let dummy_hash = PasswordHash::new(
            "$argon2id$v=19$m=65536,t=1,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
        );
        // 結果は使わない
        let _ = self.password_hasher.verify(password, &dummy_hash);
    }
}

#[async_trait]
impl LoginUseCase for LoginUseCaseImpl {
    async fn login(&self, username: &str, password: &str) -> Result<LoginOutput, ApiError> {
        let password = PlainPassword::new(password);

        let Some((user, hash)) = self.user_repository.find_credentials(username).await? else {
            self.dummy_verification(&password);
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        let result = self.password_hasher.verify(&password, &hash)?;
        if result.is_mismatch() {
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.token_service.issue(user.id(), user.username())?;

        Ok(LoginOutput { token, user })
    }
}

#[cfg(test)]
mod tests {
    use bloglist_domain::user::{UserId, Username};
    use bloglist_infra::{Argon2PasswordHasher, JwtTokenService, mock::MockUserRepository};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;

    const TEST_SECRET: &[u8] = b"test-secret-for-login-tests";

    fn create_sut() -> (LoginUseCaseImpl, MockUserRepository, Arc<JwtTokenService>) {
        let users = MockUserRepository::new();
        let token_service = Arc::new(JwtTokenService::new(
            TEST_SECRET,
            JwtTokenService::DEFAULT_TTL_SECS,
        ));
        let sut = LoginUseCaseImpl::new(
            Arc::new(users.clone()),
            Arc::new(Argon2PasswordHasher::new()),
            token_service.clone(),
        );
        (sut, users, token_service)
    }

    fn add_user(users: &MockUserRepository, username: &str, password: &str) -> User {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash(&PlainPassword::new(password)).unwrap();
        let user = User::new(
            UserId::new(),
            Username::new(username).unwrap(),
            None,
            Utc::now(),
        );
        users.add_user(user.clone(), hash);
        user
    }

    #[tokio::test]
    async fn test_正しいパスワードでトークンが発行される() {
        // Given
        let (sut, users, token_service) = create_sut();
        let user = add_user(&users, "mluukkai", "salainen");

        // When
        let output = sut.login("mluukkai", "salainen").await.unwrap();

        // Then: 発行されたトークンは検証でき、該当ユーザーを指す
        assert_eq!(output.user.id(), user.id());
        let claims = token_service.verify(&output.token).unwrap();
        assert_eq!(claims.id, *user.id().as_uuid());
        assert_eq!(claims.username, "mluukkai");
    }

    #[tokio::test]
    async fn test_誤ったパスワードは401() {
        let (sut, users, _) = create_sut();
        add_user(&users, "mluukkai", "salainen");

        let result = sut.login("mluukkai", "wrongpassword").await;

        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_存在しないユーザーは401() {
        let (sut, _, _) = create_sut();

        let result = sut.login("nobody", "salainen").await;

        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }
}
