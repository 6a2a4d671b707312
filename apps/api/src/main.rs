//! # BlogList API サーバー
//!
//! ブログリストサービスの HTTP API サーバー。
//!
//! ## 役割
//!
//! - **ブログ管理**: 一覧・取得・作成・更新・削除と一覧集計
//! - **ユーザー管理**: 登録・一覧（パスワードは Argon2id でハッシュ化）
//! - **認証**: ログインによる JWT（HS256）ベアラートークンの発行と検証
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `JWT_SECRET` | **Yes** | トークン署名鍵 |
//! | `TOKEN_TTL_SECS` | No | トークン有効期間（デフォルト: 3600 秒） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! API_PORT=3003 DATABASE_URL=postgres://... JWT_SECRET=... \
//!     cargo run -p bloglist-api
//! ```

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use bloglist_api::{
    app_builder::build_app,
    config::ApiConfig,
    handler::{BlogState, LoginState, ReadinessState, UserState, readiness_check},
    usecase::{BlogUseCaseImpl, LoginUseCaseImpl, UserUseCaseImpl},
};
use bloglist_domain::clock::{Clock, SystemClock};
use bloglist_infra::{
    Argon2PasswordHasher,
    JwtTokenService,
    PasswordHasher,
    TokenService,
    db,
    repository::{
        BlogRepository,
        PostgresBlogRepository,
        PostgresUserRepository,
        UserRepository,
    },
};
use bloglist_shared::observability::TracingConfig;
use tokio::net::TcpListener;

/// API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("api");
    bloglist_shared::observability::init_tracing(tracing_config);

    // 設定読み込み
    let config = ApiConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!("API サーバーを起動します: {}:{}", config.host, config.port);

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("データベース接続に失敗しました");
    tracing::info!("データベースに接続しました");

    // マイグレーション実行
    db::run_migrations(&pool)
        .await
        .expect("マイグレーションの実行に失敗しました");
    tracing::info!("マイグレーションを適用しました");

    // Readiness Check 用 State（pool が move される前に clone）
    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    // 依存コンポーネントを初期化
    let blog_repo: Arc<dyn BlogRepository> = Arc::new(PostgresBlogRepository::new(pool.clone()));
    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool));
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
        config.jwt_secret.as_bytes(),
        config.token_ttl_secs,
    ));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let blog_state = Arc::new(BlogState {
        usecase:       Arc::new(BlogUseCaseImpl::new(
            blog_repo.clone(),
            user_repo.clone(),
            clock.clone(),
        )),
        token_service: token_service.clone(),
    });
    let user_state = Arc::new(UserState {
        usecase: Arc::new(UserUseCaseImpl::new(
            user_repo.clone(),
            blog_repo,
            password_hasher.clone(),
            clock,
        )),
    });
    let login_state = Arc::new(LoginState {
        usecase: Arc::new(LoginUseCaseImpl::new(
            user_repo,
            password_hasher,
            token_service,
        )),
    });

    // ルーター構築
    let app = build_app(blog_state, user_state, login_state).merge(
        Router::new()
            .route("/health/ready", get(readiness_check))
            .with_state(readiness_state),
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
