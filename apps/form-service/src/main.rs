//! # Form Service サーバー
//!
//! Web サイトのフォーム送信を受け付け、検証して通知メールを送る。
//!
//! ## 役割
//!
//! - **バリデーション**: フォーム種別ごとのルールで送信内容を検証
//! - **通知**: テンプレートから HTML メールを組み立てて SMTP で送信
//!
//! 送信内容は保存しない。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `FORM_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `FORM_PORT` | No | ポート番号（デフォルト: `3001`） |
//! | `TEMPLATES_DIR` | No | テンプレートのディレクトリ（デフォルト: `templates`） |
//! | `MAIL_BACKEND` | No | `smtp` または `noop`（デフォルト: `smtp`） |
//! | `MAIL_HOST` | No | SMTP ホスト（デフォルト: `smtp.gmail.com`） |
//! | `MAIL_PORT` | No | SMTP ポート（デフォルト: `587`） |
//! | `MAIL_SECURE` | No | `true` で暗黙 TLS、それ以外は STARTTLS |
//! | `MAIL_USER` | **Yes** | SMTP ユーザー（既定の送信元・宛先） |
//! | `MAIL_PASS` | **Yes** | SMTP パスワード |
//! | `MAIL_TO` | No | 通知の宛先（デフォルト: `MAIL_USER`） |
//! | `MAIL_FROM` | No | 通知の送信元（デフォルト: `Formrelay <MAIL_USER>`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # ローカル確認（メールは送らずログ出力のみ）
//! MAIL_BACKEND=noop MAIL_USER=dev@example.com MAIL_PASS=dev cargo run -p formrelay-form-service
//! ```

use std::sync::Arc;

use formrelay_domain::{clock::SystemClock, notification::NotificationComposer};
use formrelay_form_service::{
    build_app,
    config::{FormServiceConfig, MailBackend},
    usecase::{FormDispatcher, TemplateRenderer},
};
use formrelay_infra::{
    FsTemplateStore,
    NoopNotificationSender,
    NotificationSender,
    SmtpNotificationSender,
};
use formrelay_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Form Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(TracingConfig::from_env("form-service"));
    let _tracing_guard = tracing::info_span!("app", service = "form-service").entered();

    // 設定読み込み
    let config = FormServiceConfig::from_env()?;
    tracing::debug!(?config, "設定を読み込みました");

    tracing::info!(
        "Form Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // メール送信の初期化
    let sender: Arc<dyn NotificationSender> = match config.mail.backend {
        MailBackend::Smtp => Arc::new(SmtpNotificationSender::new(&config.mail.smtp_settings())?),
        MailBackend::Noop => {
            tracing::warn!("MAIL_BACKEND=noop: メールは送信されません");
            Arc::new(NoopNotificationSender)
        }
    };

    // 接続確認に失敗しても起動は継続する
    match sender.verify_connection().await {
        Ok(()) => tracing::info!("メール送信の接続を確認しました"),
        Err(e) => tracing::warn!(error = %e, "メール送信の接続確認に失敗しました"),
    }

    // 依存コンポーネントを初期化
    let template_store = FsTemplateStore::new(config.templates_dir.clone());
    let renderer = TemplateRenderer::new(Arc::new(template_store));
    let composer = NotificationComposer::new(Arc::new(SystemClock));
    let dispatcher = FormDispatcher::new(sender, renderer, composer, config.mail.defaults());

    let app = build_app(dispatcher);

    let listener = TcpListener::bind(config.listen_addr()).await?;
    tracing::info!(
        "Form Service サーバーが起動しました: {}",
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;

    Ok(())
}
