//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **2 つの実装**: SMTP（本番用）、Noop（ローカル確認用）
//! - **環境変数切替**: `MAIL_BACKEND` でランタイム選択
//! - **再送しない**: 送信失敗はそのまま呼び出し元に返す

mod noop;
mod smtp;

use async_trait::async_trait;
use formrelay_domain::notification::{EmailMessage, NotificationError};
pub use noop::NoopNotificationSender;
pub use smtp::{SmtpNotificationSender, SmtpSettings};

/// メール送信トレイト
///
/// 通知基盤の中核。メール送信の具体的な方法を抽象化する。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;

    /// 送信先サーバーへの接続を確認する
    ///
    /// 起動時に 1 度だけ呼ばれる。接続を持たない実装は常に成功する。
    async fn verify_connection(&self) -> Result<(), NotificationError> {
        Ok(())
    }
}
