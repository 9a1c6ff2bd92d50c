//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! `secure` が有効なら接続直後から TLS（暗黙 TLS）、無効なら STARTTLS で暗号化する。

use std::fmt;

use async_trait::async_trait;
use formrelay_domain::notification::{EmailMessage, NotificationError};
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use super::NotificationSender;

/// SMTP 接続設定
#[derive(Clone)]
pub struct SmtpSettings {
    pub host:     String,
    pub port:     u16,
    /// true: 暗黙 TLS、false: STARTTLS
    pub secure:   bool,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// 送信元・宛先はメッセージごとに [`EmailMessage`] から受け取る。
pub struct SmtpNotificationSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// 接続はこの時点では行わない（最初の送信時、または
    /// [`NotificationSender::verify_connection`] で確立される）。
    pub fn new(settings: &SmtpSettings) -> Result<Self, NotificationError> {
        let builder = if settings.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
        }
        .map_err(|e| NotificationError::SendFailed(format!("SMTP トランスポート構築失敗: {e}")))?;

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self { transport })
    }
}

/// メッセージを組み立てる（HTML 単一パート）
fn build_message(email: &EmailMessage) -> Result<Message, NotificationError> {
    let from: Mailbox = email.from.parse().map_err(|e| {
        NotificationError::InvalidAddress(format!("送信元アドレス不正 ({}): {e}", email.from))
    })?;
    let to: Mailbox = email.to.parse().map_err(|e| {
        NotificationError::InvalidAddress(format!("宛先アドレス不正 ({}): {e}", email.to))
    })?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(&email.subject)
        .singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_HTML)
                .body(email.html_body.clone()),
        )
        .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let message = build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(())
    }

    async fn verify_connection(&self) -> Result<(), NotificationError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(NotificationError::SendFailed(
                "SMTP サーバーが応答しません".to_string(),
            )),
            Err(e) => Err(NotificationError::SendFailed(format!("SMTP 接続確認失敗: {e}"))),
        }
    }
}
