//! # フォームディスパッチャー
//!
//! バリデーション → 通知の組み立て → テンプレート展開 → メール送信を統合する。
//!
//! ## 設計方針
//!
//! - **送信完了まで待つ**: メール送信の完了を待ってから結果を返す（fire-and-forget にしない）
//! - **再送しない**: 送信失敗はリクエストごとに 1 度だけ報告する
//! - **詳細はログへ**: 内部エラーの内容はログにのみ出力し、レスポンスには固定の文言を返す

use std::sync::Arc;

use formrelay_domain::{
    form::FormKind,
    notification::{EmailMessage, NotificationComposer},
    validation::validate,
};
use formrelay_infra::NotificationSender;
use formrelay_shared::{
    FormResponse,
    event_log::{error, event},
    log_business_event,
};
use serde_json::Value as JsonValue;

use super::TemplateRenderer;
use crate::error::FormError;

/// 通知メールの宛先・送信元
///
/// 値は起動時の設定（`MAIL_TO` / `MAIL_FROM`、未設定なら `MAIL_USER`）で決まる。
/// 送信内容の項目で上書きする手段はない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDefaults {
    pub to:   String,
    pub from: String,
}

/// 送信成功時の文言
pub fn success_message(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Contact | FormKind::Reservation => "Email envoyé avec succès",
        FormKind::PanelsInscription => "Inscription aux panels enregistrée avec succès",
    }
}

/// フォームディスパッチャー
pub struct FormDispatcher {
    sender:   Arc<dyn NotificationSender>,
    renderer: TemplateRenderer,
    composer: NotificationComposer,
    defaults: MailDefaults,
}

impl FormDispatcher {
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        renderer: TemplateRenderer,
        composer: NotificationComposer,
        defaults: MailDefaults,
    ) -> Self {
        Self {
            sender,
            renderer,
            composer,
            defaults,
        }
    }

    /// 送信内容を処理し、レスポンス本文を返す
    ///
    /// 失敗はすべて [`FormError::to_response`] の本文に変換される。
    pub async fn handle(&self, kind: FormKind, raw: &JsonValue) -> FormResponse {
        self.dispatch(kind, raw)
            .await
            .unwrap_or_else(|e| e.to_response())
    }

    /// 送信内容を検証し、通知メールを送信する
    ///
    /// バリデーションに失敗した場合は送信を試みない。
    pub async fn dispatch(&self, kind: FormKind, raw: &JsonValue) -> Result<FormResponse, FormError> {
        let result = validate(kind, raw);
        if !result.is_valid {
            log_business_event!(
                event.category = event::category::FORM,
                event.action = event::action::FORM_REJECTED,
                event.result = event::result::FAILURE,
                form.kind = kind.as_str(),
                form.error_count = result.errors.len(),
                "フォームのバリデーションに失敗"
            );
            return Err(FormError::Validation(result.errors));
        }

        let composed = self.composer.compose(&result.normalized);

        // テンプレート展開
        let html_body = match self
            .renderer
            .render(&composed.template_name, &composed.context)
            .await
        {
            Ok(html) => html,
            Err(e) => {
                tracing::error!(
                    error.category = error::category::RESOURCE,
                    error.kind = error::kind::TEMPLATE,
                    error = %e,
                    form.kind = kind.as_str(),
                    template = %composed.template_name,
                    "通知テンプレートのレンダリングに失敗"
                );
                return Err(FormError::Notification { kind, source: e });
            }
        };

        let email = EmailMessage {
            to: self.defaults.to.clone(),
            from: self.defaults.from.clone(),
            subject: composed.subject,
            html_body,
        };

        // メール送信
        match self.sender.send_email(&email).await {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.result = event::result::SUCCESS,
                    form.kind = kind.as_str(),
                    notification.recipient = %email.to,
                    "通知メール送信成功"
                );
                Ok(FormResponse::ok(success_message(kind)))
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.result = event::result::FAILURE,
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::MAIL_TRANSPORT,
                    form.kind = kind.as_str(),
                    notification.recipient = %email.to,
                    error = %e,
                    "通知メール送信失敗"
                );
                Err(FormError::Notification { kind, source: e })
            }
        }
    }
}
