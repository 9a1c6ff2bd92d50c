//! # 通知
//!
//! 正規化済みの送信内容から通知メールの素材（件名・テンプレート名・コンテキスト）を組み立てる。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`ComposedNotification`] | 通知の素材 | テンプレートに渡す前の件名・テンプレート名・コンテキスト |
//! | [`EmailMessage`] | メールメッセージ | レンダリング後、送信に渡される最終形 |
//! | [`NotificationError`] | 通知エラー | テンプレートの欠落・送信失敗 |
//!
//! ## 設計方針
//!
//! - **受付日時は組み立て時に生成**: 呼び出し元からは受け取らず、[`Clock`] から取得する
//! - **テンプレート分離**: 素材の組み立てとテンプレート展開は分離（TemplateRenderer は form-service）
//! - **未入力は空文字**: 任意項目が未入力でもコンテキストのキーは必ず存在する

use std::sync::Arc;

use chrono::Local;
use thiserror::Error;

use crate::{
    clock::{Clock, format_french_datetime},
    form::{
        ContactForm,
        DEFAULT_PACKAGE_LABEL,
        FormKind,
        FormSubmission,
        PanelsInscriptionForm,
        ReservationForm,
    },
    session_catalog::SessionCatalog,
    template::RenderContext,
};

/// セッションが 1 つも選択されていない場合の要約
pub const NO_SESSION_SUMMARY: &str = "Aucune session sélectionnée";

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// テンプレートが見つからない
    #[error("テンプレート {0} が見つかりません")]
    TemplateNotFound(String),

    /// テンプレートの読み込みに失敗
    #[error("テンプレート {name} の読み込みに失敗: {reason}")]
    TemplateUnreadable { name: String, reason: String },

    /// メールアドレスが不正
    #[error("メールアドレスが不正です: {0}")]
    InvalidAddress(String),

    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 送信元（`Name <address>` 形式も可）
    pub from:      String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
}

/// 通知の素材
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedNotification {
    pub subject:       String,
    pub template_name: String,
    pub context:       RenderContext,
}

impl FormKind {
    /// 通知メールの件名
    pub fn subject(&self) -> &'static str {
        match self {
            Self::Contact => "Nouveau message de contact",
            Self::Reservation => "Nouvelle réservation",
            Self::PanelsInscription => "Nouvelle inscription aux panels",
        }
    }

    /// 通知メールのテンプレート名
    pub fn template_name(&self) -> &'static str {
        self.as_str()
    }
}

/// 通知の素材を組み立てる
pub struct NotificationComposer {
    clock:   Arc<dyn Clock>,
    catalog: &'static SessionCatalog,
}

impl NotificationComposer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_catalog(clock, SessionCatalog::standard())
    }

    pub fn with_catalog(clock: Arc<dyn Clock>, catalog: &'static SessionCatalog) -> Self {
        Self { clock, catalog }
    }

    /// 正規化済みの送信内容から件名・テンプレート名・コンテキストを組み立てる
    pub fn compose(&self, submission: &FormSubmission) -> ComposedNotification {
        let kind = submission.kind();
        let mut context = match submission {
            FormSubmission::Contact(form) => contact_context(form),
            FormSubmission::Reservation(form) => reservation_context(form),
            FormSubmission::PanelsInscription(form) => panels_context(form, self.catalog),
        };
        context.insert(
            "date",
            format_french_datetime(&self.clock.now().with_timezone(&Local)),
        );

        ComposedNotification {
            subject: kind.subject().to_string(),
            template_name: kind.template_name().to_string(),
            context,
        }
    }
}

fn contact_context(form: &ContactForm) -> RenderContext {
    RenderContext::from_iter([
        ("civility", or_empty(&form.civility)),
        ("fullName", form.full_name.clone()),
        ("organization", or_empty(&form.organization)),
        ("country", or_empty(&form.country)),
        ("email", form.email.clone()),
        ("phone", or_empty(&form.phone)),
        ("participationType", or_empty(&form.participation_type)),
        ("message", form.message.clone()),
    ])
}

fn reservation_context(form: &ReservationForm) -> RenderContext {
    let package_label = form
        .participation()
        .map_or(DEFAULT_PACKAGE_LABEL, |p| p.package_label());
    let number_of_people = if form.number_of_people.is_empty() {
        "1".to_string()
    } else {
        form.number_of_people.clone()
    };

    RenderContext::from_iter([
        ("fullName", form.full_name.clone()),
        ("email", form.email.clone()),
        ("phone", or_empty(&form.phone)),
        ("organization", or_empty(&form.organization)),
        ("participationType", form.participation_type.clone()),
        ("package", or_empty(&form.package)),
        ("packageLabel", package_label.to_string()),
        ("numberOfPeople", number_of_people),
    ])
}

fn panels_context(form: &PanelsInscriptionForm, catalog: &SessionCatalog) -> RenderContext {
    RenderContext::from_iter([
        ("firstName", form.first_name.clone()),
        ("lastName", form.last_name.clone()),
        ("fullName", form.full_name()),
        ("email", form.email.clone()),
        ("phone", form.phone.clone()),
        ("organization", form.organization.clone()),
        ("role", form.role.clone()),
        ("country", form.country.clone()),
        ("sessions", session_summary(form, catalog)),
    ])
}

/// 選択セッションの HTML 要約
///
/// 日付ごとに見出しとリストを出力する。カタログの日付は定義順、
/// カタログにない日付はその後ろにキー順で並ぶ。表示名のない ID はそのまま表示する。
pub fn session_summary(form: &PanelsInscriptionForm, catalog: &SessionCatalog) -> String {
    let known = catalog
        .days()
        .iter()
        .filter_map(|day| form.sessions.get(day.key).map(|ids| (day.label, ids)));
    let unknown = form
        .sessions
        .iter()
        .filter(|(key, _)| catalog.day(key).is_none())
        .map(|(key, ids)| (key.as_str(), ids));

    let sections: Vec<String> = known
        .chain(unknown)
        .filter(|(_, ids)| !ids.is_empty())
        .map(|(label, ids)| {
            let items: String = ids
                .iter()
                .map(|id| format!("<li>{}</li>", catalog.session_label(id).unwrap_or(id)))
                .collect();
            format!("<p><strong>{label}</strong></p><ul>{items}</ul>")
        })
        .collect();

    if sections.is_empty() {
        NO_SESSION_SUMMARY.to_string()
    } else {
        sections.join("\n")
    }
}

fn or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
