//! # Form Service エラー定義
//!
//! フォーム受付で発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! 呼び出し元に詳細を返すのはバリデーションエラーのみ。
//! テンプレートやメール送信の失敗は固定の文言に置き換え、内部のエラー内容は返さない。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use formrelay_domain::{form::FormKind, notification::NotificationError};
use formrelay_shared::FormResponse;
use thiserror::Error;

const VALIDATION_FAILED: &str = "Erreurs de validation";
const INVALID_PAYLOAD: &str = "Données invalides. Un objet JSON est attendu.";
const METHOD_NOT_ALLOWED: &str = "Méthode non autorisée. Utilisez POST.";
const ROUTE_NOT_FOUND: &str = "Route non trouvée";

/// Form Service で発生するエラー
#[derive(Debug, Error)]
pub enum FormError {
    /// バリデーションエラー（エラー一覧をそのまま返す）
    #[error("バリデーションエラー: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// 本文が JSON オブジェクトではない
    #[error("本文が JSON オブジェクトではありません")]
    InvalidPayload,

    /// POST 以外のメソッド
    #[error("許可されていないメソッド")]
    MethodNotAllowed,

    /// 存在しないルート
    #[error("ルートが見つかりません")]
    NotFound,

    /// テンプレートの読み込み、またはメール送信に失敗
    #[error("{kind} の通知に失敗: {source}")]
    Notification {
        kind:   FormKind,
        #[source]
        source: NotificationError,
    },
}

impl FormError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidPayload => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Notification { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 呼び出し元に返す本文
    pub fn to_response(&self) -> FormResponse {
        match self {
            Self::Validation(errors) => FormResponse::rejected(VALIDATION_FAILED, errors.clone()),
            Self::InvalidPayload => FormResponse::failure(INVALID_PAYLOAD),
            Self::MethodNotAllowed => FormResponse::failure(METHOD_NOT_ALLOWED),
            Self::NotFound => FormResponse::failure(ROUTE_NOT_FOUND),
            Self::Notification { kind, .. } => FormResponse::failure(failure_message(*kind)),
        }
    }
}

/// 通知失敗時の固定文言
pub fn failure_message(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Contact | FormKind::Reservation => {
            "Une erreur est survenue lors de l'envoi de l'email"
        }
        FormKind::PanelsInscription => {
            "Une erreur est survenue lors de l'enregistrement de l'inscription"
        }
    }
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_response())).into_response()
    }
}
