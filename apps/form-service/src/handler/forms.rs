//! # フォーム送信ハンドラ
//!
//! ## エンドポイント
//!
//! ```text
//! POST    /api/contact
//! POST    /api/reservation
//! POST    /api/panels-inscription
//! OPTIONS /api/*             → 200（CORS ヘッダーのみ）
//! その他のメソッド            → 405
//! ```
//!
//! 本文は生のバイト列として受け取り、JSON オブジェクトであることだけを確認する。
//! 空の本文は空オブジェクトとして扱う（必須項目のバリデーションエラーになる）。

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use formrelay_domain::form::FormKind;
use formrelay_shared::FormResponse;
use serde_json::{Map, Value as JsonValue};

use crate::{error::FormError, usecase::FormDispatcher};

/// フォーム送信ハンドラの State
pub struct FormState {
    pub dispatcher: FormDispatcher,
}

/// POST /api/contact
pub async fn submit_contact(
    State(state): State<Arc<FormState>>,
    body: Bytes,
) -> Result<Json<FormResponse>, FormError> {
    submit(&state, FormKind::Contact, &body).await
}

/// POST /api/reservation
pub async fn submit_reservation(
    State(state): State<Arc<FormState>>,
    body: Bytes,
) -> Result<Json<FormResponse>, FormError> {
    submit(&state, FormKind::Reservation, &body).await
}

/// POST /api/panels-inscription
pub async fn submit_panels_inscription(
    State(state): State<Arc<FormState>>,
    body: Bytes,
) -> Result<Json<FormResponse>, FormError> {
    submit(&state, FormKind::PanelsInscription, &body).await
}

/// OPTIONS（プリフライト以外も含む）には本文なしの 200 を返す
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// フォームルートで POST / OPTIONS 以外のメソッド
pub async fn method_not_allowed() -> FormError {
    FormError::MethodNotAllowed
}

/// 未定義のルート
pub async fn route_not_found() -> FormError {
    FormError::NotFound
}

async fn submit(
    state: &FormState,
    kind: FormKind,
    body: &[u8],
) -> Result<Json<FormResponse>, FormError> {
    let raw = parse_body(body)?;

    state.dispatcher.dispatch(kind, &raw).await.map(Json)
}

/// 本文を JSON オブジェクトとして解釈する
fn parse_body(body: &[u8]) -> Result<JsonValue, FormError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(JsonValue::Object(Map::new()));
    }

    match serde_json::from_slice(body) {
        Ok(value @ JsonValue::Object(_)) => Ok(value),
        _ => Err(FormError::InvalidPayload),
    }
}
