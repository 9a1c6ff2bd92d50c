//! # Form Service アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use formrelay_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        FormState,
        health_check,
        method_not_allowed,
        preflight,
        route_not_found,
        submit_contact,
        submit_panels_inscription,
        submit_reservation,
    },
    usecase::FormDispatcher,
};

/// ルーターを構築する
///
/// フォームルートは POST と OPTIONS のみ受け付け、それ以外は 405 を返す。
pub fn build_app(dispatcher: FormDispatcher) -> Router {
    let form_state = Arc::new(FormState { dispatcher });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/contact",
            post(submit_contact)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/reservation",
            post(submit_reservation)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/panels-inscription",
            post(submit_panels_inscription)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .fallback(route_not_found)
        .with_state(form_state)
        // レイヤー順序: 下に書いたものが外側
        // 1. CorsLayer（最外）: プリフライトに応答し、全レスポンスに CORS ヘッダーを付与
        // 2. SetRequestIdLayer: UUID v7 を生成（またはクライアント提供値を使用）
        // 3. TraceLayer: カスタムスパンに request_id を含め、全ログに自動注入
        // 4. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors)
}
