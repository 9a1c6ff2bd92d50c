//! # フォーム API の統合テスト
//!
//! 実際のルーター（`build_app`）に `tower::ServiceExt::oneshot` でリクエストを送り、
//! ステータスコード・本文・ヘッダーを検証する。
//!
//! メール送信とテンプレート保管はインメモリのモックに差し替える。

use std::sync::Arc;

use axum::{Router, body::Body};
use chrono::{TimeZone, Utc};
use formrelay_domain::{clock::FixedClock, notification::NotificationComposer};
use formrelay_form_service::{
    build_app,
    usecase::{FormDispatcher, MailDefaults, TemplateRenderer},
};
use formrelay_infra::{
    NotificationSender,
    mock::{FailingNotificationSender, InMemoryTemplateStore, MockNotificationSender},
};
use http::{Method, Request, StatusCode, header};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value as JsonValue, json};
use tower::ServiceExt;

fn templates() -> InMemoryTemplateStore {
    InMemoryTemplateStore::new()
        .with_template("contact", "<p>{{fullName}} : {{message}}</p>")
        .with_template("reservation", "<p>{{packageLabel}} {{package}}</p>")
        .with_template("panels-inscription", "{{sessions}}")
}

fn test_app(sender: Arc<dyn NotificationSender>) -> Router {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap());
    let dispatcher = FormDispatcher::new(
        sender,
        TemplateRenderer::new(Arc::new(templates())),
        NotificationComposer::new(Arc::new(clock)),
        MailDefaults {
            to:   "equipe@example.com".to_string(),
            from: "Formrelay <relay@example.com>".to_string(),
        },
    );
    build_app(dispatcher)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "https://forum.example.com")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> JsonValue {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn valid_contact() -> String {
    json!({
        "fullName": "Jean Dupont",
        "email": "jean@example.com",
        "message": "Bonjour",
    })
    .to_string()
}

#[tokio::test]
async fn test_有効なcontactは200で成功を返す() {
    let sender = MockNotificationSender::new();
    let app = test_app(Arc::new(sender.clone()));

    let response = app
        .oneshot(post_json("/api/contact", &valid_contact()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
    assert_eq!(
        json_body(response).await,
        json!({ "success": true, "message": "Email envoyé avec succès" })
    );
    let sent = sender.sent_emails();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "equipe@example.com");
    assert_eq!(sent[0].html_body, "<p>Jean Dupont : Bonjour</p>");
}

#[tokio::test]
async fn test_バリデーション失敗は400でエラー一覧を返す() {
    let sender = MockNotificationSender::new();
    let app = test_app(Arc::new(sender.clone()));
    let body = json!({
        "fullName": "Marie Martin",
        "email": "marie@example.com",
        "participationType": "exposant",
        "numberOfPeople": "0",
    });

    let response = app
        .oneshot(post_json("/api/reservation", &body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({
            "success": false,
            "message": "Erreurs de validation",
            "errors": [
                "Le nombre de personnes doit être un nombre valide supérieur à 0",
                "Le stand est requis pour les exposants",
            ],
        })
    );
    assert!(sender.sent_emails().is_empty());
}

#[tokio::test]
async fn test_同時開催セッションの重複は400() {
    let app = test_app(Arc::new(MockNotificationSender::new()));
    let body = json!({
        "firstName": "Awa",
        "lastName": "Ndiaye",
        "email": "awa@example.sn",
        "phone": "+221 77 000 00 00",
        "organization": "Teranga Tech",
        "role": "Directrice",
        "country": "Sénégal",
        "sessions": { "jour3": ["j3-1", "j3-2"] },
    });

    let response = app
        .oneshot(post_json("/api/panels-inscription", &body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["errors"],
        json!([
            "Vous ne pouvez pas vous inscrire à plusieurs sessions simultanées le matin du jour 3"
        ])
    );
}

#[tokio::test]
async fn test_送信失敗は500で固定文言のみ返す() {
    let app = test_app(Arc::new(FailingNotificationSender::new()));

    let response = app
        .oneshot(post_json("/api/contact", &valid_contact()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({
            "success": false,
            "message": "Une erreur est survenue lors de l'envoi de l'email",
        })
    );
}

#[rstest]
#[case(Method::GET)]
#[case(Method::PUT)]
#[case(Method::DELETE)]
#[tokio::test]
async fn test_post以外のメソッドは405(#[case] method: Method) {
    let app = test_app(Arc::new(MockNotificationSender::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri("/api/reservation")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        json_body(response).await,
        json!({ "success": false, "message": "Méthode non autorisée. Utilisez POST." })
    );
}

#[tokio::test]
async fn test_プリフライトは200でcorsヘッダーを返す() {
    let app = test_app(Arc::new(MockNotificationSender::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/contact")
                .header(header::ORIGIN, "https://forum.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    let methods = headers
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"), "{methods}");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_プリフライト以外のoptionsも200() {
    let app = test_app(Arc::new(MockNotificationSender::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/panels-inscription")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[case("{pas du json")]
#[case("[\"contact\"]")]
#[tokio::test]
async fn test_jsonオブジェクト以外の本文は400(#[case] body: &str) {
    let sender = MockNotificationSender::new();
    let app = test_app(Arc::new(sender.clone()));

    let response = app
        .oneshot(post_json("/api/contact", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({
            "success": false,
            "message": "Données invalides. Un objet JSON est attendu.",
        })
    );
    assert!(sender.sent_emails().is_empty());
}

#[tokio::test]
async fn test_空の本文は必須項目のエラーになる() {
    let app = test_app(Arc::new(MockNotificationSender::new()));

    let response = app.oneshot(post_json("/api/contact", "")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["errors"],
        json!([
            "Le champ email est requis",
            "Le champ nom complet est requis",
            "Le champ message est requis",
        ])
    );
}

#[tokio::test]
async fn test_未定義のルートは404() {
    let app = test_app(Arc::new(MockNotificationSender::new()));

    let response = app
        .oneshot(post_json("/api/inconnu", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({ "success": false, "message": "Route non trouvée" })
    );
}

#[tokio::test]
async fn test_ヘルスチェック() {
    let app = test_app(Arc::new(MockNotificationSender::new()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "status": "healthy", "version": env!("CARGO_PKG_VERSION") })
    );
}

#[tokio::test]
async fn test_自動生成のx_request_idがuuid_v7形式である() {
    let app = test_app(Arc::new(MockNotificationSender::new()));

    let response = app
        .oneshot(post_json("/api/contact", &valid_contact()))
        .await
        .unwrap();

    let request_id = response
        .headers()
        .get("x-request-id")
        .unwrap()
        .to_str()
        .unwrap();
    let uuid = uuid::Uuid::parse_str(request_id)
        .unwrap_or_else(|_| panic!("有効な UUID であること: {request_id}"));
    assert_eq!(uuid.get_version(), Some(uuid::Version::SortRand));
}
