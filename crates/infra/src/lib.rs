//! # Formrelay インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはフォーム受付の外部協調者（メール送信・テンプレート保管）を
//! trait で抽象化し、その具体的な実装を提供する。外部システムの詳細を
//! カプセル化し、ドメイン層をインフラの変更から保護する。
//!
//! ## 依存関係
//!
//! ```text
//! form-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`notification`] - メール送信（SMTP / Noop）
//! - [`template_store`] - テンプレート本文の読み込み
//! - `mock` - テスト用のインメモリ実装（`test-utils` feature）

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
pub mod template_store;

pub use notification::{
    NoopNotificationSender,
    NotificationSender,
    SmtpNotificationSender,
    SmtpSettings,
};
pub use template_store::{FsTemplateStore, TemplateStore};
