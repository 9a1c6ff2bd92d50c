//! # Formrelay ドメイン層
//!
//! フォーム送信の検証ルールと通知メールの組み立てを担うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **純粋関数**: バリデーション・テンプレート展開・通知の組み立てはすべて I/O を持たない
//! - **明示的な列挙**: フィールド名やラベルは文字列キーの辞書ではなく enum の網羅的 match で表現
//! - **検証と正規化の分離**: 入力を書き換えず、エラー一覧と正規化済みの値を別々に返す
//!
//! ## 依存関係の方向
//!
//! ```text
//! form-service → infra → domain
//! ```
//!
//! ドメイン層は SMTP やファイルシステムには一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`form`] - フォーム種別と正規化済みの送信内容
//! - [`session_catalog`] - パネルセッションの参照データ
//! - [`validation`] - フォーム種別ごとのバリデーション
//! - [`template`] - `{{name}}` プレースホルダーの展開
//! - [`notification`] - 通知メールの組み立て
//! - [`clock`] - 時刻プロバイダとフランス語ロケールの日時表記
//! - [`error`] - ドメイン層エラー
//!
//! ## 使用例
//!
//! ```rust
//! use formrelay_domain::{form::FormKind, validation::validate};
//!
//! let raw = serde_json::json!({
//!     "email": "jean@example.com",
//!     "fullName": "Jean Dupont",
//!     "message": "Bonjour",
//! });
//!
//! let result = validate(FormKind::Contact, &raw);
//! assert!(result.is_valid);
//! ```

pub mod clock;
pub mod error;
pub mod form;
pub mod notification;
pub mod session_catalog;
pub mod template;
pub mod validation;

pub use error::DomainError;
