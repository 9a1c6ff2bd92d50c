//! # ユースケース層
//!
//! Form Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: メール送信とテンプレート保管を `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは本文の解釈のみ行い、処理はユースケースに集約
//!
//! ## モジュール構成
//!
//! - `notification`: バリデーションから通知送信までの流れ

pub mod notification;

pub use notification::{FormDispatcher, MailDefaults, TemplateRenderer};
