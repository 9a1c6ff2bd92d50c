//! # Form Service ライブラリ
//!
//! フォーム受付サーバーのコアモジュール。
//! 統合テストからルーターを構築できるよう公開する。
//!
//! ## モジュール構成
//!
//! - `app_builder`: ルーターとレイヤーの構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: エラーと HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `usecase`: バリデーションから通知送信までの流れ

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;

pub use app_builder::build_app;
