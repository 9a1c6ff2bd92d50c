//! # ドメイン層エラー定義
//!
//! 参照データの不整合など、ドメインの前提が崩れた状態を表現するエラー型。
//!
//! フォーム入力の誤りはエラー型ではなく
//! [`ValidationResult`](crate::validation::ValidationResult) のエラー一覧で表現する。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// セッションカタログの不整合
    ///
    /// 同時開催グループに、その日の有効なセッションに含まれない ID がある場合など。
    #[error("セッションカタログが不正です: {0}")]
    InvalidCatalog(String),
}
