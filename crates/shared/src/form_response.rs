//! # フォーム API レスポンスエンベロープ
//!
//! フォーム送信 API の統一レスポンス形式
//! `{ "success": bool, "message": string, "errors"?: [string] }` を提供する。

use serde::{Deserialize, Serialize};

/// フォーム送信 API の統一レスポンス型
///
/// 成功・失敗どちらも同じ形で返す。`errors` はバリデーションエラー時のみ
/// 含まれ、それ以外では JSON から省略される。
///
/// ## 使用例
///
/// ```
/// use formrelay_shared::FormResponse;
///
/// let response = FormResponse::ok("Email envoyé avec succès");
/// assert!(response.success);
/// assert!(response.errors.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors:  Option<Vec<String>>,
}

impl FormResponse {
    /// 成功レスポンスを作成する
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors:  None,
        }
    }

    /// エラー一覧を持たない失敗レスポンスを作成する
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors:  None,
        }
    }

    /// バリデーションエラー一覧付きの失敗レスポンスを作成する
    pub fn rejected(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors:  Some(errors),
        }
    }
}
