//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは本文の解釈のみ行い、処理は [`crate::usecase::FormDispatcher`] に委譲

pub mod forms;
pub mod health;

pub use forms::{
    FormState,
    method_not_allowed,
    preflight,
    route_not_found,
    submit_contact,
    submit_panels_inscription,
    submit_reservation,
};
pub use health::health_check;
