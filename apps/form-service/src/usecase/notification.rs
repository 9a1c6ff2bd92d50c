//! # 通知ユースケース
//!
//! 受け付けたフォームを検証し、通知メールを組み立てて送信する。

mod dispatcher;
mod template_renderer;

pub use dispatcher::{FormDispatcher, MailDefaults, success_message};
pub use template_renderer::TemplateRenderer;
