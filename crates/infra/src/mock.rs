//! # テスト用モック
//!
//! ユースケーステストと HTTP テストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! formrelay-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
   collections::HashMap,
   sync::{Arc, Mutex},
};

use async_trait::async_trait;
use formrelay_domain::notification::{EmailMessage, NotificationError};

use crate::{notification::NotificationSender, template_store::TemplateStore};

// ===== MockNotificationSender =====

/// 送信したメッセージを記録するモック
#[derive(Clone, Default)]
pub struct MockNotificationSender {
   sent: Arc<Mutex<Vec<EmailMessage>>>,
}

impl MockNotificationSender {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn sent_emails(&self) -> Vec<EmailMessage> {
      self.sent.lock().unwrap().clone()
   }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
   async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
      self.sent.lock().unwrap().push(email.clone());
      Ok(())
   }
}

// ===== FailingNotificationSender =====

/// 常に送信に失敗するモック
#[derive(Clone, Default)]
pub struct FailingNotificationSender {
   attempts: Arc<Mutex<usize>>,
}

impl FailingNotificationSender {
   pub fn new() -> Self {
      Self::default()
   }

   /// 送信が試みられた回数
   pub fn attempts(&self) -> usize {
      *self.attempts.lock().unwrap()
   }
}

#[async_trait]
impl NotificationSender for FailingNotificationSender {
   async fn send_email(&self, _email: &EmailMessage) -> Result<(), NotificationError> {
      *self.attempts.lock().unwrap() += 1;
      Err(NotificationError::SendFailed(
         "535 Authentication failed".to_string(),
      ))
   }

   async fn verify_connection(&self) -> Result<(), NotificationError> {
      Err(NotificationError::SendFailed("connection refused".to_string()))
   }
}

// ===== InMemoryTemplateStore =====

/// 名前 → 本文のマップを返すテンプレート保管
#[derive(Clone, Default)]
pub struct InMemoryTemplateStore {
   templates: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryTemplateStore {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn with_template(self, name: &str, source: &str) -> Self {
      self.add_template(name, source);
      self
   }

   pub fn add_template(&self, name: &str, source: &str) {
      self.templates
         .lock()
         .unwrap()
         .insert(name.to_string(), source.to_string());
   }
}

#[async_trait]
impl TemplateStore for InMemoryTemplateStore {
   async fn load(&self, name: &str) -> Result<String, NotificationError> {
      self.templates
         .lock()
         .unwrap()
         .get(name)
         .cloned()
         .ok_or_else(|| NotificationError::TemplateNotFound(name.to_string()))
   }
}
