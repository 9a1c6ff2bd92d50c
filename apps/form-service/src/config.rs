//! # Form Service 設定
//!
//! 環境変数からフォーム受付サーバーの設定を読み込む。
//!
//! 読み込みは起動時に 1 度だけ行い、以降は変更しない。
//! 環境変数の参照は関数として注入できるため、テストでは
//! プロセスの環境変数を書き換えずに検証できる。

use std::{env, fmt, path::PathBuf};

use formrelay_infra::SmtpSettings;
use thiserror::Error;

use crate::usecase::notification::MailDefaults;

/// 設定エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("環境変数 {0} が設定されていません")]
    Missing(&'static str),

    /// 値が不正
    #[error("環境変数 {var} の値が不正です: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Form Service サーバーの設定
#[derive(Debug, Clone)]
pub struct FormServiceConfig {
    /// バインドアドレス
    pub host:          String,
    /// ポート番号
    pub port:          u16,
    /// テンプレート（`<name>.html`）のディレクトリ
    pub templates_dir: PathBuf,
    /// メール設定
    pub mail:          MailConfig,
}

/// メール送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailBackend {
    /// SMTP サーバー経由で送信
    Smtp,
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// メール設定
///
/// `Debug` 出力ではパスワードを伏せる。
#[derive(Clone)]
pub struct MailConfig {
    pub backend:  MailBackend,
    pub host:     String,
    pub port:     u16,
    /// true: 暗黙 TLS、false: STARTTLS
    pub secure:   bool,
    pub user:     String,
    pub password: String,
    /// 通知の宛先（未設定なら `MAIL_USER`）
    pub to:       String,
    /// 通知の送信元（未設定なら `Formrelay <MAIL_USER>`）
    pub from:     String,
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("backend", &self.backend)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("to", &self.to)
            .field("from", &self.from)
            .finish()
    }
}

impl FormServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 空文字列の値は未設定として扱う。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            host:          get("FORM_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port:          parse_port("FORM_PORT", get("FORM_PORT"), 3001)?,
            templates_dir: get("TEMPLATES_DIR")
                .map_or_else(|| PathBuf::from("templates"), PathBuf::from),
            mail:          MailConfig::from_lookup(get)?,
        })
    }

    /// 待ち受けアドレス
    ///
    /// ホスト名は解決前の文字列のまま渡す（`localhost` や `::` もそのまま使える）。
    pub fn listen_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

impl MailConfig {
    fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match get("MAIL_BACKEND").as_deref() {
            None | Some("smtp") => MailBackend::Smtp,
            Some("noop") => MailBackend::Noop,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var:   "MAIL_BACKEND",
                    value: other.to_string(),
                });
            }
        };
        let user = get("MAIL_USER").ok_or(ConfigError::Missing("MAIL_USER"))?;
        let password = get("MAIL_PASS").ok_or(ConfigError::Missing("MAIL_PASS"))?;

        Ok(Self {
            backend,
            host: get("MAIL_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
            port: parse_port("MAIL_PORT", get("MAIL_PORT"), 587)?,
            secure: get("MAIL_SECURE").is_some_and(|v| v == "true"),
            to: get("MAIL_TO").unwrap_or_else(|| user.clone()),
            from: get("MAIL_FROM").unwrap_or_else(|| format!("Formrelay <{user}>")),
            user,
            password,
        })
    }

    /// SMTP 送信の接続設定
    pub fn smtp_settings(&self) -> SmtpSettings {
        SmtpSettings {
            host:     self.host.clone(),
            port:     self.port,
            secure:   self.secure,
            username: self.user.clone(),
            password: self.password.clone(),
        }
    }

    /// 通知メールの既定の宛先・送信元
    pub fn defaults(&self) -> MailDefaults {
        MailDefaults {
            to:   self.to.clone(),
            from: self.from.clone(),
        }
    }
}

fn parse_port(var: &'static str, value: Option<String>, default: u16) -> Result<u16, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}
