//! # テンプレート保管
//!
//! 名前を指定してテンプレート本文（生テキスト）を取り出す。
//! 展開は行わない（`formrelay_domain::template` の責務）。
//!
//! ファイルシステム実装は `{dir}/{name}.html` を読み込む。
//! 名前にパス区切りや `..` を含む場合は、ディレクトリ外を読まないよう
//! 存在しないテンプレートとして扱う。

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use formrelay_domain::notification::NotificationError;

/// テンプレートファイルの拡張子
const TEMPLATE_EXTENSION: &str = "html";

/// テンプレート保管トレイト
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// 名前に対応するテンプレート本文を返す
    async fn load(&self, name: &str) -> Result<String, NotificationError>;
}

/// ディレクトリ配下の HTML ファイルを読むテンプレート保管
#[derive(Debug, Clone)]
pub struct FsTemplateStore {
    dir: PathBuf,
}

impl FsTemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> Option<PathBuf> {
        let is_plain_name = !name.is_empty()
            && !name.contains(['/', '\\'])
            && name != "."
            && name != "..";
        is_plain_name.then(|| self.dir.join(format!("{name}.{TEMPLATE_EXTENSION}")))
    }
}

#[async_trait]
impl TemplateStore for FsTemplateStore {
    async fn load(&self, name: &str) -> Result<String, NotificationError> {
        let path = self
            .path_for(name)
            .ok_or_else(|| NotificationError::TemplateNotFound(name.to_string()))?;

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => NotificationError::TemplateNotFound(name.to_string()),
                _ => NotificationError::TemplateUnreadable {
                    name:   name.to_string(),
                    reason: e.to_string(),
                },
            })
    }
}
