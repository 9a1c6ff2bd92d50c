//! # テンプレート展開
//!
//! `{{name}}` 形式のプレースホルダーを含むテキストを、コンテキストの値で置き換える。
//!
//! ## 設計方針
//!
//! - **1 パス**: テキストを 1 度だけ走査してプレースホルダーの位置を抽出し、位置で置き換える
//! - **再展開しない**: 置き換えた値に `{{...}}` が含まれていても、それ以上展開しない
//! - **キーがなければそのまま**: コンテキストにないプレースホルダーはトークンごと残す
//! - **キーがあれば空文字でも置換**: 値が空文字列の場合はトークンが消える
//!
//! 名前は大文字小文字を区別し、`{{` と `}}` の間の文字列をそのまま名前とする。

use std::{collections::BTreeMap, ops::Range};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// レンダリングコンテキスト（プレースホルダー名 → 値）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    values: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RenderContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// プレースホルダーの位置
#[derive(Debug, Clone, PartialEq, Eq)]
struct Placeholder {
    /// `{{` から `}}` までを含む範囲
    token: Range<usize>,
    /// 名前部分の範囲
    name:  Range<usize>,
}

/// 解析済みテンプレート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source:       String,
    placeholders: Vec<Placeholder>,
}

impl Template {
    /// テキストを走査してプレースホルダーを抽出する
    ///
    /// `{{{name}}}` のように開き括弧が重なる場合は、`}}` に最も近い `{{` を採用する。
    /// 閉じられていない `{{` は通常のテキストとして扱う。
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut placeholders = Vec::new();
        let mut cursor = 0;

        while let Some(found) = source[cursor..].find(OPEN) {
            let candidate = cursor + found;
            let Some(close_offset) = source[candidate + OPEN.len()..].find(CLOSE) else {
                break;
            };
            let close = candidate + OPEN.len() + close_offset;
            let open = source[candidate..close]
                .rfind(OPEN)
                .map_or(candidate, |offset| candidate + offset);

            placeholders.push(Placeholder {
                token: open..close + CLOSE.len(),
                name:  open + OPEN.len()..close,
            });
            cursor = close + CLOSE.len();
        }

        Self {
            source,
            placeholders,
        }
    }

    /// 出現順のプレースホルダー名
    pub fn placeholder_names(&self) -> impl Iterator<Item = &str> {
        self.placeholders
            .iter()
            .map(|p| &self.source[p.name.clone()])
    }

    /// コンテキストの値でプレースホルダーを置き換える
    pub fn render(&self, context: &RenderContext) -> String {
        let mut output = String::with_capacity(self.source.len());
        let mut last = 0;

        for placeholder in &self.placeholders {
            output.push_str(&self.source[last..placeholder.token.start]);
            match context.get(&self.source[placeholder.name.clone()]) {
                Some(value) => output.push_str(value),
                None => output.push_str(&self.source[placeholder.token.clone()]),
            }
            last = placeholder.token.end;
        }
        output.push_str(&self.source[last..]);

        output
    }
}

/// テキストを解析して即座に展開する
pub fn render(source: &str, context: &RenderContext) -> String {
    Template::parse(source).render(context)
}
