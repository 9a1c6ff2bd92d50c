//! # Clock（時刻プロバイダ）
//!
//! 通知の組み立てで `Utc::now()` を直接呼ばず、
//! テストで固定時刻を注入可能にするための抽象化。
//!
//! 通知メールに載せる受付日時はフランス語ロケールの長い書式
//! （例: `samedi 17 octobre 2026 à 14:03:05`）で表記する。

use std::fmt::Display;

use chrono::{DateTime, Locale, TimeZone, Utc};

/// 受付日時の表記（曜日 日 月 年 à 時:分:秒）
const FRENCH_DATETIME_FORMAT: &str = "%A %-d %B %Y à %H:%M:%S";

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;
}

/// 実際のシステム時刻を返す実装
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 固定時刻を返すテスト用実装
pub struct FixedClock {
   now: DateTime<Utc>,
}

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self { now }
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.now
   }
}

/// 日時をフランス語ロケールの長い書式で表記する
///
/// タイムゾーンは引数の `DateTime` が持つものをそのまま使う。
pub fn format_french_datetime<Tz>(datetime: &DateTime<Tz>) -> String
where
   Tz: TimeZone,
   Tz::Offset: Display,
{
   datetime
      .format_localized(FRENCH_DATETIME_FORMAT, Locale::fr_FR)
      .to_string()
}
