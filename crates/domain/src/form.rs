//! # フォーム
//!
//! 受け付けるフォームの種別と、バリデーション後の正規化済み送信内容を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`FormKind`] | フォーム種別 | お問い合わせ / 予約 / パネル登録 |
//! | [`FormSubmission`] | 正規化済み送信内容 | デフォルト値が補われ、通知の組み立てに使える状態 |
//! | [`ParticipationType`] | 参加形態 | participant / exposant / partenaire / speaker |
//! | [`Stand`] | 出展ブース | 出展者（exposant）のみ必須 |
//! | [`Package`] | 参加パッケージ | 参加者（participant）は任意 |
//!
//! ## 設計方針
//!
//! - 正規化済みの値はすべて前後の空白を除去した文字列で保持する
//! - 任意項目は `Option`、必須項目は未入力でも空文字列で保持する
//!   （バリデーションに失敗した場合も正規化済みの値は常に存在する）

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr, VariantNames};

/// パッケージ未指定時に補う値
pub const PACKAGE_NOT_SPECIFIED: &str = "Non spécifié";

/// フォーム種別
///
/// kebab-case の文字列表現（`contact` / `reservation` / `panels-inscription`）は
/// API パスとテンプレート名に使われる。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
    EnumString,
    strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FormKind {
    /// お問い合わせ
    Contact,
    /// 予約
    Reservation,
    /// パネルセッション登録
    PanelsInscription,
}

impl FormKind {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// 参加形態
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, EnumString, VariantNames, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum ParticipationType {
    Participant,
    Exposant,
    Partenaire,
    Speaker,
}

impl ParticipationType {
    /// 通知メールで package 欄に付ける見出し
    pub fn package_label(&self) -> &'static str {
        match self {
            Self::Exposant => "Stand",
            Self::Participant => "Package",
            Self::Partenaire | Self::Speaker => DEFAULT_PACKAGE_LABEL,
        }
    }
}

/// 参加形態が判別できない場合の package 欄の見出し
pub const DEFAULT_PACKAGE_LABEL: &str = "Package / Stand";

/// 出展ブース
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, VariantNames, strum::Display)]
pub enum Stand {
    #[strum(serialize = "Stand Standard")]
    Standard,
    #[strum(serialize = "Stand Premium")]
    Premium,
    #[strum(serialize = "Stand VIP")]
    Vip,
}

/// 参加パッケージ
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, VariantNames, strum::Display)]
pub enum Package {
    #[strum(serialize = "Package Teranga")]
    Teranga,
    #[strum(serialize = "Package Silver")]
    Silver,
    #[strum(serialize = "Package Gold")]
    Gold,
    #[strum(serialize = "Non spécifié")]
    NotSpecified,
}

/// お問い合わせフォーム
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub civility:           Option<String>,
    pub full_name:          String,
    pub organization:       Option<String>,
    pub country:            Option<String>,
    pub email:              String,
    pub phone:              Option<String>,
    pub participation_type: Option<String>,
    pub message:            String,
}

/// 予約フォーム
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationForm {
    pub full_name:          String,
    pub email:              String,
    pub phone:              Option<String>,
    pub organization:       Option<String>,
    pub participation_type: String,
    /// 参加者で未指定の場合は [`PACKAGE_NOT_SPECIFIED`] が補われる
    pub package:            Option<String>,
    pub number_of_people:   String,
}

impl ReservationForm {
    /// 参加形態（列挙外の値なら `None`）
    pub fn participation(&self) -> Option<ParticipationType> {
        self.participation_type.parse().ok()
    }
}

/// パネルセッション登録フォーム
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelsInscriptionForm {
    pub first_name:   String,
    pub last_name:    String,
    pub email:        String,
    pub phone:        String,
    pub organization: String,
    pub role:         String,
    pub country:      String,
    /// 日付キー（`jour1` など）→ 選択したセッション ID（送信順）
    pub sessions:     BTreeMap<String, Vec<String>>,
}

impl PanelsInscriptionForm {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// 正規化済みの送信内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FormSubmission {
    Contact(ContactForm),
    Reservation(ReservationForm),
    PanelsInscription(PanelsInscriptionForm),
}

impl FormSubmission {
    pub fn kind(&self) -> FormKind {
        match self {
            Self::Contact(_) => FormKind::Contact,
            Self::Reservation(_) => FormKind::Reservation,
            Self::PanelsInscription(_) => FormKind::PanelsInscription,
        }
    }
}
