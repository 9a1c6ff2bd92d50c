//! # フォームバリデーション
//!
//! フォーム種別ごとのルールで送信内容を検証し、エラー一覧と正規化済みの値を返す。
//!
//! ## 設計方針
//!
//! - **例外を出さない**: どんな入力でも必ず [`ValidationResult`] を返す
//! - **全件収集**: 途中で打ち切らず、適用できるすべてのエラーを 1 つの一覧にまとめる
//! - **決まった順序**: 必須チェック（フィールドの宣言順）→ 形式チェック →
//!   列挙値・項目間チェック → セッション重複チェック
//! - **入力を書き換えない**: デフォルト値の補完は正規化済みの値にのみ反映する

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use serde::Serialize;
use serde_json::Value as JsonValue;
use strum::VariantNames;

use crate::{
    form::{
        ContactForm,
        FormKind,
        FormSubmission,
        PACKAGE_NOT_SPECIFIED,
        Package,
        PanelsInscriptionForm,
        ParticipationType,
        ReservationForm,
        Stand,
    },
    session_catalog::SessionCatalog,
};

const INVALID_EMAIL: &str = "Le format de l'email est invalide";
const INVALID_NUMBER_OF_PEOPLE: &str =
    "Le nombre de personnes doit être un nombre valide supérieur à 0";
const STAND_REQUIRED: &str = "Le stand est requis pour les exposants";
const SESSIONS_REQUIRED: &str = "Les sessions sont requises";
const NO_SESSION_SELECTED: &str = "Veuillez sélectionner au moins une session";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("メールアドレスの正規表現が不正です")
});

/// バリデーション結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid:   bool,
    pub errors:     Vec<String>,
    pub normalized: FormSubmission,
}

/// 検証対象のフィールド
///
/// JSON のキーとエラーメッセージ用の表示名を網羅的な match で対応付ける。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Email,
    FullName,
    Message,
    ParticipationType,
    NumberOfPeople,
    FirstName,
    LastName,
    Phone,
    Organization,
    Role,
    Country,
}

impl FormField {
    /// 送信 JSON 上のキー
    pub fn key(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::FullName => "fullName",
            Self::Message => "message",
            Self::ParticipationType => "participationType",
            Self::NumberOfPeople => "numberOfPeople",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Phone => "phone",
            Self::Organization => "organization",
            Self::Role => "role",
            Self::Country => "country",
        }
    }

    /// エラーメッセージ用の表示名
    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::FullName => "nom complet",
            Self::Message => "message",
            Self::ParticipationType => "type de participation",
            Self::NumberOfPeople => "nombre de personnes",
            Self::FirstName => "prénom",
            Self::LastName => "nom",
            Self::Phone => "téléphone",
            Self::Organization => "organisation",
            Self::Role => "fonction",
            Self::Country => "pays",
        }
    }

    /// 未入力時のエラーメッセージ
    pub fn required_message(&self) -> String {
        match self {
            Self::ParticipationType => "Le type de participation est requis".to_string(),
            Self::NumberOfPeople => INVALID_NUMBER_OF_PEOPLE.to_string(),
            other => format!("Le champ {} est requis", other.label()),
        }
    }
}

const CONTACT_REQUIRED: [FormField; 3] = [FormField::Email, FormField::FullName, FormField::Message];

const PANELS_REQUIRED: [FormField; 7] = [
    FormField::FirstName,
    FormField::LastName,
    FormField::Email,
    FormField::Phone,
    FormField::Organization,
    FormField::Role,
    FormField::Country,
];

/// 標準のセッションカタログで送信内容を検証する
pub fn validate(kind: FormKind, raw: &JsonValue) -> ValidationResult {
    validate_with_catalog(kind, raw, SessionCatalog::standard())
}

/// 指定したセッションカタログで送信内容を検証する
///
/// `raw` がオブジェクトでない場合は、すべてのフィールドが未入力として扱われる。
pub fn validate_with_catalog(
    kind: FormKind,
    raw: &JsonValue,
    catalog: &SessionCatalog,
) -> ValidationResult {
    let mut errors = Vec::new();

    let normalized = match kind {
        FormKind::Contact => FormSubmission::Contact(validate_contact(raw, &mut errors)),
        FormKind::Reservation => {
            FormSubmission::Reservation(validate_reservation(raw, &mut errors))
        }
        FormKind::PanelsInscription => FormSubmission::PanelsInscription(
            validate_panels_inscription(raw, catalog, &mut errors),
        ),
    };

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        normalized,
    }
}

/// メールアドレスの形式チェック（`local@domain.tld`、空白なし）
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn validate_contact(raw: &JsonValue, errors: &mut Vec<String>) -> ContactForm {
    let [email, full_name, message] = CONTACT_REQUIRED.map(|field| require(raw, field, errors));

    check_raw_email_format(raw, &email, errors);

    ContactForm {
        civility: optional_text(raw, "civility"),
        full_name,
        organization: optional_text(raw, "organization"),
        country: optional_text(raw, "country"),
        email,
        phone: optional_text(raw, "phone"),
        participation_type: optional_text(raw, "participationType"),
        message,
    }
}

fn validate_reservation(raw: &JsonValue, errors: &mut Vec<String>) -> ReservationForm {
    let email = require(raw, FormField::Email, errors);
    let full_name = require(raw, FormField::FullName, errors);
    let participation_type = require(raw, FormField::ParticipationType, errors);
    let number_of_people = require(raw, FormField::NumberOfPeople, errors);

    // 形式
    check_raw_email_format(raw, &email, errors);
    if !number_of_people.is_empty() && !is_valid_number_of_people(&number_of_people) {
        errors.push(INVALID_NUMBER_OF_PEOPLE.to_string());
    }

    // 列挙値・項目間
    let participation = participation_type.parse::<ParticipationType>().ok();
    if !participation_type.is_empty() && participation.is_none() {
        errors.push(format!(
            "Type de participation invalide. Valeurs acceptées: {}",
            ParticipationType::VARIANTS.join(", ")
        ));
    }

    let mut package = optional_text(raw, "package");
    match participation {
        Some(ParticipationType::Exposant) => match package.as_deref() {
            None => errors.push(STAND_REQUIRED.to_string()),
            Some(stand) if stand.parse::<Stand>().is_err() => errors.push(format!(
                "Stand invalide. Valeurs acceptées: {}",
                Stand::VARIANTS.join(", ")
            )),
            Some(_) => {}
        },
        Some(ParticipationType::Participant) => match package.as_deref() {
            None => package = Some(PACKAGE_NOT_SPECIFIED.to_string()),
            Some(selected) if selected.parse::<Package>().is_err() => errors.push(format!(
                "Package invalide. Valeurs acceptées: {}, ou laissez vide",
                Package::VARIANTS.join(", ")
            )),
            Some(_) => {}
        },
        _ => {}
    }

    ReservationForm {
        full_name,
        email,
        phone: optional_text(raw, "phone"),
        organization: optional_text(raw, "organization"),
        participation_type,
        package,
        number_of_people,
    }
}

fn validate_panels_inscription(
    raw: &JsonValue,
    catalog: &SessionCatalog,
    errors: &mut Vec<String>,
) -> PanelsInscriptionForm {
    let [first_name, last_name, email, phone, organization, role, country] =
        PANELS_REQUIRED.map(|field| require(raw, field, errors));

    check_email_format(&email, errors);

    let sessions = match raw.get("sessions") {
        Some(JsonValue::Object(days)) => {
            let has_selection = days
                .values()
                .any(|ids| ids.as_array().is_some_and(|ids| !ids.is_empty()));
            if !has_selection {
                errors.push(NO_SESSION_SELECTED.to_string());
            }
            collect_sessions(days, catalog, errors)
        }
        _ => {
            errors.push(SESSIONS_REQUIRED.to_string());
            BTreeMap::new()
        }
    };

    for group in catalog.simultaneous_groups() {
        let selected = sessions.get(group.day).map_or(0, |ids| group.count_selected(ids));
        if selected > 1 {
            errors.push(group.conflict_message.to_string());
        }
    }

    PanelsInscriptionForm {
        first_name,
        last_name,
        email,
        phone,
        organization,
        role,
        country,
        sessions,
    }
}

/// 日付ごとの選択セッションを取り出し、カタログにない ID をエラーにする
///
/// エラーはカタログの日付順に並ぶ。カタログにない日付キーは ID を検証しない。
fn collect_sessions(
    days: &serde_json::Map<String, JsonValue>,
    catalog: &SessionCatalog,
    errors: &mut Vec<String>,
) -> BTreeMap<String, Vec<String>> {
    for day in catalog.days() {
        let Some(ids) = days.get(day.key).and_then(JsonValue::as_array) else {
            continue;
        };
        for id in ids {
            match id.as_str() {
                Some(id) if day.contains(id) => {}
                Some(id) => errors.push(format!("ID de session invalide: {id} pour {}", day.key)),
                None => errors.push(format!("ID de session invalide: {id} pour {}", day.key)),
            }
        }
    }

    days.iter()
        .filter_map(|(day, ids)| {
            let ids: Vec<String> = ids
                .as_array()?
                .iter()
                .filter_map(|id| id.as_str().map(str::to_string))
                .collect();
            (!ids.is_empty()).then(|| (day.clone(), ids))
        })
        .collect()
}

fn check_email_format(email: &str, errors: &mut Vec<String>) {
    if !email.is_empty() && !is_valid_email(email) {
        errors.push(INVALID_EMAIL.to_string());
    }
}

/// 送信されたままの値（前後の空白を含む）で形式をチェックする
///
/// 文字列以外の値は正規化済みの値で判定する。
fn check_raw_email_format(raw: &JsonValue, email: &str, errors: &mut Vec<String>) {
    let submitted = raw.get(FormField::Email.key()).and_then(JsonValue::as_str);
    check_email_format(submitted.unwrap_or(email), errors);
}

/// 1 以上の整数かどうか
///
/// 桁数に上限はなく、`2.0` のように小数部が 0 の数値も整数とみなす。
fn is_valid_number_of_people(value: &str) -> bool {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        return value.bytes().any(|b| b != b'0');
    }
    value
        .parse::<f64>()
        .is_ok_and(|n| n.is_finite() && n.fract() == 0.0 && n >= 1.0)
}

/// 必須フィールドを取り出す（未入力ならエラーを積んで空文字列を返す）
fn require(raw: &JsonValue, field: FormField, errors: &mut Vec<String>) -> String {
    optional_text(raw, field.key()).unwrap_or_else(|| {
        errors.push(field.required_message());
        String::new()
    })
}

/// 任意フィールドを前後の空白を除いて取り出す
///
/// 文字列と数値のみを値として扱い、空白のみの文字列は未入力とみなす。
fn optional_text(raw: &JsonValue, key: &str) -> Option<String> {
    let value = match raw.get(key)? {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Number(n) => n.to_string(),
        _ => return None,
    };
    (!value.is_empty()).then_some(value)
}
