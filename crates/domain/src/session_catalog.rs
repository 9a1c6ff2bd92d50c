//! # セッションカタログ
//!
//! パネル登録フォームで選択できるセッションの参照データ。
//!
//! 日付キー（`rappel`, `jour1` 〜 `jour4`）ごとに有効なセッション ID を持ち、
//! 同じ時間帯に開催される同時開催グループ（jour3 の午前・午後）を宣言する。
//! プロセス全体で共有される読み取り専用データで、実行中に変更されることはない。

use crate::DomainError;

/// セッション（ID と表示名）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub id:    &'static str,
    pub label: &'static str,
}

/// 開催日と、その日に選択できるセッション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionDay {
    pub key:      &'static str,
    pub label:    &'static str,
    pub sessions: &'static [Session],
}

impl SessionDay {
    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.iter().any(|s| s.id == session_id)
    }
}

/// 同時開催グループ
///
/// グループ内のセッションは同じ時間帯に開催されるため、最大 1 つしか選択できない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimultaneousGroup {
    pub day:              &'static str,
    pub session_ids:      &'static [&'static str],
    /// 2 つ以上選択された場合のエラーメッセージ
    pub conflict_message: &'static str,
}

impl SimultaneousGroup {
    /// 選択済み ID のうちグループに属するものの数
    pub fn count_selected<S: AsRef<str>>(&self, selected: &[S]) -> usize {
        selected
            .iter()
            .filter(|id| self.session_ids.contains(&id.as_ref()))
            .count()
    }
}

/// セッションカタログ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCatalog {
    days:                &'static [SessionDay],
    simultaneous_groups: &'static [SimultaneousGroup],
}

impl SessionCatalog {
    /// カタログを作成する
    ///
    /// 同時開催グループのすべての ID が、その日の有効なセッションに
    /// 含まれていなければならない。
    pub fn new(
        days: &'static [SessionDay],
        simultaneous_groups: &'static [SimultaneousGroup],
    ) -> Result<Self, DomainError> {
        for group in simultaneous_groups {
            let day = days
                .iter()
                .find(|d| d.key == group.day)
                .ok_or_else(|| {
                    DomainError::InvalidCatalog(format!("日付 {} が存在しません", group.day))
                })?;
            if let Some(unknown) = group.session_ids.iter().find(|id| !day.contains(id)) {
                return Err(DomainError::InvalidCatalog(format!(
                    "セッション {unknown} は {} に存在しません",
                    group.day
                )));
            }
        }

        Ok(Self {
            days,
            simultaneous_groups,
        })
    }

    /// 標準のカタログ
    pub fn standard() -> &'static Self {
        &STANDARD_CATALOG
    }

    /// 開催日（定義順）
    pub fn days(&self) -> &'static [SessionDay] {
        self.days
    }

    pub fn day(&self, key: &str) -> Option<&'static SessionDay> {
        self.days.iter().find(|d| d.key == key)
    }

    pub fn simultaneous_groups(&self) -> &'static [SimultaneousGroup] {
        self.simultaneous_groups
    }

    /// セッション ID の表示名（日付をまたいで検索する）
    pub fn session_label(&self, session_id: &str) -> Option<&'static str> {
        self.days
            .iter()
            .flat_map(|d| d.sessions.iter())
            .find(|s| s.id == session_id)
            .map(|s| s.label)
    }
}

static STANDARD_CATALOG: SessionCatalog = SessionCatalog {
    days:                &[
        SessionDay {
            key:      "rappel",
            label:    "Session de rappel",
            sessions: &[Session {
                id:    "rappel-1",
                label: "Rappel : les fondamentaux du forum",
            }],
        },
        SessionDay {
            key:      "jour1",
            label:    "Jour 1",
            sessions: &[
                Session {
                    id:    "j1-1",
                    label: "Cérémonie d'ouverture",
                },
                Session {
                    id:    "j1-2",
                    label: "Panel : Financement de l'innovation",
                },
                Session {
                    id:    "j1-3",
                    label: "Panel : Transformation numérique des PME",
                },
                Session {
                    id:    "j1-4",
                    label: "Atelier : Export et marchés régionaux",
                },
            ],
        },
        SessionDay {
            key:      "jour2",
            label:    "Jour 2",
            sessions: &[
                Session {
                    id:    "j2-1",
                    label: "Panel : Agriculture et agro-industrie",
                },
                Session {
                    id:    "j2-2",
                    label: "Panel : Énergies renouvelables",
                },
                Session {
                    id:    "j2-3",
                    label: "Atelier : Économie bleue",
                },
                Session {
                    id:    "j2-4",
                    label: "Panel : Tourisme et industries culturelles",
                },
            ],
        },
        SessionDay {
            key:      "jour3",
            label:    "Jour 3",
            sessions: &[
                Session {
                    id:    "j3-1",
                    label: "Panel A : Santé et biotechnologies (09:00 - 11:00)",
                },
                Session {
                    id:    "j3-2",
                    label: "Panel B : Éducation et formation (09:00 - 11:00)",
                },
                Session {
                    id:    "j3-3",
                    label: "Panel C : Infrastructures et logistique (14:00 - 16:00)",
                },
                Session {
                    id:    "j3-4",
                    label: "Panel D : Industries créatives (14:00 - 16:00)",
                },
            ],
        },
        SessionDay {
            key:      "jour4",
            label:    "Jour 4",
            sessions: &[
                Session {
                    id:    "j4-1",
                    label: "Panel : Investissement de la diaspora",
                },
                Session {
                    id:    "j4-2",
                    label: "Rencontres B2B",
                },
                Session {
                    id:    "j4-3",
                    label: "Cérémonie de clôture",
                },
            ],
        },
    ],
    simultaneous_groups: &[
        // 09:00 - 11:00
        SimultaneousGroup {
            day:              "jour3",
            session_ids:      &["j3-1", "j3-2"],
            conflict_message: "Vous ne pouvez pas vous inscrire à plusieurs sessions simultanées le matin du jour 3",
        },
        // 14:00 - 16:00
        SimultaneousGroup {
            day:              "jour3",
            session_ids:      &["j3-3", "j3-4"],
            conflict_message: "Vous ne pouvez pas vous inscrire à plusieurs sessions simultanées l'après-midi du jour 3",
        },
    ],
};
