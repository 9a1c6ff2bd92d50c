//! # テンプレートレンダラー
//!
//! テンプレート保管から本文を取り出し、`{{name}}` プレースホルダーを展開する。
//!
//! ## 設計方針
//!
//! - **保管と展開の分離**: 読み込みは [`TemplateStore`]、展開は [`Template`] が担当
//! - **見つからなければそのまま返す**: `TemplateNotFound` は再試行せず、変換もせずに呼び出し元へ返す

use std::sync::Arc;

use formrelay_domain::{
    notification::NotificationError,
    template::{RenderContext, Template},
};
use formrelay_infra::TemplateStore;

/// テンプレートレンダラー
pub struct TemplateRenderer {
    store: Arc<dyn TemplateStore>,
}

impl TemplateRenderer {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// 名前で指定したテンプレートをコンテキストで展開する
    pub async fn render(
        &self,
        template_name: &str,
        context: &RenderContext,
    ) -> Result<String, NotificationError> {
        let source = self.store.load(template_name).await?;

        Ok(Template::parse(source).render(context))
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, path::Path};

    use chrono::{TimeZone, Utc};
    use formrelay_domain::{
        clock::FixedClock,
        form::{ContactForm, FormSubmission, PanelsInscriptionForm, ReservationForm},
        notification::NotificationComposer,
    };
    use formrelay_infra::{FsTemplateStore, mock::InMemoryTemplateStore};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn workspace_renderer() -> TemplateRenderer {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates");
        TemplateRenderer::new(Arc::new(FsTemplateStore::new(dir)))
    }

    #[tokio::test]
    async fn test_プレースホルダーを展開する() {
        let store = InMemoryTemplateStore::new().with_template("hello", "Hello {{name}}");
        let renderer = TemplateRenderer::new(Arc::new(store));
        let context = RenderContext::from_iter([("name", "Ada")]);

        let output = renderer.render("hello", &context).await.unwrap();

        assert_eq!(output, "Hello Ada");
    }

    #[tokio::test]
    async fn test_テンプレートがなければtemplate_not_found() {
        let renderer = TemplateRenderer::new(Arc::new(InMemoryTemplateStore::new()));

        let result = renderer.render("contact", &RenderContext::new()).await;

        assert!(matches!(
            result,
            Err(NotificationError::TemplateNotFound(name)) if name == "contact"
        ));
    }

    fn sample(kind: &str) -> FormSubmission {
        match kind {
            "contact" => FormSubmission::Contact(ContactForm {
                full_name: "Jean Dupont".to_string(),
                email: "jean@example.com".to_string(),
                message: "Bonjour".to_string(),
                ..Default::default()
            }),
            "reservation" => FormSubmission::Reservation(ReservationForm {
                full_name: "Marie Martin".to_string(),
                email: "marie@example.com".to_string(),
                participation_type: "exposant".to_string(),
                package: Some("Stand VIP".to_string()),
                number_of_people: "3".to_string(),
                ..Default::default()
            }),
            _ => FormSubmission::PanelsInscription(PanelsInscriptionForm {
                first_name: "Awa".to_string(),
                last_name: "Ndiaye".to_string(),
                email: "awa@example.sn".to_string(),
                sessions: BTreeMap::from([("jour2".to_string(), vec!["j2-2".to_string()])]),
                ..Default::default()
            }),
        }
    }

    #[rstest]
    #[case("contact", "Jean Dupont")]
    #[case("reservation", "Stand VIP")]
    #[case("panels-inscription", "Énergies renouvelables")]
    #[tokio::test]
    async fn test_同梱テンプレートのプレースホルダーがすべて埋まる(
        #[case] kind: &str,
        #[case] expected: &str,
    ) {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap());
        let composed = NotificationComposer::new(Arc::new(clock)).compose(&sample(kind));

        let html = workspace_renderer()
            .render(&composed.template_name, &composed.context)
            .await
            .unwrap();

        assert!(!html.contains("{{"), "未展開のプレースホルダーが残っている: {html}");
        assert!(html.contains(expected));
    }
}
