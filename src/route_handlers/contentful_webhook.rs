use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::AppState;

const SOURCE_LOCALE: &str = "en-US";
const TARGET_LANG: &str = "FR";
const TARGET_LOCALE: &str = "fr";

/// Fields relayed to DeepL, in the order they are translated.
const TRANSLATED_FIELDS: [&str; 2] = ["title", "body"];

/// Inbound entry notification. Every key is looked up on its own, so a
/// malformed sibling never hides a readable `title` or `body`.
#[derive(Debug, Default)]
pub struct WebhookPayload {
    pub entry_id: String,
    pub fields: Map<String, Value>,
}

impl WebhookPayload {
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }

        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Unreadable Contentful webhook body, treating as empty: {}", e);
                return Self::default();
            }
        };

        let entry_id = value
            .pointer("/sys/id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let fields = value
            .get("fields")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Self { entry_id, fields }
    }

    pub fn entry_id(&self) -> &str {
        &self.entry_id
    }

    /// The string value of `field` in `locale`, or "" if missing or not a string.
    pub fn localized_text(&self, field: &str, locale: &str) -> &str {
        self.fields
            .get(field)
            .and_then(|locales| locales.get(locale))
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

#[derive(Serialize, Debug)]
pub struct WebhookResponse {
    status: &'static str,
}

pub async fn handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> impl axum::response::IntoResponse {
    let payload = WebhookPayload::from_body(&body);
    tracing::debug!("Contentful webhook request: {:?}", payload);

    relay_translations(&state, &payload).await;

    (StatusCode::OK, Json(WebhookResponse { status: "success" }))
}

/// Translates every non-empty source field and pushes them to Contentful in one update.
async fn relay_translations(state: &AppState, payload: &WebhookPayload) {
    let sources: Vec<(&str, &str)> = TRANSLATED_FIELDS
        .iter()
        .map(|field| (*field, payload.localized_text(field, SOURCE_LOCALE)))
        .filter(|(_, text)| !text.is_empty())
        .collect();

    if sources.is_empty() {
        tracing::info!(
            "No translatable fields on entry '{}', skipping",
            payload.entry_id()
        );
        return;
    }

    let mut translations = BTreeMap::new();
    for (field, text) in sources {
        let translated = state.deepl.translate(text, TARGET_LANG).await;
        translations.insert(field.to_string(), translated);
    }

    state
        .contentful
        .update_entry(payload.entry_id(), &translations, TARGET_LOCALE)
        .await;
}
