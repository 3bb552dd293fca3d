use std::collections::BTreeMap;

use reqwest::header;
use serde::Serialize;
use tracing::{debug, error, info};
use url::Url;

use crate::config::ContentfulConfig;
use crate::error::{ApiError, Result};

const CONTENTFUL_MANAGEMENT_MEDIA_TYPE: &str = "application/vnd.contentful.management.v1+json";

/// Body of an entry update: field name -> locale -> value.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct UpdatePayload {
    pub fields: BTreeMap<String, BTreeMap<String, String>>,
}

impl UpdatePayload {
    pub fn new(translations: &BTreeMap<String, String>, locale: &str) -> Self {
        let fields = translations
            .iter()
            .map(|(field, value)| {
                let localized = BTreeMap::from([(locale.to_string(), value.clone())]);
                (field.clone(), localized)
            })
            .collect();

        Self { fields }
    }
}

pub struct ContentfulAPIService {
    client: reqwest::Client,
    config: ContentfulConfig,
}

impl ContentfulAPIService {
    pub fn new(client: reqwest::Client, config: ContentfulConfig) -> Self {
        Self { client, config }
    }

    fn entry_url(&self, entry_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.api_url)?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend([
                "spaces",
                self.config.space_id.as_str(),
                "environments",
                self.config.environment.as_str(),
                "entries",
                entry_id,
            ]);
        Ok(url)
    }

    /// PUTs the localized fields onto the entry without checking its current version.
    pub async fn put_entry(&self, entry_id: &str, payload: &UpdatePayload) -> Result<()> {
        let url = self.entry_url(entry_id)?;
        debug!("Updating Contentful entry at {}", url);

        let resp = self
            .client
            .put(url)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.access_token),
            )
            .header(header::CONTENT_TYPE, CONTENTFUL_MANAGEMENT_MEDIA_TYPE)
            .json(payload)
            .send()
            .await?;

        match resp.status() {
            reqwest::StatusCode::OK => Ok(()),
            _ => Err(ApiError::from_response(resp).await),
        }
    }

    /// Writes `translations` under `locale`; failures are logged and swallowed.
    pub async fn update_entry(
        &self,
        entry_id: &str,
        translations: &BTreeMap<String, String>,
        locale: &str,
    ) {
        let payload = UpdatePayload::new(translations, locale);
        match self.put_entry(entry_id, &payload).await {
            Ok(_) => info!("Contentful entry {} updated successfully", entry_id),
            Err(e) => error!("Contentful API error for entry {}: {}", entry_id, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tracing::instrument::WithSubscriber;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::test_utils::CapturedLogs;

    fn service_at(base_url: &str) -> ContentfulAPIService {
        ContentfulAPIService::new(
            reqwest::Client::new(),
            ContentfulConfig {
                api_url: base_url.to_string(),
                access_token: "cf-token".to_string(),
                space_id: "space1".to_string(),
                environment: "master".to_string(),
            },
        )
    }

    fn translations(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn wraps_every_field_under_the_locale() {
        let forward = translations(&[("title", "T"), ("body", "B")]);
        let reverse = translations(&[("body", "B"), ("title", "T")]);

        let expected = json!({
            "fields": {
                "title": { "fr": "T" },
                "body": { "fr": "B" }
            }
        });

        let payload = UpdatePayload::new(&forward, "fr");
        assert_eq!(serde_json::to_value(&payload).unwrap(), expected);
        assert_eq!(payload, UpdatePayload::new(&reverse, "fr"));
    }

    #[test]
    fn empty_translations_produce_empty_fields() {
        let payload = UpdatePayload::new(&BTreeMap::new(), "fr");
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({ "fields": {} }));
    }

    #[test]
    fn builds_entry_url_from_space_and_environment() {
        let service = service_at("https://api.contentful.com/");
        let url = service.entry_url("E1").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.contentful.com/spaces/space1/environments/master/entries/E1"
        );

        let url = service.entry_url("a/b").unwrap();
        assert!(url.as_str().ends_with("/entries/a%2Fb"));
    }

    #[test]
    fn rejects_unparsable_base_url() {
        let service = service_at("not a url");
        assert!(matches!(
            service.entry_url("E1"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn success_is_logged() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let logs = CapturedLogs::default();
        service_at(&server.uri())
            .update_entry("E2", &translations(&[("body", "Monde")]), "fr")
            .with_subscriber(logs.subscriber())
            .await;

        let output = logs.contents();
        assert!(output.contains("Contentful entry E2 updated successfully"), "logs: {output}");
        assert!(!output.contains("ERROR"), "logs: {output}");
    }

    #[tokio::test]
    async fn puts_localized_fields_with_management_headers() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/spaces/space1/environments/master/entries/E1"))
            .and(header("Authorization", "Bearer cf-token"))
            .and(header("Content-Type", CONTENTFUL_MANAGEMENT_MEDIA_TYPE))
            .and(body_json(json!({ "fields": { "title": { "fr": "Bonjour" } } })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let service = service_at(&server.uri());
        let payload = UpdatePayload::new(&translations(&[("title", "Bonjour")]), "fr");
        service.put_entry("E1", &payload).await.unwrap();
    }

    #[tokio::test]
    async fn error_status_carries_the_provider_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({ "sys": { "id": "VersionMismatch" } })),
            )
            .expect(2)
            .mount(&server)
            .await;

        let service = service_at(&server.uri());
        let payload = UpdatePayload::new(&translations(&[("title", "Bonjour")]), "fr");
        match service.put_entry("E1", &payload).await {
            Err(ApiError::Status { status, body }) => {
                assert_eq!(status, reqwest::StatusCode::CONFLICT);
                assert!(body.contains("VersionMismatch"));
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let logs = CapturedLogs::default();
        service
            .update_entry("E1", &translations(&[("title", "Bonjour")]), "fr")
            .with_subscriber(logs.subscriber())
            .await;

        let output = logs.contents();
        assert!(output.contains("ERROR"), "logs: {output}");
        assert!(output.contains("Contentful API error for entry E1"), "logs: {output}");
        assert!(output.contains("VersionMismatch"), "logs: {output}");
    }
}
