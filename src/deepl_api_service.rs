use reqwest::header;
use serde::Deserialize;
use tracing::{debug, error};

use crate::config::DeepLConfig;
use crate::error::{ApiError, Result};

#[derive(Deserialize, Debug)]
pub struct DeepLTranslation {
    pub text: String,
}

#[derive(Deserialize, Debug)]
pub struct DeepLResponse {
    pub translations: Vec<DeepLTranslation>,
}

pub struct DeepLAPIService {
    client: reqwest::Client,
    config: DeepLConfig,
}

impl DeepLAPIService {
    pub fn new(client: reqwest::Client, config: DeepLConfig) -> Self {
        Self { client, config }
    }

    /// Sends one text to DeepL and returns the first translation.
    pub async fn request_translation(&self, text: &str, target_lang: &str) -> Result<String> {
        debug!("Requesting DeepL translation to {}", target_lang);

        let resp = self
            .client
            .post(&self.config.api_url)
            .header(
                header::AUTHORIZATION,
                format!("DeepL-Auth-Key {}", self.config.api_key),
            )
            .form(&[("text", text), ("target_lang", target_lang)])
            .send()
            .await?;

        if resp.status() != reqwest::StatusCode::OK {
            return Err(ApiError::from_response(resp).await);
        }

        let deepl_data: DeepLResponse = resp.json().await?;
        deepl_data
            .translations
            .into_iter()
            .next()
            .map(|translation| translation.text)
            .ok_or_else(|| ApiError::Decode("DeepL returned no translations".to_string()))
    }

    /// Translates `text`, falling back to the untouched source text on any failure.
    pub async fn translate(&self, text: &str, target_lang: &str) -> String {
        match self.request_translation(text, target_lang).await {
            Ok(translated) => translated,
            Err(e) => {
                error!("DeepL API error: {}", e);
                text.to_string()
            }
        }
    }
}
