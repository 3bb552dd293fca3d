use std::fmt;

use crate::env_utils;

/// Everything the relay needs to talk to DeepL and Contentful.
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct RelayConfig {
    pub deepl: DeepLConfig,
    pub contentful: ContentfulConfig,
}

#[derive(Clone)]
pub struct DeepLConfig {
    pub api_url: String,
    pub api_key: String,
}

#[derive(Clone)]
pub struct ContentfulConfig {
    pub api_url: String,
    pub access_token: String,
    pub space_id: String,
    pub environment: String,
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self {
            deepl: DeepLConfig {
                api_url: env_utils::get_deepl_api_url(),
                api_key: env_utils::get_deepl_api_key(),
            },
            contentful: ContentfulConfig {
                api_url: env_utils::get_contentful_api_url(),
                access_token: env_utils::get_contentful_access_token(),
                space_id: env_utils::get_contentful_space_id(),
                environment: env_utils::get_contentful_environment(),
            },
        }
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl fmt::Debug for DeepLConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepLConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

impl fmt::Debug for ContentfulConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentfulConfig")
            .field("api_url", &self.api_url)
            .field("access_token", &redact(&self.access_token))
            .field("space_id", &self.space_id)
            .field("environment", &self.environment)
            .finish()
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("deepl", &self.deepl)
            .field("contentful", &self.contentful)
            .finish()
    }
}
