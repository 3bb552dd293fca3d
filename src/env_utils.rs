use std::env;

use tracing::{error, warn};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DEEPL_API_URL: &str = "https://api.deepl.com/v2/translate";
const DEFAULT_CONTENTFUL_API_URL: &str = "https://api.contentful.com";
const DEFAULT_CONTENTFUL_SPACE_ID: &str = "mpe1lux01xqs";
const DEFAULT_CONTENTFUL_ENVIRONMENT: &str = "master";

pub fn get_host_uri() -> String {
    match env::var("HOST") {
        Ok(host) => format!("https://{host}"),
        _ => format!("http://localhost:{}", get_port()),
    }
}

pub fn get_port() -> u16 {
    let port = match env::var("PORT") {
        Ok(port) => port,
        _ => return DEFAULT_PORT,
    };

    match port.parse::<u16>() {
        Ok(port) => port,
        _ => {
            error!("Failed to parse PORT env var, using default");
            DEFAULT_PORT
        }
    }
}

/// Missing keys are not fatal, DeepL will reject the first call instead.
pub fn get_deepl_api_key() -> String {
    match env::var("DEEPL_API_KEY") {
        Ok(key) => key,
        _ => {
            warn!("DEEPL_API_KEY env var not set, translations will fall back to source text");
            String::new()
        }
    }
}

pub fn get_deepl_api_url() -> String {
    env::var("DEEPL_API_URL").unwrap_or_else(|_| DEFAULT_DEEPL_API_URL.to_string())
}

pub fn get_contentful_access_token() -> String {
    match env::var("CONTENTFUL_ACCESS_TOKEN") {
        Ok(token) => token,
        _ => {
            warn!("CONTENTFUL_ACCESS_TOKEN env var not set, entry updates will be rejected");
            String::new()
        }
    }
}

pub fn get_contentful_api_url() -> String {
    env::var("CONTENTFUL_API_URL").unwrap_or_else(|_| DEFAULT_CONTENTFUL_API_URL.to_string())
}

pub fn get_contentful_space_id() -> String {
    env::var("CONTENTFUL_SPACE_ID").unwrap_or_else(|_| DEFAULT_CONTENTFUL_SPACE_ID.to_string())
}

pub fn get_contentful_environment() -> String {
    env::var("CONTENTFUL_ENVIRONMENT")
        .unwrap_or_else(|_| DEFAULT_CONTENTFUL_ENVIRONMENT.to_string())
}
