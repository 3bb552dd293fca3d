pub mod contentful_webhook;
