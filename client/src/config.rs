use std::env;

use reqwest::Url;
use types::error::Error;

pub const BASE_URL: &str = "http://localhost:8080";
pub const API_URL_VAR: &str = "LANDING_API_URL";

/// Base url of the authentication backend, taken from `LANDING_API_URL` when set.
pub fn base_url() -> Result<String, Error> {
    resolve_base_url(env::var(API_URL_VAR).ok())
}

pub fn resolve_base_url(value: Option<String>) -> Result<String, Error> {
    let raw = value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| BASE_URL.to_string());
    let raw = raw.trim();
    let url = Url::parse(raw).map_err(|_| Error::InvalidBaseUrl(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        _ => Err(Error::InvalidBaseUrl(raw.to_string())),
    }
}
