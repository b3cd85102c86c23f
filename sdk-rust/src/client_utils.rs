use crate::LanguageModelError;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

/// Create a JSON request, parse the response.
/// Throws error on any non-success status code.
pub async fn send_json<T: Serialize, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    data: &T,
    headers: reqwest::header::HeaderMap,
) -> Result<R, LanguageModelError> {
    let response = client.post(url).headers(headers).json(data).send().await?;
    let status = response.status();
    if status.is_success() {
        Ok(response.json::<R>().await?)
    } else {
        Err(LanguageModelError::StatusCode(
            status,
            response.text().await.unwrap_or_default(),
        ))
    }
}

/// Build the `Authorization: Bearer` header set shared by every provider.
pub fn bearer_headers(
    provider: &'static str,
    api_key: &str,
) -> Result<reqwest::header::HeaderMap, LanguageModelError> {
    let mut headers = reqwest::header::HeaderMap::new();
    let auth_header = reqwest::header::HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|error| {
            LanguageModelError::InvalidInput(format!(
                "Invalid {provider} API key header value: {error}"
            ))
        })?;
    headers.insert(reqwest::header::AUTHORIZATION, auth_header);
    Ok(headers)
}
