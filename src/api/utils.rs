use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ProviderError;

pub async fn make_request(
    client: &Client,
    base_url: &str,
    endpoint: &str,
    params: &[(&str, &str)],
) -> Result<Value, ProviderError> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), endpoint);
    let res = client.get(&url).query(params).send().await?;

    debug!("GET {} -> {}", url, res.status());

    if !res.status().is_success() {
        return Err(ProviderError::Status(res.status()));
    }

    let text = res.text().await?;
    let data = serde_json::from_str::<Value>(&text)?;

    Ok(data)
}

pub fn parse_response_array<T>(data: Value, error_msg: &str) -> Result<Vec<T>, ProviderError>
where
    T: DeserializeOwned,
{
    match data {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Err(ProviderError::Malformed(format!(
            "{}: not an array",
            error_msg
        ))),
    }
}

pub fn parse_response_object<T>(data: Value, error_msg: &str) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    match data {
        Value::Object(obj) if obj.is_empty() => {
            Err(ProviderError::Malformed(format!("{}: empty object", error_msg)))
        }
        Value::Object(obj) => serde_json::from_value(Value::Object(obj))
            .map_err(|e| ProviderError::Malformed(format!("{}: {}", error_msg, e))),
        _ => Err(ProviderError::Malformed(format!(
            "{}: not an object",
            error_msg
        ))),
    }
}
