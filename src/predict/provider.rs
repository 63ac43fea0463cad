use std::time::Duration;

use serde_json::Value;

use crate::predict::error::ProviderError;
use crate::predict::observer::ObserverLocation;

pub const DEFAULT_BASE_URL: &str = "https://api.n2yo.com/rest/v1/satellite/radiopasses";

/// Source of raw pass predictions for one satellite at a time.
pub trait PassProvider {
    /// Fetch the raw pass entries for a NORAD catalog number.
    fn fetch_passes(&self, norad_id: u32) -> Result<Vec<Value>, ProviderError>;
}

/// Request parameters shared by every call of a refresh
#[derive(Debug, Clone)]
pub struct PredictionRequest {
    pub observer: ObserverLocation,
    pub days: u32,
    pub min_elevation_deg: u32,
}

/// Blocking client for the N2YO radio passes endpoint
pub struct N2yoClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    request: PredictionRequest,
}

impl N2yoClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        request: PredictionRequest,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            request,
        })
    }

    pub fn url_for(&self, norad_id: u32) -> String {
        let observer = &self.request.observer;
        format!(
            "{}/{}/{}/{}/{}/{}/{}/&apiKey={}",
            self.base_url,
            norad_id,
            observer.latitude_deg,
            observer.longitude_deg,
            observer.altitude_m,
            self.request.days,
            self.request.min_elevation_deg,
            self.api_key
        )
    }
}

impl PassProvider for N2yoClient {
    fn fetch_passes(&self, norad_id: u32) -> Result<Vec<Value>, ProviderError> {
        log::debug!("Requesting passes for NORAD {}", norad_id);
        let response = self.client.get(self.url_for(norad_id)).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        parse_response(status, &body)
    }
}

/// Interpret a provider reply.
///
/// Non-2xx statuses are transport failures. A 2xx body without a `passes`
/// list, or with an `error` message, is a data failure. `"passes": null`
/// counts as no passes.
pub fn parse_response(status: u16, body: &str) -> Result<Vec<Value>, ProviderError> {
    if !(200..300).contains(&status) {
        return Err(ProviderError::Status { status });
    }

    let root: Value = serde_json::from_str(body)
        .map_err(|e| ProviderError::Data(format!("unreadable response: {}", e)))?;

    if let Some(message) = root.get("error").and_then(Value::as_str) {
        return Err(ProviderError::Data(message.to_string()));
    }

    match root.get("passes") {
        Some(Value::Array(passes)) => Ok(passes.clone()),
        Some(Value::Null) => Ok(Vec::new()),
        Some(other) => Err(ProviderError::Data(format!(
            "unexpected passes value: {}",
            other
        ))),
        None => Err(ProviderError::Data(info_message(&root))),
    }
}

fn info_message(root: &Value) -> String {
    match root.get("info") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "No additional info".to_string(),
        Some(other) => other.to_string(),
    }
}
