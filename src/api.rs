//! Minimal JSON REST client for the API checks.
//!
//! Every call returns the status code and the parsed body; a status outside
//! 2xx is data for the caller to assert on, not an error. Only transport
//! failures surface as `reqwest::Error`.

use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const API_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON, or the raw text as a `Value::String` when it is not JSON.
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(API_TIMEOUT).build()?;
        Ok(ApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// `path` joined onto the base URL with exactly one slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn get(&self, path: &str) -> reqwest::Result<ApiResponse> {
        let url = self.endpoint(path);
        info!("GET {}", url);
        send(self.client.get(&url))
    }

    pub fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> reqwest::Result<ApiResponse> {
        let url = self.endpoint(path);
        info!("POST {}", url);
        send(self.client.post(&url).json(body))
    }

    pub fn delete(&self, path: &str) -> reqwest::Result<ApiResponse> {
        let url = self.endpoint(path);
        info!("DELETE {}", url);
        send(self.client.delete(&url))
    }
}

fn send(request: RequestBuilder) -> reqwest::Result<ApiResponse> {
    let resp = request.send()?;
    let status = resp.status().as_u16();
    let text = resp.text()?;
    info!("Status code: {}", status);
    debug!("Response body: {}", text);
    Ok(ApiResponse {
        status,
        body: parse_body(text),
    })
}

fn parse_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
