use std::time::Duration;

use log::debug;
use thirtyfour::{RequestData, RequestMethod};

use crate::error::{WebDriverError, WebDriverResult};
use crate::http::connection_sync::{HttpClientCreateParams, WebDriverHttpClientSync};

/// Synchronous connection to the remote WebDriver server.
#[derive(Debug)]
pub struct ReqwestDriverSync {
    url: String,
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl WebDriverHttpClientSync for ReqwestDriverSync {
    fn create(params: HttpClientCreateParams) -> WebDriverResult<Self> {
        let url = params.server_url.trim_end_matches('/').to_owned();
        Ok(ReqwestDriverSync {
            url,
            client: reqwest::blocking::Client::builder().build()?,
            timeout: params.timeout.unwrap_or_else(|| Duration::from_secs(120)),
        })
    }

    /// Execute the specified command and return the data as serde_json::Value.
    fn execute(&self, request_data: RequestData) -> WebDriverResult<serde_json::Value> {
        let url = self.url.clone() + &request_data.url;
        debug!("{} {}", method_name(&request_data.method), url);

        let mut request = match request_data.method {
            RequestMethod::Get => self.client.get(&url),
            RequestMethod::Post => self.client.post(&url),
            RequestMethod::Delete => self.client.delete(&url),
        };
        request = request.timeout(self.timeout);

        if let Some(x) = request_data.body {
            request = request.json(&x);
        }

        let resp = request.send()?;
        let status = resp.status().as_u16();
        match status {
            200..=399 => Ok(resp.json()?),
            _ => Err(WebDriverError::parse(status, resp.text()?)),
        }
    }
}

fn method_name(method: &RequestMethod) -> &'static str {
    match method {
        RequestMethod::Get => "GET",
        RequestMethod::Post => "POST",
        RequestMethod::Delete => "DELETE",
    }
}
