use anyhow::{Context, Result, bail};
use std::time::Duration;

/// HTTP client trait for testing
pub trait HttpClient: Send + Sync {
    /// GET `url` and return the body as text; non-success statuses are errors
    fn get(&self, url: &str) -> Result<String>;
}

/// Real HTTP client using reqwest's blocking API
pub struct ReqwestClient {
    timeout: Duration,
}

impl ReqwestClient {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let response = client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch URL: {}", url))?;

        if !response.status().is_success() {
            bail!(
                "HTTP request failed with status {}: {}",
                response.status(),
                url
            );
        }

        response
            .text()
            .with_context(|| format!("Failed to read response body from: {}", url))
    }
}

/// Mock HTTP client returning a canned body or error
#[cfg(test)]
pub struct MockHttpClient {
    response: Option<String>,
    error: Option<String>,
    calls: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn with_response(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            error: None,
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_error(error: &str) -> Self {
        Self {
            response: None,
            error: Some(error.to_string()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// URLs requested so far
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl HttpClient for MockHttpClient {
    fn get(&self, url: &str) -> Result<String> {
        self.calls.lock().unwrap().push(url.to_string());

        if let Some(ref response) = self.response {
            Ok(response.clone())
        } else if let Some(ref error) = self.error {
            Err(anyhow::anyhow!("{}", error))
        } else {
            Err(anyhow::anyhow!("No response configured"))
        }
    }
}
