// Reservation backend HTTP client
//
// Wraps `reqwest::Client` with base-URL joining and status-code
// classification. Resource endpoints (cars, lots, profiles, ...) are
// implemented as inherent methods in `crate::resources` to keep this
// module focused on transport mechanics.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the reservation backend.
///
/// Every method returns the decoded JSON payload; non-success statuses are
/// turned into the matching [`Error`] variant before the caller sees them.
#[derive(Debug, Clone)]
pub struct ParkingClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl ParkingClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `http://localhost:5000`). A path
    /// prefix such as `https://host/api` is kept and resources are appended
    /// to it.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            timeout: transport.timeout,
        })
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for a resource path: `{base}/{path}`.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        self.send(self.http.get(url)).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        self.send(self.http.post(url).json(body)).await
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("PUT {}", url);
        self.send(self.http.put(url).json(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("DELETE {}", url);
        self.send(self.http.delete(url)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, Error> {
        let resp = request.send().await.map_err(|e| self.transport_error(e))?;
        self.parse(resp).await
    }

    /// A reqwest timeout carries no duration; report the configured one.
    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }

    /// Classify the status, then decode the body.
    ///
    /// An empty success body decodes as JSON `null`, so acknowledgement
    /// types with all-default fields still succeed.
    async fn parse<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let path = resp.url().path().to_owned();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), path, "request rejected");
            return Err(Error::from_status(status.as_u16(), &path, &body));
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        let text = if body.trim().is_empty() { "null" } else { body.as_str() };

        serde_json::from_str(text).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }
}
