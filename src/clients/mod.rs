/// TOM backend client module
use crate::domain::{ObservationRequest, TargetStatus};
use crate::errors::{ClientError, ClientResult};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// Operations the widget needs from the TOM backend
#[allow(async_fn_in_trait)]
pub trait TomApi {
    /// GET the status document at `url`
    async fn fetch_status(&self, url: &str) -> ClientResult<TargetStatus>;

    /// POST an observation request to `url`
    async fn submit_observation(&self, url: &str, request: &ObservationRequest) -> ClientResult<()>;
}

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("asteroid-tracker/0.1")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// reqwest-backed TOM client
pub struct TomClient {
    http_client: HttpClient,
}

impl TomClient {
    pub fn new(timeout: Duration) -> ClientResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout)?,
        })
    }
}

impl TomApi for TomClient {
    async fn fetch_status(&self, url: &str) -> ClientResult<TargetStatus> {
        debug!("GET {}", url);
        let resp = self
            .http_client
            .get_client()
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = ensure_success(resp).await?.json().await?;
        Ok(status)
    }

    async fn submit_observation(&self, url: &str, request: &ObservationRequest) -> ClientResult<()> {
        debug!("POST {}", url);
        let resp = self
            .http_client
            .get_client()
            .post(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(request)
            .send()
            .await?;

        ensure_success(resp).await?;
        Ok(())
    }
}

/// Turn any non-2xx response into `ClientError::Status`, keeping the body
/// for later classification.
async fn ensure_success(resp: Response) -> ClientResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}
