use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use futures_util::StreamExt;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::wire::{ErrorBody, RetrieveBody};
use crate::{FailureKind, GenerateBody, GeneratedLanding, LandingDocument, ServiceError};

const GENERATION_FAILED: &str = "Generation failed";
const RETRIEVAL_FAILED: &str = "Preview request failed";
const CONTENT_MISSING: &str = "landing page markup is missing";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub generate_url: Url,
    pub retrieve_url: Url,
    pub connect_timeout: Duration,
    /// Generation runs a language model server-side and is slow.
    pub generate_timeout: Duration,
    pub retrieve_timeout: Duration,
    pub max_bytes: u64,
}

impl ServiceSettings {
    pub fn new(generate_url: Url, retrieve_url: Url) -> Self {
        Self {
            generate_url,
            retrieve_url,
            connect_timeout: Duration::from_secs(10),
            generate_timeout: Duration::from_secs(90),
            retrieve_timeout: Duration::from_secs(30),
            max_bytes: 8 * 1024 * 1024,
        }
    }
}

/// The two remote calls the client depends on.
#[async_trait::async_trait]
pub trait LandingService: Send + Sync {
    async fn generate(&self, body: &GenerateBody) -> Result<GeneratedLanding, ServiceError>;

    async fn retrieve(&self, domain: &str) -> Result<LandingDocument, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestLandingService {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl ReqwestLandingService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn retrieve_url(&self, domain: &str) -> Url {
        let mut url = self.settings.retrieve_url.clone();
        url.query_pairs_mut().append_pair("domain", domain);
        url
    }

    /// Reads the whole body, refusing anything above `max_bytes`.
    async fn read_body(&self, response: Response) -> Result<Vec<u8>, ServiceError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    /// Status check plus JSON decode, shared by both calls.
    async fn decode<T: DeserializeOwned>(
        &self,
        response: Response,
        fallback: &str,
    ) -> Result<T, ServiceError> {
        let status = response.status();
        let bytes = self.read_body(response).await?;
        if !status.is_success() {
            return Err(status_error(status, &bytes, fallback));
        }
        serde_json::from_slice(&bytes)
            .map_err(|err| ServiceError::new(FailureKind::Malformed, format!("malformed response: {err}")))
    }
}

#[async_trait::async_trait]
impl LandingService for ReqwestLandingService {
    async fn generate(&self, body: &GenerateBody) -> Result<GeneratedLanding, ServiceError> {
        engine_info!(
            "POST generate domain={} theme_len={} geo_len={}",
            body.domain,
            body.theme.len(),
            body.geo.len()
        );
        let response = self
            .client
            .post(self.settings.generate_url.clone())
            .timeout(self.settings.generate_timeout)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        engine_debug!("generate responded with {}", response.status());

        let landing: GeneratedLanding = self.decode(response, GENERATION_FAILED).await?;
        engine_info!(
            "Generated landing_id={} domain={}",
            landing.landing_id,
            landing.domain
        );
        Ok(landing)
    }

    async fn retrieve(&self, domain: &str) -> Result<LandingDocument, ServiceError> {
        let url = self.retrieve_url(domain);
        engine_info!("GET retrieve domain={}", domain);
        let response = self
            .client
            .get(url)
            .timeout(self.settings.retrieve_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        engine_debug!("retrieve responded with {}", response.status());

        let body: RetrieveBody = self.decode(response, RETRIEVAL_FAILED).await?;
        match body.html_content {
            Some(html_content) if !html_content.is_empty() => {
                engine_debug!("retrieved {} bytes of markup", html_content.len());
                Ok(LandingDocument { html_content })
            }
            _ => {
                engine_warn!("retrieve for {} returned no markup", domain);
                Err(ServiceError::new(FailureKind::ContentMissing, CONTENT_MISSING))
            }
        }
    }
}

/// Prefers the service's own `error` message over the generic one.
fn status_error(status: StatusCode, bytes: &[u8], fallback: &str) -> ServiceError {
    let message = serde_json::from_slice::<ErrorBody>(bytes)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    engine_warn!("service returned {}: {}", status, message);
    ServiceError::new(FailureKind::HttpStatus(status.as_u16()), message)
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> ServiceError {
    ServiceError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(FailureKind::Timeout, "request timed out");
    }
    if err.is_builder() {
        return ServiceError::new(FailureKind::InvalidUrl, err.to_string());
    }
    ServiceError::new(FailureKind::Network, format!("network error: {err}"))
}
