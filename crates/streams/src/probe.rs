use std::str::FromStr;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::error::ProbeError;
use crate::options::TransportOptions;

/// Liveness check for a variant before it is offered as a stream.
///
/// One attempt per variant; callers treat any error as "skip this variant".
#[async_trait]
pub trait StreamProbe: Send + Sync {
    async fn probe(&self, uri: &str, transport: &TransportOptions) -> Result<(), ProbeError>;
}

/// Probes with a plain GET of the variant playlist.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

pub(crate) fn header_map(transport: &TransportOptions) -> Result<HeaderMap, ProbeError> {
    let mut headers = HeaderMap::with_capacity(transport.headers.len());
    for (key, value) in &transport.headers {
        let name = HeaderName::from_str(key)
            .map_err(|e| ProbeError::InvalidHeader(format!("{key}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ProbeError::InvalidHeader(format!("{key}: {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[async_trait]
impl StreamProbe for HttpProbe {
    async fn probe(&self, uri: &str, transport: &TransportOptions) -> Result<(), ProbeError> {
        let mut request = self
            .client
            .get(uri)
            .headers(header_map(transport)?)
            .query(&transport.params);

        if let Some(timeout) = transport.timeout() {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!("probe {uri}: {status}");

        if !status.is_success() {
            return Err(ProbeError::Status(status.as_u16()));
        }
        Ok(())
    }
}
