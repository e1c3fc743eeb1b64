//! Shared HTTP-GET helper used by both upstream clients.
//!
//! There is no retry, backoff, or request timeout here. Calls wait as long as
//! the transport lets them.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, UpstreamError};
use crate::metrics::{self, LatencyTimer};

/// User agent sent to upstream APIs.
const USER_AGENT: &str = concat!("search-proxy/", env!("CARGO_PKG_VERSION"));

/// Build the process-wide HTTP client.
pub fn build_http_client() -> Result<reqwest::Client> {
    let http = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        // Keep connections alive for reuse across requests
        .tcp_keepalive(std::time::Duration::from_secs(30))
        .build()?;
    Ok(http)
}

/// GET `url` with the given query pairs and decode the JSON body.
///
/// Repeated keys in `params` become repeated query parameters. Any non-2xx
/// status is an error carrying the response body.
pub async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    service: &'static str,
    url: &str,
    params: &[(&str, String)],
) -> std::result::Result<T, UpstreamError> {
    let _timer = LatencyTimer::upstream(service);

    let response = http
        .get(url)
        .query(params)
        .send()
        .await
        .map_err(|source| {
            metrics::inc_upstream_requests(service, "transport_error");
            UpstreamError::Http { service, source }
        })?;

    let status = response.status();
    if !status.is_success() {
        metrics::inc_upstream_requests(service, "http_error");
        let body = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Status {
            service,
            status,
            body,
        });
    }

    let decoded = response.json::<T>().await.map_err(|e| {
        metrics::inc_upstream_requests(service, "decode_error");
        UpstreamError::Decode {
            service,
            reason: e.to_string(),
        }
    })?;

    metrics::inc_upstream_requests(service, "ok");
    debug!(service, %status, "upstream request succeeded");
    Ok(decoded)
}
