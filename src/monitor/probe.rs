//! Single-domain reachability probe.
//!
//! # Responsibilities
//! - Build the target URL (`<scheme>://<domain>`)
//! - Issue one GET with a total-operation timeout
//! - Classify the outcome into a [`DomainCheckResult`]
//!
//! # Design Decisions
//! - Failures are data: every error becomes the result's `error` field
//! - The body is never read; dropping the response releases the connection
//! - No idle pooling, so each probe owns its own connection

use std::error::Error as _;
use std::future::Future;
use std::time::{Duration, Instant};

use reqwest::redirect::Policy;
use url::Url;

use crate::config::CheckerConfig;
use crate::monitor::result::DomainCheckResult;
use crate::observability::metrics;

/// Redirect hops followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// Checks one domain. Implementations must never panic on network failure;
/// the timeout is fixed when the prober is built.
pub trait Probe: Send + Sync + 'static {
    fn probe(&self, domain: &str) -> impl Future<Output = DomainCheckResult> + Send;
}

/// HTTP(S) prober backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
    scheme: String,
    timeout: Duration,
}

impl HttpProber {
    pub fn from_config(config: &CheckerConfig) -> Result<Self, reqwest::Error> {
        Self::with_timeout(config, config.timeout())
    }

    /// Same as [`HttpProber::from_config`] with an explicit timeout, which may
    /// be finer-grained than whole seconds.
    pub fn with_timeout(config: &CheckerConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(config.user_agent.clone());

        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            scheme: config.scheme.clone(),
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// URL probed for `domain`.
    pub fn target_url(&self, domain: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}://{}", self.scheme, domain))
    }

    async fn fetch(&self, domain: &str) -> DomainCheckResult {
        let url = match self.target_url(domain) {
            Ok(url) => url,
            Err(e) => return DomainCheckResult::failed(domain, format!("invalid URL: {}", e)),
        };

        match self.client.get(url).send().await {
            Ok(response) => DomainCheckResult::from_status(domain, response.status().as_u16()),
            Err(e) => DomainCheckResult::failed(domain, describe_error(&e, self.timeout)),
        }
    }
}

impl Probe for HttpProber {
    async fn probe(&self, domain: &str) -> DomainCheckResult {
        let start = Instant::now();
        let result = self.fetch(domain).await;

        match result.error() {
            Some(error) => tracing::debug!(domain = %domain, error = %error, "Probe failed"),
            None => tracing::debug!(
                domain = %domain,
                status = result.status_code(),
                up = result.is_up(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Probe completed"
            ),
        }

        metrics::record_probe(&result, start);
        result
    }
}

/// Human-readable description including the full source chain.
fn describe_error(err: &reqwest::Error, timeout: Duration) -> String {
    if err.is_timeout() {
        return format!("request timed out after {:?}", timeout);
    }

    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
