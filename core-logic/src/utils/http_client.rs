//! # HTTP Client Factory
//!
//! Builds `reqwest` clients for outbound API calls, optionally routed through
//! a proxy. Every client gets the same timeout and User-Agent and carries two
//! middleware hooks:
//!
//! - [`RequestStartStamp`] records when the request left.
//! - [`ResponseInspector`] logs the round-trip time on success and turns any
//!   failure (transport error or non-2xx status) into a [`RequestFailure`]
//!   that says whether the failure looks proxy related.
//!
//! Failures are always propagated to the caller.

use crate::config::{ProxyDescriptor, REQUEST_TIMEOUT_MS, USER_AGENT};
use crate::error::NetworkError;
use crate::utils::proxy_manager::{is_proxy_error, parse_proxy};
use async_trait::async_trait;
use http::Extensions;
use reqwest::{Client, Proxy, Request, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware, Next};
use serde::Serialize;
use std::error::Error as StdError;
use std::io;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error};

/// Normalized view of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorSummary {
    pub url: String,
    pub method: String,
    pub status: Option<u16>,
    pub status_text: Option<String>,
    pub body: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyInfo {
    pub is_proxy_error: bool,
    pub error_details: ErrorSummary,
}

/// Error returned by factory-built clients for every failed request.
///
/// Carries the classification next to the original transport error, if any.
/// Status failures have no transport error: the response arrived but was not
/// a 2xx.
#[derive(Debug, Error)]
#[error("{}", .proxy_info.error_details.message)]
pub struct RequestFailure {
    pub proxy_info: ProxyInfo,
    #[source]
    source: Option<reqwest_middleware::Error>,
}

impl RequestFailure {
    fn new(summary: ErrorSummary, source: Option<reqwest_middleware::Error>) -> Self {
        Self {
            proxy_info: ProxyInfo {
                is_proxy_error: is_proxy_error(&summary.message),
                error_details: summary,
            },
            source,
        }
    }

    pub fn is_proxy_error(&self) -> bool {
        self.proxy_info.is_proxy_error
    }

    pub fn details(&self) -> &ErrorSummary {
        &self.proxy_info.error_details
    }

    /// Recovers the structured failure from an error returned by a
    /// factory-built client.
    pub fn from_error(err: &reqwest_middleware::Error) -> Option<&RequestFailure> {
        match err {
            reqwest_middleware::Error::Middleware(inner) => inner.downcast_ref::<RequestFailure>(),
            reqwest_middleware::Error::Reqwest(_) => None,
        }
    }
}

/// Start time of an in-flight request, stored in the request extensions.
#[derive(Debug, Clone, Copy)]
pub struct RequestStart(pub Instant);

/// Outbound hook: stamps the start time.
pub struct RequestStartStamp;

#[async_trait]
impl Middleware for RequestStartStamp {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        extensions.insert(RequestStart(Instant::now()));
        next.run(req, extensions).await
    }
}

/// Inbound hook: timing on success, [`RequestFailure`] on failure.
pub struct ResponseInspector;

#[async_trait]
impl Middleware for ResponseInspector {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let url = req.url().to_string();
        let host = req.url().host_str().map(str::to_string);
        let method = req.method().to_string();
        let started = extensions.get::<RequestStart>().map(|s| s.0);

        match next.run(req, extensions).await {
            Ok(response) if response.status().is_success() => {
                if let Some(started) = started {
                    debug!(
                        "{} {} -> {} in {}ms",
                        method,
                        url,
                        response.status().as_u16(),
                        started.elapsed().as_millis()
                    );
                }
                Ok(response)
            }
            Ok(response) => {
                let status = response.status();
                let status_text = status.canonical_reason().map(str::to_string);
                let message = match &status_text {
                    Some(reason) => format!(
                        "Request failed with status code {} {}",
                        status.as_u16(),
                        reason
                    ),
                    None => format!("Request failed with status code {}", status.as_u16()),
                };
                let body = response.text().await.ok().filter(|b| !b.is_empty());

                let summary = ErrorSummary {
                    url,
                    method,
                    status: Some(status.as_u16()),
                    status_text,
                    body,
                    message,
                };
                Err(reqwest_middleware::Error::Middleware(anyhow::Error::new(
                    RequestFailure::new(summary, None),
                )))
            }
            Err(e) => {
                let summary = ErrorSummary {
                    url,
                    method,
                    status: None,
                    status_text: None,
                    body: None,
                    message: transport_error_message(&e, host.as_deref()),
                };
                Err(reqwest_middleware::Error::Middleware(anyhow::Error::new(
                    RequestFailure::new(summary, Some(e)),
                )))
            }
        }
    }
}

/// Full cause chain, so low level causes like "Connection refused" reach the
/// classifier. Timeouts, resets, refusals and DNS failures are prefixed with
/// the error codes the proxy catalog knows.
fn transport_error_message(err: &reqwest_middleware::Error, host: Option<&str>) -> String {
    let mut message = err.to_string();
    let mut io_kind = None;
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        if let Some(io) = cause.downcast_ref::<io::Error>() {
            io_kind.get_or_insert(io.kind());
        }
        source = cause.source();
    }

    let timed_out = matches!(err, reqwest_middleware::Error::Reqwest(e) if e.is_timeout());

    let prefix = if timed_out {
        format!("timeout of {}ms exceeded", REQUEST_TIMEOUT_MS)
    } else if io_kind == Some(io::ErrorKind::ConnectionReset) {
        "read ECONNRESET".to_string()
    } else if io_kind == Some(io::ErrorKind::ConnectionRefused) {
        "connect ECONNREFUSED".to_string()
    } else if message.to_lowercase().contains("dns error") {
        format!("getaddrinfo ENOTFOUND {}", host.unwrap_or_default())
    } else {
        return message;
    };

    format!("{}: {}", prefix, message)
}

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Builds a client, routed through `proxy` when it parses.
    ///
    /// An unparseable proxy string falls back to a direct client. Only a
    /// failure to construct the client itself is an error.
    pub fn create_client(proxy: Option<&str>) -> Result<ClientWithMiddleware, NetworkError> {
        let descriptor = proxy.and_then(parse_proxy);
        Self::build(descriptor.as_ref())
    }

    pub fn create_client_with_proxy(proxy: &str) -> Result<ClientWithMiddleware, NetworkError> {
        Self::create_client(Some(proxy))
    }

    pub fn create_client_without_proxy() -> Result<ClientWithMiddleware, NetworkError> {
        Self::build(None)
    }

    fn build(proxy: Option<&ProxyDescriptor>) -> Result<ClientWithMiddleware, NetworkError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
            .user_agent(USER_AGENT);

        if let Some(descriptor) = proxy {
            debug!("Using {:?} proxy agent for {}", descriptor.agent(), descriptor);

            let reqwest_proxy =
                Proxy::all(descriptor.proxy_url()).map_err(|e| build_failure(proxy, &e))?;
            builder = builder.proxy(reqwest_proxy);
        }

        let client = builder.build().map_err(|e| build_failure(proxy, &e))?;

        Ok(ClientBuilder::new(client)
            .with(RequestStartStamp)
            .with(ResponseInspector)
            .build())
    }
}

fn build_failure(proxy: Option<&ProxyDescriptor>, err: &reqwest::Error) -> NetworkError {
    let reason = match proxy {
        Some(descriptor) => format!("proxy {}: {}", descriptor, err),
        None => err.to_string(),
    };
    error!("Failed to create HTTP client: {}", reason);
    NetworkError::ClientBuild { reason }
}

pub fn create_client(proxy: Option<&str>) -> Result<ClientWithMiddleware, NetworkError> {
    HttpClientFactory::create_client(proxy)
}
