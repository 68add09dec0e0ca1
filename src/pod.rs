//! Low-level Solid pod access over HTTP.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use sophia_inmem::graph::LightGraph;

use crate::error::{Result, SolidFhirError};
use crate::rdf;
use crate::token::OAuth2Token;
use crate::webid::pod_base_url;

/// Content type for RDF documents exchanged with a pod.
pub const TEXT_TURTLE: &str = "text/turtle";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for Solid pods: authenticated Turtle reads and file writes.
///
/// The client holds no per-user state; the token to act under is passed to
/// every call, so one client can serve any number of users. Cloning is
/// cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct SolidPodClient {
    http: reqwest::Client,
}

impl SolidPodClient {
    /// Create a pod client with a fixed request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SolidFhirError::Client`] when the HTTP client cannot be
    /// constructed (TLS backend initialization, for instance).
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SolidFhirError::Client { source: e })?;
        Ok(Self { http })
    }

    /// Wrap an existing HTTP client, keeping its configuration.
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Resolve a pod-relative path against the caller's own pod, as
    /// identified by the token's WebID claim.
    ///
    /// # Errors
    ///
    /// Fails when the token carries no usable WebID or the WebID is not a
    /// valid URL.
    pub fn base_url(&self, token: &OAuth2Token, path: &str) -> Result<String> {
        let web_id = token.web_id()?;
        pod_base_url(&web_id, path)
    }

    /// Fetch `url` and parse the response body as Turtle.
    ///
    /// A `404 Not Found` yields an empty graph rather than an error: a pod
    /// answers 404 for containers that were never created, and callers
    /// treat absence as emptiness. Any other non-success status is an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`SolidFhirError::Http`] for transport failures,
    /// [`SolidFhirError::UnexpectedStatus`] for non-success responses, and
    /// [`SolidFhirError::Turtle`] when the body does not parse.
    pub async fn get_rdf(&self, token: &OAuth2Token, url: &str) -> Result<LightGraph> {
        tracing::debug!("Fetching Turtle document from {}", url);
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, token.to_header_value())
            .header(ACCEPT, TEXT_TURTLE)
            .send()
            .await
            .map_err(|e| SolidFhirError::Http {
                url: url.to_string(),
                source: e,
            })?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(LightGraph::new());
        }
        if !status.is_success() {
            return Err(SolidFhirError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await.map_err(|e| SolidFhirError::Http {
            url: url.to_string(),
            source: e,
        })?;
        rdf::parse_turtle(&body, url)
    }

    /// Write a file to the caller's own pod.
    ///
    /// `path` is pod-relative (for example `/fhir/.dummy`); the pod base is
    /// derived from the token's WebID claim.
    ///
    /// # Errors
    ///
    /// Returns [`SolidFhirError::Http`] for transport failures and
    /// [`SolidFhirError::UnexpectedStatus`] when the pod refuses the write.
    pub async fn put_file(
        &self,
        token: &OAuth2Token,
        path: &str,
        body: &str,
        content_type: &str,
    ) -> Result<()> {
        let url = self.base_url(token, path)?;
        tracing::debug!("Writing {} byte(s) to {}", body.len(), url);
        let response = self
            .http
            .put(&url)
            .header(AUTHORIZATION, token.to_header_value())
            .header(CONTENT_TYPE, content_type)
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| SolidFhirError::Http {
                url: url.clone(),
                source: e,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(SolidFhirError::UnexpectedStatus {
                url,
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
