//! GraphQL transport over HTTP.
//!
//! The transport issues a single POST per call and classifies the response
//! into data, a GraphQL error, or a transport failure. It never retries;
//! retry policy belongs to callers (and the fetch phases deliberately have
//! none).

use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, COOKIE, ORIGIN, REFERER, USER_AGENT,
};
use serde_json::{json, Value};
use tracing::debug;

use veloview_core::Credential;

use crate::config::{
    CredentialHeader, TransportConfig, BROWSER_USER_AGENT, VELOG_ORIGIN, VELOG_REFERER,
};
use crate::error::FetchError;

/// Upper bound on stored/displayed error messages and body snippets.
pub(crate) const MESSAGE_LIMIT: usize = 400;

/// Truncates a message to [`MESSAGE_LIMIT`] characters.
pub(crate) fn truncate_message(message: &str) -> String {
    message.chars().take(MESSAGE_LIMIT).collect()
}

// ============================================================================
// Reply Types
// ============================================================================

/// A GraphQL error reported by the server.
///
/// Servers may return these with HTTP 200, so they are classified before
/// the status code is consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphqlError {
    /// Structured code from the first error's `extensions.code`, when set.
    pub code: Option<String>,
    /// Message of the first error, bounded.
    pub message: String,
}

impl GraphqlError {
    /// True when this error means the credential lacks permission for the
    /// requested post.
    ///
    /// Checked in order: the structured `NO_PERMISSION` code, then a
    /// case-sensitive `"not yours"` substring of the message. The fallback
    /// exists because the server does not always populate the code field.
    pub fn is_no_permission(&self) -> bool {
        self.code.as_deref() == Some(crate::aggregator::NO_PERMISSION_CODE)
            || self.message.contains(crate::aggregator::NO_PERMISSION_MARKER)
    }
}

/// A classified GraphQL response: either data or a server-reported error.
///
/// Transport-level failures (network, non-JSON bodies, non-success status
/// without a GraphQL payload) surface as [`FetchError`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum GqlReply {
    /// The response's `data` object.
    Data(Value),
    /// The first entry of a non-empty `errors` array.
    Error(GraphqlError),
}

// ============================================================================
// Transport Trait
// ============================================================================

/// One GraphQL request/response exchange.
///
/// The seam between the fetch phases and the network; tests substitute a
/// scripted implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes one operation and classifies the response.
    async fn execute(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<GqlReply, FetchError>;
}

// ============================================================================
// HTTP Transport
// ============================================================================

/// Reqwest-backed [`Transport`].
///
/// The credential header is derived once at construction; the credential is
/// immutable for the session.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: url::Url,
    headers: HeaderMap,
    timeout_secs: u64,
}

impl HttpTransport {
    /// Creates a transport for the given config and credential.
    pub fn new(config: TransportConfig, credential: &Credential) -> Result<Self, FetchError> {
        let header_value = credential.header_value()?;
        let headers = Self::build_headers(&config.credential_header, &header_value)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint,
            headers,
            timeout_secs: config.timeout.as_secs(),
        })
    }

    /// Builds the fixed per-session headers.
    fn build_headers(
        strategy: &CredentialHeader,
        credential_value: &str,
    ) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let value = HeaderValue::from_str(credential_value)
            .map_err(|e| FetchError::InvalidHeader(e.to_string()))?;

        match strategy {
            CredentialHeader::Cookie => {
                headers.insert(COOKIE, value);
                headers.insert(ORIGIN, HeaderValue::from_static(VELOG_ORIGIN));
                headers.insert(REFERER, HeaderValue::from_static(VELOG_REFERER));
                headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
            }
            CredentialHeader::Relay(name) => {
                let name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|e| FetchError::InvalidHeader(e.to_string()))?;
                headers.insert(name, value);
            }
        }

        Ok(headers)
    }

    /// Maps a reqwest error, surfacing timeouts distinctly.
    fn map_send_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout_secs)
        } else {
            FetchError::Http(err)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<GqlReply, FetchError> {
        debug!(operation, "Sending GraphQL request");

        let payload = json!({
            "operationName": operation,
            "variables": variables,
            "query": query,
        });

        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(self.headers.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let Ok(body_json) = serde_json::from_str::<Value>(&body) else {
            return Err(FetchError::InvalidResponse(format!(
                "unexpected content-type '{content_type}': {}",
                truncate_message(&body)
            )));
        };

        // GraphQL errors take precedence over the status code; the server
        // reports some of them with HTTP 200.
        if let Some(errors) = body_json.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                let first = &errors[0];
                let message = first
                    .get("message")
                    .and_then(Value::as_str)
                    .map_or_else(|| errors_fallback_message(errors), String::from);
                let code = first
                    .get("extensions")
                    .and_then(|e| e.get("code"))
                    .and_then(Value::as_str)
                    .map(String::from);

                debug!(operation, code = ?code, "GraphQL error response");
                return Ok(GqlReply::Error(GraphqlError {
                    code,
                    message: truncate_message(&message),
                }));
            }
        }

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_message(&body),
            });
        }

        let data = body_json.get("data").cloned().unwrap_or(Value::Null);
        Ok(GqlReply::Data(data))
    }
}

/// Fallback message when the first error has no `message` field.
fn errors_fallback_message(errors: &[Value]) -> String {
    truncate_message(&Value::Array(errors.to_vec()).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_message_bounds() {
        let long = "x".repeat(1000);
        assert_eq!(truncate_message(&long).len(), MESSAGE_LIMIT);
        assert_eq!(truncate_message("short"), "short");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let long = "ß".repeat(500);
        let truncated = truncate_message(&long);
        assert_eq!(truncated.chars().count(), MESSAGE_LIMIT);
    }

    #[test]
    fn test_no_permission_by_code() {
        let err = GraphqlError {
            code: Some("NO_PERMISSION".into()),
            message: "denied".into(),
        };
        assert!(err.is_no_permission());
    }

    #[test]
    fn test_no_permission_by_message_only() {
        let err = GraphqlError {
            code: None,
            message: "This post is not yours".into(),
        };
        assert!(err.is_no_permission());
    }

    #[test]
    fn test_no_permission_substring_is_case_sensitive() {
        let err = GraphqlError {
            code: None,
            message: "This post is NOT YOURS".into(),
        };
        assert!(!err.is_no_permission());
    }

    #[test]
    fn test_other_errors_not_permission() {
        let err = GraphqlError {
            code: Some("INTERNAL".into()),
            message: "boom".into(),
        };
        assert!(!err.is_no_permission());
    }

    #[test]
    fn test_cookie_headers() {
        let headers =
            HttpTransport::build_headers(&CredentialHeader::Cookie, "access_token=abc").unwrap();
        assert_eq!(headers.get(COOKIE).unwrap(), "access_token=abc");
        assert_eq!(headers.get(ORIGIN).unwrap(), VELOG_ORIGIN);
        assert!(headers.get(USER_AGENT).is_some());
    }

    #[test]
    fn test_relay_headers() {
        let headers = HttpTransport::build_headers(
            &CredentialHeader::Relay("x-velog-cookie".into()),
            "access_token=abc",
        )
        .unwrap();
        assert_eq!(headers.get("x-velog-cookie").unwrap(), "access_token=abc");
        assert!(headers.get(COOKIE).is_none());
        assert!(headers.get(ORIGIN).is_none());
    }

    #[test]
    fn test_invalid_header_value_rejected() {
        let result = HttpTransport::build_headers(&CredentialHeader::Cookie, "bad\nvalue");
        assert!(matches!(result, Err(FetchError::InvalidHeader(_))));
    }
}
