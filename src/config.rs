//! Client configuration.
//!
//! All client behaviour is controlled through [`ClientConfig`], built
//! via its [`ClientConfigBuilder`]. Keeping every knob in one struct
//! makes it trivial to share a configured client, log the settings of a
//! run, and diff two runs to understand why their outcomes differ.

use crate::error::ConvertError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Default conversion-service origin — the address the original
/// front-end targeted.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for a [`crate::client::ConvertClient`].
///
/// Built via [`ClientConfig::builder()`] or [`ClientConfig::default()`].
///
/// # Example
/// ```rust
/// use doc2x::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("https://convert.example.com")
///     .request_timeout_secs(300)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// Origin of the conversion service. Default: `http://localhost:8000`.
    ///
    /// A trailing slash is stripped so endpoint paths join cleanly.
    pub base_url: String,

    /// Whole-request timeout in seconds. Default: 120.
    ///
    /// Conversions are synchronous on the backend: the response arrives
    /// only when the work is done, so this bounds the whole operation,
    /// not just the connection.
    pub request_timeout_secs: u64,

    /// Bearer token for endpoints that require authorization (the
    /// infographic function). Default: none.
    pub auth_token: Option<String>,

    /// Full URL of the infographic endpoint. Default:
    /// `{base_url}/functions/v1/pdf-to-infographic`.
    ///
    /// Overridable because the function is typically deployed on a
    /// different origin than the conversion service.
    pub infographic_url: Option<String>,

    /// Lifecycle event callback. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 120,
            auth_token: None,
            infographic_url: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("infographic_url", &self.infographic_url)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }

    /// The effective infographic endpoint URL.
    pub fn infographic_endpoint(&self) -> String {
        self.infographic_url
            .clone()
            .unwrap_or_else(|| format!("{}/functions/v1/pdf-to-infographic", self.base_url))
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.config.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs.max(1);
        self
    }

    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.config.auth_token = Some(token.into());
        self
    }

    pub fn infographic_url(mut self, url: impl Into<String>) -> Self {
        self.config.infographic_url = Some(url.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, ConvertError> {
        let c = &self.config;
        if c.base_url.is_empty() {
            return Err(ConvertError::InvalidConfig(
                "base URL must not be empty".into(),
            ));
        }
        if !c.base_url.starts_with("http://") && !c.base_url.starts_with("https://") {
            return Err(ConvertError::InvalidConfig(format!(
                "base URL must be http(s), got '{}'",
                c.base_url
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, 120);
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn builder_strips_trailing_slash() {
        let config = ClientConfig::builder()
            .base_url("http://convert.example.com/")
            .build()
            .unwrap();
        assert_eq!(config.base_url, "http://convert.example.com");
    }

    #[test]
    fn builder_rejects_non_http_url() {
        assert!(ClientConfig::builder().base_url("").build().is_err());
        assert!(ClientConfig::builder()
            .base_url("ftp://example.com")
            .build()
            .is_err());
    }

    #[test]
    fn infographic_endpoint_defaults_under_base_url() {
        let config = ClientConfig::default();
        assert_eq!(
            config.infographic_endpoint(),
            "http://localhost:8000/functions/v1/pdf-to-infographic"
        );

        let config = ClientConfig::builder()
            .infographic_url("https://edge.example.com/pdf-to-infographic")
            .build()
            .unwrap();
        assert_eq!(
            config.infographic_endpoint(),
            "https://edge.example.com/pdf-to-infographic"
        );
    }

    #[test]
    fn timeout_floor_is_one_second() {
        let config = ClientConfig::builder()
            .request_timeout_secs(0)
            .build()
            .unwrap();
        assert_eq!(config.request_timeout_secs, 1);
    }

    #[test]
    fn debug_redacts_token() {
        let config = ClientConfig::builder().auth_token("sk-secret").build().unwrap();
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("sk-secret"));
        assert!(dbg.contains("redacted"));
    }
}
