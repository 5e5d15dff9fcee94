//! Client configuration.
//!
//! All connection settings live in [`ClientConfig`], built via its
//! [`ClientConfigBuilder`] or resolved from the environment with
//! [`ClientConfig::from_env`].

use crate::error::ConvertError;

/// Base URL used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "DOCCONV_API_BASE_URL";

/// Default image width in pixels.
pub const DEFAULT_WIDTH: u32 = 1275;

/// Default image height in pixels.
pub const DEFAULT_HEIGHT: u32 = 1650;

/// Configuration for a [`crate::client::ConverterClient`].
///
/// # Example
/// ```rust
/// use doc_converter::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("http://converter.internal:8000/")
///     .build()
///     .unwrap();
/// assert_eq!(config.base_url, "http://converter.internal:8000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root of the conversion API, without a trailing slash.
    pub base_url: String,

    /// Image width used when the UI has no valid value. Default: 1275.
    pub default_width: u32,

    /// Image height used when the UI has no valid value. Default: 1650.
    pub default_height: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_width: DEFAULT_WIDTH,
            default_height: DEFAULT_HEIGHT,
        }
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }

    /// Resolve the configuration from the process environment.
    ///
    /// `DOCCONV_API_BASE_URL` wins when set and non-empty; otherwise the
    /// local fallback [`DEFAULT_BASE_URL`] is used.
    pub fn from_env() -> Result<Self, ConvertError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConvertError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            builder = builder.base_url(url);
        }
        builder.build()
    }

    /// Join an endpoint path such as `/health` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn default_width(mut self, px: u32) -> Self {
        self.config.default_width = px;
        self
    }

    pub fn default_height(mut self, px: u32) -> Self {
        self.config.default_height = px;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, ConvertError> {
        let c = &self.config;
        let parsed = reqwest::Url::parse(&c.base_url).map_err(|e| {
            ConvertError::InvalidConfig(format!("base URL '{}' is invalid: {e}", c.base_url))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConvertError::InvalidConfig(format!(
                "base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if c.default_width == 0 || c.default_height == 0 {
            return Err(ConvertError::InvalidConfig(
                "Default image dimensions must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}
