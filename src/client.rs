//! HTTP client for the conversion API.
//!
//! One public method per transport variant plus the [`ConverterClient::convert`]
//! router. Every call is a single attempt: no retries, no timeouts, no
//! backoff. Failures surface immediately so an interactive user can retry.
//!
//! ## Transport variants
//!
//! ```text
//!              │ pdf                      │ png / jpg
//! ─────────────┼──────────────────────────┼────────────────────────────
//!  text (JSON) │ /convert/{markdown,html}/pdf   │ /convert/{markdown,html}/image
//!  file (form) │ /convert/file            │ /convert/file/image
//! ```

use crate::config::{ClientConfig, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::ConvertError;
use crate::request::{
    ConversionRequest, ConversionResult, HealthStatus, InputFormat, OutputFormat, Source,
    UploadFile,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use tracing::{debug, info, warn};

/// The seam between the UI orchestrator and the network.
///
/// [`ConverterClient`] is the production implementation; tests substitute
/// doubles that record calls and return canned results.
pub trait ConversionBackend {
    /// Convert a document, routing to the right endpoint.
    fn convert(
        &self,
        request: &ConversionRequest,
    ) -> impl Future<Output = Result<ConversionResult, ConvertError>> + Send;

    /// Probe `GET /health`.
    fn check_health(&self) -> impl Future<Output = Result<HealthStatus, ConvertError>> + Send;

    /// Base URL, shown in the "cannot connect" banner.
    fn base_url(&self) -> &str;

    /// Image size used when the width or height input is blank or invalid.
    fn default_dimensions(&self) -> (u32, u32) {
        (DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Client for the document conversion API.
#[derive(Debug, Clone)]
pub struct ConverterClient {
    http: Client,
    config: ClientConfig,
}

impl ConverterClient {
    /// Create a client for the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ConvertError> {
        let http = Client::builder().build()?;
        Ok(Self { http, config })
    }

    /// Create a client from `DOCCONV_API_BASE_URL`, falling back to localhost.
    pub fn from_env() -> Result<Self, ConvertError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ── Text → PDF ───────────────────────────────────────────────────────

    /// Convert Markdown text to PDF.
    pub async fn markdown_to_pdf(&self, markdown: &str) -> Result<ConversionResult, ConvertError> {
        let req = self
            .http
            .post(self.config.endpoint("/convert/markdown/pdf"))
            .json(&json!({ "markdown": markdown }));
        self.send(req, "Failed to convert Markdown to PDF".into())
            .await
    }

    /// Convert HTML text to PDF.
    pub async fn html_to_pdf(&self, html: &str) -> Result<ConversionResult, ConvertError> {
        let req = self
            .http
            .post(self.config.endpoint("/convert/html/pdf"))
            .json(&json!({ "html": html }));
        self.send(req, "Failed to convert HTML to PDF".into()).await
    }

    // ── Text → image ─────────────────────────────────────────────────────

    /// Convert Markdown text to a PNG/JPG image (or a zip of page images).
    pub async fn markdown_to_image(
        &self,
        markdown: &str,
        format: OutputFormat,
        width: u32,
        height: u32,
    ) -> Result<ConversionResult, ConvertError> {
        let req = self
            .http
            .post(self.config.endpoint("/convert/markdown/image"))
            .json(&json!({
                "markdown": markdown,
                "image_format": format.as_str(),
                "width": width,
                "height": height,
            }));
        self.send(
            req,
            format!("Failed to convert Markdown to {}", format.label()),
        )
        .await
    }

    /// Convert HTML text to a PNG/JPG image (or a zip of page images).
    pub async fn html_to_image(
        &self,
        html: &str,
        format: OutputFormat,
        width: u32,
        height: u32,
    ) -> Result<ConversionResult, ConvertError> {
        let req = self
            .http
            .post(self.config.endpoint("/convert/html/image"))
            .json(&json!({
                "html": html,
                "image_format": format.as_str(),
                "width": width,
                "height": height,
            }));
        self.send(req, format!("Failed to convert HTML to {}", format.label()))
            .await
    }

    // ── File uploads ─────────────────────────────────────────────────────

    /// Convert an uploaded `.html`/`.md` file to PDF.
    pub async fn file_to_pdf(&self, file: &UploadFile) -> Result<ConversionResult, ConvertError> {
        let form = Form::new().part("file", file_part(file));
        let req = self
            .http
            .post(self.config.endpoint("/convert/file"))
            .multipart(form);
        self.send(req, "Failed to convert file to PDF".into()).await
    }

    /// Convert an uploaded `.html`/`.md` file to a PNG/JPG image.
    pub async fn file_to_image(
        &self,
        file: &UploadFile,
        format: OutputFormat,
        width: u32,
        height: u32,
    ) -> Result<ConversionResult, ConvertError> {
        let form = Form::new()
            .part("file", file_part(file))
            .text("image_format", format.as_str())
            .text("width", width.to_string())
            .text("height", height.to_string());
        let req = self
            .http
            .post(self.config.endpoint("/convert/file/image"))
            .multipart(form);
        self.send(req, format!("Failed to convert file to {}", format.label()))
            .await
    }

    // ── Router ───────────────────────────────────────────────────────────

    /// Route a [`ConversionRequest`] to exactly one transport variant.
    ///
    /// Empty text content is rejected with [`ConvertError::InvalidRequest`]
    /// before any network call.
    pub async fn convert(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResult, ConvertError> {
        request.validate()?;
        let format = request.output_format;
        let (w, h) = (request.width, request.height);

        match &request.source {
            Source::File(file) => {
                info!(file = %file.name, format = %format, "Converting uploaded file");
                if format.is_image() {
                    self.file_to_image(file, format, w, h).await
                } else {
                    self.file_to_pdf(file).await
                }
            }
            Source::Text {
                content,
                input_format,
            } => {
                info!(input = %input_format, format = %format, "Converting text content");
                match (input_format, format.is_image()) {
                    (InputFormat::Markdown, false) => self.markdown_to_pdf(content).await,
                    (InputFormat::Html, false) => self.html_to_pdf(content).await,
                    (InputFormat::Markdown, true) => {
                        self.markdown_to_image(content, format, w, h).await
                    }
                    (InputFormat::Html, true) => self.html_to_image(content, format, w, h).await,
                }
            }
        }
    }

    /// Check the API is up.
    pub async fn check_health(&self) -> Result<HealthStatus, ConvertError> {
        let url = self.config.endpoint("/health");
        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ConvertError::api(status.as_u16(), "API health check failed"));
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!("Health response is not a JSON object: {}", e);
            ConvertError::api(status.as_u16(), "API health check failed")
        })
    }

    // ── Internal helpers ─────────────────────────────────────────────────

    async fn send(
        &self,
        request: RequestBuilder,
        default_message: String,
    ) -> Result<ConversionResult, ConvertError> {
        let response = request.send().await?;
        debug!(url = %response.url(), status = %response.status(), "Conversion response");
        if !response.status().is_success() {
            return Err(api_error(response, default_message).await);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        debug!(
            "Received {} bytes ({})",
            bytes.len(),
            content_type.as_deref().unwrap_or("no content-type")
        );
        Ok(ConversionResult::new(bytes.to_vec(), content_type))
    }
}

impl ConversionBackend for ConverterClient {
    async fn convert(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResult, ConvertError> {
        ConverterClient::convert(self, request).await
    }

    async fn check_health(&self) -> Result<HealthStatus, ConvertError> {
        ConverterClient::check_health(self).await
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn default_dimensions(&self) -> (u32, u32) {
        (self.config.default_width, self.config.default_height)
    }
}

fn file_part(file: &UploadFile) -> Part {
    Part::bytes(file.bytes.clone()).file_name(file.name.clone())
}

/// Build an [`ConvertError::Api`] from a non-success response.
///
/// The `detail` string is used verbatim; a missing, non-string, or
/// unparseable body falls back to `default_message`.
async fn api_error(response: Response, default_message: String) -> ConvertError {
    let status = response.status().as_u16();
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail)
        .and_then(|d| d.as_str().map(str::to_string));

    let message = detail.unwrap_or(default_message);
    warn!(status, "Conversion API error: {}", message);
    ConvertError::api(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_new_keeps_config() {
        let config = ClientConfig::builder()
            .base_url("http://example.test:8000")
            .build()
            .unwrap();
        let client = ConverterClient::new(config).unwrap();
        assert_eq!(client.config().base_url, "http://example.test:8000");
        assert_eq!(ConversionBackend::base_url(&client), "http://example.test:8000");
    }

    #[tokio::test]
    async fn empty_text_fails_before_network() {
        // Port 9 (discard) is never contacted: validation short-circuits.
        let config = ClientConfig::builder()
            .base_url("http://127.0.0.1:9")
            .build()
            .unwrap();
        let client = ConverterClient::new(config).unwrap();
        let err = client
            .convert(&ConversionRequest::text("", InputFormat::Markdown))
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidRequest(_)));
    }
}
