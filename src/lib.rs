//! # doc-converter
//!
//! Client for a document-conversion API that renders Markdown or HTML into
//! PDF, PNG, or JPG. The rendering happens server-side; this crate builds
//! the requests, normalises the responses, and drives a small UI state
//! machine around them.
//!
//! ## Layout
//!
//! ```text
//! request ──▶ client ──▶ output
//! (types)     (HTTP)     (filename, save)
//!                ▲
//!                │ ConversionBackend
//!            ui::orchestrator ◀── ui::events (element, event) → action
//!                │
//!                └──▶ ui::render (view updates)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doc_converter::{ConverterClient, ConversionRequest, InputFormat, OutputFormat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Base URL from DOCCONV_API_BASE_URL, else http://localhost:8000
//!     let client = ConverterClient::from_env()?;
//!     let request = ConversionRequest::text("# Hello", InputFormat::Markdown)
//!         .output_format(OutputFormat::Png);
//!     let result = client.convert(&request).await?;
//!     println!("{} bytes, archive: {}", result.bytes.len(), result.is_archive());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `docconv` binary (clap + anyhow + indicatif + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod request;
pub mod ui;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::{ConversionBackend, ConverterClient};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::ConvertError;
pub use output::{generate_filename, save_to_dir, ConvertedFile};
pub use request::{
    ConversionRequest, ConversionResult, HealthStatus, InputFormat, OutputFormat, Source,
    UploadFile,
};
pub use ui::events::{Element, EventKind, EventSource, HandlerTable, ScriptedEvents, UiEvent};
pub use ui::orchestrator::Orchestrator;
pub use ui::render::{RendererHandle, ViewRenderer};
pub use ui::state::{InputTab, UiState, View};
