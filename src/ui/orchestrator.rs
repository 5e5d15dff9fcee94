//! The converter page's controller.
//!
//! [`Orchestrator`] is the single writer of [`UiState`]. Each event runs to
//! completion before the next one is taken (`&mut self`); the only
//! suspension point is the backend call inside [`Orchestrator::convert`].
//! Overlapping conversions are prevented solely by the disabled convert
//! control: a convert click while a request is in flight is ignored.
//!
//! ## State machine
//!
//! ```text
//!            convert              ok
//!   Idle ───────────▶ InProgress ─────▶ Success ─┐
//!    ▲                    │ err                  │ convert another
//!    │                    ▼                      │
//!    └──────────────── Error ◀───────────────────┘ (try again → Idle)
//! ```
//!
//! Validation failures and rejected file types jump straight to `Error`
//! without a network call.

use crate::client::ConversionBackend;
use crate::error::ConvertError;
use crate::output::{generate_filename, today_utc, ConvertedFile};
use crate::request::{ConversionRequest, InputFormat, OutputFormat, UploadFile};
use crate::ui::events::{Action, EventSource, HandlerTable, Payload, UiEvent};
use crate::ui::render::{NoopRenderer, RendererHandle};
use crate::ui::state::{InputTab, PickerMode, UiState, View};
use crate::ui::validate::{
    format_file_size, is_allowed_file, parse_dimension, placeholder, INVALID_FILE_TYPE,
    NO_FILE_SELECTED, NO_TEXT_ENTERED,
};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const GENERIC_FAILURE: &str = "An error occurred during conversion";

/// Owns the UI state and drives conversions through a backend.
pub struct Orchestrator<B> {
    backend: B,
    state: UiState,
    handlers: HandlerTable,
    renderer: RendererHandle,
    today: fn() -> NaiveDate,
    default_width: u32,
    default_height: u32,
}

impl<B: ConversionBackend> Orchestrator<B> {
    /// Create an orchestrator with the standard handler table and no renderer.
    ///
    /// The fallback image size comes from [`ConversionBackend::default_dimensions`].
    pub fn new(backend: B) -> Self {
        let (width, height) = backend.default_dimensions();
        Self {
            backend,
            state: UiState::default(),
            handlers: HandlerTable::standard(),
            renderer: Arc::new(NoopRenderer),
            today: today_utc,
            default_width: width,
            default_height: height,
        }
        .with_default_dimensions(width, height)
    }

    pub fn with_renderer(mut self, renderer: RendererHandle) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_handlers(mut self, handlers: HandlerTable) -> Self {
        self.handlers = handlers;
        self
    }

    /// Override the date stamped into download names.
    pub fn with_date_source(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Fallback dimensions for blank or invalid width/height inputs.
    pub fn with_default_dimensions(mut self, width: u32, height: u32) -> Self {
        self.default_width = width.max(1);
        self.default_height = height.max(1);
        self.state.image_width = self.default_width;
        self.state.image_height = self.default_height;
        self
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn view(&self) -> &View {
        &self.state.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Startup health check.
    ///
    /// A failure does not block the UI; it shows the "cannot connect"
    /// banner in the error view. Returns whether the API answered.
    pub async fn init(&mut self) -> bool {
        self.renderer
            .on_placeholder_change(self.state.input_format, placeholder(self.state.input_format));
        match self.backend.check_health().await {
            Ok(status) => {
                info!(status = status.status.as_deref().unwrap_or("ok"), "API is healthy and ready");
                true
            }
            Err(e) => {
                warn!("API health check failed: {}", e);
                let banner = format!(
                    "Cannot connect to the API. Make sure the backend server is running on {}",
                    self.backend.base_url()
                );
                self.show_error(banner);
                false
            }
        }
    }

    /// Apply one event.
    ///
    /// Returns the converted file when the event was a download request and
    /// a result is stored; `None` otherwise.
    pub async fn dispatch(&mut self, event: UiEvent) -> Option<ConvertedFile> {
        let Some(action) = self.handlers.lookup(event.element, event.kind) else {
            debug!(element = ?event.element, kind = ?event.kind, "No handler registered");
            return None;
        };
        debug!(?action, "Dispatching");

        match action {
            Action::SwitchTab(tab) => self.switch_tab(tab),
            Action::OpenFilePicker => self.renderer.on_file_picker_requested(),
            Action::DragOver => self.set_drag_over(true),
            Action::DragLeave => self.set_drag_over(false),
            Action::AcceptFiles => {
                self.set_drag_over(false);
                if let Payload::Files(files) = event.payload {
                    if let Some(file) = files.into_iter().next() {
                        self.handle_file_selection(file);
                    }
                }
            }
            Action::RemoveFile => self.clear_file_selection(),
            Action::SetText => {
                if let Payload::Value(text) = event.payload {
                    self.state.text = text;
                }
            }
            Action::SetInputFormat(format) => self.set_input_format(format),
            Action::SelectFormat(format) => self.select_format(format),
            Action::SetWidth => self.set_width(payload_text(&event.payload)),
            Action::SetHeight => self.set_height(payload_text(&event.payload)),
            Action::Convert => self.convert().await,
            Action::Download => return self.download(),
            Action::ResetForNewConversion => self.reset_for_new_conversion(),
        }
        None
    }

    /// Drain `source`, dispatching every event. Returns all downloads.
    pub async fn run<S: EventSource + ?Sized>(&mut self, source: &mut S) -> Vec<ConvertedFile> {
        let mut downloads = Vec::new();
        while let Some(event) = source.next_event() {
            if let Some(file) = self.dispatch(event).await {
                downloads.push(file);
            }
        }
        downloads
    }

    // ── Tabs ─────────────────────────────────────────────────────────────

    /// Show another input tab and reset the result views.
    ///
    /// The selected file is kept across tab switches.
    pub fn switch_tab(&mut self, tab: InputTab) {
        self.state.current_tab = tab;
        self.renderer.on_tab_change(tab);
        self.reset_view();
    }

    // ── File selection ───────────────────────────────────────────────────

    /// Validate and store a file chosen by browsing or dropping.
    pub fn handle_file_selection(&mut self, file: UploadFile) {
        if !is_allowed_file(&file.name) {
            warn!(file = %file.name, "Rejected file type");
            self.show_error(INVALID_FILE_TYPE.to_string());
            return;
        }

        let size_label = format_file_size(file.size());
        debug!(file = %file.name, size = %size_label, "File selected");
        self.renderer.on_file_selected(&file.name, &size_label);
        self.state.selected_file = Some(file);
        self.state.picker = PickerMode::Selected;
    }

    pub fn clear_file_selection(&mut self) {
        self.state.selected_file = None;
        self.state.picker = PickerMode::Prompt;
        self.renderer.on_file_cleared();
    }

    fn set_drag_over(&mut self, active: bool) {
        if self.state.drag_over != active {
            self.state.drag_over = active;
            self.renderer.on_drag_over_change(active);
        }
    }

    // ── Text input ───────────────────────────────────────────────────────

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.state.text = text.into();
    }

    pub fn set_input_format(&mut self, format: InputFormat) {
        self.state.input_format = format;
        self.renderer
            .on_placeholder_change(format, placeholder(format));
    }

    // ── Output format ────────────────────────────────────────────────────

    pub fn select_format(&mut self, format: OutputFormat) {
        self.state.output_format = format;
        self.renderer
            .on_format_change(format, self.state.image_options_visible());
    }

    pub fn set_width(&mut self, raw: &str) {
        self.state.image_width = parse_dimension(raw, self.default_width);
    }

    pub fn set_height(&mut self, raw: &str) {
        self.state.image_height = parse_dimension(raw, self.default_height);
    }

    // ── Conversion ───────────────────────────────────────────────────────

    /// Validate, call the backend, and show the outcome.
    pub async fn convert(&mut self) {
        if !self.state.convert_enabled {
            debug!("Convert ignored: a conversion is already in flight");
            return;
        }

        let request = match self.build_request() {
            Ok(r) => r,
            Err(e) => {
                self.show_error(e.to_string());
                return;
            }
        };

        self.state.converted = None;
        self.show_progress();

        let outcome = self.backend.convert(&request).await;
        match outcome {
            Ok(result) => {
                let file_name = generate_filename(
                    self.state.selected_file.as_ref().map(|f| f.name.as_str()),
                    self.state.output_format,
                    result.is_archive(),
                    (self.today)(),
                );
                info!(file = %file_name, bytes = result.bytes.len(), "Conversion succeeded");
                let converted = ConvertedFile { file_name, result };
                self.show_success(&converted);
                self.state.converted = Some(converted);
            }
            Err(e) => {
                error!("Conversion error: {}", e);
                let message = e.to_string();
                let message = if message.is_empty() {
                    GENERIC_FAILURE.to_string()
                } else {
                    message
                };
                self.show_error(message);
            }
        }
    }

    /// The stored result, if the last conversion succeeded.
    pub fn download(&self) -> Option<ConvertedFile> {
        let file = self.state.converted.clone();
        if file.is_none() {
            debug!("Download ignored: no converted result");
        }
        file
    }

    /// "Convert another" / "Try again": back to idle with cleared inputs.
    pub fn reset_for_new_conversion(&mut self) {
        self.reset_view();
        match self.state.current_tab {
            InputTab::File => self.clear_file_selection(),
            InputTab::Text => {
                self.state.text.clear();
                self.renderer.on_text_change("");
            }
        }
        self.state.converted = None;
    }

    fn build_request(&self) -> Result<ConversionRequest, ConvertError> {
        let s = &self.state;
        let request = match s.current_tab {
            InputTab::File => {
                let file = s
                    .selected_file
                    .clone()
                    .ok_or_else(|| ConvertError::InvalidRequest(NO_FILE_SELECTED.into()))?;
                ConversionRequest::file(file)
            }
            InputTab::Text => {
                if s.text.trim().is_empty() {
                    return Err(ConvertError::InvalidRequest(NO_TEXT_ENTERED.into()));
                }
                ConversionRequest::text(s.text.clone(), s.input_format)
            }
        };
        Ok(request
            .output_format(s.output_format)
            .dimensions(s.image_width, s.image_height))
    }

    // ── Views ────────────────────────────────────────────────────────────

    fn set_view(&mut self, view: View, convert_enabled: bool) {
        self.state.convert_enabled = convert_enabled;
        self.renderer.on_view_change(&view);
        self.state.view = view;
    }

    fn show_progress(&mut self) {
        let message = format!("Converting to {}...", self.state.output_format.label());
        self.set_view(View::InProgress { message }, false);
    }

    fn show_success(&mut self, converted: &ConvertedFile) {
        let label = self.state.output_format.label();
        let message = if converted.is_archive() {
            format!("Your multi-page document has been converted to {label} images (ZIP file)")
        } else {
            format!("Your document has been converted to {label}")
        };
        let view = View::Success {
            message,
            file_name: converted.file_name.clone(),
        };
        self.set_view(view, true);
    }

    fn show_error(&mut self, message: String) {
        self.set_view(View::Error { message }, true);
    }

    fn reset_view(&mut self) {
        self.set_view(View::Idle, true);
    }
}

fn payload_text(payload: &Payload) -> &str {
    match payload {
        Payload::Value(v) => v,
        _ => "",
    }
}
