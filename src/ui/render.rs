//! Renderer trait for visible UI changes.
//!
//! Inject an [`Arc<dyn ViewRenderer>`] into the orchestrator to receive
//! every change a page would show: view switches, file-picker updates,
//! format toggles. A browser front end maps these onto DOM updates; the
//! `docconv` binary maps them onto a spinner and coloured status lines.
//!
//! # Example
//!
//! ```rust
//! use doc_converter::ui::render::ViewRenderer;
//! use doc_converter::ui::state::View;
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Default)]
//! struct LastView(Mutex<Option<&'static str>>);
//!
//! impl ViewRenderer for LastView {
//!     fn on_view_change(&self, view: &View) {
//!         *self.0.lock().unwrap() = Some(view.name());
//!     }
//! }
//!
//! let r = LastView::default();
//! r.on_view_change(&View::Idle);
//! assert_eq!(*r.0.lock().unwrap(), Some("idle"));
//! ```

use crate::request::{InputFormat, OutputFormat};
use crate::ui::state::{InputTab, View};
use std::sync::Arc;

/// Receives UI updates from the orchestrator.
///
/// All methods have default no-op implementations so renderers only
/// override what they display.
pub trait ViewRenderer: Send + Sync {
    /// The active result view changed (idle / in-progress / success / error).
    fn on_view_change(&self, view: &View) {
        let _ = view;
    }

    /// A different input tab is now shown.
    fn on_tab_change(&self, tab: InputTab) {
        let _ = tab;
    }

    /// The user asked to browse for a file.
    fn on_file_picker_requested(&self) {}

    /// A valid file was stored; the picker shows its summary.
    ///
    /// # Arguments
    /// * `name`       — file name as uploaded
    /// * `size_label` — human-readable size, e.g. `1.5 KB`
    fn on_file_selected(&self, name: &str, size_label: &str) {
        let _ = (name, size_label);
    }

    /// The stored file was removed; the picker shows its prompt again.
    fn on_file_cleared(&self) {}

    /// Drag highlight toggled on the upload area.
    fn on_drag_over_change(&self, active: bool) {
        let _ = active;
    }

    /// The text box was cleared or rewritten by the orchestrator.
    fn on_text_change(&self, text: &str) {
        let _ = text;
    }

    /// New placeholder for the text box after an input-format change.
    fn on_placeholder_change(&self, format: InputFormat, placeholder: &str) {
        let _ = (format, placeholder);
    }

    /// Output format selected; `show_image_options` toggles width/height.
    fn on_format_change(&self, format: OutputFormat, show_image_options: bool) {
        let _ = (format, show_image_options);
    }
}

/// A renderer that ignores everything. Default for headless use.
pub struct NoopRenderer;

impl ViewRenderer for NoopRenderer {}

/// Convenience alias matching the type stored in the orchestrator.
pub type RendererHandle = Arc<dyn ViewRenderer>;
