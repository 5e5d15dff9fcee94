//! UI state owned by the orchestrator.

use crate::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::output::ConvertedFile;
use crate::request::{InputFormat, OutputFormat, UploadFile};

/// Which input panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputTab {
    #[default]
    File,
    Text,
}

/// File picker display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerMode {
    /// "Drop a file or click to browse".
    #[default]
    Prompt,
    /// Name and size of the selected file, with a remove button.
    Selected,
}

/// The four mutually exclusive result views.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Idle,
    InProgress {
        message: String,
    },
    Success {
        message: String,
        file_name: String,
    },
    Error {
        message: String,
    },
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Idle => "idle",
            View::InProgress { .. } => "in-progress",
            View::Success { .. } => "success",
            View::Error { .. } => "error",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, View::Idle)
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, View::InProgress { .. })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, View::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, View::Error { .. })
    }

    /// Message shown by the view, if it has one.
    pub fn message(&self) -> Option<&str> {
        match self {
            View::Idle => None,
            View::InProgress { message }
            | View::Success { message, .. }
            | View::Error { message } => Some(message),
        }
    }
}

/// Everything the page remembers between events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub current_tab: InputTab,
    pub selected_file: Option<UploadFile>,
    pub picker: PickerMode,
    pub drag_over: bool,
    pub text: String,
    pub input_format: InputFormat,
    pub output_format: OutputFormat,
    pub image_width: u32,
    pub image_height: u32,
    pub view: View,
    pub convert_enabled: bool,
    /// Last successful conversion; cleared at the start of every attempt.
    pub converted: Option<ConvertedFile>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            current_tab: InputTab::default(),
            selected_file: None,
            picker: PickerMode::default(),
            drag_over: false,
            text: String::new(),
            input_format: InputFormat::default(),
            output_format: OutputFormat::default(),
            image_width: DEFAULT_WIDTH,
            image_height: DEFAULT_HEIGHT,
            view: View::default(),
            convert_enabled: true,
            converted: None,
        }
    }
}

impl UiState {
    /// Width/height controls are only visible for image output.
    pub fn image_options_visible(&self) -> bool {
        self.output_format.is_image()
    }
}
