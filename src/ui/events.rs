//! Events, the (element, event) → action table, and event sources.
//!
//! Nothing here touches a real DOM. A front end translates whatever its
//! toolkit emits into [`UiEvent`]s; tests feed [`ScriptedEvents`].

use crate::request::{InputFormat, OutputFormat, UploadFile};
use crate::ui::state::InputTab;
use std::collections::{HashMap, VecDeque};

/// Interactive elements of the converter page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    TabButton(InputTab),
    UploadArea,
    FileInput,
    RemoveFileButton,
    TextInput,
    InputFormatRadio(InputFormat),
    FormatButton(OutputFormat),
    ImageWidth,
    ImageHeight,
    ConvertButton,
    DownloadButton,
    ConvertAnotherButton,
    TryAgainButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
    Input,
    DragOver,
    DragLeave,
    Drop,
}

/// Data carried by an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Payload {
    #[default]
    None,
    /// Files from a file input or a drop; only the first is used.
    Files(Vec<UploadFile>),
    /// Current value of a text/number input.
    Value(String),
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiEvent {
    pub element: Element,
    pub kind: EventKind,
    pub payload: Payload,
}

impl UiEvent {
    pub fn new(element: Element, kind: EventKind) -> Self {
        Self {
            element,
            kind,
            payload: Payload::None,
        }
    }

    pub fn click(element: Element) -> Self {
        Self::new(element, EventKind::Click)
    }

    pub fn value(element: Element, kind: EventKind, value: impl Into<String>) -> Self {
        Self {
            element,
            kind,
            payload: Payload::Value(value.into()),
        }
    }

    pub fn files(element: Element, kind: EventKind, files: Vec<UploadFile>) -> Self {
        Self {
            element,
            kind,
            payload: Payload::Files(files),
        }
    }

    // Shorthands for the common interactions.

    pub fn switch_tab(tab: InputTab) -> Self {
        Self::click(Element::TabButton(tab))
    }

    pub fn choose_file(file: UploadFile) -> Self {
        Self::files(Element::FileInput, EventKind::Change, vec![file])
    }

    pub fn drop_file(file: UploadFile) -> Self {
        Self::files(Element::UploadArea, EventKind::Drop, vec![file])
    }

    pub fn type_text(text: impl Into<String>) -> Self {
        Self::value(Element::TextInput, EventKind::Input, text)
    }

    pub fn input_format(format: InputFormat) -> Self {
        Self::new(Element::InputFormatRadio(format), EventKind::Change)
    }

    pub fn output_format(format: OutputFormat) -> Self {
        Self::click(Element::FormatButton(format))
    }

    pub fn width(value: impl Into<String>) -> Self {
        Self::value(Element::ImageWidth, EventKind::Change, value)
    }

    pub fn height(value: impl Into<String>) -> Self {
        Self::value(Element::ImageHeight, EventKind::Change, value)
    }

    pub fn convert() -> Self {
        Self::click(Element::ConvertButton)
    }

    pub fn download() -> Self {
        Self::click(Element::DownloadButton)
    }
}

/// State transition bound to an (element, event) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SwitchTab(InputTab),
    OpenFilePicker,
    AcceptFiles,
    DragOver,
    DragLeave,
    RemoveFile,
    SetText,
    SetInputFormat(InputFormat),
    SelectFormat(OutputFormat),
    SetWidth,
    SetHeight,
    Convert,
    Download,
    ResetForNewConversion,
}

/// Registration table mapping (element, event kind) to an [`Action`].
#[derive(Debug, Clone, Default)]
pub struct HandlerTable {
    handlers: HashMap<(Element, EventKind), Action>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The converter page's wiring.
    pub fn standard() -> Self {
        let mut t = Self::new();
        for tab in [InputTab::File, InputTab::Text] {
            t.register(Element::TabButton(tab), EventKind::Click, Action::SwitchTab(tab));
        }

        t.register(Element::UploadArea, EventKind::Click, Action::OpenFilePicker);
        t.register(Element::UploadArea, EventKind::DragOver, Action::DragOver);
        t.register(Element::UploadArea, EventKind::DragLeave, Action::DragLeave);
        t.register(Element::UploadArea, EventKind::Drop, Action::AcceptFiles);
        t.register(Element::FileInput, EventKind::Change, Action::AcceptFiles);
        t.register(Element::RemoveFileButton, EventKind::Click, Action::RemoveFile);

        t.register(Element::TextInput, EventKind::Input, Action::SetText);
        t.register(Element::TextInput, EventKind::Change, Action::SetText);
        for f in [InputFormat::Markdown, InputFormat::Html] {
            t.register(
                Element::InputFormatRadio(f),
                EventKind::Change,
                Action::SetInputFormat(f),
            );
        }

        for f in OutputFormat::ALL {
            t.register(Element::FormatButton(f), EventKind::Click, Action::SelectFormat(f));
        }
        t.register(Element::ImageWidth, EventKind::Change, Action::SetWidth);
        t.register(Element::ImageHeight, EventKind::Change, Action::SetHeight);

        t.register(Element::ConvertButton, EventKind::Click, Action::Convert);
        t.register(Element::DownloadButton, EventKind::Click, Action::Download);
        t.register(
            Element::ConvertAnotherButton,
            EventKind::Click,
            Action::ResetForNewConversion,
        );
        t.register(
            Element::TryAgainButton,
            EventKind::Click,
            Action::ResetForNewConversion,
        );
        t
    }

    /// Bind `action` to (element, kind), replacing any previous binding.
    pub fn register(&mut self, element: Element, kind: EventKind, action: Action) -> &mut Self {
        self.handlers.insert((element, kind), action);
        self
    }

    pub fn lookup(&self, element: Element, kind: EventKind) -> Option<Action> {
        self.handlers.get(&(element, kind)).copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Something that yields UI events until it runs dry.
pub trait EventSource {
    fn next_event(&mut self) -> Option<UiEvent>;
}

/// A fixed, pre-recorded sequence of events.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    queue: VecDeque<UiEvent>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = UiEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: UiEvent) {
        self.queue.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> Option<UiEvent> {
        self.queue.pop_front()
    }
}
