//! DOM-independent UI orchestration.
//!
//! The browser page is modelled as a set of [`events::Element`]s that emit
//! [`events::UiEvent`]s. An [`orchestrator::Orchestrator`] owns the
//! [`state::UiState`], looks each event up in a [`events::HandlerTable`],
//! applies the resulting transition, and reports every visible change to a
//! [`render::ViewRenderer`].
//!
//! ## Data Flow
//!
//! ```text
//! EventSource ──▶ HandlerTable ──▶ Orchestrator ──▶ ConversionBackend
//!  (DOM / CLI)    (element,kind)    (UiState)        (HTTP)
//!                                       │
//!                                       └──▶ ViewRenderer
//! ```

pub mod events;
pub mod orchestrator;
pub mod render;
pub mod state;
pub mod validate;
