//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (`main.rs`) and the
//! domain/filter/worker layers. Everything here is host-free and tested natively.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode and catalog status types
//! - [`state`]: Central application state and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{CatalogStatus, InputMode, SearchFocus};
pub use state::AppState;
