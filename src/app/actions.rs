//! Side effects requested by the event handler.
//!
//! The handler mutates [`AppState`](crate::app::AppState) and returns a list of
//! [`Action`]s. The plugin runtime in `main.rs` executes them through the Zellij
//! host API, keeping the library free of host calls.
//!
//! # Example
//!
//! ```rust
//! use reproinventory::app::Action;
//! use reproinventory::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::load_catalog("/host/catalog.json".to_string(), None)),
//! ];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Posts a message to the catalog worker.
    PostToWorker(WorkerMessage),

    /// Opens a URL with the configured opener command.
    OpenUrl {
        /// The entry's URL, passed verbatim to the opener.
        url: String,
    },
}
