//! Input mode state machine.
//!
//! The mode decides which keybindings are active and which layout the renderer
//! uses:
//! - **Normal**: Navigate the result table
//! - **Search**: Edit the search text (typing) or walk its results (navigating)
//! - **Filter**: The facet panel, toggling options under a cursor
//! - **Detail**: The card of the selected entry
//!
//! # Example
//!
//! ```rust
//! use reproinventory::app::modes::{InputMode, SearchFocus};
//!
//! let mode = InputMode::Search(SearchFocus::Typing);
//! assert!(mode.is_search());
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keys edit the search text; results update on every keystroke.
    Typing,

    /// Keys move through the results; `/` returns to typing.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    Normal,

    /// Search bar visible, with a [`SearchFocus`].
    Search(SearchFocus),

    /// Facet panel open.
    Filter,

    /// Detail card of the selected entry open.
    Detail,
}

impl InputMode {
    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Search(_))
    }

    /// Whether printable keys go to the search text.
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Search(SearchFocus::Typing))
    }
}

/// Loading lifecycle of the catalog as seen by the UI.
///
/// Starts in `Loading`; moves once to `Ready` or `Failed` and stays there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    Loading,
    Ready,
    Failed(String),
}
