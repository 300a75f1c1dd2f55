//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings, selection flags and highlight
//! ranges, and no business logic.
//!
//! # Example
//!
//! ```rust
//! use reproinventory::ui::viewmodel::{DisplayItem, FooterInfo, HeaderInfo, Layout, UIViewModel};
//!
//! let vm = UIViewModel {
//!     layout: Layout::Normal,
//!     display_items: vec![DisplayItem {
//!         title: "Intro to BIDS".to_string(),
//!         level: "Beginner".to_string(),
//!         length: "1 day".to_string(),
//!         has_assessment: false,
//!         is_selected: true,
//!         highlight_ranges: vec![(0, 5)],
//!     }],
//!     selected_index: 0,
//!     header: HeaderInfo { title: " ReproInventory (1/1) ".to_string(), filters: None },
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//!     empty_state: None,
//!     search_bar: None,
//!     facets_panel: None,
//!     detail: None,
//! };
//! assert_eq!(vm.display_items.len(), 1);
//! ```

/// Which screen layout the renderer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Centered status message only (catalog loading or unavailable).
    Status,
    /// Header, table, footer.
    Normal,
    /// Header, search bar, table, footer.
    Search,
    /// Header, facet panel, footer.
    Filters,
    /// Header, detail card, footer.
    Detail,
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub layout: Layout,

    /// Rows of the visible window of the result table.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,
    pub footer: FooterInfo,

    /// Message shown instead of (or in place of) the table.
    pub empty_state: Option<EmptyState>,

    /// Present in search layout.
    pub search_bar: Option<SearchBarInfo>,

    /// Present in filter layout.
    pub facets_panel: Option<FacetsPanel>,

    /// Present in detail layout.
    pub detail: Option<DetailCard>,
}

/// One row of the result table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Title, already truncated to the column width.
    pub title: String,

    /// Level tags joined with ", ".
    pub level: String,

    pub length: String,

    pub has_assessment: bool,

    pub is_selected: bool,

    /// Search matches in `title` as `(start, end)` char indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title with the shown/total counts.
    pub title: String,

    /// One-line summary of active filters, if any.
    pub filters: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,

    /// Whether keystrokes currently edit the query.
    pub is_typing: bool,
}

/// The facet list on the left and the current facet's options on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetsPanel {
    pub facets: Vec<FacetRow>,
    pub options: Vec<OptionRow>,
    pub assessment_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetRow {
    pub label: String,

    /// Number of selected values (0 or 1 for scalar facets).
    pub selected_count: usize,

    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    pub label: String,
    pub is_checked: bool,
    pub is_cursor: bool,
}

/// Every present field of one entry, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailCard {
    pub title: String,
    pub fields: Vec<(String, String)>,
}
