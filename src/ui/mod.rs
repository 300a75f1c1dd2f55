//! Terminal UI for the catalog browser.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready state for one frame
//! - [`renderer`]: Layout dispatch
//! - [`components`]: Per-region renderers
//! - [`helpers`]: Truncation, padding and match highlighting
//! - [`theme`]: Color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DetailCard, DisplayItem, EmptyState, FacetRow, FacetsPanel, FooterInfo, HeaderInfo, Layout,
    OptionRow, SearchBarInfo, UIViewModel,
};
