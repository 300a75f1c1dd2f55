//! The current query.
//!
//! [`FilterState`] is owned by the UI layer and mutated in place by user
//! interaction. The engine only reads it. The default state constrains nothing,
//! and every operation keeps the representation canonical: an emptied selection
//! is removed, so a state with no active predicate always equals the default.

use crate::domain::{Facet, ScalarFacet, SetFacet};
use std::collections::{BTreeMap, BTreeSet};

/// Search text plus one selection per facet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    search_text: String,
    selected: BTreeMap<SetFacet, BTreeSet<String>>,
    scalars: BTreeMap<ScalarFacet, String>,
    assessment_only: bool,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_text.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search_text.pop();
    }

    /// Selected values of a set-valued facet, `None` when it is unconstrained.
    #[must_use]
    pub fn selected(&self, facet: SetFacet) -> Option<&BTreeSet<String>> {
        self.selected.get(&facet)
    }

    /// Iterates over the active set-valued selections.
    pub fn set_selections(&self) -> impl Iterator<Item = (SetFacet, &BTreeSet<String>)> {
        self.selected.iter().map(|(facet, values)| (*facet, values))
    }

    /// Selected value of a scalar facet, `None` when it is unconstrained.
    #[must_use]
    pub fn scalar(&self, facet: ScalarFacet) -> Option<&str> {
        self.scalars.get(&facet).map(String::as_str)
    }

    /// Iterates over the active scalar selections.
    pub fn scalar_selections(&self) -> impl Iterator<Item = (ScalarFacet, &str)> {
        self.scalars
            .iter()
            .map(|(facet, value)| (*facet, value.as_str()))
    }

    #[must_use]
    pub fn assessment_only(&self) -> bool {
        self.assessment_only
    }

    pub fn set_assessment_only(&mut self, on: bool) {
        self.assessment_only = on;
    }

    pub fn toggle_assessment_only(&mut self) {
        self.assessment_only = !self.assessment_only;
    }

    /// Adds `value` to the facet's selection, or removes it if already selected.
    ///
    /// # Examples
    ///
    /// ```
    /// use reproinventory::filter::FilterState;
    /// use reproinventory::domain::SetFacet;
    ///
    /// let mut state = FilterState::default();
    /// state.toggle_value(SetFacet::Level, "Beginner");
    /// assert!(state.is_selected(SetFacet::Level.into(), "Beginner"));
    ///
    /// state.toggle_value(SetFacet::Level, "Beginner");
    /// assert!(state.is_default());
    /// ```
    pub fn toggle_value(&mut self, facet: SetFacet, value: &str) {
        let values = self.selected.entry(facet).or_default();
        if !values.remove(value) {
            values.insert(value.to_string());
        }
        if values.is_empty() {
            self.selected.remove(&facet);
        }
    }

    /// Selects a scalar value, or clears the facet with `None`.
    pub fn set_scalar(&mut self, facet: ScalarFacet, value: Option<&str>) {
        match value {
            Some(value) => {
                self.scalars.insert(facet, value.to_string());
            }
            None => {
                self.scalars.remove(&facet);
            }
        }
    }

    /// Toggles an option of any facet.
    ///
    /// Set facets behave like [`toggle_value`](Self::toggle_value). Scalar facets
    /// select the value, or clear it when it is the current selection.
    pub fn toggle_option(&mut self, facet: Facet, value: &str) {
        match facet {
            Facet::Set(facet) => self.toggle_value(facet, value),
            Facet::Scalar(facet) => {
                let next = if self.scalar(facet) == Some(value) {
                    None
                } else {
                    Some(value)
                };
                self.set_scalar(facet, next);
            }
        }
    }

    /// Whether `value` is part of the facet's current selection.
    #[must_use]
    pub fn is_selected(&self, facet: Facet, value: &str) -> bool {
        match facet {
            Facet::Set(facet) => self
                .selected
                .get(&facet)
                .is_some_and(|values| values.contains(value)),
            Facet::Scalar(facet) => self.scalar(facet) == Some(value),
        }
    }

    /// Whether the facet currently constrains the result.
    #[must_use]
    pub fn is_facet_active(&self, facet: Facet) -> bool {
        match facet {
            Facet::Set(facet) => self.selected.contains_key(&facet),
            Facet::Scalar(facet) => self.scalars.contains_key(&facet),
        }
    }

    pub fn clear_facet(&mut self, facet: Facet) {
        match facet {
            Facet::Set(facet) => {
                self.selected.remove(&facet);
            }
            Facet::Scalar(facet) => {
                self.scalars.remove(&facet);
            }
        }
    }

    /// Resets every predicate, search text included.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Whether no predicate is active.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of active predicates: search, each constrained facet, assessment-only.
    #[must_use]
    pub fn active_count(&self) -> usize {
        usize::from(!self.search_text.is_empty())
            + self.selected.len()
            + self.scalars.len()
            + usize::from(self.assessment_only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_active_predicate() {
        let state = FilterState::default();
        assert!(state.is_default());
        assert_eq!(state.active_count(), 0);
        assert_eq!(state.search_text(), "");
        assert!(!state.assessment_only());
    }

    #[test]
    fn test_toggle_value_adds_and_removes() {
        let mut state = FilterState::default();
        state.toggle_value(SetFacet::Platform, "Linux");
        state.toggle_value(SetFacet::Platform, "Docker");
        assert_eq!(state.selected(SetFacet::Platform).map(BTreeSet::len), Some(2));
        assert_eq!(state.active_count(), 1);

        state.toggle_value(SetFacet::Platform, "Linux");
        state.toggle_value(SetFacet::Platform, "Docker");
        assert!(state.selected(SetFacet::Platform).is_none());
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_toggle_option_on_scalar_selects_then_clears() {
        let mut state = FilterState::default();
        let length = Facet::Scalar(ScalarFacet::CourseLength);

        state.toggle_option(length, "1 day");
        assert_eq!(state.scalar(ScalarFacet::CourseLength), Some("1 day"));

        state.toggle_option(length, "1 week");
        assert_eq!(state.scalar(ScalarFacet::CourseLength), Some("1 week"));

        state.toggle_option(length, "1 week");
        assert!(state.is_default());
    }

    #[test]
    fn test_clear_facet_only_touches_that_facet() {
        let mut state = FilterState::default();
        state.toggle_value(SetFacet::Level, "Advanced");
        state.set_scalar(ScalarFacet::OpenDataset, Some("True"));

        state.clear_facet(Facet::Set(SetFacet::Level));
        assert!(!state.is_facet_active(Facet::Set(SetFacet::Level)));
        assert!(state.is_facet_active(Facet::Scalar(ScalarFacet::OpenDataset)));
    }

    #[test]
    fn test_clear_all_resets_everything() {
        let mut state = FilterState::default();
        state.set_search_text("python");
        state.toggle_value(SetFacet::Language, "English");
        state.set_scalar(ScalarFacet::CourseLength, Some("1 day"));
        state.toggle_assessment_only();
        assert_eq!(state.active_count(), 4);

        state.clear_all();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_search_editing() {
        let mut state = FilterState::default();
        state.push_search_char('f');
        state.push_search_char('é');
        assert_eq!(state.search_text(), "fé");
        state.pop_search_char();
        state.pop_search_char();
        state.pop_search_char();
        assert_eq!(state.search_text(), "");
    }
}
