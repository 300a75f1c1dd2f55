//! Filter engine.
//!
//! A pure function of the entry list and a [`FilterState`] snapshot. All active
//! predicates are conjunctive, input order is preserved, and nothing here can
//! fail. Categorical matching is exact and case-sensitive; text search is a
//! case-insensitive substring test over the entry's [`haystack`].

use crate::domain::Entry;
use crate::filter::state::FilterState;

/// Joins haystack fields. Not typeable, so a query never matches across fields.
const FIELD_SEPARATOR: char = '\u{0}';

/// Lower-cased searchable text of an entry.
///
/// Title, url, review, notes, and every keyword, in that order.
#[must_use]
pub fn haystack(entry: &Entry) -> String {
    let scalars = [&entry.title, &entry.url, &entry.review, &entry.notes]
        .into_iter()
        .flatten()
        .map(String::as_str);
    let keywords = entry.keywords.iter().flatten().map(String::as_str);

    let mut out = String::new();
    for (i, part) in scalars.chain(keywords).enumerate() {
        if i > 0 {
            out.push(FIELD_SEPARATOR);
        }
        out.push_str(&part.to_lowercase());
    }
    out
}

/// Whether `entry` satisfies every active predicate of `state`.
///
/// # Examples
///
/// ```
/// use reproinventory::domain::Entry;
/// use reproinventory::filter::{matches, FilterState};
///
/// let mut entry = Entry::new("1");
/// entry.title = Some("Image Processing with Python".to_string());
///
/// let mut state = FilterState::default();
/// state.set_search_text("PYTHON");
/// assert!(matches(&entry, &state));
///
/// state.set_search_text("pythons");
/// assert!(!matches(&entry, &state));
/// ```
#[must_use]
pub fn matches(entry: &Entry, state: &FilterState) -> bool {
    matches_needle(entry, state, &state.search_text().to_lowercase())
}

fn matches_needle(entry: &Entry, state: &FilterState, needle: &str) -> bool {
    if state.assessment_only() && !entry.has_assessment() {
        return false;
    }

    let sets_ok = state.set_selections().all(|(facet, selected)| {
        entry
            .tags(facet)
            .is_some_and(|tags| tags.iter().any(|tag| selected.contains(tag)))
    });
    if !sets_ok {
        return false;
    }

    let scalars_ok = state
        .scalar_selections()
        .all(|(facet, selected)| entry.scalar(facet) == Some(selected));
    if !scalars_ok {
        return false;
    }

    needle.is_empty() || haystack(entry).contains(needle)
}

/// Entries satisfying `state`, in input order.
#[must_use]
pub fn apply<'a>(entries: &'a [Entry], state: &FilterState) -> Vec<&'a Entry> {
    matching_indices(entries, state)
        .into_iter()
        .map(|i| &entries[i])
        .collect()
}

/// Positions of the entries satisfying `state`, ascending.
#[must_use]
pub fn matching_indices(entries: &[Entry], state: &FilterState) -> Vec<usize> {
    let _span = tracing::debug_span!(
        "filter_apply",
        total = entries.len(),
        active = state.active_count()
    )
    .entered();

    if state.is_default() {
        return (0..entries.len()).collect();
    }

    let needle = state.search_text().to_lowercase();
    let indices: Vec<usize> = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| matches_needle(entry, state, &needle))
        .map(|(i, _)| i)
        .collect();

    tracing::trace!(matched = indices.len(), "filter applied");
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ScalarFacet, SetFacet};

    fn tagged(id: &str, levels: &[&str]) -> Entry {
        let mut entry = Entry::new(id);
        entry.level = Some(levels.iter().map(|s| (*s).to_string()).collect());
        entry
    }

    #[test]
    fn test_set_facet_requires_overlap() {
        let entry = tagged("1", &["Beginner", "Advanced"]);
        let mut state = FilterState::default();

        state.toggle_value(SetFacet::Level, "Advanced");
        assert!(matches(&entry, &state));

        state.clear_all();
        state.toggle_value(SetFacet::Level, "Intermediate");
        assert!(!matches(&entry, &state));
    }

    #[test]
    fn test_absent_attribute_fails_active_predicate() {
        let entry = Entry::new("1");
        let mut state = FilterState::default();
        state.toggle_value(SetFacet::Platform, "Linux");
        assert!(!matches(&entry, &state));

        let empty = tagged("2", &[]);
        let mut state = FilterState::default();
        state.toggle_value(SetFacet::Level, "Beginner");
        assert!(!matches(&empty, &state));
    }

    #[test]
    fn test_categorical_matching_is_case_sensitive() {
        let entry = tagged("1", &["Beginner"]);
        let mut state = FilterState::default();
        state.toggle_value(SetFacet::Level, "beginner");
        assert!(!matches(&entry, &state));
    }

    #[test]
    fn test_unknown_option_matches_literally() {
        let entry = tagged("1", &["Expert"]);
        let mut state = FilterState::default();
        state.toggle_value(SetFacet::Level, "Expert");
        assert!(matches(&entry, &state));
    }

    #[test]
    fn test_scalar_equality() {
        let mut entry = Entry::new("1");
        entry.course_length = Some("1 week".to_string());

        let mut state = FilterState::default();
        state.set_scalar(ScalarFacet::CourseLength, Some("1 day"));
        assert!(!matches(&entry, &state));

        entry.course_length = Some("1 day".to_string());
        assert!(matches(&entry, &state));
    }

    #[test]
    fn test_search_covers_every_text_field() {
        let mut entry = Entry::new("1");
        entry.url = Some("https://example.org/Nilearn".to_string());
        entry.review = Some("Great intro".to_string());
        entry.notes = Some("Needs Docker".to_string());
        entry.keywords = Some(vec!["fMRI".to_string(), "GLM".to_string()]);

        for query in ["nilearn", "GREAT", "docker", "fmri", "glm"] {
            let mut state = FilterState::default();
            state.set_search_text(query);
            assert!(matches(&entry, &state), "query {query:?} should match");
        }
    }

    #[test]
    fn test_search_does_not_span_fields() {
        let mut entry = Entry::new("1");
        entry.title = Some("abc".to_string());
        entry.url = Some("def".to_string());

        let mut state = FilterState::default();
        state.set_search_text("cd");
        assert!(!matches(&entry, &state));
    }

    #[test]
    fn test_assessment_only() {
        let mut with = Entry::new("1");
        with.assessment = Some("Quiz".to_string());
        let without = Entry::new("2");
        let mut blank = Entry::new("3");
        blank.assessment = Some(" ".to_string());

        let mut state = FilterState::default();
        assert!(matches(&without, &state));

        state.set_assessment_only(true);
        assert!(matches(&with, &state));
        assert!(!matches(&without, &state));
        assert!(!matches(&blank, &state));
    }

    #[test]
    fn test_apply_preserves_order() {
        let entries = vec![
            tagged("a", &["Advanced"]),
            tagged("b", &["Beginner"]),
            tagged("c", &["Advanced", "Beginner"]),
        ];
        let mut state = FilterState::default();
        state.toggle_value(SetFacet::Level, "Advanced");

        let ids: Vec<&str> = apply(&entries, &state).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(matching_indices(&entries, &state), vec![0, 2]);
    }

    #[test]
    fn test_haystack_layout() {
        let mut entry = Entry::new("1");
        entry.title = Some("T".to_string());
        entry.keywords = Some(vec!["K".to_string()]);
        assert_eq!(haystack(&entry), "t\u{0}k");
        assert_eq!(haystack(&Entry::new("2")), "");
    }
}
