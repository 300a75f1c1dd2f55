//! Laws of the filter engine over a small fixture catalog.

use reproinventory::storage::parse_catalog;
use reproinventory::{apply, matching_indices, Entry, FilterState, ScalarFacet, SetFacet};

const CATALOG: &str = r#"[
  {
    "id": 1,
    "course_name": "Image Processing with Python",
    "url": "https://example.org/python-imaging",
    "level": ["Beginner", "Advanced"],
    "course_length": "1 day",
    "programming_language": ["Python"],
    "imaging_modality": ["MRI"],
    "assessment": "Quiz"
  },
  {
    "id": 2,
    "courseName": "Reproducible fMRI Pipelines",
    "level": ["Intermediate"],
    "courseLength": "1 week",
    "neuroimagingSoftware": ["FSL", "SPM"],
    "keywords": ["BIDS", "containers"],
    "openDataset": true
  },
  {
    "id": 3,
    "course_name": "EEG Basics",
    "level": "Beginner",
    "course_length": "1 day",
    "imaging_modality": ["EEG"],
    "review": "Gentle introduction, no python required",
    "assessment": "   "
  },
  {
    "course_name": "Statistics for Neuroimaging",
    "programming_language": ["R"],
    "notes": "Uses open datasets",
    "assessment": true
  },
  {
    "id": "5",
    "course_name": "Git and Containers",
    "level": ["Advanced"],
    "platform": ["Linux", "Mac"],
    "quadrants": ["Reproducible"]
  }
]"#;

fn catalog() -> Vec<Entry> {
    parse_catalog(CATALOG).unwrap()
}

fn ids(entries: &[&Entry]) -> Vec<String> {
    entries.iter().map(|e| e.id.clone()).collect()
}

fn with_set(facet: SetFacet, values: &[&str]) -> FilterState {
    let mut state = FilterState::default();
    for value in values {
        state.toggle_value(facet, value);
    }
    state
}

fn with_search(text: &str) -> FilterState {
    let mut state = FilterState::default();
    state.set_search_text(text);
    state
}

/// One state per kind of constraint, used to exercise the laws below.
fn sample_states() -> Vec<FilterState> {
    let mut scalar = FilterState::default();
    scalar.set_scalar(ScalarFacet::CourseLength, Some("1 day"));

    let mut assessment = FilterState::default();
    assessment.set_assessment_only(true);

    let mut combined = with_set(SetFacet::Level, &["Beginner", "Advanced"]);
    combined.set_search_text("python");

    vec![
        FilterState::default(),
        with_set(SetFacet::Level, &["Beginner"]),
        with_set(SetFacet::Level, &["Intermediate", "Advanced"]),
        with_set(SetFacet::ImagingModality, &["EEG", "MRI"]),
        with_set(SetFacet::Platform, &["Windows"]),
        scalar,
        assessment,
        with_search("fmri"),
        with_search("OPEN"),
        combined,
    ]
}

#[test]
fn default_state_is_identity() {
    let entries = catalog();
    let result = apply(&entries, &FilterState::default());

    assert_eq!(result.len(), entries.len());
    assert!(result.iter().zip(&entries).all(|(a, b)| *a == b));
}

#[test]
fn result_is_an_ordered_subset() {
    let entries = catalog();
    for state in sample_states() {
        let indices = matching_indices(&entries, &state);
        assert!(indices.windows(2).all(|w| w[0] < w[1]), "{state:?}");
        assert!(indices.iter().all(|&i| i < entries.len()));

        let result = apply(&entries, &state);
        let expected: Vec<&Entry> = indices.iter().map(|&i| &entries[i]).collect();
        assert_eq!(result, expected);
    }
}

#[test]
fn adding_a_constraint_never_widens() {
    let entries = catalog();
    for base in sample_states() {
        let before = matching_indices(&entries, &base);

        let mut narrowed = base.clone();
        narrowed.toggle_value(SetFacet::Level, "Beginner");
        if narrowed.selected(SetFacet::Level).is_some_and(|v| v.contains("Beginner"))
            && base.selected(SetFacet::Level).is_none()
        {
            let after = matching_indices(&entries, &narrowed);
            assert!(after.iter().all(|i| before.contains(i)), "{narrowed:?}");
        }

        let mut narrowed = base.clone();
        narrowed.set_assessment_only(true);
        let after = matching_indices(&entries, &narrowed);
        assert!(after.iter().all(|i| before.contains(i)), "{narrowed:?}");

        if base.search_text().is_empty() {
            let mut narrowed = base.clone();
            narrowed.set_search_text("course");
            let after = matching_indices(&entries, &narrowed);
            assert!(after.iter().all(|i| before.contains(i)), "{narrowed:?}");
        }
    }
}

#[test]
fn applying_twice_changes_nothing() {
    let entries = catalog();
    for state in sample_states() {
        let once: Vec<Entry> = apply(&entries, &state).into_iter().cloned().collect();
        let twice: Vec<Entry> = apply(&once, &state).into_iter().cloned().collect();
        assert_eq!(once, twice, "{state:?}");
    }
}

#[test]
fn set_facets_match_on_overlap() {
    let entries = catalog();

    let result = apply(&entries, &with_set(SetFacet::Level, &["Advanced"]));
    assert_eq!(ids(&result), ["1", "5"]);

    let result = apply(&entries, &with_set(SetFacet::Level, &["Intermediate"]));
    assert_eq!(ids(&result), ["2"]);

    // A bare string is a one-element set; a missing field never matches.
    let result = apply(&entries, &with_set(SetFacet::Level, &["Beginner"]));
    assert_eq!(ids(&result), ["1", "3"]);
}

#[test]
fn facets_combine_with_and() {
    let entries = catalog();
    let mut state = with_set(SetFacet::Level, &["Beginner", "Advanced"]);
    state.toggle_value(SetFacet::ImagingModality, "EEG");

    assert_eq!(ids(&apply(&entries, &state)), ["3"]);
}

#[test]
fn scalar_facets_match_on_equality() {
    let entries = catalog();
    let mut state = FilterState::default();

    state.set_scalar(ScalarFacet::CourseLength, Some("1 day"));
    assert_eq!(ids(&apply(&entries, &state)), ["1", "3"]);

    state.set_scalar(ScalarFacet::CourseLength, Some("1 week"));
    assert_eq!(ids(&apply(&entries, &state)), ["2"]);

    state.set_scalar(ScalarFacet::OpenDataset, Some("True"));
    assert_eq!(ids(&apply(&entries, &state)), ["2"]);
}

#[test]
fn search_is_case_insensitive_substring() {
    let entries = catalog();

    assert_eq!(ids(&apply(&entries, &with_search("python"))), ["1", "3"]);
    assert_eq!(ids(&apply(&entries, &with_search("PYTHON"))), ["1", "3"]);
    assert!(apply(&entries, &with_search("pythons")).is_empty());

    // Keywords and notes are searched too.
    assert_eq!(ids(&apply(&entries, &with_search("bids"))), ["2"]);
    assert_eq!(ids(&apply(&entries, &with_search("open datasets"))), ["#3"]);
}

#[test]
fn assessment_only_drops_missing_and_blank() {
    let entries = catalog();
    let mut state = FilterState::default();
    state.set_assessment_only(true);

    assert_eq!(ids(&apply(&entries, &state)), ["1", "#3"]);
}

#[test]
fn empty_catalog_stays_empty() {
    for state in sample_states() {
        assert!(apply(&[], &state).is_empty());
        assert!(matching_indices(&[], &state).is_empty());
    }
}

#[test]
fn unknown_option_values_are_matched_literally() {
    let entries = catalog();
    let result = apply(&entries, &with_set(SetFacet::Level, &["Expert"]));
    assert!(result.is_empty());

    // "Reproducible" is not one of the Quadrants options, yet it still matches.
    assert!(!SetFacet::Quadrants.options().contains(&"Reproducible"));
    let result = apply(&entries, &with_set(SetFacet::Quadrants, &["Reproducible"]));
    assert_eq!(ids(&result), ["5"]);
}
