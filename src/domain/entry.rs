//! Catalog entry model.
//!
//! This module defines [`Entry`], one training material in the catalog. Every
//! attribute except `id` is optional, and an absent attribute is distinct from a
//! present-but-empty one. Entries are immutable once the store has loaded them.
//!
//! Decoding from the catalog file is permissive: see [`Entry::from_json`].

use crate::domain::facet::{ScalarFacet, SetFacet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Title shown for entries without a course name.
const UNTITLED: &str = "(untitled)";

/// One item of the training-materials catalog.
///
/// # Fields
///
/// - `id`: Unique identifier, always present
/// - `title`, `url`: Free text, searched
/// - `course_length`, `open_dataset`: Scalar facets
/// - `level` .. `quadrants`: Set-valued facets
/// - `keywords`, `review`, `notes`: Free text, searched only
/// - `assessment`: Non-empty text means the material has an assessment
/// - `tag_team`, `prerequisite`, `source`, `last_updated`: Shown in the detail card only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_dataset: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction_medium: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub programming_language: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neuroimaging_software: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imaging_modality: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadrants: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_team: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerequisite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl Entry {
    /// Creates an entry with the given id and every other attribute absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use reproinventory::domain::Entry;
    ///
    /// let entry = Entry::new("7");
    /// assert_eq!(entry.id, "7");
    /// assert!(entry.title.is_none());
    /// assert!(!entry.has_assessment());
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Decodes one element of the catalog array.
    ///
    /// `index` is the element's position and only feeds the synthetic id `#<index>`
    /// given to elements without a usable `id`. Fields of the wrong type read as
    /// absent; elements that are not objects yield an id-only entry. Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use reproinventory::domain::{Entry, ScalarFacet};
    /// use serde_json::json;
    ///
    /// let value = json!({
    ///     "course_name": "Intro to BIDS",
    ///     "open_dataset": true,
    ///     "language": "English, French",
    /// });
    /// let entry = Entry::from_json(3, &value);
    ///
    /// assert_eq!(entry.id, "#3");
    /// assert_eq!(entry.title.as_deref(), Some("Intro to BIDS"));
    /// assert_eq!(entry.scalar(ScalarFacet::OpenDataset), Some("True"));
    /// assert_eq!(entry.language, Some(vec!["English, French".to_string()]));
    /// ```
    /// The element's own `id` (string or number), if it has a usable one.
    #[must_use]
    pub fn json_id(value: &Value) -> Option<String> {
        match value.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_json(index: usize, value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::new(synthetic_id(index));
        };

        let id = Self::json_id(value).unwrap_or_else(|| synthetic_id(index));

        let mut entry = Self::new(id);
        entry.title = lookup(object, &["course_name", "courseName", "title"]).and_then(text);
        entry.url = lookup(object, &["url"]).and_then(text);
        entry.review = lookup(object, &["review"]).and_then(text);
        entry.notes = lookup(object, &["notes"]).and_then(text);
        entry.keywords = lookup(object, &["keywords"]).and_then(tags);
        entry.assessment = lookup(object, &["assessment"]).and_then(assessment);

        for facet in ScalarFacet::ALL {
            let value = lookup(object, &[facet.key(), facet.camel_key()]).and_then(scalar);
            *entry.scalar_mut(facet) = value;
        }

        for facet in SetFacet::ALL {
            let value = lookup(object, &[facet.key(), facet.camel_key()]).and_then(tags);
            *entry.tags_mut(facet) = value;
        }

        entry.tag_team = lookup(object, &["tag_team", "tagTeam"]).and_then(tags);
        entry.prerequisite = lookup(object, &["prerequisite"]).and_then(text);
        entry.source = lookup(object, &["source"]).and_then(text);
        entry.last_updated = lookup(object, &["last_updated", "lastUpdated"]).and_then(text);

        entry
    }

    /// Returns the tags of a set-valued facet, `None` when the attribute is absent.
    #[must_use]
    pub fn tags(&self, facet: SetFacet) -> Option<&[String]> {
        let field = match facet {
            SetFacet::Level => &self.level,
            SetFacet::Platform => &self.platform,
            SetFacet::InstructionMedium => &self.instruction_medium,
            SetFacet::Delivery => &self.delivery,
            SetFacet::Language => &self.language,
            SetFacet::ProgrammingLanguage => &self.programming_language,
            SetFacet::NeuroimagingSoftware => &self.neuroimaging_software,
            SetFacet::ImagingModality => &self.imaging_modality,
            SetFacet::Quadrants => &self.quadrants,
        };
        field.as_deref()
    }

    /// Returns the value of a scalar facet, `None` when the attribute is absent.
    #[must_use]
    pub fn scalar(&self, facet: ScalarFacet) -> Option<&str> {
        match facet {
            ScalarFacet::CourseLength => self.course_length.as_deref(),
            ScalarFacet::OpenDataset => self.open_dataset.as_deref(),
        }
    }

    fn tags_mut(&mut self, facet: SetFacet) -> &mut Option<Vec<String>> {
        match facet {
            SetFacet::Level => &mut self.level,
            SetFacet::Platform => &mut self.platform,
            SetFacet::InstructionMedium => &mut self.instruction_medium,
            SetFacet::Delivery => &mut self.delivery,
            SetFacet::Language => &mut self.language,
            SetFacet::ProgrammingLanguage => &mut self.programming_language,
            SetFacet::NeuroimagingSoftware => &mut self.neuroimaging_software,
            SetFacet::ImagingModality => &mut self.imaging_modality,
            SetFacet::Quadrants => &mut self.quadrants,
        }
    }

    fn scalar_mut(&mut self, facet: ScalarFacet) -> &mut Option<String> {
        match facet {
            ScalarFacet::CourseLength => &mut self.course_length,
            ScalarFacet::OpenDataset => &mut self.open_dataset,
        }
    }

    /// Whether the entry carries an assessment.
    ///
    /// An assessment that is present but blank after trimming does not count.
    #[must_use]
    pub fn has_assessment(&self) -> bool {
        self.assessment
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }

    /// The course name, or a placeholder for untitled entries.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }
}

fn synthetic_id(index: usize) -> String {
    format!("#{index}")
}

/// First present key among `keys`, so snake_case wins over its aliases.
fn lookup<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| object.get(*key))
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        other => text(other),
    }
}

fn assessment(value: &Value) -> Option<String> {
    match value {
        Value::Bool(true) => Some("Yes".to_string()),
        Value::Bool(false) => None,
        other => text(other),
    }
}

// A lone string is one tag: options such as "English, French" contain commas.
fn tags(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(items.iter().filter_map(text).collect()),
        Value::String(s) => Some(vec![s.clone()]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_decoding() {
        assert_eq!(Entry::from_json(0, &json!({"id": "abc"})).id, "abc");
        assert_eq!(Entry::from_json(0, &json!({"id": 12})).id, "12");
        assert_eq!(Entry::from_json(5, &json!({"id": null})).id, "#5");
        assert_eq!(Entry::from_json(2, &json!({})).id, "#2");
    }

    #[test]
    fn test_non_object_element_is_id_only() {
        let entry = Entry::from_json(4, &json!("not an object"));
        assert_eq!(entry, Entry::new("#4"));
    }

    #[test]
    fn test_accepts_snake_and_camel_keys() {
        let snake = Entry::from_json(
            0,
            &json!({"id": "1", "course_length": "1 day", "instruction_medium": ["video"]}),
        );
        let camel = Entry::from_json(
            0,
            &json!({"id": "1", "courseLength": "1 day", "instructionMedium": ["video"]}),
        );
        assert_eq!(snake, camel);
        assert_eq!(snake.scalar(ScalarFacet::CourseLength), Some("1 day"));
        assert_eq!(
            snake.tags(SetFacet::InstructionMedium),
            Some(&["video".to_string()][..])
        );
    }

    #[test]
    fn test_title_aliases() {
        let entry = Entry::from_json(0, &json!({"title": "Nipype 101"}));
        assert_eq!(entry.title.as_deref(), Some("Nipype 101"));

        let entry = Entry::from_json(0, &json!({"course_name": "A", "title": "B"}));
        assert_eq!(entry.title.as_deref(), Some("A"));
    }

    #[test]
    fn test_wrong_types_read_as_absent() {
        let entry = Entry::from_json(
            0,
            &json!({"id": "1", "url": {"href": "x"}, "level": 3, "notes": ["a"]}),
        );
        assert!(entry.url.is_none());
        assert!(entry.level.is_none());
        assert!(entry.notes.is_none());
    }

    #[test]
    fn test_array_elements_are_coerced_or_dropped() {
        let entry = Entry::from_json(
            0,
            &json!({"keywords": ["fmri", 7, true, null, {"k": 1}]}),
        );
        assert_eq!(
            entry.keywords,
            Some(vec!["fmri".to_string(), "7".to_string(), "true".to_string()])
        );
    }

    #[test]
    fn test_empty_array_is_present_but_empty() {
        let entry = Entry::from_json(0, &json!({"platform": []}));
        assert_eq!(entry.tags(SetFacet::Platform), Some(&[][..]));
    }

    #[test]
    fn test_boolean_scalars_and_assessment() {
        let entry = Entry::from_json(0, &json!({"open_dataset": false, "assessment": true}));
        assert_eq!(entry.scalar(ScalarFacet::OpenDataset), Some("False"));
        assert_eq!(entry.assessment.as_deref(), Some("Yes"));
        assert!(entry.has_assessment());

        let entry = Entry::from_json(0, &json!({"assessment": false}));
        assert!(entry.assessment.is_none());
    }

    #[test]
    fn test_blank_assessment_does_not_count() {
        let mut entry = Entry::new("1");
        entry.assessment = Some("   ".to_string());
        assert!(!entry.has_assessment());

        entry.assessment = Some("quiz".to_string());
        assert!(entry.has_assessment());
    }

    #[test]
    fn test_na_assessment_is_kept_as_text() {
        let entry = Entry::from_json(0, &json!({"assessment": "NA"}));
        assert_eq!(entry.assessment.as_deref(), Some("NA"));
        assert!(entry.has_assessment());
    }

    #[test]
    fn test_supplementary_fields() {
        let entry = Entry::from_json(
            0,
            &json!({"tagTeam": "alice", "last_updated": "2023-05-01", "source": "OHBM"}),
        );
        assert_eq!(entry.tag_team, Some(vec!["alice".to_string()]));
        assert_eq!(entry.last_updated.as_deref(), Some("2023-05-01"));
        assert_eq!(entry.source.as_deref(), Some("OHBM"));
    }

    #[test]
    fn test_serde_round_trip_keeps_absence() {
        let mut entry = Entry::new("9");
        entry.level = Some(Vec::new());
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("title"));

        let back: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_display_title_placeholder() {
        assert_eq!(Entry::new("1").display_title(), "(untitled)");
    }
}
