//! Filterable catalog attributes and their closed option enumerations.
//!
//! Every categorical field of an [`Entry`](super::Entry) is a facet. Set-valued
//! facets hold zero or more tags per entry; scalar facets hold at most one value.
//! The option lists below are the curated vocabulary of the catalog. They drive
//! the filter panel, but the filter engine never rejects a value outside them.

use serde::{Deserialize, Serialize};

const LEVEL_OPTIONS: &[&str] = &["Beginner", "Intermediate", "Advanced", "NA"];

const PLATFORM_OPTIONS: &[&str] = &["Mac", "Windows", "Linux", "Docker", "Jupyter", "NA"];

const INSTRUCTION_MEDIUM_OPTIONS: &[&str] = &[
    "Hands-on tutorial / notebooks",
    "lecture",
    "video",
    "notes",
    "blog post",
    "reference",
    "slides",
    "website",
    "outline",
    "meta-resource",
    "NA",
];

const DELIVERY_OPTIONS: &[&str] = &["self-paced", "instructor", "Hybrid", "Discussion needed"];

const LANGUAGE_OPTIONS: &[&str] = &[
    "English",
    "French",
    "Spanish",
    "Chinese",
    "German",
    "English, French",
    "English, German",
    "Other",
    "NA",
];

const PROGRAMMING_LANGUAGE_OPTIONS: &[&str] = &["Python", "R", "shell scripting", "Matlab", "Git", "NA"];

const NEUROIMAGING_SOFTWARE_OPTIONS: &[&str] =
    &["AFNI", "SPM", "FSL", "Freesurfer", "Python", "Multiple", "NA"];

const IMAGING_MODALITY_OPTIONS: &[&str] = &[
    "DWI",
    "Structural",
    "Functional",
    "Task-based",
    "Resting-State",
    "EEG",
    "Behavioral",
    "MEG",
    "MRI",
    "NA",
];

const QUADRANTS_OPTIONS: &[&str] = &[
    "information-oriented (reference)",
    "understanding-oriented (explanation)",
    "learning-oriented (tutorials)",
    "problem-oriented (how to guides)",
    "NA",
];

const COURSE_LENGTH_OPTIONS: &[&str] =
    &["<1 hr", "1-4 hrs", "1 day", "1-3 days", "1 week", "1+ weeks", "NA"];

const OPEN_DATASET_OPTIONS: &[&str] = &["True", "False", "NA"];

/// A facet whose entry attribute is a set of tags.
///
/// An active selection matches an entry when the two sets share at least one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SetFacet {
    Level,
    Platform,
    InstructionMedium,
    Delivery,
    Language,
    ProgrammingLanguage,
    NeuroimagingSoftware,
    ImagingModality,
    Quadrants,
}

impl SetFacet {
    /// All set-valued facets in display order.
    pub const ALL: [Self; 9] = [
        Self::Level,
        Self::Platform,
        Self::InstructionMedium,
        Self::Delivery,
        Self::Language,
        Self::ProgrammingLanguage,
        Self::NeuroimagingSoftware,
        Self::ImagingModality,
        Self::Quadrants,
    ];

    /// Human-readable name shown in the filter panel.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Level => "Level",
            Self::Platform => "Platform",
            Self::InstructionMedium => "Instruction Medium",
            Self::Delivery => "Delivery",
            Self::Language => "Language",
            Self::ProgrammingLanguage => "Programming Language",
            Self::NeuroimagingSoftware => "Neuroimaging Software",
            Self::ImagingModality => "Imaging Modality",
            Self::Quadrants => "Quadrants",
        }
    }

    /// Key of the attribute in the catalog JSON.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::Platform => "platform",
            Self::InstructionMedium => "instruction_medium",
            Self::Delivery => "delivery",
            Self::Language => "language",
            Self::ProgrammingLanguage => "programming_language",
            Self::NeuroimagingSoftware => "neuroimaging_software",
            Self::ImagingModality => "imaging_modality",
            Self::Quadrants => "quadrants",
        }
    }

    /// camelCase spelling of [`key`](Self::key), also accepted when decoding.
    #[must_use]
    pub const fn camel_key(self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::Platform => "platform",
            Self::InstructionMedium => "instructionMedium",
            Self::Delivery => "delivery",
            Self::Language => "language",
            Self::ProgrammingLanguage => "programmingLanguage",
            Self::NeuroimagingSoftware => "neuroimagingSoftware",
            Self::ImagingModality => "imagingModality",
            Self::Quadrants => "quadrants",
        }
    }

    /// The closed option enumeration for this facet.
    #[must_use]
    pub const fn options(self) -> &'static [&'static str] {
        match self {
            Self::Level => LEVEL_OPTIONS,
            Self::Platform => PLATFORM_OPTIONS,
            Self::InstructionMedium => INSTRUCTION_MEDIUM_OPTIONS,
            Self::Delivery => DELIVERY_OPTIONS,
            Self::Language => LANGUAGE_OPTIONS,
            Self::ProgrammingLanguage => PROGRAMMING_LANGUAGE_OPTIONS,
            Self::NeuroimagingSoftware => NEUROIMAGING_SOFTWARE_OPTIONS,
            Self::ImagingModality => IMAGING_MODALITY_OPTIONS,
            Self::Quadrants => QUADRANTS_OPTIONS,
        }
    }
}

/// A facet whose entry attribute is a single value.
///
/// An active selection matches an entry when the values are exactly equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScalarFacet {
    CourseLength,
    OpenDataset,
}

impl ScalarFacet {
    /// All scalar facets in display order.
    pub const ALL: [Self; 2] = [Self::CourseLength, Self::OpenDataset];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CourseLength => "Course Length",
            Self::OpenDataset => "Open Dataset",
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::CourseLength => "course_length",
            Self::OpenDataset => "open_dataset",
        }
    }

    #[must_use]
    pub const fn camel_key(self) -> &'static str {
        match self {
            Self::CourseLength => "courseLength",
            Self::OpenDataset => "openDataset",
        }
    }

    #[must_use]
    pub const fn options(self) -> &'static [&'static str] {
        match self {
            Self::CourseLength => COURSE_LENGTH_OPTIONS,
            Self::OpenDataset => OPEN_DATASET_OPTIONS,
        }
    }
}

/// Any filterable facet, set-valued or scalar.
///
/// Used where the UI walks all facets uniformly (the filter panel, the active
/// filter summary) while the filter state keeps the two kinds apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Facet {
    Set(SetFacet),
    Scalar(ScalarFacet),
}

impl Facet {
    /// Every facet in the order the filter panel presents them.
    pub const ALL: [Self; 11] = [
        Self::Set(SetFacet::Level),
        Self::Set(SetFacet::Platform),
        Self::Scalar(ScalarFacet::CourseLength),
        Self::Set(SetFacet::InstructionMedium),
        Self::Set(SetFacet::Delivery),
        Self::Set(SetFacet::Language),
        Self::Set(SetFacet::ProgrammingLanguage),
        Self::Set(SetFacet::NeuroimagingSoftware),
        Self::Set(SetFacet::ImagingModality),
        Self::Scalar(ScalarFacet::OpenDataset),
        Self::Set(SetFacet::Quadrants),
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Set(facet) => facet.label(),
            Self::Scalar(facet) => facet.label(),
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Set(facet) => facet.key(),
            Self::Scalar(facet) => facet.key(),
        }
    }

    #[must_use]
    pub const fn options(self) -> &'static [&'static str] {
        match self {
            Self::Set(facet) => facet.options(),
            Self::Scalar(facet) => facet.options(),
        }
    }

    /// Whether `value` belongs to this facet's enumeration (exact, case-sensitive).
    #[must_use]
    pub fn is_known_option(self, value: &str) -> bool {
        self.options().contains(&value)
    }

    /// Resolves a facet from its JSON key in either snake_case or camelCase.
    ///
    /// ```
    /// use reproinventory::domain::{Facet, ScalarFacet};
    ///
    /// assert_eq!(Facet::from_key("courseLength"), Some(Facet::Scalar(ScalarFacet::CourseLength)));
    /// assert_eq!(Facet::from_key("course_length"), Some(Facet::Scalar(ScalarFacet::CourseLength)));
    /// assert_eq!(Facet::from_key("title"), None);
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let set = SetFacet::ALL
            .into_iter()
            .find(|facet| facet.key() == key || facet.camel_key() == key)
            .map(Self::Set);

        set.or_else(|| {
            ScalarFacet::ALL
                .into_iter()
                .find(|facet| facet.key() == key || facet.camel_key() == key)
                .map(Self::Scalar)
        })
    }
}

impl From<SetFacet> for Facet {
    fn from(facet: SetFacet) -> Self {
        Self::Set(facet)
    }
}

impl From<ScalarFacet> for Facet {
    fn from(facet: ScalarFacet) -> Self {
        Self::Scalar(facet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_lists_every_facet_once() {
        let unique: HashSet<Facet> = Facet::ALL.into_iter().collect();
        assert_eq!(unique.len(), SetFacet::ALL.len() + ScalarFacet::ALL.len());
    }

    #[test]
    fn test_from_key_round_trips_every_facet() {
        for facet in Facet::ALL {
            assert_eq!(Facet::from_key(facet.key()), Some(facet));
        }
        assert_eq!(
            Facet::from_key("neuroimagingSoftware"),
            Some(Facet::Set(SetFacet::NeuroimagingSoftware))
        );
        assert_eq!(Facet::from_key("keywords"), None);
    }

    #[test]
    fn test_option_membership_is_case_sensitive() {
        let level = Facet::Set(SetFacet::Level);
        assert!(level.is_known_option("Beginner"));
        assert!(!level.is_known_option("beginner"));

        let language = Facet::Set(SetFacet::Language);
        assert!(language.is_known_option("English, French"));
    }

    #[test]
    fn test_delivery_has_no_na_option() {
        assert!(!SetFacet::Delivery.options().contains(&"NA"));
        assert_eq!(ScalarFacet::OpenDataset.options(), &["True", "False", "NA"]);
    }
}
