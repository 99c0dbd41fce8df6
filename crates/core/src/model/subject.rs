use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel accepted by [`SubjectFilter::parse`] to select every subject.
pub const ALL_SUBJECTS: &str = "all";

/// Normalizes a subject for storage: first letter upper-cased, the rest lower-cased.
///
/// Returns `None` for blank input.
#[must_use]
pub fn normalize_subject(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?;
    let mut out = String::with_capacity(trimmed.len());
    out.extend(first.to_uppercase());
    out.push_str(&chars.as_str().to_lowercase());
    Some(out)
}

/// Subject selection used when building a quiz pool.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubjectFilter {
    #[default]
    All,
    Named(String),
}

impl SubjectFilter {
    /// Parses the value of a subject selector.
    ///
    /// Blank input and the `"all"` sentinel (any casing) select every subject.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SUBJECTS) {
            Self::All
        } else {
            Self::Named(trimmed.to_owned())
        }
    }

    /// Case-insensitive equality against a flashcard subject.
    #[must_use]
    pub fn matches(&self, subject: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name.to_lowercase() == subject.trim().to_lowercase(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_SUBJECTS,
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for SubjectFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
