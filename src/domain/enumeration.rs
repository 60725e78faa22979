// src/domain/enumeration.rs
//
// Enumerations
//
// An enumeration is an immutable, closed set of literals coded 1..=MAX.
// It is built either from an ordered label list or from a code list
// (code -> label). Literal names are normalized to upper case with spaces
// and hyphens replaced by underscores, so "Film-Noir" becomes FILM_NOIR.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumerationError {
    #[error("Invalid enumeration definition: {0}")]
    InvalidDefinition(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    /// Literal names in code order (labels, or codes for a code list)
    names: Vec<String>,
    /// Display strings in code order
    labels: Vec<String>,
    /// Normalized literal -> 1-based code
    constants: HashMap<String, u32>,
    /// Built from a code list rather than a label list
    code_list: bool,
}

impl Enumeration {
    /// Simple enumeration from an ordered list of unique, non-empty labels.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, EnumerationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = labels.into_iter().map(Into::into).collect();
        let labels = names.clone();
        Self::build(names, labels, false)
    }

    /// Code-list enumeration. Codes become the literal names, labels are
    /// rendered as "<label> (<code>)".
    pub fn from_code_list<I, K, V>(entries: I) -> Result<Self, EnumerationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries: Vec<(String, String)> = entries
            .into_iter()
            .map(|(code, label)| (code.into(), label.into()))
            .collect();

        if let Some((code, _)) = entries.iter().find(|(_, label)| label.trim().is_empty()) {
            return Err(EnumerationError::InvalidDefinition(format!(
                "code '{}' has an empty label",
                code
            )));
        }

        let names = entries.iter().map(|(code, _)| code.clone()).collect();
        let labels = entries
            .iter()
            .map(|(code, label)| format!("{} ({})", label, code))
            .collect();
        Self::build(names, labels, true)
    }

    /// Builds an enumeration from JSON: either an array of strings or an
    /// object mapping codes to label strings. Codes are numbered in the
    /// order the object lists them.
    pub fn from_json(definition: &Value) -> Result<Self, EnumerationError> {
        match definition {
            Value::Array(items) => {
                let labels = items
                    .iter()
                    .map(|item| {
                        item.as_str().map(str::to_string).ok_or_else(|| {
                            EnumerationError::InvalidDefinition(
                                "a list of enumeration labels must contain only strings"
                                    .to_string(),
                            )
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Self::from_labels(labels)
            }
            Value::Object(map) => {
                let entries = map
                    .iter()
                    .map(|(code, label)| {
                        label
                            .as_str()
                            .map(|l| (code.clone(), l.to_string()))
                            .ok_or_else(|| {
                                EnumerationError::InvalidDefinition(
                                    "all values of a code/label map must be strings".to_string(),
                                )
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Self::from_code_list(entries)
            }
            other => Err(EnumerationError::InvalidDefinition(format!(
                "expected a label list or a code/label map, got {}",
                other
            ))),
        }
    }

    fn build(
        names: Vec<String>,
        labels: Vec<String>,
        code_list: bool,
    ) -> Result<Self, EnumerationError> {
        if names.is_empty() {
            return Err(EnumerationError::InvalidDefinition(
                "an enumeration needs at least one literal".to_string(),
            ));
        }

        let mut constants = HashMap::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(EnumerationError::InvalidDefinition(
                    "enumeration literals must be non-empty strings".to_string(),
                ));
            }
            let literal = normalize_literal(name);
            if constants.insert(literal.clone(), idx as u32 + 1).is_some() {
                return Err(EnumerationError::InvalidDefinition(format!(
                    "duplicate enumeration literal {}",
                    literal
                )));
            }
        }

        Ok(Self {
            names,
            labels,
            constants,
            code_list,
        })
    }

    /// Number of literals; codes range over 1..=MAX.
    pub fn max(&self) -> u32 {
        self.names.len() as u32
    }

    /// Code of a normalized literal name, e.g. `value("FILM_NOIR")`.
    pub fn value(&self, literal: &str) -> Option<u32> {
        self.constants.get(literal).copied()
    }

    pub fn contains(&self, code: u32) -> bool {
        code >= 1 && code <= self.max()
    }

    /// Literal name for a 1-based code.
    pub fn name(&self, code: u32) -> Option<&str> {
        if !self.contains(code) {
            return None;
        }
        self.names.get(code as usize - 1).map(String::as_str)
    }

    /// Display label for a 1-based code.
    pub fn label(&self, code: u32) -> Option<&str> {
        if !self.contains(code) {
            return None;
        }
        self.labels.get(code as usize - 1).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_code_list(&self) -> bool {
        self.code_list
    }

    /// Lazily formats `indexes` as their literal names joined by ", ".
    /// The returned value can be formatted any number of times.
    pub fn convert_indexes_to_names<'a>(&'a self, indexes: &'a [u32]) -> IndexNames<'a> {
        IndexNames {
            enumeration: self,
            indexes,
        }
    }
}

/// Deferred rendering of enumeration codes as names. Unknown codes are skipped.
#[derive(Debug, Clone, Copy)]
pub struct IndexNames<'a> {
    enumeration: &'a Enumeration,
    indexes: &'a [u32],
}

impl fmt::Display for IndexNames<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for name in self.indexes.iter().filter_map(|&i| self.enumeration.name(i)) {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}

fn normalize_literal(name: &str) -> String {
    name.replace([' ', '-'], "_").to_uppercase()
}

// ============================================================================
// MOVIE ENUMERATIONS
// ============================================================================

pub static MOVIE_CATEGORY: Lazy<Enumeration> = Lazy::new(|| {
    Enumeration::from_labels(["Biography", "TV Series Episode"])
        .expect("movie category labels are a valid enumeration")
});

pub static MOVIE_RATING: Lazy<Enumeration> = Lazy::new(|| {
    Enumeration::from_code_list([
        ("G", "General Audiences"),
        ("PG", "Parental Guidance"),
        ("PG13", "Not Under 13"),
        ("R", "Restricted"),
        ("NC17", "Not Under 17"),
    ])
    .expect("movie rating code list is a valid enumeration")
});

pub static GENRE: Lazy<Enumeration> = Lazy::new(|| {
    Enumeration::from_labels([
        "Action",
        "Adventure",
        "Animation",
        "Comedy",
        "Crime",
        "Documentary",
        "Drama",
        "Family",
        "Fantasy",
        "Film-Noir",
        "Horror",
        "Musical",
        "Romance",
        "Sci-Fi",
        "War",
    ])
    .expect("genre labels are a valid enumeration")
});
