//! Catalog records and their identities

use super::CustomEntryInput;
use crate::catalog::CatalogFilters;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of a record inside a Selection Set.
///
/// Backend records carry the numeric id assigned by the catalog; user-authored
/// entries get a random UUID, so the two spaces never overlap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Catalog(u64),
    Custom(Uuid),
}

impl RecordId {
    /// Generate a fresh identity for a custom entry
    pub fn new_custom() -> Self {
        RecordId::Custom(Uuid::new_v4())
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, RecordId::Custom(_))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Catalog(id) => write!(f, "{id}"),
            RecordId::Custom(id) => write!(f, "custom-{id}"),
        }
    }
}

/// Which selector or option list a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordKind {
    Repository,
    MetadataStandard,
    OutputType,
    License,
}

impl RecordKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Repository => "repository",
            Self::MetadataStandard => "metadata standard",
            Self::OutputType => "output type",
            Self::License => "license",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Self::Repository => "repositories",
            Self::MetadataStandard => "metadata standards",
            Self::OutputType => "output types",
            Self::License => "licenses",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind-independent view of a chosen record, as handed to the parent form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedItem {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub uri: String,
}

/// A record that can be browsed in a catalog and held in a Selection Set
pub trait CatalogRecord: Clone + fmt::Debug + Send + Sync + 'static {
    const KIND: RecordKind;

    fn id(&self) -> &RecordId;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn uri(&self) -> &str;
    fn keywords(&self) -> &[String];

    /// Build a user-authored record from validated form input
    fn from_custom(id: RecordId, input: &CustomEntryInput) -> Self;

    /// Server-side filters; records without filterable metadata match everything
    fn matches_filters(&self, _filters: &CatalogFilters) -> bool {
        true
    }

    /// Case-insensitive substring match over name, description and keywords.
    /// A blank term matches every record.
    fn matches_search(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name().to_lowercase().contains(&needle)
            || self.description().to_lowercase().contains(&needle)
            || self
                .keywords()
                .iter()
                .any(|k| k.to_lowercase().contains(&needle))
    }

    fn to_selected_item(&self) -> SelectedItem {
        SelectedItem {
            id: self.id().clone(),
            name: self.name().to_string(),
            description: self.description().to_string(),
            uri: self.uri().to_string(),
        }
    }
}

/// Access level advertised by a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Open,
    Restricted,
    Closed,
}

impl AccessLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Restricted => "Restricted",
            Self::Closed => "Closed",
        }
    }
}

/// A data repository from the reference catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub repository_types: Vec<String>,
    #[serde(default)]
    pub subject_areas: Vec<String>,
    #[serde(default)]
    pub access: Option<AccessLevel>,
    #[serde(default)]
    pub pid_types: Vec<String>,
}

impl CatalogRecord for Repository {
    const KIND: RecordKind = RecordKind::Repository;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn uri(&self) -> &str {
        &self.uri
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn from_custom(id: RecordId, input: &CustomEntryInput) -> Self {
        Self {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            uri: input.url.clone(),
            keywords: Vec::new(),
            repository_types: Vec::new(),
            subject_areas: Vec::new(),
            access: None,
            pid_types: Vec::new(),
        }
    }

    fn matches_filters(&self, filters: &CatalogFilters) -> bool {
        let subject_ok = filters.subject_area.as_deref().is_none_or(|area| {
            self.subject_areas
                .iter()
                .any(|s| s.eq_ignore_ascii_case(area))
        });
        let type_ok = filters.repository_type.as_deref().is_none_or(|kind| {
            self.repository_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(kind))
        });
        subject_ok && type_ok
    }
}

/// A metadata standard from the reference catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataStandard {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub research_domains: Vec<String>,
}

impl CatalogRecord for MetadataStandard {
    const KIND: RecordKind = RecordKind::MetadataStandard;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn uri(&self) -> &str {
        &self.uri
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn from_custom(id: RecordId, input: &CustomEntryInput) -> Self {
        Self {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            uri: input.url.clone(),
            keywords: Vec::new(),
            research_domains: Vec::new(),
        }
    }

    fn matches_filters(&self, filters: &CatalogFilters) -> bool {
        filters.subject_area.as_deref().is_none_or(|area| {
            self.research_domains
                .iter()
                .any(|d| d.eq_ignore_ascii_case(area))
        })
    }
}

/// A built-in or custom value of an option list (output types, licenses)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionEntry {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub description: String,
}

pub type OutputType = OptionEntry;
pub type License = OptionEntry;

impl OptionEntry {
    pub fn builtin(id: u64, name: &str, uri: &str, description: &str) -> Self {
        Self {
            id: RecordId::Catalog(id),
            name: name.to_string(),
            uri: uri.to_string(),
            description: description.to_string(),
        }
    }

    pub fn from_custom(id: RecordId, input: &CustomEntryInput) -> Self {
        Self {
            id,
            name: input.name.clone(),
            uri: input.url.clone(),
            description: input.description.clone(),
        }
    }
}
