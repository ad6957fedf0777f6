//! Standard and additional fields of a research output question

use super::{DataFlags, DataFlagsMode, License, OutputType, SelectedItem, ValueMode};
use serde::{Deserialize, Serialize};

/// The fixed sub-fields of a research output question, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StandardFieldId {
    Title,
    Description,
    OutputType,
    RepoSelector,
    MetadataStandards,
    Licenses,
    DataFlags,
}

impl StandardFieldId {
    pub const ALL: [StandardFieldId; 7] = [
        StandardFieldId::Title,
        StandardFieldId::Description,
        StandardFieldId::OutputType,
        StandardFieldId::RepoSelector,
        StandardFieldId::MetadataStandards,
        StandardFieldId::Licenses,
        StandardFieldId::DataFlags,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::OutputType => "Output type",
            Self::RepoSelector => "Repositories",
            Self::MetadataStandards => "Metadata standards",
            Self::Licenses => "Licenses",
            Self::DataFlags => "Data flags",
        }
    }

    /// Always-on fields; their enable control is rendered disabled
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Title | Self::OutputType)
    }

    /// Fields with a defaults/custom/merged value mode
    pub fn has_modes(&self) -> bool {
        matches!(
            self,
            Self::OutputType | Self::RepoSelector | Self::MetadataStandards | Self::Licenses
        )
    }

    pub fn is_catalog_selector(&self) -> bool {
        matches!(self, Self::RepoSelector | Self::MetadataStandards)
    }
}

/// Enablement and free-text value of one standard field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardField {
    pub id: StandardFieldId,
    pub enabled: bool,
    pub value: String,
}

impl StandardField {
    pub fn new(id: StandardFieldId) -> Self {
        Self {
            id,
            enabled: id.is_locked(),
            value: String::new(),
        }
    }
}

/// Mode-specific configuration carried by a field snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldSettings {
    Text,
    OutputTypes {
        mode: ValueMode,
        custom: Vec<OutputType>,
    },
    Repositories {
        mode: ValueMode,
        selected: Vec<SelectedItem>,
    },
    MetadataStandards {
        mode: ValueMode,
        selected: Vec<SelectedItem>,
    },
    Licenses {
        mode: ValueMode,
        custom: Vec<License>,
    },
    DataFlags {
        mode: DataFlagsMode,
        flags: DataFlags,
    },
}

/// Point-in-time view of a standard field for the parent form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSnapshot {
    pub id: StandardFieldId,
    pub enabled: bool,
    pub value: String,
    pub settings: FieldSettings,
}

/// An author-created free-text field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalField {
    pub id: String,
    pub label: String,
    pub custom_label: Option<String>,
    pub help_text: String,
    pub max_length: Option<u32>,
    pub default_value: String,
    pub enabled: bool,
}

impl AdditionalField {
    pub fn new(id: String) -> Self {
        Self {
            id,
            label: String::new(),
            custom_label: None,
            help_text: String::new(),
            max_length: None,
            default_value: String::new(),
            enabled: true,
        }
    }

    /// Label shown to respondents: the override when set and non-blank
    pub fn display_label(&self) -> &str {
        match self.custom_label.as_deref() {
            Some(label) if !label.trim().is_empty() => label,
            _ => &self.label,
        }
    }

    pub fn apply(&mut self, update: AdditionalFieldUpdate) {
        match update {
            AdditionalFieldUpdate::Label(v) => self.label = v,
            AdditionalFieldUpdate::CustomLabel(v) => self.custom_label = v,
            AdditionalFieldUpdate::HelpText(v) => self.help_text = v,
            AdditionalFieldUpdate::MaxLength(v) => self.max_length = v,
            AdditionalFieldUpdate::DefaultValue(v) => self.default_value = v,
            AdditionalFieldUpdate::Enabled(v) => self.enabled = v,
        }
    }
}

/// Targeted update of a single additional-field property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdditionalFieldUpdate {
    Label(String),
    CustomLabel(Option<String>),
    HelpText(String),
    MaxLength(Option<u32>),
    DefaultValue(String),
    Enabled(bool),
}

/// Full configuration of the question under edit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchOutputQuestion {
    pub fields: Vec<FieldSnapshot>,
    pub additional_fields: Vec<AdditionalField>,
}
