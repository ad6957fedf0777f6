//! Data-flags sub-mode of the research output question

use serde::{Deserialize, Serialize};

/// Which sensitivity flags the question asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataFlagsMode {
    SensitiveOnly,
    PersonalOnly,
    #[default]
    Both,
}

/// Flags derived from [`DataFlagsMode`]; never stored on their own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFlags {
    pub show_sensitive_data: bool,
    pub show_personal_data: bool,
}

impl DataFlagsMode {
    pub fn flags(&self) -> DataFlags {
        let (show_sensitive_data, show_personal_data) = match self {
            Self::Both => (true, true),
            Self::SensitiveOnly => (true, false),
            Self::PersonalOnly => (false, true),
        };
        DataFlags {
            show_sensitive_data,
            show_personal_data,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::SensitiveOnly => Self::PersonalOnly,
            Self::PersonalOnly => Self::Both,
            Self::Both => Self::SensitiveOnly,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SensitiveOnly => "Sensitive data only",
            Self::PersonalOnly => "Personal data only",
            Self::Both => "Sensitive and personal data",
        }
    }
}
