//! Value modes shared by the output-type, license and catalog selectors

use serde::{Deserialize, Serialize};

/// Which value set a configurable field exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueMode {
    /// Built-in values only, read-only
    #[default]
    Defaults,
    /// The author's own list only
    Custom,
    /// Built-in values plus the author's list
    Merged,
}

impl ValueMode {
    pub const ALL: [ValueMode; 3] = [ValueMode::Defaults, ValueMode::Custom, ValueMode::Merged];

    pub fn next(&self) -> Self {
        match self {
            Self::Defaults => Self::Custom,
            Self::Custom => Self::Merged,
            Self::Merged => Self::Defaults,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Defaults => "Use defaults",
            Self::Custom => "Use my own list",
            Self::Merged => "Defaults plus my own",
        }
    }

    /// Whether the custom list and its "add" control are shown
    pub fn exposes_custom(&self) -> bool {
        !matches!(self, Self::Defaults)
    }

    pub fn exposes_defaults(&self) -> bool {
        !matches!(self, Self::Custom)
    }
}

/// What a field renders for its current mode.
///
/// Holding the slices inside the variant means a defaults-only field has no
/// custom list to render, while switching modes leaves the stored lists intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeView<'a, T> {
    Defaults { defaults: &'a [T] },
    Custom { custom: &'a [T] },
    Merged { defaults: &'a [T], custom: &'a [T] },
}

impl<'a, T> ModeView<'a, T> {
    pub fn new(mode: ValueMode, defaults: &'a [T], custom: &'a [T]) -> Self {
        match mode {
            ValueMode::Defaults => ModeView::Defaults { defaults },
            ValueMode::Custom => ModeView::Custom { custom },
            ValueMode::Merged => ModeView::Merged { defaults, custom },
        }
    }

    pub fn defaults(&self) -> Option<&'a [T]> {
        match *self {
            ModeView::Defaults { defaults } | ModeView::Merged { defaults, .. } => Some(defaults),
            ModeView::Custom { .. } => None,
        }
    }

    /// The editable list; `Some(&[])` for an empty list so the section still renders
    pub fn custom(&self) -> Option<&'a [T]> {
        match *self {
            ModeView::Custom { custom } | ModeView::Merged { custom, .. } => Some(custom),
            ModeView::Defaults { .. } => None,
        }
    }

    /// Every value the field currently offers, defaults first
    pub fn effective(&self) -> Vec<&'a T> {
        let mut values: Vec<&'a T> = Vec::new();
        if let Some(defaults) = self.defaults() {
            values.extend(defaults.iter());
        }
        if let Some(custom) = self.custom() {
            values.extend(custom.iter());
        }
        values
    }
}
