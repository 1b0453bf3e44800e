use serde::{Deserialize, Serialize};

use crate::filter::SearchScope;
use crate::grouping::GroupingMode;

/// Optional parts of the view engine that can be switched off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    #[serde(default = "default_true")]
    pub search: bool,
    #[serde(default = "default_true")]
    pub severity_filter: bool,
    #[serde(default = "default_true")]
    pub grouping: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self { search: true, severity_filter: true, grouping: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSettings {
    #[serde(default)]
    pub default_grouping: GroupingMode,
    #[serde(default)]
    pub search_scope: SearchScope,
}

/// Contents of `scanlens.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub features: Features,
    #[serde(default)]
    pub view: ViewSettings,
}

const fn default_true() -> bool { true }
