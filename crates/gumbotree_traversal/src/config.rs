//! Traversal configuration loaded from `.gumbotree.jsonc`.

use std::fs;
use std::path::Path;

use gumbotree_ast::NodeKind;
use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{SearchCase, SearchDescend, TraversalError, WhatToShow};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".gumbotree.jsonc";

/// Settings shared by the command-line front end and library callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TraversalConfig {
    /// Node kinds to show. `None` shows every kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<Vec<NodeKind>>,

    /// Text search defaults.
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(default)]
    pub ignore_case: bool,

    #[serde(default = "default_descend")]
    pub descend: bool,
}

fn default_descend() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ignore_case: false,
            descend: default_descend(),
        }
    }
}

impl SearchConfig {
    pub fn case(&self) -> SearchCase {
        if self.ignore_case {
            SearchCase::CaseInsensitive
        } else {
            SearchCase::MatchCase
        }
    }

    pub fn descend(&self) -> SearchDescend {
        if self.descend {
            SearchDescend::IncludeChildren
        } else {
            SearchDescend::ExcludeChildren
        }
    }
}

impl TraversalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a JSON or JSONC file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TraversalError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TraversalError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = Self::from_jsonc(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads `.gumbotree.jsonc` from `dir` if it exists.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Option<Self>, TraversalError> {
        let path = dir.as_ref().join(DEFAULT_CONFIG_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        Self::from_file(path).map(Some)
    }

    /// Parses configuration text. Comments and trailing commas are allowed;
    /// an empty document yields the defaults.
    pub fn from_jsonc(content: &str) -> Result<Self, TraversalError> {
        let value = jsonc_parser::parse_to_serde_value(content, &ParseOptions::default())
            .map_err(|e| TraversalError::config(format!("Invalid JSONC: {}", e)))?;

        match value {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| TraversalError::config(format!("Invalid config: {}", e))),
            None => Ok(Self::default()),
        }
    }

    /// The configured mask, or [`WhatToShow::ALL`] when no kinds are listed.
    pub fn what_to_show(&self) -> WhatToShow {
        match &self.show {
            Some(kinds) => WhatToShow::from_kinds(kinds.iter().copied()),
            None => WhatToShow::ALL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = TraversalConfig::new();

        assert_eq!(config.what_to_show(), WhatToShow::ALL);
        assert_eq!(config.search.case(), SearchCase::MatchCase);
        assert_eq!(config.search.descend(), SearchDescend::IncludeChildren);
    }

    #[test]
    fn test_config_from_jsonc() {
        let content = r#"{
            // node kinds to show
            "show": ["element", "text"],
            "search": { "ignoreCase": true, "descend": false },
        }"#;

        let config = TraversalConfig::from_jsonc(content).unwrap();
        assert_eq!(config.what_to_show(), WhatToShow::ELEMENT | WhatToShow::TEXT);
        assert_eq!(config.search.case(), SearchCase::CaseInsensitive);
        assert_eq!(config.search.descend(), SearchDescend::ExcludeChildren);
    }

    #[test]
    fn test_config_partial_search() {
        let config = TraversalConfig::from_jsonc(r#"{ "search": { "ignoreCase": true } }"#).unwrap();

        assert!(config.search.descend);
        assert!(config.show.is_none());
    }

    #[test]
    fn test_config_empty_show_list() {
        let config = TraversalConfig::from_jsonc(r#"{ "show": [] }"#).unwrap();
        assert_eq!(config.what_to_show(), WhatToShow::empty());
    }

    #[test]
    fn test_config_empty_document() {
        let config = TraversalConfig::from_jsonc("  // nothing here\n").unwrap();
        assert_eq!(config, TraversalConfig::default());
    }

    #[test]
    fn test_config_unknown_field() {
        let err = TraversalConfig::from_jsonc(r#"{ "depth": 3 }"#).unwrap_err();
        assert!(err.to_string().contains("unknown field"), "{}", err);
    }

    #[test]
    fn test_config_unknown_kind() {
        let err = TraversalConfig::from_jsonc(r#"{ "show": ["paragraph"] }"#).unwrap_err();
        assert!(matches!(err, TraversalError::Config(_)));
    }

    #[test]
    fn test_config_invalid_syntax() {
        let err = TraversalConfig::from_jsonc("{ \"show\": [").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: Invalid JSONC"));
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.jsonc");
        fs::write(&path, r#"{ "show": ["comment"] }"#).unwrap();

        let config = TraversalConfig::from_file(&path).unwrap();
        assert_eq!(config.what_to_show(), WhatToShow::COMMENT);
    }

    #[test]
    fn test_config_missing_file() {
        let dir = tempdir().unwrap();
        let err = TraversalConfig::from_file(dir.path().join("missing.jsonc")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_config_discover() {
        let dir = tempdir().unwrap();
        assert!(TraversalConfig::discover(dir.path()).unwrap().is_none());

        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"{ "search": { "ignoreCase": true } }"#,
        )
        .unwrap();
        let config = TraversalConfig::discover(dir.path()).unwrap().unwrap();
        assert!(config.search.ignore_case);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = TraversalConfig {
            show: Some(vec![NodeKind::Cdata, NodeKind::Whitespace]),
            search: SearchConfig::default(),
        };
        let json = serde_json::to_string(&config).unwrap();

        assert_eq!(
            json,
            r#"{"show":["cdata","whitespace"],"search":{"ignoreCase":false,"descend":true}}"#
        );
    }
}
