use std::collections::BTreeMap;
use std::path::Path;

use adaptplan_core::{Domain, Level};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::RuleTableError;
use crate::validate::validate_rule_table_json;

/// Clinical content for one (domain, level) pair. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleBlock {
    pub targets: Vec<String>,
    pub prompting: String,
    pub reinforcement: String,
    pub mastery_criteria: String,
    pub activities: Vec<String>,
}

/// Immutable rule table keyed by domain name, then level name.
///
/// Loaded once and shared read-only; there is no mutation API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleTable {
    domains: BTreeMap<String, BTreeMap<String, RuleBlock>>,
}

impl RuleTable {
    /// Load a rule table from a `.yaml`, `.yml`, or `.json` file.
    pub fn from_path(path: &Path) -> Result<Self, RuleTableError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        let is_yaml = match extension.as_deref() {
            Some("yaml") | Some("yml") => true,
            Some("json") => false,
            _ => return Err(RuleTableError::UnsupportedFormat(path.to_path_buf())),
        };

        let contents = std::fs::read_to_string(path).map_err(|source| RuleTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if is_yaml {
            Self::from_yaml_str(&contents)
        } else {
            Self::from_json_str(&contents)
        }
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, RuleTableError> {
        let value: Value = serde_yaml::from_str(contents)?;
        Self::from_value(value)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, RuleTableError> {
        let value: Value = serde_json::from_str(contents)?;
        Self::from_value(value)
    }

    /// Validate a parsed document against the rule table JSON Schema, then decode it.
    pub fn from_value(value: Value) -> Result<Self, RuleTableError> {
        let report = validate_rule_table_json(&value)?;
        if !report.is_ok() {
            return Err(RuleTableError::Invalid(report));
        }

        let table: RuleTable = serde_json::from_value(value)?;
        if table.domains.is_empty() {
            return Err(RuleTableError::Empty);
        }

        Ok(table)
    }

    /// Build a table directly from typed blocks.
    pub fn from_blocks(
        blocks: impl IntoIterator<Item = (Domain, Level, RuleBlock)>,
    ) -> Result<Self, RuleTableError> {
        let mut domains: BTreeMap<String, BTreeMap<String, RuleBlock>> = BTreeMap::new();
        for (domain, level, block) in blocks {
            domains
                .entry(domain.as_str().to_string())
                .or_default()
                .insert(level.as_str().to_string(), block);
        }

        if domains.is_empty() {
            return Err(RuleTableError::Empty);
        }

        Ok(Self { domains })
    }

    /// Look up the block stored at `domains.<domain>.<level>`.
    pub fn block(&self, domain: &str, level: &str) -> Option<&RuleBlock> {
        self.domains.get(domain).and_then(|levels| levels.get(level))
    }

    /// Raw domain mapping, for inspection and reporting.
    pub fn domains(&self) -> &BTreeMap<String, BTreeMap<String, RuleBlock>> {
        &self.domains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_YAML: &str = r#"
domains:
  Social:
    beginner:
      targets: ["Respond to greeting"]
      prompting: "Model the greeting."
      reinforcement: "Praise each response."
      mastery_criteria: "4 of 5 trials."
      activities: ["Hello song"]
"#;

    #[test]
    fn loads_yaml_table() {
        let table = RuleTable::from_yaml_str(MINIMAL_YAML).expect("load table");
        let block = table.block("Social", "beginner").expect("block");
        assert_eq!(block.targets, vec!["Respond to greeting".to_string()]);
        assert!(table.block("Social", "advanced").is_none());
        assert!(table.block("Verbal", "beginner").is_none());
    }

    #[test]
    fn rejects_block_missing_field() {
        let yaml = MINIMAL_YAML.replace("      mastery_criteria: \"4 of 5 trials.\"\n", "");
        let err = RuleTable::from_yaml_str(&yaml).unwrap_err();
        match err {
            RuleTableError::Invalid(report) => {
                assert!(report.has_code("schema_violation"));
            }
            other => panic!("expected invalid table, got {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_domains_key() {
        let err = RuleTable::from_json_str(r#"{"rules": {}}"#).unwrap_err();
        assert!(matches!(err, RuleTableError::Invalid(_)));
    }

    #[test]
    fn rejects_empty_table() {
        let err = RuleTable::from_json_str(r#"{"domains": {}}"#).unwrap_err();
        assert!(matches!(err, RuleTableError::Empty));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = RuleTable::from_yaml_str("domains: [unclosed").unwrap_err();
        assert!(matches!(err, RuleTableError::Yaml(_)));
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = RuleTable::from_path(Path::new("rules.txt")).unwrap_err();
        assert!(matches!(err, RuleTableError::UnsupportedFormat(_)));
    }

    #[test]
    fn reports_missing_file() {
        let err = RuleTable::from_path(Path::new("does-not-exist.yaml")).unwrap_err();
        assert!(matches!(err, RuleTableError::Io { .. }));
    }
}
