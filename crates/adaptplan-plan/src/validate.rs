use adaptplan_core::{Domain, Level, banned_claims_in};
use jsonschema::JSONSchema;
use serde_json::Value;

use crate::errors::{IssueSeverity, RuleTableError, ValidationIssue, ValidationReport};
use crate::rules::{RuleBlock, RuleTable};
use crate::schema::rule_table_json_schema;

/// Validate a JSON document against a JSON Schema.
///
/// Returns `Err` only when the schema itself cannot be compiled; instance
/// violations are reported as `schema_violation` errors.
pub fn validate_json_against(instance: &Value, schema: &Value) -> Result<ValidationReport, String> {
    let compiled = JSONSchema::compile(schema).map_err(|err| err.to_string())?;

    let mut report = ValidationReport::default();

    if let Err(errors) = compiled.validate(instance) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            report.push_error(ValidationIssue::new(
                IssueSeverity::Error,
                "schema_violation",
                path,
                error.to_string(),
                None,
            ));
        }
    }

    Ok(report)
}

/// Validate a rule table document against the rule table JSON Schema.
pub fn validate_rule_table_json(document: &Value) -> Result<ValidationReport, RuleTableError> {
    let schema = serde_json::to_value(rule_table_json_schema())?;
    validate_json_against(document, &schema).map_err(RuleTableError::Schema)
}

/// Check a loaded rule table for coverage and content problems.
///
/// Errors: a missing (domain, level) combination, empty target or activity
/// lists, blank strategy text. Warnings: unknown domain or level keys, and
/// banned claims found in a block.
pub fn check_rule_table(table: &RuleTable) -> ValidationReport {
    let mut report = ValidationReport::default();

    for domain in Domain::ALL {
        for level in Level::ALL {
            let base_path = format!("/domains/{}/{}", domain, level);
            match table.block(domain.as_str(), level.as_str()) {
                None => report.push_error(ValidationIssue::new(
                    IssueSeverity::Error,
                    "missing_rule",
                    base_path,
                    format!("no rule block for {domain} / {level}"),
                    Some("add the block so every level can be selected".to_string()),
                )),
                Some(block) => check_block(block, &base_path, &mut report),
            }
        }
    }

    for (domain_name, levels) in table.domains() {
        if domain_name.parse::<Domain>().is_err() {
            report.push_warning(ValidationIssue::new(
                IssueSeverity::Warning,
                "unknown_domain",
                format!("/domains/{domain_name}"),
                format!("domain '{domain_name}' is never requested"),
                Some("expected Social, Verbal, or Play".to_string()),
            ));
            continue;
        }

        for level_name in levels.keys() {
            if level_name.parse::<Level>().is_err() {
                report.push_warning(ValidationIssue::new(
                    IssueSeverity::Warning,
                    "unknown_level",
                    format!("/domains/{domain_name}/{level_name}"),
                    format!("level '{level_name}' is never requested"),
                    Some("expected beginner, intermediate, or advanced".to_string()),
                ));
            }
        }
    }

    report
}

fn check_block(block: &RuleBlock, base_path: &str, report: &mut ValidationReport) {
    if block.targets.is_empty() {
        report.push_error(ValidationIssue::new(
            IssueSeverity::Error,
            "empty_targets",
            format!("{base_path}/targets"),
            "targets must list at least one skill".to_string(),
            None,
        ));
    }

    if block.activities.is_empty() {
        report.push_error(ValidationIssue::new(
            IssueSeverity::Error,
            "empty_activities",
            format!("{base_path}/activities"),
            "activities must list at least one activity".to_string(),
            None,
        ));
    }

    for (field, value) in [
        ("prompting", &block.prompting),
        ("reinforcement", &block.reinforcement),
        ("mastery_criteria", &block.mastery_criteria),
    ] {
        if value.trim().is_empty() {
            report.push_error(ValidationIssue::new(
                IssueSeverity::Error,
                "empty_field",
                format!("{base_path}/{field}"),
                format!("{field} must not be blank"),
                None,
            ));
        }
    }

    let text = [
        block.prompting.as_str(),
        block.reinforcement.as_str(),
        block.mastery_criteria.as_str(),
        block.targets.join(" ").as_str(),
        block.activities.join(" ").as_str(),
    ]
    .join(" ");
    for phrase in banned_claims_in(&text) {
        report.push_warning(ValidationIssue::new(
            IssueSeverity::Warning,
            "banned_claim",
            base_path.to_string(),
            format!("block contains banned claim '{phrase}'"),
            Some("reword the block; composed plans will carry a safety flag".to_string()),
        ));
    }
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> RuleBlock {
        RuleBlock {
            targets: vec!["Wave hello".to_string()],
            prompting: "Model then wait.".to_string(),
            reinforcement: "Praise.".to_string(),
            mastery_criteria: "80% across 3 sessions.".to_string(),
            activities: vec!["Greeting song".to_string()],
        }
    }

    fn complete_blocks() -> Vec<(Domain, Level, RuleBlock)> {
        let mut blocks = Vec::new();
        for domain in Domain::ALL {
            for level in Level::ALL {
                blocks.push((domain, level, block()));
            }
        }
        blocks
    }

    #[test]
    fn complete_table_is_clean() {
        let table = RuleTable::from_blocks(complete_blocks()).unwrap();
        let report = check_rule_table(&table);
        assert!(report.is_ok());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn reports_missing_combination() {
        let blocks = complete_blocks()
            .into_iter()
            .filter(|(domain, level, _)| (*domain, *level) != (Domain::Play, Level::Advanced));
        let table = RuleTable::from_blocks(blocks).unwrap();
        let report = check_rule_table(&table);

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, "missing_rule");
        assert_eq!(report.errors[0].path, "/domains/Play/advanced");
    }

    #[test]
    fn reports_empty_lists_and_banned_claims() {
        let mut blocks = complete_blocks();
        blocks[0].2.targets.clear();
        blocks[1].2.activities = vec!["Reverse autism drills".to_string()];
        let table = RuleTable::from_blocks(blocks).unwrap();
        let report = check_rule_table(&table);

        assert!(report.has_code("empty_targets"));
        assert!(report.has_code("banned_claim"));
        assert!(!report.is_ok());
    }

    #[test]
    fn warns_on_unknown_keys() {
        let json = serde_json::json!({
            "domains": {
                "Motor": {
                    "beginner": serde_json::to_value(block()).unwrap()
                },
                "Social": {
                    "expert": serde_json::to_value(block()).unwrap()
                }
            }
        });
        let table = RuleTable::from_value(json).unwrap();
        let report = check_rule_table(&table);

        assert!(report.has_code("unknown_domain"));
        assert!(report.has_code("unknown_level"));
        assert!(report.has_code("missing_rule"));
    }

    #[test]
    fn schema_reports_wrong_types() {
        let json = serde_json::json!({
            "domains": {
                "Social": {
                    "beginner": {
                        "targets": "not a list",
                        "prompting": "p",
                        "reinforcement": "r",
                        "mastery_criteria": "m",
                        "activities": []
                    }
                }
            }
        });
        let report = validate_rule_table_json(&json).unwrap();
        assert!(!report.is_ok());
        assert_eq!(report.errors[0].path, "/domains/Social/beginner/targets");
    }
}
