use std::env;
use std::path::PathBuf;

use adaptplan_plan::{RuleTable, RuleTableError, ValidationReport, check_rule_table};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rules_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("rules/rules.yaml"));

    let table = match RuleTable::from_path(&rules_path) {
        Ok(table) => table,
        Err(RuleTableError::Invalid(report)) => {
            eprintln!("rule table failed schema validation");
            print_report(&report);
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    let report = check_rule_table(&table);
    if !report.is_ok() {
        eprintln!("rule table check failed");
        print_report(&report);
        std::process::exit(1);
    }

    if !report.warnings.is_empty() {
        eprintln!("rule table checked with warnings:");
        print_report(&report);
    } else {
        println!("rule table checked successfully");
    }

    Ok(())
}

fn print_report(report: &ValidationReport) {
    for issue in &report.errors {
        eprintln!("error {} {}: {}", issue.code, issue.path, issue.message);
        if let Some(hint) = &issue.hint {
            eprintln!("  hint: {hint}");
        }
    }
    for issue in &report.warnings {
        eprintln!("warning {} {}: {}", issue.code, issue.path, issue.message);
        if let Some(hint) = &issue.hint {
            eprintln!("  hint: {hint}");
        }
    }
}
