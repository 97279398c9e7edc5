//! Rule table, plan composition, and narrative request shaping.

pub mod compose;
pub mod errors;
pub mod model;
pub mod payload;
pub mod resolve;
pub mod rules;
pub mod schema;
pub mod validate;

pub use compose::compose;
pub use errors::{
    IssueSeverity, PlanError, Result, RuleTableError, ValidationIssue, ValidationReport,
};
pub use model::{DomainPlan, GENERATOR_ID, WeeklyPlan, WeeklyPlanRecord, safety_scan_input};
pub use payload::{NarrativePayload, PayloadChild, to_request_payload};
pub use rules::{RuleBlock, RuleTable};
pub use schema::{
    narrative_payload_json_schema, rule_table_json_schema, weekly_plan_json_schema,
};
pub use validate::{check_rule_table, validate_json_against, validate_rule_table_json};
