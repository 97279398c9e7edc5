use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::model::WeeklyPlan;
use crate::payload::NarrativePayload;
use crate::rules::RuleTable;

/// Emit the JSON Schema for serialized weekly plans.
pub fn weekly_plan_json_schema() -> RootSchema {
    schema_for!(WeeklyPlan)
}

/// Emit the JSON Schema for rule table documents.
pub fn rule_table_json_schema() -> RootSchema {
    schema_for!(RuleTable)
}

/// Emit the JSON Schema for the narrative request payload.
pub fn narrative_payload_json_schema() -> RootSchema {
    schema_for!(NarrativePayload)
}
