use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::model::NarrativePlan;

pub fn narrative_json_schema() -> RootSchema {
    schema_for!(NarrativePlan)
}
