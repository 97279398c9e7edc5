use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{DomainPlan, WeeklyPlan};

/// Child fields forwarded to the narrative service. Notes are never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PayloadChild {
    pub name: String,
    pub age_years: u8,
    pub diagnosis: String,
    pub strengths: Vec<String>,
    pub preferences: Vec<String>,
}

/// Minimal projection of a [`WeeklyPlan`] sent to the narrative service.
///
/// Field names are part of the contract with the narrative prompt template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NarrativePayload {
    pub child: PayloadChild,
    /// Week start as `YYYY-MM-DD`.
    pub week_of: String,
    pub domains: Vec<DomainPlan>,
}

impl NarrativePayload {
    /// Compact JSON used as the template substitution.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Project a weekly plan into the payload the narrative service needs.
pub fn to_request_payload(plan: &WeeklyPlan) -> NarrativePayload {
    let child = plan.child();
    NarrativePayload {
        child: PayloadChild {
            name: child.name().to_string(),
            age_years: child.age_years(),
            diagnosis: child.diagnosis().to_string(),
            strengths: child.strengths().to_vec(),
            preferences: child.preferences().to_vec(),
        },
        week_of: plan.week_of().to_string(),
        domains: plan.domains().to_vec(),
    }
}
