use std::collections::BTreeMap;

use adaptplan_plan::WeeklyPlan;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Weekday labels expected in a daily schedule, in display order.
pub const WEEKDAYS: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

/// Parent-facing narrative returned by the text-generation service.
///
/// The type does not enforce weekday key completeness; see
/// [`crate::SchedulePolicy::Strict`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NarrativePlan {
    pub overview: String,
    /// Weekday label to activities for that day.
    pub daily_schedule: BTreeMap<String, Vec<String>>,
    pub parent_tips: Vec<String>,
    pub cautions: Vec<String>,
}

impl NarrativePlan {
    /// Activities for a weekday label, empty when the day is absent.
    pub fn day(&self, label: &str) -> &[String] {
        self.daily_schedule
            .get(label)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All narrative text joined with spaces, for safety scanning.
    pub fn text(&self) -> String {
        let mut pieces: Vec<&str> = vec![self.overview.as_str()];
        for activities in self.daily_schedule.values() {
            pieces.extend(activities.iter().map(String::as_str));
        }
        pieces.extend(self.parent_tips.iter().map(String::as_str));
        pieces.extend(self.cautions.iter().map(String::as_str));
        pieces.join(" ")
    }
}

/// A validated weekly plan paired with its narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanPackage {
    pub plan: WeeklyPlan,
    pub narrative: NarrativePlan,
}

impl PlanPackage {
    pub fn new(plan: WeeklyPlan, narrative: NarrativePlan) -> Self {
        Self { plan, narrative }
    }
}
