use std::ops::RangeInclusive;

use adaptplan_plan::{IssueSeverity, ValidationIssue, ValidationReport, validate_json_against};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::NarrativeRejection;
use crate::model::{NarrativePlan, WEEKDAYS};
use crate::schema::narrative_json_schema;

/// Activities expected per weekday under [`SchedulePolicy::Strict`].
pub const ACTIVITIES_PER_DAY: RangeInclusive<usize> = 3..=5;
/// Parent tips expected under [`SchedulePolicy::Strict`].
pub const PARENT_TIPS: RangeInclusive<usize> = 4..=6;
/// Cautions expected under [`SchedulePolicy::Strict`].
pub const CAUTIONS: RangeInclusive<usize> = 2..=4;

/// How strictly a narrative response is checked beyond its JSON Schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulePolicy {
    /// Field presence and shape only. Any weekday keys and list lengths pass.
    #[default]
    Lenient,
    /// Also require weekday keys exactly Mon..Fri and the prompt's list-length bounds.
    Strict,
}

/// Parse and validate a raw response body into a [`NarrativePlan`].
pub fn parse_narrative(
    content: &str,
    policy: SchedulePolicy,
) -> Result<NarrativePlan, NarrativeRejection> {
    let value: Value = serde_json::from_str(content)?;

    let schema = serde_json::to_value(narrative_json_schema())?;
    let report = match validate_json_against(&value, &schema) {
        Ok(report) => report,
        Err(message) => {
            let mut report = ValidationReport::default();
            report.push_error(ValidationIssue::new(
                IssueSeverity::Error,
                "schema_compile_error",
                "/",
                message,
                None,
            ));
            report
        }
    };
    if !report.is_ok() {
        return Err(NarrativeRejection::Schema(report));
    }

    let narrative: NarrativePlan = serde_json::from_value(value)?;

    if policy == SchedulePolicy::Strict {
        let report = check_schedule_bounds(&narrative);
        if !report.is_ok() {
            return Err(NarrativeRejection::Schema(report));
        }
    }

    Ok(narrative)
}

/// Check weekday membership and list lengths against the prompt constraints.
pub fn check_schedule_bounds(narrative: &NarrativePlan) -> ValidationReport {
    let mut report = ValidationReport::default();

    for day in WEEKDAYS {
        match narrative.daily_schedule.get(day) {
            None => report.push_error(ValidationIssue::new(
                IssueSeverity::Error,
                "missing_weekday",
                format!("/daily_schedule/{day}"),
                format!("daily_schedule is missing '{day}'"),
                None,
            )),
            Some(activities) => {
                if !ACTIVITIES_PER_DAY.contains(&activities.len()) {
                    report.push_error(count_issue(
                        "activity_count",
                        &format!("/daily_schedule/{day}"),
                        activities.len(),
                        &ACTIVITIES_PER_DAY,
                    ));
                }
            }
        }
    }

    for day in narrative.daily_schedule.keys() {
        if !WEEKDAYS.contains(&day.as_str()) {
            report.push_error(ValidationIssue::new(
                IssueSeverity::Error,
                "unexpected_weekday",
                format!("/daily_schedule/{day}"),
                format!("daily_schedule has unexpected key '{day}'"),
                Some("use exactly Mon, Tue, Wed, Thu, Fri".to_string()),
            ));
        }
    }

    if !PARENT_TIPS.contains(&narrative.parent_tips.len()) {
        report.push_error(count_issue(
            "parent_tip_count",
            "/parent_tips",
            narrative.parent_tips.len(),
            &PARENT_TIPS,
        ));
    }

    if !CAUTIONS.contains(&narrative.cautions.len()) {
        report.push_error(count_issue(
            "caution_count",
            "/cautions",
            narrative.cautions.len(),
            &CAUTIONS,
        ));
    }

    report
}

fn count_issue(
    code: &str,
    path: &str,
    found: usize,
    expected: &RangeInclusive<usize>,
) -> ValidationIssue {
    ValidationIssue::new(
        IssueSeverity::Error,
        code,
        path,
        format!(
            "expected {}..={} entries, found {found}",
            expected.start(),
            expected.end()
        ),
        None,
    )
}
