use adaptplan_core::{ChildProfile, Domain, Level, safety_scan};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity tag stamped on plans produced by the deterministic rule path.
pub const GENERATOR_ID: &str = "rules-first-v1";

/// Resolved rule block for one (domain, level) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DomainPlan {
    pub domain: Domain,
    pub level: Level,
    /// Target skills, in rule-file order.
    pub targets: Vec<String>,
    /// Prompting strategy.
    pub prompting: String,
    /// Reinforcement strategy.
    pub reinforcement: String,
    /// Mastery criteria for the targets.
    pub mastery_criteria: String,
    /// Activities, in rule-file order.
    pub activities: Vec<String>,
}

/// Deterministic weekly plan for one child.
///
/// Only [`crate::compose`] builds new plans. Deserialized plans are checked
/// against the same invariants: three domains in Social, Verbal, Play order
/// and safety flags equal to a fresh scan of the domain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "WeeklyPlanRecord")]
pub struct WeeklyPlan {
    child: ChildProfile,
    week_of: NaiveDate,
    domains: Vec<DomainPlan>,
    safety_flags: Vec<String>,
    generator: String,
}

/// Serialized form of [`WeeklyPlan`] prior to invariant checks.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WeeklyPlanRecord {
    pub child: ChildProfile,
    pub week_of: NaiveDate,
    pub domains: Vec<DomainPlan>,
    #[serde(default)]
    pub safety_flags: Vec<String>,
    pub generator: String,
}

impl WeeklyPlan {
    pub(crate) fn from_parts(
        child: ChildProfile,
        week_of: NaiveDate,
        domains: Vec<DomainPlan>,
        safety_flags: Vec<String>,
    ) -> Self {
        Self {
            child,
            week_of,
            domains,
            safety_flags,
            generator: GENERATOR_ID.to_string(),
        }
    }

    pub fn child(&self) -> &ChildProfile {
        &self.child
    }

    pub fn week_of(&self) -> NaiveDate {
        self.week_of
    }

    /// Domain plans in Social, Verbal, Play order.
    pub fn domains(&self) -> &[DomainPlan] {
        &self.domains
    }

    pub fn safety_flags(&self) -> &[String] {
        &self.safety_flags
    }

    pub fn generator(&self) -> &str {
        &self.generator
    }
}

impl TryFrom<WeeklyPlanRecord> for WeeklyPlan {
    type Error = String;

    fn try_from(record: WeeklyPlanRecord) -> Result<Self, Self::Error> {
        let order: Vec<Domain> = record.domains.iter().map(|plan| plan.domain).collect();
        if order != Domain::ALL {
            return Err(format!(
                "domains must be exactly Social, Verbal, Play in order, found {order:?}"
            ));
        }

        let expected_flags = safety_scan(&safety_scan_input(&record.domains));
        if record.safety_flags != expected_flags {
            return Err("safety_flags do not match the domain rule text".to_string());
        }

        Ok(Self {
            child: record.child,
            week_of: record.week_of,
            domains: record.domains,
            safety_flags: record.safety_flags,
            generator: record.generator,
        })
    }
}

/// Build the text scanned for banned claims.
///
/// Per domain, in order: prompting, reinforcement, mastery criteria, then the
/// space-joined targets. All pieces are joined with a single space.
pub fn safety_scan_input(domains: &[DomainPlan]) -> String {
    domains
        .iter()
        .flat_map(|plan| {
            [
                plan.prompting.clone(),
                plan.reinforcement.clone(),
                plan.mastery_criteria.clone(),
                plan.targets.join(" "),
            ]
        })
        .collect::<Vec<_>>()
        .join(" ")
}
