use adaptplan_core::{Domain, Level};

use crate::errors::{PlanError, Result};
use crate::model::DomainPlan;
use crate::rules::RuleTable;

impl RuleTable {
    /// Resolve one (domain, level) pair into a [`DomainPlan`].
    ///
    /// A missing key path is a [`PlanError::MissingRule`]; no default plan is substituted.
    pub fn resolve(&self, domain: Domain, level: Level) -> Result<DomainPlan> {
        let block = self
            .block(domain.as_str(), level.as_str())
            .ok_or(PlanError::MissingRule { domain, level })?;

        Ok(DomainPlan {
            domain,
            level,
            targets: block.targets.clone(),
            prompting: block.prompting.clone(),
            reinforcement: block.reinforcement.clone(),
            mastery_criteria: block.mastery_criteria.clone(),
            activities: block.activities.clone(),
        })
    }
}
