use adaptplan_core::{ChildProfile, Domain, SkillLevels, safety_scan};
use chrono::NaiveDate;

use crate::errors::Result;
use crate::model::{WeeklyPlan, safety_scan_input};
use crate::rules::RuleTable;

/// Compose the deterministic weekly plan for a child.
///
/// Resolves Social, Verbal, and Play in that order; the first missing rule
/// aborts composition. The safety scan runs once over the concatenated rule
/// text and its flags are stored verbatim.
pub fn compose(
    child: ChildProfile,
    levels: SkillLevels,
    rules: &RuleTable,
    week_of: NaiveDate,
) -> Result<WeeklyPlan> {
    let domains = Domain::ALL
        .iter()
        .map(|domain| rules.resolve(*domain, levels.level_for(*domain)))
        .collect::<Result<Vec<_>>>()?;

    let safety_flags = safety_scan(&safety_scan_input(&domains));

    Ok(WeeklyPlan::from_parts(child, week_of, domains, safety_flags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use adaptplan_core::{ChildProfileDraft, Level, banned_claim_flag};

    use crate::errors::PlanError;
    use crate::model::GENERATOR_ID;
    use crate::rules::RuleBlock;

    fn block(domain: Domain, level: Level) -> RuleBlock {
        RuleBlock {
            targets: vec![format!("{domain} {level} target A"), "target B".to_string()],
            prompting: format!("{domain} prompting"),
            reinforcement: format!("{domain} reinforcement"),
            mastery_criteria: format!("{domain} mastery"),
            activities: vec![format!("{domain} activity")],
        }
    }

    fn full_table() -> RuleTable {
        let mut blocks = Vec::new();
        for domain in Domain::ALL {
            for level in Level::ALL {
                blocks.push((domain, level, block(domain, level)));
            }
        }
        RuleTable::from_blocks(blocks).unwrap()
    }

    fn child() -> ChildProfile {
        ChildProfile::new(ChildProfileDraft::new("Sam", 6)).unwrap()
    }

    fn week() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn composes_domains_in_fixed_order() {
        let levels = SkillLevels {
            social: Level::Advanced,
            verbal: Level::Beginner,
            play: Level::Intermediate,
        };
        let plan = compose(child(), levels, &full_table(), week()).unwrap();

        let order: Vec<(Domain, Level)> = plan
            .domains()
            .iter()
            .map(|domain| (domain.domain, domain.level))
            .collect();
        assert_eq!(
            order,
            vec![
                (Domain::Social, Level::Advanced),
                (Domain::Verbal, Level::Beginner),
                (Domain::Play, Level::Intermediate),
            ]
        );
        assert!(plan.safety_flags().is_empty());
        assert_eq!(plan.generator(), GENERATOR_ID);
        assert_eq!(plan.week_of(), week());
    }

    #[test]
    fn scan_input_follows_field_order() {
        let plan = compose(
            child(),
            SkillLevels::uniform(Level::Beginner),
            &full_table(),
            week(),
        )
        .unwrap();

        let expected = [
            "Social prompting Social reinforcement Social mastery Social beginner target A target B",
            "Verbal prompting Verbal reinforcement Verbal mastery Verbal beginner target A target B",
            "Play prompting Play reinforcement Play mastery Play beginner target A target B",
        ]
        .join(" ");
        assert_eq!(safety_scan_input(plan.domains()), expected);
    }

    #[test]
    fn missing_rule_aborts_composition() {
        let table = RuleTable::from_blocks([
            (Domain::Social, Level::Beginner, block(Domain::Social, Level::Beginner)),
            (Domain::Verbal, Level::Beginner, block(Domain::Verbal, Level::Beginner)),
        ])
        .unwrap();

        let err = compose(child(), SkillLevels::uniform(Level::Beginner), &table, week())
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::MissingRule {
                domain: Domain::Play,
                level: Level::Beginner,
            }
        );
    }

    #[test]
    fn flags_banned_claims_in_rule_text() {
        let mut blocks = Vec::new();
        for domain in Domain::ALL {
            let mut block = block(domain, Level::Beginner);
            if domain == Domain::Verbal {
                block.reinforcement = "Guaranteed Results with every token.".to_string();
            }
            if domain == Domain::Play {
                block.targets.push("help cure autism".to_string());
            }
            blocks.push((domain, Level::Beginner, block));
        }
        let table = RuleTable::from_blocks(blocks).unwrap();

        let plan = compose(child(), SkillLevels::uniform(Level::Beginner), &table, week())
            .unwrap();
        assert_eq!(
            plan.safety_flags(),
            &[
                banned_claim_flag("cure autism"),
                banned_claim_flag("guaranteed results"),
            ]
        );
    }

    #[test]
    fn activities_are_not_scanned() {
        let mut blocks = Vec::new();
        for domain in Domain::ALL {
            let mut block = block(domain, Level::Beginner);
            block.activities.push("100% success party".to_string());
            blocks.push((domain, Level::Beginner, block));
        }
        let table = RuleTable::from_blocks(blocks).unwrap();

        let plan = compose(child(), SkillLevels::uniform(Level::Beginner), &table, week())
            .unwrap();
        assert!(plan.safety_flags().is_empty());
    }

    #[test]
    fn compose_is_deterministic() {
        let table = full_table();
        let levels = SkillLevels::uniform(Level::Intermediate);
        let first = compose(child(), levels, &table, week()).unwrap();
        let second = compose(child(), levels, &table, week()).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[test]
    fn deserialized_plan_is_checked() {
        let plan = compose(
            child(),
            SkillLevels::uniform(Level::Beginner),
            &full_table(),
            week(),
        )
        .unwrap();
        let json = serde_json::to_value(&plan).unwrap();

        let parsed: WeeklyPlan = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(parsed, plan);

        let mut reordered = json.clone();
        reordered["domains"].as_array_mut().unwrap().swap(0, 2);
        assert!(serde_json::from_value::<WeeklyPlan>(reordered).is_err());

        let mut tampered = json;
        tampered["safety_flags"] = serde_json::json!([banned_claim_flag("diagnose")]);
        assert!(serde_json::from_value::<WeeklyPlan>(tampered).is_err());
    }
}
