use std::path::PathBuf;

use adaptplan_core::{ChildProfile, ChildProfileDraft, Level, SkillLevels};
use chrono::NaiveDate;
use clap::Args;

use crate::CliError;

/// Child profile, from a JSON file or individual flags.
#[derive(Args, Debug, Clone)]
pub struct ChildArgs {
    /// JSON child profile.
    #[arg(
        long,
        value_name = "PATH",
        conflicts_with_all = ["name", "age", "diagnosis", "strengths", "preferences", "notes"]
    )]
    pub child: Option<PathBuf>,
    #[arg(long, required_unless_present = "child")]
    pub name: Option<String>,
    /// Age in whole years.
    #[arg(long, required_unless_present = "child")]
    pub age: Option<u8>,
    #[arg(long)]
    pub diagnosis: Option<String>,
    /// Repeat for each strength.
    #[arg(long = "strength", value_name = "TEXT")]
    pub strengths: Vec<String>,
    /// Repeat for each preference.
    #[arg(long = "preference", value_name = "TEXT")]
    pub preferences: Vec<String>,
    /// Kept locally; never sent to the narrative service.
    #[arg(long)]
    pub notes: Option<String>,
}

impl ChildArgs {
    pub fn into_profile(self) -> Result<ChildProfile, CliError> {
        let draft = match self.child {
            Some(path) => {
                let content = std::fs::read_to_string(&path).map_err(|source| CliError::Io {
                    path: path.clone(),
                    source,
                })?;
                serde_json::from_str::<ChildProfileDraft>(&content)?
            }
            None => {
                let (Some(name), Some(age)) = (self.name, self.age) else {
                    return Err(CliError::InvalidArgs(
                        "either --child or both --name and --age are required".to_string(),
                    ));
                };
                let mut draft = ChildProfileDraft::new(name, age);
                if let Some(diagnosis) = self.diagnosis {
                    draft.diagnosis = diagnosis;
                }
                draft.strengths = self.strengths;
                draft.preferences = self.preferences;
                draft.notes = self.notes;
                draft
            }
        };

        Ok(ChildProfile::new(draft)?)
    }
}

/// Per-domain skill levels.
#[derive(Args, Debug, Clone, Copy)]
pub struct LevelArgs {
    #[arg(long, default_value = "beginner")]
    pub social: Level,
    #[arg(long, default_value = "beginner")]
    pub verbal: Level,
    #[arg(long, default_value = "beginner")]
    pub play: Level,
}

impl LevelArgs {
    pub fn levels(&self) -> SkillLevels {
        SkillLevels {
            social: self.social,
            verbal: self.verbal,
            play: self.play,
        }
    }
}

/// Everything needed to compose a plan.
#[derive(Args, Debug, Clone)]
pub struct PlanInputArgs {
    #[command(flatten)]
    pub child: ChildArgs,
    #[command(flatten)]
    pub levels: LevelArgs,
    /// Week start date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_name = "DATE")]
    pub week_of: Option<NaiveDate>,
    /// Rule table path, overriding the configured one.
    #[arg(long, value_name = "PATH")]
    pub rules: Option<PathBuf>,
}

impl PlanInputArgs {
    pub fn week_of(&self) -> NaiveDate {
        self.week_of
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
