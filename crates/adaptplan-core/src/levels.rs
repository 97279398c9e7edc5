use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Skill area addressed independently by the weekly plan.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Domain {
    Social,
    Verbal,
    Play,
}

impl Domain {
    /// Domains in plan order.
    pub const ALL: [Domain; 3] = [Domain::Social, Domain::Verbal, Domain::Play];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Social => "Social",
            Domain::Verbal => "Verbal",
            Domain::Play => "Play",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "Social" => Ok(Domain::Social),
            "Verbal" => Ok(Domain::Verbal),
            "Play" => Ok(Domain::Play),
            other => Err(Error::InvalidDomain(other.to_string())),
        }
    }
}

/// Proficiency tier selecting which rule block applies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            other => Err(Error::InvalidLevel(format!(
                "'{other}' (expected beginner, intermediate, or advanced)"
            ))),
        }
    }
}

/// Per-domain levels selected for a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SkillLevels {
    pub social: Level,
    pub verbal: Level,
    pub play: Level,
}

impl SkillLevels {
    /// Parse the three level strings, rejecting anything outside the enumerated set.
    pub fn parse(social: &str, verbal: &str, play: &str) -> Result<Self> {
        Ok(Self {
            social: social.parse()?,
            verbal: verbal.parse()?,
            play: play.parse()?,
        })
    }

    pub fn uniform(level: Level) -> Self {
        Self {
            social: level,
            verbal: level,
            play: level,
        }
    }

    pub fn level_for(&self, domain: Domain) -> Level {
        match domain {
            Domain::Social => self.social,
            Domain::Verbal => self.verbal,
            Domain::Play => self.play,
        }
    }
}
