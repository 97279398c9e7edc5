use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validation::validate_profile;

/// Diagnosis label used when none is supplied.
pub const DEFAULT_DIAGNOSIS: &str = "Autism Spectrum Disorder";

/// Youngest supported age in years.
pub const MIN_AGE_YEARS: u8 = 2;

/// Oldest supported age in years.
pub const MAX_AGE_YEARS: u8 = 16;

/// Validated child profile.
///
/// Fields are private so a profile can only exist once it passed
/// [`validate_profile`]; deserialization goes through the same check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "ChildProfileDraft")]
pub struct ChildProfile {
    /// First name or initial.
    name: String,
    /// Age in whole years, within [`MIN_AGE_YEARS`]..=[`MAX_AGE_YEARS`].
    age_years: u8,
    diagnosis: String,
    strengths: Vec<String>,
    preferences: Vec<String>,
    /// Free-text notes. Never forwarded to the narrative service.
    notes: Option<String>,
}

/// Unvalidated profile input, as read from JSON or CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChildProfileDraft {
    pub name: String,
    pub age_years: u8,
    #[serde(default = "default_diagnosis")]
    pub diagnosis: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_diagnosis() -> String {
    DEFAULT_DIAGNOSIS.to_string()
}

impl ChildProfileDraft {
    pub fn new(name: impl Into<String>, age_years: u8) -> Self {
        Self {
            name: name.into(),
            age_years,
            diagnosis: default_diagnosis(),
            strengths: Vec::new(),
            preferences: Vec::new(),
            notes: None,
        }
    }
}

impl TryFrom<ChildProfileDraft> for ChildProfile {
    type Error = crate::error::Error;

    fn try_from(draft: ChildProfileDraft) -> Result<Self> {
        validate_profile(&draft)?;
        Ok(Self {
            name: draft.name,
            age_years: draft.age_years,
            diagnosis: draft.diagnosis,
            strengths: draft.strengths,
            preferences: draft.preferences,
            notes: draft.notes,
        })
    }
}

impl ChildProfile {
    /// Validate and build a profile.
    pub fn new(draft: ChildProfileDraft) -> Result<Self> {
        Self::try_from(draft)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age_years(&self) -> u8 {
        self.age_years
    }

    pub fn diagnosis(&self) -> &str {
        &self.diagnosis
    }

    pub fn strengths(&self) -> &[String] {
        &self.strengths
    }

    pub fn preferences(&self) -> &[String] {
        &self.preferences
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}
