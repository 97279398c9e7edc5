use crate::error::{Error, Result};
use crate::profile::{ChildProfileDraft, MAX_AGE_YEARS, MIN_AGE_YEARS};

/// Validate a child profile draft before it becomes a [`crate::ChildProfile`].
///
/// This checks:
/// - the name is non-empty after trimming
/// - the age is within the supported range
/// - the diagnosis label is non-empty
/// - strength and preference tags are non-empty
pub fn validate_profile(draft: &ChildProfileDraft) -> Result<()> {
    if draft.name.trim().is_empty() {
        return Err(Error::InvalidProfile("name must not be empty".to_string()));
    }

    if !(MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&draft.age_years) {
        return Err(Error::InvalidProfile(format!(
            "age_years {} outside supported range {}..={}",
            draft.age_years, MIN_AGE_YEARS, MAX_AGE_YEARS
        )));
    }

    if draft.diagnosis.trim().is_empty() {
        return Err(Error::InvalidProfile(
            "diagnosis must not be empty".to_string(),
        ));
    }

    for (idx, tag) in draft.strengths.iter().enumerate() {
        if tag.trim().is_empty() {
            return Err(Error::InvalidProfile(format!("strengths[{idx}] is empty")));
        }
    }

    for (idx, tag) in draft.preferences.iter().enumerate() {
        if tag.trim().is_empty() {
            return Err(Error::InvalidProfile(format!(
                "preferences[{idx}] is empty"
            )));
        }
    }

    Ok(())
}
