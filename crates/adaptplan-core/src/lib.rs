//! Core contracts and helpers for adaptplan.
//!
//! This crate defines the child profile and skill level types, the banned
//! claim scanner, and the error type shared across the planner crates.

pub mod error;
pub mod levels;
pub mod profile;
pub mod safety;
pub mod validation;

pub use error::{Error, Result};
pub use levels::{Domain, Level, SkillLevels};
pub use profile::{
    ChildProfile, ChildProfileDraft, DEFAULT_DIAGNOSIS, MAX_AGE_YEARS, MIN_AGE_YEARS,
};
pub use safety::{BANNED_CLAIMS, banned_claim_flag, banned_claims_in, safety_scan};
pub use validation::validate_profile;
