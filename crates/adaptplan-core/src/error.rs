use thiserror::Error;

/// Core error type shared across adaptplan crates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A child profile violates its construction constraints.
    #[error("invalid child profile: {0}")]
    InvalidProfile(String),
    /// A skill level string is outside beginner/intermediate/advanced.
    #[error("invalid skill level: {0}")]
    InvalidLevel(String),
    /// A domain name is not one of Social, Verbal, Play.
    #[error("invalid domain: {0}")]
    InvalidDomain(String),
}

/// Convenience alias for results returned by adaptplan crates.
pub type Result<T> = std::result::Result<T, Error>;
