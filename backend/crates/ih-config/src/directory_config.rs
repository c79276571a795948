use crate::bounds::check_range;
use crate::{ConfigError, ConfigErrorResult};

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

// Change feed channel capacity constraints
pub const MIN_FEED_CAPACITY: usize = 1;
pub const MAX_FEED_CAPACITY: usize = 65_536;
pub const DEFAULT_FEED_CAPACITY: usize = 256;

/// Who may enumerate every user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListPolicy {
    /// Any caller with an identity
    #[default]
    AnyAuthenticated,
    /// Only callers whose stored role is interviewer
    InterviewersOnly,
}

impl ListPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnyAuthenticated => "any_authenticated",
            Self::InterviewersOnly => "interviewers_only",
        }
    }
}

impl FromStr for ListPolicy {
    type Err = ConfigError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any_authenticated" => Ok(Self::AnyAuthenticated),
            "interviewers_only" => Ok(Self::InterviewersOnly),
            _ => Err(ConfigError::directory(format!(
                "directory.list_policy must be any_authenticated or interviewers_only, got {}",
                s
            ))),
        }
    }
}

impl fmt::Display for ListPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub list_policy: ListPolicy,
    /// Buffered changes per live-read channel before slow subscribers lag
    pub feed_capacity: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            list_policy: ListPolicy::default(),
            feed_capacity: DEFAULT_FEED_CAPACITY,
        }
    }
}

impl DirectoryConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        check_range(
            "directory.feed_capacity",
            self.feed_capacity,
            MIN_FEED_CAPACITY,
            MAX_FEED_CAPACITY,
        )
    }
}
