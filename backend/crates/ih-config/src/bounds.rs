use crate::{ConfigError, ConfigErrorResult};

use std::fmt::Display;

/// Reject `value` outside `min..=max`, naming the offending key.
#[track_caller]
pub(crate) fn check_range<T>(key: &str, value: T, min: T, max: T) -> ConfigErrorResult<()>
where
    T: PartialOrd + Display,
{
    if value < min || value > max {
        return Err(ConfigError::config(format!(
            "{} must be {}-{}, got {}",
            key, min, max, value
        )));
    }

    Ok(())
}
