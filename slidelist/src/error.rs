/// A configuration value that cannot drive the engine.
///
/// These are setup errors: constructors refuse to build a list or view from them.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("`{name}` must be a positive, finite number (got {value})")]
    NotPositive { name: &'static str, value: f64 },
    #[error("`{name}` must be a finite, non-negative number (got {value})")]
    Negative { name: &'static str, value: f64 },
    #[error("`{name}` must be a finite number (got {value})")]
    NotFinite { name: &'static str, value: f64 },
    #[error("`max_throw_items` must allow at least one item")]
    ZeroThrowItems,
}

impl ConfigError {
    pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(ConfigError::NotPositive { name, value })
        }
    }

    pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ConfigError::NotFinite { name, value })
        }
    }

    pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<f64, ConfigError> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(ConfigError::Negative { name, value })
        }
    }
}
