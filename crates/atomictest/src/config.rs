//! Kit configuration.
//!
//! The defaults reproduce the console format the examples are checked
//! against, so most callers never build a config by hand. Embedders that
//! want a different error tag or float tolerance build one with the
//! `with_*` methods:
//!
//! ```rust
//! use atomictest::{Kit, KitConfig};
//!
//! let config = KitConfig::default()
//!     .with_error_tag("FAIL> ")
//!     .with_float_tolerance(1e-3);
//! let kit = Kit::new(config).expect("valid config");
//! assert_eq!(kit.config().error_tag, "FAIL> ");
//! ```

use thiserror::Error;

/// Prefix of every diagnostic line written on a failed check.
pub const ERROR_TAG: &str = "[Error]: ";

/// Largest absolute difference at which two floats still compare equal.
pub const DEFAULT_FLOAT_TOLERANCE: f64 = 1e-7;

/// Error returned when a [`KitConfig`] cannot be used.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The error tag is empty, so failures would not be greppable.
    #[error("error tag must not be empty")]
    EmptyErrorTag,
    /// The float tolerance is not a finite positive number.
    #[error("float tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),
}

/// Settings of a [`Kit`](crate::Kit).
#[derive(Debug, Clone, PartialEq)]
pub struct KitConfig {
    /// Prefix of diagnostic lines and of the "no exception" sentinel.
    pub error_tag: String,
    /// Tolerance used by float equality.
    pub float_tolerance: f64,
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            error_tag: ERROR_TAG.to_string(),
            float_tolerance: DEFAULT_FLOAT_TOLERANCE,
        }
    }
}

impl KitConfig {
    /// Set the diagnostic prefix.
    #[must_use]
    pub fn with_error_tag(mut self, tag: impl Into<String>) -> Self {
        self.error_tag = tag.into();
        self
    }

    /// Set the float equality tolerance.
    #[must_use]
    pub fn with_float_tolerance(mut self, tolerance: f64) -> Self {
        self.float_tolerance = tolerance;
        self
    }

    /// Check that the settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.error_tag.is_empty() {
            return Err(ConfigError::EmptyErrorTag);
        }
        if !self.float_tolerance.is_finite() || self.float_tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(self.float_tolerance));
        }
        Ok(())
    }
}
