//! Setup and integrity errors.
//!
//! Only match construction can fail. Everything that happens inside a running
//! match is either applied or silently rejected (a turret still reloading, an
//! elevation past its clamp), so those paths return `bool`/`Option` instead.

use std::fmt;

/// Fatal errors raised while building a match.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupError {
    /// A named sub-part required by the ship or turret model is absent.
    MissingPart {
        /// Logical part name that failed to resolve (`base`, `barrel2`, ...).
        part: &'static str,
    },

    /// A tuning value is outside the range the simulation can run with.
    InvalidTuning {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },

    /// Tuning JSON could not be parsed.
    TuningParse(String),

    /// A match was requested without any bots to fight.
    EmptyRoster,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::MissingPart { part } => {
                write!(f, "model is missing required sub-part '{}'", part)
            }
            SetupError::InvalidTuning {
                name,
                value,
                expected,
            } => write!(
                f,
                "tuning value '{}' = {} is outside expected range {}",
                name, value, expected
            ),
            SetupError::TuningParse(msg) => write!(f, "failed to parse tuning: {}", msg),
            SetupError::EmptyRoster => write!(f, "match needs at least one bot"),
        }
    }
}

impl std::error::Error for SetupError {}

impl From<serde_json::Error> for SetupError {
    fn from(err: serde_json::Error) -> Self {
        SetupError::TuningParse(err.to_string())
    }
}

/// Convenience alias: a `Result` using `SetupError` as the error type.
pub type SetupResult<T> = Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_part_message_names_part() {
        let err = SetupError::MissingPart { part: "barrel3" };
        assert_eq!(err.to_string(), "model is missing required sub-part 'barrel3'");
    }

    #[test]
    fn test_json_error_converts() {
        let err: SetupError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, SetupError::TuningParse(_)));
    }
}
