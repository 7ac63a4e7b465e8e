// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gitscope-stats

use thiserror::Error;

/// Smallest roster a comparison accepts
pub const MIN_COMPARED_DEVELOPERS: usize = 2;

/// Largest roster a comparison accepts
pub const MAX_COMPARED_DEVELOPERS: usize = 10;

/// Errors raised before any statistics are computed
///
/// The aggregations themselves never fail; empty input produces zeroed
/// results instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    /// Fewer than two developers were named for a comparison
    #[error("Must provide at least 2 developers to compare (got {count})")]
    TooFewDevelopers {
        /// Number of developers supplied
        count: usize,
    },

    /// More than ten developers were named for a comparison
    #[error("Cannot compare more than 10 developers at once (got {count})")]
    TooManyDevelopers {
        /// Number of developers supplied
        count: usize,
    },
}

/// Check a comparison roster before any history is fetched
///
/// # Errors
///
/// Returns `StatsError::TooFewDevelopers` or `StatsError::TooManyDevelopers`
/// when the roster size is outside 2..=10.
pub fn validate_roster<S: AsRef<str>>(authors: &[S]) -> Result<(), StatsError> {
    match authors.len() {
        count if count < MIN_COMPARED_DEVELOPERS => Err(StatsError::TooFewDevelopers { count }),
        count if count > MAX_COMPARED_DEVELOPERS => Err(StatsError::TooManyDevelopers { count }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_bounds() {
        assert_eq!(
            validate_roster::<&str>(&[]),
            Err(StatsError::TooFewDevelopers { count: 0 })
        );
        assert_eq!(
            validate_roster(&["erik"]),
            Err(StatsError::TooFewDevelopers { count: 1 })
        );
        assert_eq!(validate_roster(&["erik", "john"]), Ok(()));

        let ten: Vec<String> = (0..10).map(|i| format!("dev{i}")).collect();
        assert_eq!(validate_roster(&ten), Ok(()));

        let eleven: Vec<String> = (0..11).map(|i| format!("dev{i}")).collect();
        assert_eq!(
            validate_roster(&eleven),
            Err(StatsError::TooManyDevelopers { count: 11 })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = StatsError::TooFewDevelopers { count: 1 };
        assert!(err.to_string().contains("at least 2"));
        let err = StatsError::TooManyDevelopers { count: 12 };
        assert!(err.to_string().contains("more than 10"));
    }
}
