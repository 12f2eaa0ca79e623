//! Error types
//!
//! Coordination itself never fails: unparsable paths resolve to the not-found
//! route and unmatched payloads pass through. Errors only arise while
//! assembling a coordinator or restoring a [`MemoryHistory`](crate::MemoryHistory).

use std::fmt;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised by [`CoordinatorBuilder::build`](crate::CoordinatorBuilder::build)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No route codec was supplied
    MissingCodec,

    /// No not-found route was supplied
    MissingNotFoundRoute,

    /// No default-state function was supplied
    MissingDefaultState,

    /// No state transition was supplied
    MissingTransition,

    /// The parse cache was configured with zero capacity
    ZeroCacheCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingCodec => write!(f, "Coordinator requires a route codec"),
            ConfigError::MissingNotFoundRoute => {
                write!(f, "Coordinator requires a not-found route")
            }
            ConfigError::MissingDefaultState => {
                write!(f, "Coordinator requires a default state function")
            }
            ConfigError::MissingTransition => {
                write!(f, "Coordinator requires a state transition")
            }
            ConfigError::ZeroCacheCapacity => {
                write!(f, "Parse cache capacity must be non-zero")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// History Errors
// ============================================================================

/// Errors raised when restoring a [`MemoryHistory`](crate::MemoryHistory)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// A history needs at least one entry
    EmptyEntries,

    /// The current index does not point at an entry
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::EmptyEntries => write!(f, "History must contain at least one entry"),
            HistoryError::IndexOutOfRange { index, len } => {
                write!(f, "History index {} out of range for {} entries", index, len)
            }
        }
    }
}

impl std::error::Error for HistoryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::MissingCodec.to_string(),
            "Coordinator requires a route codec"
        );
        assert_eq!(
            ConfigError::ZeroCacheCapacity.to_string(),
            "Parse cache capacity must be non-zero"
        );
    }

    #[test]
    fn test_history_error_display() {
        let error = HistoryError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(
            error.to_string(),
            "History index 4 out of range for 2 entries"
        );
    }

    #[test]
    fn test_errors_are_std_errors() {
        let boxed: Box<dyn std::error::Error> = Box::new(HistoryError::EmptyEntries);
        assert_eq!(boxed.to_string(), "History must contain at least one entry");
    }
}
