//! How the current location was reached

use crate::history::HistoryAction;
use std::fmt;

/// Describes how the history arrived at a location.
///
/// Derived once per navigation event from the history's action and handed to
/// the state functions alongside the parsed route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationResponse {
    /// A new entry was pushed
    Push,
    /// The history was traversed (back, forward or `go(n)`)
    Pop,
    /// The current entry was replaced
    Replace,
}

impl NavigationResponse {
    /// Map a raw history action string.
    ///
    /// Only `"PUSH"` and `"POP"` are recognised. Every other value, including
    /// `"REPLACE"`, other spellings and the empty string, yields
    /// [`NavigationResponse::Replace`].
    ///
    /// # Example
    ///
    /// ```
    /// use state_navigator::NavigationResponse;
    ///
    /// assert_eq!(NavigationResponse::from_raw_action("POP"), NavigationResponse::Pop);
    /// assert_eq!(NavigationResponse::from_raw_action("pop"), NavigationResponse::Replace);
    /// ```
    pub fn from_raw_action(action: &str) -> Self {
        match action {
            "PUSH" => Self::Push,
            "POP" => Self::Pop,
            _ => Self::Replace,
        }
    }

    /// Dispatch on the variant.
    pub fn fold<T>(
        self,
        on_push: impl FnOnce() -> T,
        on_pop: impl FnOnce() -> T,
        on_replace: impl FnOnce() -> T,
    ) -> T {
        match self {
            Self::Push => on_push(),
            Self::Pop => on_pop(),
            Self::Replace => on_replace(),
        }
    }

    /// Check if this is a push
    pub fn is_push(self) -> bool {
        matches!(self, Self::Push)
    }

    /// Check if this is a history traversal
    pub fn is_pop(self) -> bool {
        matches!(self, Self::Pop)
    }

    /// Check if this is a replace
    pub fn is_replace(self) -> bool {
        matches!(self, Self::Replace)
    }
}

impl From<HistoryAction> for NavigationResponse {
    fn from(action: HistoryAction) -> Self {
        match action {
            HistoryAction::Push => Self::Push,
            HistoryAction::Pop => Self::Pop,
            HistoryAction::Replace => Self::Replace,
        }
    }
}

impl fmt::Display for NavigationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Push => "push",
            Self::Pop => "pop",
            Self::Replace => "replace",
        };
        f.write_str(name)
    }
}
