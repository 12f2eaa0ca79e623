//! Transition blockers
//!
//! A blocker inspects the current state and the target of a pending
//! navigation and may ask the host to confirm leaving, typically to protect
//! unsaved changes. Returning `Some(message)` requests a confirmation prompt
//! with that message; `None` lets the navigation through.

use crate::response::NavigationResponse;

/// Decides whether leaving the current state needs confirmation.
///
/// Blockers run synchronously on the navigation path and must not wait on I/O.
///
/// # Example
///
/// ```
/// use state_navigator::{NavigationResponse, TransitionBlocker};
///
/// struct UnsavedChanges;
///
/// impl TransitionBlocker<bool, String> for UnsavedChanges {
///     fn prompt(&self, dirty: &bool, _response: NavigationResponse, route: &String) -> Option<String> {
///         dirty.then(|| format!("Leave for {route} without saving?"))
///     }
/// }
///
/// let guard = UnsavedChanges;
/// assert!(guard.prompt(&false, NavigationResponse::Push, &"/x".to_string()).is_none());
/// ```
pub trait TransitionBlocker<S, R>: Send + Sync + 'static {
    /// Message for the confirmation prompt, or `None` to allow the navigation
    fn prompt(&self, state: &S, response: NavigationResponse, route: &R) -> Option<String>;

    /// Get blocker name (for debugging)
    fn name(&self) -> &str {
        "TransitionBlocker"
    }

    /// Higher priority blockers are asked first inside [`Blockers`]. Default is 0.
    fn priority(&self) -> i32 {
        0
    }
}

/// Boxed blocker for dynamic dispatch
pub type BoxedBlocker<S, R> = Box<dyn TransitionBlocker<S, R>>;

impl<S, R> TransitionBlocker<S, R> for BoxedBlocker<S, R>
where
    S: 'static,
    R: 'static,
{
    fn prompt(&self, state: &S, response: NavigationResponse, route: &R) -> Option<String> {
        (**self).prompt(state, response, route)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn priority(&self) -> i32 {
        (**self).priority()
    }
}

/// Create a blocker from a function or closure
///
/// # Example
///
/// ```
/// use state_navigator::{blocker_fn, NavigationResponse, TransitionBlocker};
///
/// let guard = blocker_fn(|pending: &u32, _response: NavigationResponse, _route: &u64| {
///     (*pending > 0).then(|| format!("{pending} uploads still running"))
/// });
///
/// assert_eq!(
///     guard.prompt(&2, NavigationResponse::Pop, &9),
///     Some("2 uploads still running".to_string())
/// );
/// ```
pub fn blocker_fn<S, R, F>(f: F) -> FnBlocker<F>
where
    F: Fn(&S, NavigationResponse, &R) -> Option<String> + Send + Sync + 'static,
{
    FnBlocker { f }
}

/// Blocker created from a function or closure
pub struct FnBlocker<F> {
    f: F,
}

impl<S, R, F> TransitionBlocker<S, R> for FnBlocker<F>
where
    F: Fn(&S, NavigationResponse, &R) -> Option<String> + Send + Sync + 'static,
{
    fn prompt(&self, state: &S, response: NavigationResponse, route: &R) -> Option<String> {
        (self.f)(state, response, route)
    }
}

/// Several blockers asked in priority order; the first prompt wins.
///
/// Blockers with equal priority keep their insertion order.
pub struct Blockers<S, R> {
    blockers: Vec<BoxedBlocker<S, R>>,
}

impl<S: 'static, R: 'static> Blockers<S, R> {
    pub fn new() -> Self {
        Self {
            blockers: Vec::new(),
        }
    }

    /// Add a blocker to the composition
    pub fn with<B>(mut self, blocker: B) -> Self
    where
        B: TransitionBlocker<S, R>,
    {
        self.push(Box::new(blocker));
        self
    }

    /// Add a boxed blocker
    pub fn push(&mut self, blocker: BoxedBlocker<S, R>) {
        // stable: equal priorities stay in insertion order
        let position = self
            .blockers
            .iter()
            .position(|existing| existing.priority() < blocker.priority())
            .unwrap_or(self.blockers.len());
        self.blockers.insert(position, blocker);
    }

    pub fn len(&self) -> usize {
        self.blockers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blockers.is_empty()
    }
}

impl<S: 'static, R: 'static> Default for Blockers<S, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static, R: 'static> TransitionBlocker<S, R> for Blockers<S, R> {
    fn prompt(&self, state: &S, response: NavigationResponse, route: &R) -> Option<String> {
        self.blockers
            .iter()
            .find_map(|blocker| blocker.prompt(state, response, route))
    }

    fn name(&self) -> &str {
        "Blockers"
    }

    fn priority(&self) -> i32 {
        self.blockers
            .iter()
            .map(|blocker| blocker.priority())
            .max()
            .unwrap_or(0)
    }
}
