//! Navigation extraction from payloads
//!
//! Hooks pass an opaque payload back to the host. When the payload carries an
//! intent to navigate, an extractor splits it into the [`NavigationRequest`]
//! and whatever remains, so the coordinator can dispatch the request while the
//! residual payload continues downstream.

use crate::request::NavigationRequest;

/// Outcome of running an extractor on a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted<P, R> {
    /// The payload asked for navigation
    Navigate {
        request: NavigationRequest<R>,
        residual: P,
    },

    /// Nothing to dispatch, the payload is returned untouched
    PassThrough(P),
}

impl<P, R> Extracted<P, R> {
    pub fn navigate(request: NavigationRequest<R>, residual: P) -> Self {
        Self::Navigate { request, residual }
    }

    pub fn pass(payload: P) -> Self {
        Self::PassThrough(payload)
    }

    /// Check if a request was found
    pub fn is_navigate(&self) -> bool {
        matches!(self, Self::Navigate { .. })
    }

    /// Split into the request (if any) and the payload that continues downstream
    pub fn into_parts(self) -> (Option<NavigationRequest<R>>, P) {
        match self {
            Self::Navigate { request, residual } => (Some(request), residual),
            Self::PassThrough(payload) => (None, payload),
        }
    }
}

/// Partial decoder from a payload into a navigation request plus residual payload
///
/// # Example
///
/// ```
/// use state_navigator::{ExtractNavigation, Extracted, NavigationRequest};
///
/// enum Msg { GoTo(u32), Saved }
///
/// let extractor = |msg: Msg| match msg {
///     Msg::GoTo(id) => Extracted::navigate(NavigationRequest::push_route(id), Msg::Saved),
///     other => Extracted::pass(other),
/// };
///
/// assert!(extractor.extract(Msg::GoTo(1)).is_navigate());
/// assert!(!extractor.extract(Msg::Saved).is_navigate());
/// ```
pub trait ExtractNavigation<P, R>: Send + Sync + 'static {
    fn extract(&self, payload: P) -> Extracted<P, R>;
}

impl<P, R, F> ExtractNavigation<P, R> for F
where
    F: Fn(P) -> Extracted<P, R> + Send + Sync + 'static,
{
    fn extract(&self, payload: P) -> Extracted<P, R> {
        self(payload)
    }
}

/// Extractor that never finds a request
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNavigation;

impl<P, R> ExtractNavigation<P, R> for NoNavigation {
    fn extract(&self, payload: P) -> Extracted<P, R> {
        Extracted::PassThrough(payload)
    }
}
