//! State accessors and route-driven state transitions

use crate::response::NavigationResponse;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by transitions and coordinator hooks
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Zero-argument accessor for the host's application state.
///
/// The coordinator receives one of these instead of the state itself and
/// hands back either the same accessor or a fresh one wrapping a new state.
/// Clones share the underlying function, so [`same_as`](StateThunk::same_as)
/// tells whether a hook replaced the accessor.
pub struct StateThunk<S> {
    read: Arc<dyn Fn() -> S + Send + Sync>,
}

impl<S> StateThunk<S> {
    /// Wrap a state reader
    pub fn new<F>(read: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
    {
        Self {
            read: Arc::new(read),
        }
    }

    /// Read the current state
    pub fn get(&self) -> S {
        (self.read)()
    }

    /// Check if both accessors are the same allocation
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.read, &other.read)
    }
}

impl<S> StateThunk<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Accessor that always returns a copy of `state`
    pub fn of(state: S) -> Self {
        Self::new(move || state.clone())
    }
}

impl<S> Clone for StateThunk<S> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
        }
    }
}

impl<S> fmt::Debug for StateThunk<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateThunk").finish_non_exhaustive()
    }
}

/// Asynchronous state transition run on mount and after every navigation.
///
/// Given the parsed route, how it was reached and the current state, produce
/// the next state and optionally a payload for the host. A payload that
/// decodes into a [`NavigationRequest`](crate::NavigationRequest) makes the
/// coordinator navigate again, which in turn runs this transition again, so
/// implementations must not request navigation unconditionally.
///
/// # Example
///
/// ```
/// use state_navigator::{transition_fn, NavigationResponse, StateTransition};
///
/// let transition = transition_fn(|id: u32, _response: NavigationResponse, _count: usize| async move {
///     (id as usize, None::<()>)
/// });
///
/// let (next, payload) = pollster::block_on(transition.next_state(3, NavigationResponse::Push, 0));
/// assert_eq!(next, 3);
/// assert!(payload.is_none());
/// ```
pub trait StateTransition<S, P, R>: Send + Sync + 'static {
    fn next_state(
        &self,
        route: R,
        response: NavigationResponse,
        state: S,
    ) -> BoxFuture<(S, Option<P>)>;
}

/// Create a transition from an async function or closure
pub fn transition_fn<S, P, R, F, Fut>(f: F) -> FnTransition<F>
where
    F: Fn(R, NavigationResponse, S) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (S, Option<P>)> + Send + 'static,
{
    FnTransition { f }
}

/// Transition created from a function or closure
pub struct FnTransition<F> {
    f: F,
}

impl<S, P, R, F, Fut> StateTransition<S, P, R> for FnTransition<F>
where
    F: Fn(R, NavigationResponse, S) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (S, Option<P>)> + Send + 'static,
{
    fn next_state(
        &self,
        route: R,
        response: NavigationResponse,
        state: S,
    ) -> BoxFuture<(S, Option<P>)> {
        Box::pin((self.f)(route, response, state))
    }
}

/// Boxed transition for dynamic dispatch
pub type BoxedTransition<S, P, R> = Box<dyn StateTransition<S, P, R>>;

impl<S, P, R> StateTransition<S, P, R> for BoxedTransition<S, P, R>
where
    S: 'static,
    P: 'static,
    R: 'static,
{
    fn next_state(
        &self,
        route: R,
        response: NavigationResponse,
        state: S,
    ) -> BoxFuture<(S, Option<P>)> {
        (**self).next_state(route, response, state)
    }
}
