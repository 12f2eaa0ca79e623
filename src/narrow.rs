//! Narrowing app state for route-driven logic
//!
//! Route handling usually touches a small slice of a larger application
//! state. A [`Lens`] focuses on that slice, and [`narrow_transition`] /
//! [`narrow_blocker`] lift functions written against the slice so they can be
//! handed to the coordinator, which works with the full state.

use crate::guards::TransitionBlocker;
use crate::response::NavigationResponse;
use crate::state::{BoxFuture, StateTransition};
use std::fmt;
use std::sync::Arc;

/// Getter/setter pair focusing `S` onto a sub-state `N`
pub struct Lens<S, N> {
    get: Arc<dyn Fn(&S) -> N + Send + Sync>,
    set: Arc<dyn Fn(S, N) -> S + Send + Sync>,
}

impl<S, N> Lens<S, N> {
    /// # Example
    ///
    /// ```
    /// use state_navigator::Lens;
    ///
    /// #[derive(Clone)]
    /// struct App { selected: Option<u32>, theme: &'static str }
    ///
    /// let lens = Lens::new(
    ///     |app: &App| app.selected,
    ///     |app: App, selected| App { selected, ..app },
    /// );
    ///
    /// let app = lens.set(App { selected: None, theme: "dark" }, Some(4));
    /// assert_eq!(lens.get(&app), Some(4));
    /// assert_eq!(app.theme, "dark");
    /// ```
    pub fn new<G, U>(get: G, set: U) -> Self
    where
        G: Fn(&S) -> N + Send + Sync + 'static,
        U: Fn(S, N) -> S + Send + Sync + 'static,
    {
        Self {
            get: Arc::new(get),
            set: Arc::new(set),
        }
    }

    pub fn get(&self, state: &S) -> N {
        (self.get)(state)
    }

    pub fn set(&self, state: S, narrow: N) -> S {
        (self.set)(state, narrow)
    }
}

impl<S, N> Clone for Lens<S, N> {
    fn clone(&self) -> Self {
        Self {
            get: Arc::clone(&self.get),
            set: Arc::clone(&self.set),
        }
    }
}

impl<S, N> fmt::Debug for Lens<S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lens").finish_non_exhaustive()
    }
}

/// A transition or blocker written against a sub-state, viewed through a lens
pub struct Narrowed<S, N, T> {
    lens: Lens<S, N>,
    inner: T,
}

/// Lift a transition over `N` into a transition over `S`.
///
/// The sub-state is read before the inner transition starts and written back
/// into the full state once it resolves.
pub fn narrow_transition<S, N, T>(lens: Lens<S, N>, transition: T) -> Narrowed<S, N, T> {
    Narrowed {
        lens,
        inner: transition,
    }
}

/// Lift a blocker over `N` into a blocker over `S`
pub fn narrow_blocker<S, N, T>(lens: Lens<S, N>, blocker: T) -> Narrowed<S, N, T> {
    Narrowed {
        lens,
        inner: blocker,
    }
}

impl<S, N, P, R, T> StateTransition<S, P, R> for Narrowed<S, N, T>
where
    S: Send + 'static,
    N: 'static,
    P: 'static,
    R: 'static,
    T: StateTransition<N, P, R>,
{
    fn next_state(
        &self,
        route: R,
        response: NavigationResponse,
        state: S,
    ) -> BoxFuture<(S, Option<P>)> {
        let narrow = self.lens.get(&state);
        let pending = self.inner.next_state(route, response, narrow);
        let lens = self.lens.clone();
        Box::pin(async move {
            let (narrow, payload) = pending.await;
            (lens.set(state, narrow), payload)
        })
    }
}

impl<S, N, R, T> TransitionBlocker<S, R> for Narrowed<S, N, T>
where
    S: 'static,
    N: 'static,
    T: TransitionBlocker<N, R>,
{
    fn prompt(&self, state: &S, response: NavigationResponse, route: &R) -> Option<String> {
        self.inner.prompt(&self.lens.get(state), response, route)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn priority(&self) -> i32 {
        self.inner.priority()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guards::blocker_fn;
    use crate::state::transition_fn;

    #[derive(Debug, Clone, PartialEq)]
    struct App {
        selected: Option<u32>,
        draft: String,
    }

    fn selected_lens() -> Lens<App, Option<u32>> {
        Lens::new(
            |app: &App| app.selected,
            |app: App, selected| App { selected, ..app },
        )
    }

    fn draft_lens() -> Lens<App, String> {
        Lens::new(|app: &App| app.draft.clone(), |app: App, draft| App { draft, ..app })
    }

    #[test]
    fn test_narrowed_transition_writes_back() {
        let transition = narrow_transition(
            selected_lens(),
            transition_fn(
                |item: u32, _: NavigationResponse, _previous: Option<u32>| async move {
                    (Some(item), Some("loaded"))
                },
            ),
        );
        let app = App {
            selected: None,
            draft: "keep me".to_string(),
        };

        let (next, payload) =
            pollster::block_on(transition.next_state(9, NavigationResponse::Push, app));

        assert_eq!(
            next,
            App {
                selected: Some(9),
                draft: "keep me".to_string(),
            }
        );
        assert_eq!(payload, Some("loaded"));
    }

    #[test]
    fn test_narrowed_blocker_reads_sub_state() {
        let blocker = narrow_blocker(
            draft_lens(),
            blocker_fn(|draft: &String, _: NavigationResponse, _: &u32| {
                (!draft.is_empty()).then(|| "Discard draft?".to_string())
            }),
        );

        let clean = App {
            selected: None,
            draft: String::new(),
        };
        let dirty = App {
            selected: None,
            draft: "wip".to_string(),
        };

        assert_eq!(blocker.prompt(&clean, NavigationResponse::Push, &1), None);
        assert_eq!(
            blocker.prompt(&dirty, NavigationResponse::Push, &1),
            Some("Discard draft?".to_string())
        );
    }
}
