//! Route/state coordinator
//!
//! Ties the history, the route codec, the extractor and the state functions
//! together. [`CoordinatorBuilder::build`] computes the initial state and
//! returns [`Bindings`], the set of hooks a host UI layer drives:
//!
//! - [`SyncSideEffect`] - dispatch navigation carried by a payload, synchronously
//! - [`OnMount`] - run the state transition for the location at mount time
//! - [`AsyncCallbackRegistrar`] - run the state transition after every navigation
//! - [`SyncCallbackRegistrar`] - ask for confirmation before leaving (only when a
//!   blocker was configured)
//!
//! Every hook dispatches at most one [`NavigationRequest`] per invocation.
//! Navigations issued by the coordinator reach history listeners like any
//! other, so a transition that always requests navigation loops forever.

#[cfg(feature = "cache")]
use crate::cache::RouteCache;
use crate::codec::RouteCodec;
use crate::error::ConfigError;
use crate::extract::{ExtractNavigation, Extracted, NoNavigation};
use crate::guards::TransitionBlocker;
use crate::history::{HistoryAction, HistoryProvider, Location, MemoryHistory, Subscription};
#[cfg(feature = "cache")]
use crate::history::lock;
use crate::request::{FoldNavigationRequest, NavigationRequest};
use crate::response::NavigationResponse;
use crate::state::{BoxFuture, StateThunk, StateTransition};
use crate::{debug_log, info_log, trace_log};
use std::fmt;
#[cfg(feature = "cache")]
use std::num::NonZeroUsize;
#[cfg(feature = "cache")]
use std::sync::Mutex;
use std::sync::Arc;

/// Result of a state step: the payload that continues downstream and the new accessor
pub type StepOutput<S, P> = (Option<P>, StateThunk<S>);

/// A state step prepared for one navigation event, waiting for the current state
pub type AsyncStateStep<S, P> = Box<dyn FnOnce(StateThunk<S>) -> BoxFuture<StepOutput<S, P>> + Send>;

// ============================================================================
// Core
// ============================================================================

struct Core<S, P, R> {
    history: Arc<dyn HistoryProvider>,
    codec: Box<dyn RouteCodec<R>>,
    not_found: R,
    extractor: Box<dyn ExtractNavigation<P, R>>,
    transition: Box<dyn StateTransition<S, P, R>>,
    #[cfg(feature = "cache")]
    cache: Option<Mutex<RouteCache<R>>>,
}

impl<S, P, R> Core<S, P, R>
where
    S: Clone + Send + Sync + 'static,
    P: Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    #[cfg(feature = "cache")]
    fn parse(&self, path: &str) -> Option<R> {
        let Some(cache) = &self.cache else {
            return self.codec.parse(path);
        };
        if let Some(route) = lock(cache).get(path) {
            return Some(route);
        }
        let parsed = self.codec.parse(path);
        if let Some(route) = &parsed {
            lock(cache).insert(path.to_string(), route.clone());
        }
        parsed
    }

    #[cfg(not(feature = "cache"))]
    fn parse(&self, path: &str) -> Option<R> {
        self.codec.parse(path)
    }

    /// Parse a pathname, falling back to the not-found route
    fn resolve(&self, path: &str) -> R {
        match self.parse(path) {
            Some(route) => {
                trace_log!("Resolved route for '{}'", path);
                route
            }
            None => {
                debug_log!("No route matches '{}', using the not-found route", path);
                self.not_found.clone()
            }
        }
    }

    fn dispatch(&self, request: NavigationRequest<R>) {
        request.fold(&mut HistoryDispatch {
            history: self.history.as_ref(),
            codec: self.codec.as_ref(),
        });
    }

    /// Dispatch the request a payload carries, returning what continues downstream
    fn extract_and_dispatch(&self, payload: P) -> P {
        match self.extractor.extract(payload) {
            Extracted::Navigate { request, residual } => {
                self.dispatch(request);
                residual
            }
            Extracted::PassThrough(payload) => payload,
        }
    }

    /// Await the transition for `route`, then dispatch whatever its payload asks for.
    ///
    /// The state is read and the transition started before this returns; the
    /// dispatch happens after the transition resolves and before the returned
    /// future does.
    fn step(
        self: &Arc<Self>,
        route: R,
        response: NavigationResponse,
        state: &StateThunk<S>,
    ) -> BoxFuture<StepOutput<S, P>> {
        let pending = self.transition.next_state(route, response, state.get());
        let core = Arc::clone(self);
        Box::pin(async move {
            let (next, payload) = pending.await;
            let payload = payload.map(|payload| core.extract_and_dispatch(payload));
            (payload, StateThunk::of(next))
        })
    }
}

/// Performs a request against the history, rendering typed routes first
struct HistoryDispatch<'a, R> {
    history: &'a dyn HistoryProvider,
    codec: &'a dyn RouteCodec<R>,
}

impl<R: 'static> FoldNavigationRequest<R> for HistoryDispatch<'_, R> {
    type Output = ();

    fn push_route(&mut self, route: R) {
        let path = self.codec.render(&route);
        self.push_path(path);
    }

    fn replace_route(&mut self, route: R) {
        let path = self.codec.render(&route);
        self.replace_path(path);
    }

    fn push_path(&mut self, path: String) {
        debug_log!("Dispatching push to '{}'", path);
        self.history.push(&path);
    }

    fn replace_path(&mut self, path: String) {
        debug_log!("Dispatching replace with '{}'", path);
        self.history.replace(&path);
    }

    fn go(&mut self, offset: isize) {
        debug_log!("Dispatching go({})", offset);
        self.history.go(offset);
    }

    fn go_back(&mut self) {
        debug_log!("Dispatching go back");
        self.history.go_back();
    }

    fn go_forward(&mut self) {
        debug_log!("Dispatching go forward");
        self.history.go_forward();
    }
}

// ============================================================================
// Hooks
// ============================================================================

/// Synchronous side-effect hook.
///
/// Never touches the state: it only decides whether the payload carries a
/// navigation to dispatch right away.
pub struct SyncSideEffect<S, P, R> {
    core: Arc<Core<S, P, R>>,
}

impl<S, P, R> SyncSideEffect<S, P, R>
where
    S: Clone + Send + Sync + 'static,
    P: Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Dispatch the payload's request, if any.
    ///
    /// Returns the residual payload (or the original one when nothing matched)
    /// together with the very same state accessor.
    pub fn run(&self, payload: P, state: StateThunk<S>) -> StepOutput<S, P> {
        (Some(self.core.extract_and_dispatch(payload)), state)
    }
}

/// Mount hook, run once when the host becomes active
pub struct OnMount<S, P, R> {
    core: Arc<Core<S, P, R>>,
}

impl<S, P, R> OnMount<S, P, R>
where
    S: Clone + Send + Sync + 'static,
    P: Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Run the state transition for the history's current location
    pub fn run(&self, state: StateThunk<S>) -> BoxFuture<StepOutput<S, P>> {
        let location = self.core.history.location();
        let response = NavigationResponse::from(self.core.history.action());
        let route = self.core.resolve(&location.pathname);
        self.core.step(route, response, &state)
    }
}

/// Hooks run after every navigation event
pub struct AsyncCallbackRegistrar<S, P, R> {
    core: Arc<Core<S, P, R>>,
}

impl<S, P, R> AsyncCallbackRegistrar<S, P, R>
where
    S: Clone + Send + Sync + 'static,
    P: Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Subscribe to the history's navigation events
    pub fn register_callback(
        &self,
        listener: impl Fn(&Location, HistoryAction) + Send + Sync + 'static,
    ) -> Subscription {
        self.core.history.listen(Arc::new(listener))
    }

    /// Prepare the state step for one navigation event.
    ///
    /// The target route is resolved immediately; the transition starts once
    /// the returned step is given the current state.
    pub fn callback_with_state_to_async_state(
        &self,
        location: &Location,
        action: HistoryAction,
    ) -> AsyncStateStep<S, P> {
        let route = self.core.resolve(&location.pathname);
        let response = NavigationResponse::from(action);
        let core = Arc::clone(&self.core);
        Box::new(move |state: StateThunk<S>| core.step(route, response, &state))
    }

    /// Register a listener that prepares a step for every navigation event and
    /// hands it to `on_step`, in the order the history delivers events.
    pub fn subscribe<F>(&self, on_step: F) -> Subscription
    where
        F: Fn(AsyncStateStep<S, P>) + Send + Sync + 'static,
    {
        let registrar = self.clone();
        self.register_callback(move |location, action| {
            on_step(registrar.callback_with_state_to_async_state(location, action));
        })
    }
}

impl<S, P, R> Clone for AsyncCallbackRegistrar<S, P, R> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

/// Hooks asked before every navigation; present only when a blocker was configured
pub struct SyncCallbackRegistrar<S, P, R> {
    core: Arc<Core<S, P, R>>,
    blocker: Arc<dyn TransitionBlocker<S, R>>,
}

impl<S, P, R> SyncCallbackRegistrar<S, P, R>
where
    S: Clone + Send + Sync + 'static,
    P: Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Subscribe a blocking callback to the history
    pub fn register_callback(
        &self,
        blocker: impl Fn(&Location, HistoryAction) -> Option<String> + Send + Sync + 'static,
    ) -> Subscription {
        self.core.history.block(Arc::new(blocker))
    }

    /// Ask the blocker about a pending navigation to `location`.
    ///
    /// `None` allows it; `Some(message)` requests a confirmation prompt.
    pub fn state_to_ret_val(
        &self,
        state: &StateThunk<S>,
        location: &Location,
        action: HistoryAction,
    ) -> Option<String> {
        let route = self.core.resolve(&location.pathname);
        let response = NavigationResponse::from(action);
        let message = self.blocker.prompt(&state.get(), response, &route);
        if let Some(message) = &message {
            debug_log!(
                "{} prompts before {} to '{}': {}",
                self.blocker.name(),
                response,
                location,
                message
            );
        }
        message
    }

    /// Register a blocking callback that reads the state through `state`
    pub fn subscribe(&self, state: StateThunk<S>) -> Subscription {
        let registrar = self.clone();
        self.register_callback(move |location, action| {
            registrar.state_to_ret_val(&state, location, action)
        })
    }
}

impl<S, P, R> Clone for SyncCallbackRegistrar<S, P, R> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            blocker: Arc::clone(&self.blocker),
        }
    }
}

impl<S: 'static, P, R: 'static> fmt::Debug for SyncCallbackRegistrar<S, P, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncCallbackRegistrar")
            .field("blocker", &self.blocker.name())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Bindings
// ============================================================================

/// Everything a host needs to bind its state to the history
pub struct Bindings<S, P, R> {
    /// State computed from the location at construction time
    pub default_state: S,
    pub sync_side_effect: SyncSideEffect<S, P, R>,
    pub on_mount: OnMount<S, P, R>,
    pub async_callback_registrar: AsyncCallbackRegistrar<S, P, R>,
    pub sync_callback_registrar: Option<SyncCallbackRegistrar<S, P, R>>,
}

impl<S, P, R> Bindings<S, P, R> {
    /// The history this coordinator owns
    pub fn history(&self) -> &Arc<dyn HistoryProvider> {
        &self.on_mount.core.history
    }
}

impl<S: fmt::Debug + 'static, P, R: 'static> fmt::Debug for Bindings<S, P, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bindings")
            .field("default_state", &self.default_state)
            .field("sync_callback_registrar", &self.sync_callback_registrar)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Assembles a coordinator
///
/// # Example
///
/// ```
/// use state_navigator::*;
/// use std::sync::Arc;
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Page { Home, Item(u32), NotFound }
///
/// let history = Arc::new(MemoryHistory::new("/items/42"));
///
/// let bindings = CoordinatorBuilder::<Option<u32>, (), Page>::new()
///     .history(history.clone())
///     .codec(codec_fn(
///         |path: &str| match path {
///             "/" => Some(Page::Home),
///             _ => path.strip_prefix("/items/")?.parse().ok().map(Page::Item),
///         },
///         |page: &Page| match page {
///             Page::Item(id) => format!("/items/{id}"),
///             _ => "/".to_string(),
///         },
///     ))
///     .not_found(Page::NotFound)
///     .default_state(|_response, page: &Page| match page {
///         Page::Item(id) => Some(*id),
///         _ => None,
///     })
///     .transition(transition_fn(
///         |page: Page, _response: NavigationResponse, _state: Option<u32>| async move {
///             let selected = match page { Page::Item(id) => Some(id), _ => None };
///             (selected, None)
///         },
///     ))
///     .build()
///     .unwrap();
///
/// assert_eq!(bindings.default_state, Some(42));
/// ```
pub struct CoordinatorBuilder<S, P, R> {
    history: Option<Arc<dyn HistoryProvider>>,
    codec: Option<Box<dyn RouteCodec<R>>>,
    not_found: Option<R>,
    extractor: Option<Box<dyn ExtractNavigation<P, R>>>,
    default_state: Option<Box<dyn FnOnce(NavigationResponse, &R) -> S>>,
    transition: Option<Box<dyn StateTransition<S, P, R>>>,
    blocker: Option<Arc<dyn TransitionBlocker<S, R>>>,
    #[cfg(feature = "cache")]
    parse_cache: Option<usize>,
}

impl<S, P, R> CoordinatorBuilder<S, P, R>
where
    S: Clone + Send + Sync + 'static,
    P: Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            history: None,
            codec: None,
            not_found: None,
            extractor: None,
            default_state: None,
            transition: None,
            blocker: None,
            #[cfg(feature = "cache")]
            parse_cache: None,
        }
    }

    /// History handle owned by the coordinator.
    ///
    /// Defaults to a fresh [`MemoryHistory`] at `/`.
    pub fn history<H: HistoryProvider>(mut self, history: Arc<H>) -> Self {
        self.history = Some(history as Arc<dyn HistoryProvider>);
        self
    }

    /// Route codec (required)
    pub fn codec(mut self, codec: impl RouteCodec<R>) -> Self {
        self.codec = Some(Box::new(codec));
        self
    }

    /// Route used for paths the codec cannot parse (required)
    pub fn not_found(mut self, route: R) -> Self {
        self.not_found = Some(route);
        self
    }

    /// Payload extractor. Defaults to [`NoNavigation`].
    pub fn extractor(mut self, extractor: impl ExtractNavigation<P, R>) -> Self {
        self.extractor = Some(Box::new(extractor));
        self
    }

    /// Initial state from the starting route (required)
    pub fn default_state<F>(mut self, default_state: F) -> Self
    where
        F: FnOnce(NavigationResponse, &R) -> S + 'static,
    {
        self.default_state = Some(Box::new(default_state));
        self
    }

    /// State transition run on mount and after every navigation (required)
    pub fn transition(mut self, transition: impl StateTransition<S, P, R>) -> Self {
        self.transition = Some(Box::new(transition));
        self
    }

    /// Blocker consulted before navigation; enables the sync callback registrar
    pub fn block_transition(mut self, blocker: impl TransitionBlocker<S, R>) -> Self {
        self.blocker = Some(Arc::new(blocker));
        self
    }

    /// Memoise parsed routes in an LRU cache of `capacity` entries
    #[cfg(feature = "cache")]
    pub fn parse_cache(mut self, capacity: usize) -> Self {
        self.parse_cache = Some(capacity);
        self
    }

    /// Compute the initial state and hand out the hooks.
    ///
    /// Reads the history's current location and action but never mutates it.
    pub fn build(self) -> Result<Bindings<S, P, R>, ConfigError> {
        let codec = self.codec.ok_or(ConfigError::MissingCodec)?;
        let not_found = self.not_found.ok_or(ConfigError::MissingNotFoundRoute)?;
        let default_state = self.default_state.ok_or(ConfigError::MissingDefaultState)?;
        let transition = self.transition.ok_or(ConfigError::MissingTransition)?;
        let extractor = self
            .extractor
            .unwrap_or_else(|| Box::new(NoNavigation) as Box<dyn ExtractNavigation<P, R>>);

        #[cfg(feature = "cache")]
        let cache = match self.parse_cache {
            Some(capacity) => {
                let capacity = NonZeroUsize::new(capacity).ok_or(ConfigError::ZeroCacheCapacity)?;
                Some(Mutex::new(RouteCache::with_capacity(capacity)))
            }
            None => None,
        };

        let history = self.history.unwrap_or_else(|| {
            debug_log!("No history supplied, starting a memory history at '/'");
            Arc::new(MemoryHistory::default()) as Arc<dyn HistoryProvider>
        });

        let core = Arc::new(Core {
            history,
            codec,
            not_found,
            extractor,
            transition,
            #[cfg(feature = "cache")]
            cache,
        });

        let location = core.history.location();
        let response = NavigationResponse::from(core.history.action());
        let route = core.resolve(&location.pathname);
        let default_state = default_state(response, &route);

        info_log!(
            "Coordinator bound at '{}' ({}), blocking {}",
            location,
            response,
            if self.blocker.is_some() { "on" } else { "off" }
        );

        Ok(Bindings {
            default_state,
            sync_side_effect: SyncSideEffect {
                core: Arc::clone(&core),
            },
            on_mount: OnMount {
                core: Arc::clone(&core),
            },
            async_callback_registrar: AsyncCallbackRegistrar {
                core: Arc::clone(&core),
            },
            sync_callback_registrar: self.blocker.map(|blocker| SyncCallbackRegistrar {
                core: Arc::clone(&core),
                blocker,
            }),
        })
    }
}

impl<S, P, R> Default for CoordinatorBuilder<S, P, R>
where
    S: Clone + Send + Sync + 'static,
    P: Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::codec_fn;
    use crate::guards::blocker_fn;
    use crate::state::transition_fn;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Page {
        Home,
        Item(u32),
        NotFound,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Open(u32),
        Note(&'static str),
    }

    fn page_codec() -> impl RouteCodec<Page> {
        codec_fn(
            |path: &str| match path {
                "/" => Some(Page::Home),
                _ => path
                    .strip_prefix("/items/")?
                    .parse()
                    .ok()
                    .map(Page::Item),
            },
            |page: &Page| match page {
                Page::Home | Page::NotFound => "/".to_string(),
                Page::Item(id) => format!("/items/{id}"),
            },
        )
    }

    fn open_extractor(msg: Msg) -> Extracted<Msg, Page> {
        match msg {
            Msg::Open(id) => {
                Extracted::navigate(NavigationRequest::push_route(Page::Item(id)), Msg::Note("opened"))
            }
            other => Extracted::pass(other),
        }
    }

    fn builder(history: Arc<MemoryHistory>) -> CoordinatorBuilder<Vec<Page>, Msg, Page> {
        CoordinatorBuilder::new()
            .history(history)
            .codec(page_codec())
            .not_found(Page::NotFound)
            .extractor(open_extractor)
            .default_state(|_, page: &Page| vec![page.clone()])
            .transition(transition_fn(
                |page: Page, _: NavigationResponse, mut visited: Vec<Page>| async move {
                    visited.push(page);
                    (visited, None::<Msg>)
                },
            ))
    }

    #[test]
    fn test_missing_parts_are_reported() {
        let missing_codec = CoordinatorBuilder::<u8, (), Page>::new()
            .not_found(Page::NotFound)
            .build();
        assert_eq!(missing_codec.unwrap_err(), ConfigError::MissingCodec);

        let missing_transition = CoordinatorBuilder::<u8, (), Page>::new()
            .codec(page_codec())
            .not_found(Page::NotFound)
            .default_state(|_, _: &Page| 0)
            .build();
        assert_eq!(
            missing_transition.unwrap_err(),
            ConfigError::MissingTransition
        );
    }

    #[cfg(feature = "cache")]
    #[test]
    fn test_zero_cache_capacity_is_rejected() {
        let history = Arc::new(MemoryHistory::new("/"));
        let result = builder(history).parse_cache(0).build();
        assert_eq!(result.unwrap_err(), ConfigError::ZeroCacheCapacity);
    }

    #[test]
    fn test_default_state_uses_not_found_for_unknown_paths() {
        let history = Arc::new(MemoryHistory::new("/definitely/not/a/page"));
        let bindings = builder(history).build().unwrap();
        assert_eq!(bindings.default_state, vec![Page::NotFound]);
    }

    #[test]
    fn test_default_history_starts_at_root() {
        let bindings = CoordinatorBuilder::<Vec<Page>, Msg, Page>::new()
            .codec(page_codec())
            .not_found(Page::NotFound)
            .default_state(|_, page: &Page| vec![page.clone()])
            .transition(transition_fn(
                |_: Page, _: NavigationResponse, state: Vec<Page>| async move { (state, None::<Msg>) },
            ))
            .build()
            .unwrap();

        assert_eq!(bindings.default_state, vec![Page::Home]);
        assert_eq!(bindings.history().location().pathname, "/");
        assert!(bindings.sync_callback_registrar.is_none());
    }

    #[test]
    fn test_sync_side_effect_dispatches_rendered_route() {
        let history = Arc::new(MemoryHistory::new("/"));
        let bindings = builder(Arc::clone(&history)).build().unwrap();
        let state = StateThunk::of(Vec::new());

        let (payload, returned) = bindings.sync_side_effect.run(Msg::Open(3), state.clone());

        assert_eq!(payload, Some(Msg::Note("opened")));
        assert!(returned.same_as(&state));
        assert_eq!(history.location().pathname, "/items/3");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_sync_side_effect_passes_through() {
        let history = Arc::new(MemoryHistory::new("/"));
        let bindings = builder(Arc::clone(&history)).build().unwrap();
        let state = StateThunk::of(Vec::new());

        let (payload, returned) = bindings.sync_side_effect.run(Msg::Note("hi"), state.clone());

        assert_eq!(payload, Some(Msg::Note("hi")));
        assert!(returned.same_as(&state));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_on_mount_runs_transition_for_current_location() {
        let history = Arc::new(MemoryHistory::new("/items/8"));
        let bindings = builder(history).build().unwrap();

        let (payload, state) =
            pollster::block_on(bindings.on_mount.run(StateThunk::of(vec![Page::Home])));

        assert_eq!(payload, None);
        assert_eq!(state.get(), vec![Page::Home, Page::Item(8)]);
    }

    #[test]
    fn test_async_step_uses_event_location_and_action() {
        let history = Arc::new(MemoryHistory::new("/"));
        let responses = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&responses);
        let bindings = builder(history)
            .transition(transition_fn(
                move |page: Page, response: NavigationResponse, mut state: Vec<Page>| {
                    sink.lock().unwrap().push(response);
                    async move {
                        state.push(page);
                        (state, None::<Msg>)
                    }
                },
            ))
            .build()
            .unwrap();

        let step = bindings
            .async_callback_registrar
            .callback_with_state_to_async_state(&Location::parse("/items/5?x=1"), HistoryAction::Pop);
        let (payload, state) = pollster::block_on(step(StateThunk::of(Vec::new())));

        assert_eq!(payload, None);
        assert_eq!(state.get(), vec![Page::Item(5)]);
        assert_eq!(*responses.lock().unwrap(), vec![NavigationResponse::Pop]);
    }

    struct UnsavedNotes;

    impl TransitionBlocker<Vec<Page>, Page> for UnsavedNotes {
        fn prompt(&self, visited: &Vec<Page>, _: NavigationResponse, _: &Page) -> Option<String> {
            (visited.len() > 2).then(|| "Drop notes?".to_string())
        }

        fn name(&self) -> &str {
            "UnsavedNotes"
        }
    }

    #[test]
    fn test_sync_registrar_reports_blocker_name() {
        let history = Arc::new(MemoryHistory::new("/"));
        let bindings = builder(history).block_transition(UnsavedNotes).build().unwrap();
        let registrar = bindings.sync_callback_registrar.as_ref().unwrap();

        assert!(format!("{registrar:?}").contains("UnsavedNotes"));
        assert!(format!("{bindings:?}").contains("UnsavedNotes"));
        assert_eq!(
            registrar.state_to_ret_val(
                &StateThunk::of(vec![Page::Home, Page::Item(1), Page::Item(2)]),
                &Location::new("/"),
                HistoryAction::Push
            ),
            Some("Drop notes?".to_string())
        );
    }

    #[test]
    fn test_sync_registrar_only_with_blocker() {
        let history = Arc::new(MemoryHistory::new("/"));
        let bindings = builder(history)
            .block_transition(blocker_fn(
                |visited: &Vec<Page>, _: NavigationResponse, target: &Page| {
                    (visited.len() > 1 && *target == Page::Home).then(|| "Leave?".to_string())
                },
            ))
            .build()
            .unwrap();

        let registrar = bindings.sync_callback_registrar.as_ref().unwrap();
        let busy = StateThunk::of(vec![Page::Home, Page::Item(1)]);
        let idle = StateThunk::of(vec![Page::Home]);
        let home = Location::new("/");

        assert_eq!(
            registrar.state_to_ret_val(&busy, &home, HistoryAction::Push),
            Some("Leave?".to_string())
        );
        assert_eq!(registrar.state_to_ret_val(&idle, &home, HistoryAction::Push), None);
        assert_eq!(
            registrar.state_to_ret_val(&busy, &Location::new("/items/2"), HistoryAction::Push),
            None
        );
    }

    #[cfg(feature = "cache")]
    #[test]
    fn test_parse_cache_skips_codec() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let parses = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&parses);
        let history = Arc::new(MemoryHistory::new("/items/1"));
        let bindings = builder(history)
            .codec(codec_fn(
                move |path: &str| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    path.strip_prefix("/items/")?.parse().ok().map(Page::Item)
                },
                |_: &Page| "/".to_string(),
            ))
            .parse_cache(8)
            .build()
            .unwrap();
        assert_eq!(parses.load(Ordering::SeqCst), 1);

        let registrar = &bindings.async_callback_registrar;
        let _ = registrar.callback_with_state_to_async_state(&Location::new("/items/1"), HistoryAction::Pop);
        let _ = registrar.callback_with_state_to_async_state(&Location::new("/items/1"), HistoryAction::Pop);
        assert_eq!(parses.load(Ordering::SeqCst), 1);

        // not-found results are never cached
        let _ = registrar.callback_with_state_to_async_state(&Location::new("/zzz"), HistoryAction::Pop);
        let _ = registrar.callback_with_state_to_async_state(&Location::new("/zzz"), HistoryAction::Pop);
        assert_eq!(parses.load(Ordering::SeqCst), 3);
    }
}
